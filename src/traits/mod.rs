//! Trait definitions for the toolkit, controller and sensor seams.
//!
//! This module defines the abstractions that keep the panel core free of
//! pixels, buses and timers:
//! - The graphics toolkit sits behind [`WidgetSink`]
//! - The heater controller listens through [`ToggleListener`] and [`SetpointListener`]
//! - The sensor front end (or simulator) implements [`TelemetrySource`]
//!
//! # Submodules
//!
//! - `widgets`: Widget handles, geometry, severity and the sink trait
//! - `listeners`: Operator-intent notification hooks
//! - `source`: Per-tick telemetry producer
//!
//! # Implementations
//!
//! For tests and desktop development, use the mocks from
//! [`crate::hal::mock`]. With the `display` feature,
//! `hal::graphics::GraphicsPanel` renders to any `embedded-graphics` target.

pub mod listeners;
pub mod source;
pub mod widgets;

pub use listeners::*;
pub use source::*;
pub use widgets::*;
