//! # foamrig-panel
//!
//! Touch-panel core for a spray-foam dispensing rig: live telemetry
//! projection and operator control state.
//!
//! ## Features
//!
//! - **Channel bindings**: each telemetry field maps to its dial, readouts,
//!   range and formatter
//! - **Clamped dials, honest labels**: dials stop at their range, text shows
//!   the raw reading
//! - **Ratio deviation bar**: signed fill that grows up or down from centre
//! - **Heat zones**: per-hose enable and setpoint with listener callbacks
//! - **Interlock**: E-stop state machine driving banner text and tint
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without a display:
//!
//! - `traits` - Widget sink, listener and telemetry source abstractions
//! - `bindings` - Channel → widget binding table
//! - `projector` - Sample → widget projection
//! - `ratio` - Ratio deviation bar geometry
//! - `heat` - Hose heat-zone state
//! - `interlock` - Interlock state machine and banner
//! - `touch` - Touch regions and operator events
//! - `panel` - [`ControlPanel`], the public update/control surface
//! - `hal` - Concrete sinks (mock for testing, `embedded-graphics` renderer)
//!
//! ## Example
//!
//! ```rust
//! use foamrig_panel::{
//!     ControlPanel, InterlockState, PanelConfig, PanelLayout, TelemetrySample, Zone,
//!     hal::MockPanel,
//!     traits::Size,
//! };
//!
//! // Handles normally come from the scene builder
//! let layout = PanelLayout::sequential(0);
//! let mut sink = MockPanel::new();
//! sink.set_size(layout.ratio.track.unwrap(), Size::new(60, 200));
//!
//! let mut panel = ControlPanel::new(sink, layout, PanelConfig::default()).unwrap();
//! panel.on_zone_toggled(|zone: Zone, on: bool| println!("{} heat {}", zone, on));
//!
//! // Once per tick
//! panel.push_telemetry(TelemetrySample { ratio: 1.15, ..TelemetrySample::default() });
//! assert_eq!(panel.sink().text(layout.ratio.readout.unwrap()), Some("1.15"));
//!
//! // Operator actions
//! panel.toggle_zone(Zone::One);
//! assert_eq!(panel.press_estop(), InterlockState::Tripped);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Channel binding table.
pub mod bindings;
/// Panel configuration with builder-style setters.
pub mod config;
/// Construction-time error type.
pub mod error;
/// Allocation-free readout formatting.
pub mod format;
/// Concrete widget sinks and telemetry sources.
pub mod hal;
/// Hose heat-zone control state.
pub mod heat;
/// Interlock state machine and status banner.
pub mod interlock;
/// Widget handles from the scene builder.
pub mod layout;
/// The control panel tying everything together.
pub mod panel;
/// Telemetry → widget projection.
pub mod projector;
/// Mix-ratio deviation bar.
pub mod ratio;
/// Telemetry sample and channel identifiers.
pub mod telemetry;
/// Touch dispatch and operator events.
pub mod touch;
/// Core traits for the toolkit, controller and sensor seams.
pub mod traits;

// Re-exports for convenience
pub use bindings::{BindingTable, ChannelBinding, ChannelRange};
pub use config::{PanelConfig, RatioSource};
pub use error::PanelError;
pub use heat::{HoseZoneState, Zone};
pub use interlock::InterlockState;
pub use layout::PanelLayout;
pub use panel::{ControlPanel, PanelState};
pub use ratio::RatioBarGeometry;
pub use telemetry::{Channel, TelemetrySample};
pub use touch::{PanelEvent, TouchDispatcher};
pub use traits::{Severity, WidgetId, WidgetSink};
