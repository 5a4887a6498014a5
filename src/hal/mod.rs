//! Concrete implementations of the traits in [`crate::traits`].
//!
//! - `mock`: recording sink and simulated rig for desktop development
//! - `graphics`: `embedded-graphics` renderer (requires `display` feature)

pub mod mock;

#[cfg(feature = "display")]
pub mod graphics;

pub use mock::*;

#[cfg(feature = "display")]
pub use graphics::*;
