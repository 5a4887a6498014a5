//! Construction-time errors for the panel core.
//!
//! The runtime surface (`push_telemetry`, zone events, banner updates) is
//! total and never returns an error. Only building the panel can fail: a bad
//! channel range or heat limit, a raw zone number from the touch dispatcher,
//! or a fixed-capacity table that is already full.

use core::fmt;

/// Errors raised while binding channels, decoding events or filling
/// fixed-capacity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError {
    /// A channel range has `min > max` or a non-finite bound.
    InvalidRange,
    /// Heat limits with `min > max`, or a setpoint step below 1.
    InvalidConfig,
    /// A raw zone number outside `1..=2`.
    InvalidZone(u8),
    /// A channel binding already carries the maximum number of readouts.
    TooManyReadouts,
    /// The touch dispatcher has no room for another hit region.
    TooManyRegions,
    /// A text does not fit in its fixed-capacity buffer.
    TextOverflow,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange => write!(f, "invalid channel range"),
            Self::InvalidConfig => write!(f, "invalid heat configuration"),
            Self::InvalidZone(zone) => write!(f, "invalid heat zone {zone} (expected 1 or 2)"),
            Self::TooManyReadouts => write!(f, "too many readouts on one channel"),
            Self::TooManyRegions => write!(f, "touch region table full"),
            Self::TextOverflow => write!(f, "text exceeds buffer capacity"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PanelError {}
