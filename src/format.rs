//! Readout formatting without heap allocation.
//!
//! All display text is built in a fixed-capacity [`ReadoutText`] with
//! `core::fmt::Write`, so formatting works the same with and without `std`.
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::format::{format_readout, FormatKind};
//!
//! let psi = format_readout("", FormatKind::Integer { unit: "PSI" }, 1099.5);
//! assert_eq!(psi.as_str(), "1100 PSI");
//!
//! let temp = format_readout("Low: ", FormatKind::OneDecimal { unit: "°F" }, 72.44);
//! assert_eq!(temp.as_str(), "Low: 72.4 °F");
//!
//! let ratio = format_readout("", FormatKind::Raw, 1.0);
//! assert_eq!(ratio.as_str(), "1.00");
//! ```

use core::fmt::Write;

use heapless::String;

/// Maximum length of a single readout in bytes.
pub const MAX_READOUT: usize = 32;

/// Fixed-capacity readout text.
pub type ReadoutText = String<MAX_READOUT>;

/// Placeholder shown for NaN and infinite readings.
const NO_READING: &str = "--";

/// Placeholder shown when a value does not fit in [`MAX_READOUT`].
const OVERFLOW: &str = "OVF";

/// Magnitude at which an integer readout no longer fits an `i32`.
const I32_SPAN: f32 = 2_147_483_648.0;

/// How a channel value is rendered as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    /// Rounded to the nearest integer (half away from zero), then the unit:
    /// `"1100 PSI"`.
    Integer {
        /// Unit suffix, separated by one space.
        unit: &'static str,
    },
    /// One decimal place, then the unit: `"72.4 °F"`.
    OneDecimal {
        /// Unit suffix, separated by one space.
        unit: &'static str,
    },
    /// Two decimal places, no unit: `"1.03"`.
    Raw,
}

impl FormatKind {
    /// Integer pressure readout.
    pub const PSI: FormatKind = FormatKind::Integer { unit: "PSI" };
    /// One-decimal temperature readout.
    pub const FAHRENHEIT: FormatKind = FormatKind::OneDecimal { unit: "°F" };

    /// Unit suffix, if any.
    pub const fn unit(&self) -> Option<&'static str> {
        match self {
            FormatKind::Integer { unit } | FormatKind::OneDecimal { unit } => Some(unit),
            FormatKind::Raw => None,
        }
    }
}

/// Rounds half away from zero, saturating at the `i32` range.
///
/// NaN maps to 0.
#[inline]
pub fn round_half_away(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

/// Formats `value` per `kind`, preceded by `prefix`.
///
/// Non-finite values show `"--"` in place of the number. A value too wide for
/// the buffer shows `"OVF"` instead of a truncated number.
pub fn format_readout(prefix: &str, kind: FormatKind, value: f32) -> ReadoutText {
    fill(|out| write_readout(out, prefix, kind, value))
}

/// Formats an exact integer with a unit, e.g. `"Set: 125 °F"`.
///
/// Same overflow rule as [`format_readout`].
pub fn format_count(prefix: &str, value: i32, unit: &str) -> ReadoutText {
    fill(|out| write!(out, "{}{} {}", prefix, value, unit))
}

fn fill(write: impl FnOnce(&mut ReadoutText) -> core::fmt::Result) -> ReadoutText {
    let mut text = ReadoutText::new();
    match write(&mut text) {
        Ok(()) => text,
        Err(_) => ReadoutText::try_from(OVERFLOW).unwrap_or_default(),
    }
}

fn write_readout(
    out: &mut ReadoutText,
    prefix: &str,
    kind: FormatKind,
    value: f32,
) -> core::fmt::Result {
    out.push_str(prefix).map_err(|_| core::fmt::Error)?;

    if !value.is_finite() {
        out.push_str(NO_READING).map_err(|_| core::fmt::Error)?;
    } else {
        match kind {
            // Wider than i32 would print a saturated number.
            FormatKind::Integer { .. } if value.abs() >= I32_SPAN => return Err(core::fmt::Error),
            FormatKind::Integer { .. } => write!(out, "{}", round_half_away(value))?,
            FormatKind::OneDecimal { .. } => write!(out, "{:.1}", value)?,
            FormatKind::Raw => write!(out, "{:.2}", value)?,
        }
    }

    if let Some(unit) = kind.unit() {
        write!(out, " {}", unit)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Rounding
    // =========================================================================

    #[test]
    fn round_half_away_positive() {
        assert_eq!(round_half_away(0.4), 0);
        assert_eq!(round_half_away(0.5), 1);
        assert_eq!(round_half_away(1099.5), 1100);
        assert_eq!(round_half_away(1220.49), 1220);
    }

    #[test]
    fn round_half_away_negative() {
        assert_eq!(round_half_away(-0.4), 0);
        assert_eq!(round_half_away(-0.5), -1);
        assert_eq!(round_half_away(-12.6), -13);
    }

    #[test]
    fn round_half_away_saturates() {
        assert_eq!(round_half_away(f32::MAX), i32::MAX);
        assert_eq!(round_half_away(f32::MIN), i32::MIN);
        assert_eq!(round_half_away(f32::NAN), 0);
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    #[test]
    fn integer_with_unit() {
        assert_eq!(format_readout("", FormatKind::PSI, 0.0).as_str(), "0 PSI");
        assert_eq!(format_readout("", FormatKind::PSI, 1980.2).as_str(), "1980 PSI");
        assert_eq!(format_readout("", FormatKind::PSI, -3.7).as_str(), "-4 PSI");
    }

    #[test]
    fn one_decimal_with_unit() {
        assert_eq!(
            format_readout("", FormatKind::FAHRENHEIT, 74.8).as_str(),
            "74.8 °F"
        );
        assert_eq!(
            format_readout("", FormatKind::FAHRENHEIT, 70.0).as_str(),
            "70.0 °F"
        );
    }

    #[test]
    fn prefix_is_prepended() {
        assert_eq!(
            format_readout("Low: ", FormatKind::FAHRENHEIT, 72.5).as_str(),
            "Low: 72.5 °F"
        );
    }

    #[test]
    fn raw_two_decimals() {
        assert_eq!(format_readout("", FormatKind::Raw, 1.15).as_str(), "1.15");
        assert_eq!(format_readout("", FormatKind::Raw, 0.9).as_str(), "0.90");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_readout("", FormatKind::PSI, f32::NAN).as_str(), "-- PSI");
        assert_eq!(
            format_readout("", FormatKind::FAHRENHEIT, f32::INFINITY).as_str(),
            "-- °F"
        );
        assert_eq!(format_readout("", FormatKind::Raw, f32::NAN).as_str(), "--");
    }

    #[test]
    fn oversized_value_shows_overflow() {
        let text = format_readout("", FormatKind::FAHRENHEIT, 1.0e30);
        assert_eq!(text.as_str(), "OVF");
    }

    #[test]
    fn integer_beyond_i32_shows_overflow() {
        assert_eq!(format_readout("", FormatKind::PSI, 1.0e10).as_str(), "OVF");
        assert_eq!(format_readout("", FormatKind::PSI, -1.0e10).as_str(), "OVF");
        assert_eq!(
            format_readout("", FormatKind::PSI, 2_000_000_000.0).as_str(),
            "2000000000 PSI"
        );
    }

    #[test]
    fn count_with_unit() {
        assert_eq!(format_count("Set: ", 125, "°F").as_str(), "Set: 125 °F");
        assert_eq!(format_count("Set: ", i32::MIN, "°F").as_str(), "Set: -2147483648 °F");
        let long = "a prefix that is far too long!! ";
        assert_eq!(format_count(long, 1, "°F").as_str(), "OVF");
    }

    #[test]
    fn units() {
        assert_eq!(FormatKind::PSI.unit(), Some("PSI"));
        assert_eq!(FormatKind::FAHRENHEIT.unit(), Some("°F"));
        assert_eq!(FormatKind::Raw.unit(), None);
    }
}
