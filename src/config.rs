//! Panel configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::config::{HeatConfig, PanelConfig, RatioSource};
//!
//! // Use defaults
//! let config = PanelConfig::default();
//! assert_eq!(config.heat.default_setpoint_f, 125);
//!
//! // Or customize
//! let config = PanelConfig::default()
//!     .with_heat(HeatConfig::default().with_limits(60, 180))
//!     .with_ratio_source(RatioSource::Derived);
//! assert_eq!(config.heat.max_setpoint_f, 180);
//! ```

use heapless::String as HString;

use crate::bindings::ChannelRange;
use crate::error::PanelError;

/// Maximum length for banner and status texts
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating on a char boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let valid_end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= MAX_SHORT_STRING)
        .last()
        .unwrap_or(0);
    try_short_string(&s[..valid_end]).unwrap_or_default()
}

/// Create a ShortString from a &str, failing instead of truncating
pub fn try_short_string(s: &str) -> Result<ShortString, PanelError> {
    let mut hs = ShortString::new();
    hs.push_str(s).map_err(|_| PanelError::TextOverflow)?;
    Ok(hs)
}

// ============================================================================
// Main Config
// ============================================================================

/// Where the displayed mix ratio comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RatioSource {
    /// Trust the `ratio` field of each sample
    #[default]
    Supplied,
    /// Recompute `iso_hp / resin_hp` from the displayed pressures
    Derived,
}

/// Complete panel configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelConfig {
    /// Display ranges per channel group
    pub ranges: ChannelRanges,
    /// Ratio deviation bar tuning
    pub ratio_bar: RatioBarConfig,
    /// Hose heat zone defaults and limits
    pub heat: HeatConfig,
    /// Banner and interlock texts
    pub banner: BannerConfig,
    /// Expected scheduler tick in milliseconds
    pub tick_interval_ms: u32,
    /// Source of the displayed ratio
    pub ratio_source: RatioSource,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            ranges: ChannelRanges::default(),
            ratio_bar: RatioBarConfig::default(),
            heat: HeatConfig::default(),
            banner: BannerConfig::default(),
            tick_interval_ms: 5,
            ratio_source: RatioSource::Supplied,
        }
    }
}

impl PanelConfig {
    /// Set channel ranges
    pub fn with_ranges(mut self, ranges: ChannelRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set ratio bar configuration
    pub fn with_ratio_bar(mut self, ratio_bar: RatioBarConfig) -> Self {
        self.ratio_bar = ratio_bar;
        self
    }

    /// Set heat zone configuration
    pub fn with_heat(mut self, heat: HeatConfig) -> Self {
        self.heat = heat;
        self
    }

    /// Set banner texts
    pub fn with_banner(mut self, banner: BannerConfig) -> Self {
        self.banner = banner;
        self
    }

    /// Set the tick interval
    pub fn with_tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms.max(1);
        self
    }

    /// Set the ratio source
    pub fn with_ratio_source(mut self, source: RatioSource) -> Self {
        self.ratio_source = source;
        self
    }
}

// ============================================================================
// Channel Ranges
// ============================================================================

/// Display ranges, grouped the way the panel lays out its gauges
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelRanges {
    /// Iso/resin high-pressure gauges
    pub high_pressure: ChannelRange,
    /// Iso/resin transfer pressure gauges
    pub low_pressure: ChannelRange,
    /// Primary and gun air gauges
    pub air: ChannelRange,
    /// All temperature readouts
    pub temperature: ChannelRange,
    /// Ratio readout
    pub ratio: ChannelRange,
}

impl Default for ChannelRanges {
    fn default() -> Self {
        Self {
            high_pressure: ChannelRange { min: 0.0, max: 1600.0 },
            low_pressure: ChannelRange { min: 0.0, max: 500.0 },
            air: ChannelRange { min: 0.0, max: 300.0 },
            temperature: ChannelRange { min: 0.0, max: 400.0 },
            ratio: ChannelRange { min: 0.9, max: 1.1 },
        }
    }
}

impl ChannelRanges {
    /// Set the high-pressure range
    pub fn with_high_pressure(mut self, range: ChannelRange) -> Self {
        self.high_pressure = range;
        self
    }

    /// Set the transfer pressure range
    pub fn with_low_pressure(mut self, range: ChannelRange) -> Self {
        self.low_pressure = range;
        self
    }

    /// Set the air pressure range
    pub fn with_air(mut self, range: ChannelRange) -> Self {
        self.air = range;
        self
    }

    /// Set the temperature range
    pub fn with_temperature(mut self, range: ChannelRange) -> Self {
        self.temperature = range;
        self
    }
}

// ============================================================================
// Ratio Bar Config
// ============================================================================

/// Ratio deviation bar tuning
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatioBarConfig {
    /// Ratio shown as the at-rest centred indicator
    pub target: f32,
    /// Deviation at which the fill saturates (0.10 = ±10%)
    pub tolerance: f32,
    /// Fill height at zero deviation, percent of track height
    pub min_fill_pct: u8,
    /// Fill height at saturation, percent of track height
    pub max_fill_pct: u8,
}

impl Default for RatioBarConfig {
    fn default() -> Self {
        Self {
            target: 1.0,
            tolerance: 0.10,
            min_fill_pct: 12,
            max_fill_pct: 90,
        }
    }
}

impl RatioBarConfig {
    /// Smallest accepted tolerance
    pub const MIN_TOLERANCE: f32 = 0.001;

    /// Set the target ratio
    pub fn with_target(mut self, target: f32) -> Self {
        if target.is_finite() {
            self.target = target;
        }
        self
    }

    /// Set the saturation tolerance
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance.max(Self::MIN_TOLERANCE);
        self
    }

    /// Set the fill height bounds (percent); keeps `min <= max <= 100`
    pub fn with_fill_pct(mut self, min: u8, max: u8) -> Self {
        let max = max.min(100);
        self.min_fill_pct = min.min(max);
        self.max_fill_pct = max;
        self
    }
}

// ============================================================================
// Heat Config
// ============================================================================

/// Hose heat zone defaults and limits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatConfig {
    /// Setpoint at power-up (°F)
    pub default_setpoint_f: i32,
    /// Lowest accepted setpoint (°F)
    pub min_setpoint_f: i32,
    /// Highest accepted setpoint (°F)
    pub max_setpoint_f: i32,
    /// Setpoint change per button press (°F)
    pub step_f: i32,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            default_setpoint_f: 125,
            min_setpoint_f: 0,
            max_setpoint_f: 300,
            step_f: 1,
        }
    }
}

impl HeatConfig {
    /// Set the setpoint limits; the default setpoint is pulled inside them
    pub fn with_limits(mut self, min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_setpoint_f = min;
        self.max_setpoint_f = max;
        self.default_setpoint_f = self.default_setpoint_f.clamp(min, max);
        self
    }

    /// Set the power-up setpoint, clamped to the limits
    pub fn with_default_setpoint(mut self, setpoint_f: i32) -> Self {
        self.default_setpoint_f = setpoint_f.clamp(self.min_setpoint_f, self.max_setpoint_f);
        self
    }

    /// Set the per-press step
    pub fn with_step(mut self, step_f: i32) -> Self {
        self.step_f = step_f.max(1);
        self
    }

    /// Checks the limits and step, as the fields are public.
    ///
    /// Fails with [`PanelError::InvalidConfig`] if `min > max` or `step_f < 1`.
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.min_setpoint_f > self.max_setpoint_f || self.step_f < 1 {
            return Err(PanelError::InvalidConfig);
        }
        Ok(())
    }

    /// Clamp a setpoint to the configured limits
    ///
    /// Never panics; with inverted limits the upper one wins.
    pub fn clamp(&self, setpoint_f: i32) -> i32 {
        setpoint_f.max(self.min_setpoint_f).min(self.max_setpoint_f)
    }
}

// ============================================================================
// Banner Config
// ============================================================================

/// Texts shown by the interlock state machine
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerConfig {
    /// Banner text in normal operation
    pub normal_text: ShortString,
    /// Banner text while the E-stop is engaged
    pub tripped_text: ShortString,
    /// Interlock status line while the E-stop is engaged
    pub interlock_text: ShortString,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            normal_text: short_string("OK"),
            tripped_text: short_string("E-STOP"),
            interlock_text: short_string("E-STOP ACTIVE"),
        }
    }
}

impl BannerConfig {
    /// Build from three texts, rejecting any that would not fit
    pub fn try_new(normal: &str, tripped: &str, interlock: &str) -> Result<Self, PanelError> {
        Ok(Self {
            normal_text: try_short_string(normal)?,
            tripped_text: try_short_string(tripped)?,
            interlock_text: try_short_string(interlock)?,
        })
    }

    /// Set the normal banner text
    pub fn with_normal_text(mut self, text: &str) -> Self {
        self.normal_text = short_string(text);
        self
    }

    /// Set the tripped banner text
    pub fn with_tripped_text(mut self, text: &str) -> Self {
        self.tripped_text = short_string(text);
        self
    }

    /// Set the interlock status line
    pub fn with_interlock_text(mut self, text: &str) -> Self {
        self.interlock_text = short_string(text);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
