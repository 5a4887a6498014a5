//! Telemetry samples and the logical channels they carry.
//!
//! A [`TelemetrySample`] is produced once per tick by the sensor front end
//! (or the simulator) and handed to
//! [`ControlPanel::push_telemetry`](crate::ControlPanel::push_telemetry) by
//! value. Every push supersedes the previous sample entirely; nothing is
//! averaged or accumulated.
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::{Channel, TelemetrySample};
//!
//! let sample = TelemetrySample {
//!     iso_hp_psi: 1180.0,
//!     resin_hp_psi: 1120.0,
//!     ..TelemetrySample::default()
//! };
//!
//! assert_eq!(sample.value(Channel::IsoHpPsi), 1180.0);
//! assert_eq!(Channel::ALL.len(), Channel::COUNT);
//! ```

/// One tick worth of rig telemetry.
///
/// Pressures are in PSI, temperatures in °F, `ratio` is dimensionless
/// (1.00 means equal iso and resin pressure).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetrySample {
    /// Iso side, high-pressure pump outlet.
    pub iso_hp_psi: f32,
    /// Resin side, high-pressure pump outlet.
    pub resin_hp_psi: f32,
    /// Iso side, transfer (low) pressure.
    pub iso_low_psi: f32,
    /// Resin side, transfer (low) pressure.
    pub resin_low_psi: f32,
    /// Primary air supply.
    pub primary_air_psi: f32,
    /// Gun air supply.
    pub gun_air_psi: f32,
    /// Iso high-pressure heater outlet temperature.
    pub iso_hp_temp_f: f32,
    /// Resin high-pressure heater outlet temperature.
    pub resin_hp_temp_f: f32,
    /// Iso drum / transfer temperature.
    pub iso_low_temp_f: f32,
    /// Resin drum / transfer temperature.
    pub resin_low_temp_f: f32,
    /// Hose zone 1 temperature.
    pub hose1_temp_f: f32,
    /// Hose zone 2 temperature.
    pub hose2_temp_f: f32,
    /// Mix ratio as reported by the telemetry source.
    pub ratio: f32,
}

impl Default for TelemetrySample {
    fn default() -> Self {
        Self {
            iso_hp_psi: 0.0,
            resin_hp_psi: 0.0,
            iso_low_psi: 0.0,
            resin_low_psi: 0.0,
            primary_air_psi: 0.0,
            gun_air_psi: 0.0,
            iso_hp_temp_f: 0.0,
            resin_hp_temp_f: 0.0,
            iso_low_temp_f: 0.0,
            resin_low_temp_f: 0.0,
            hose1_temp_f: 0.0,
            hose2_temp_f: 0.0,
            ratio: 1.0,
        }
    }
}

impl TelemetrySample {
    /// Returns the field carried by `channel`.
    pub const fn value(&self, channel: Channel) -> f32 {
        match channel {
            Channel::IsoHpPsi => self.iso_hp_psi,
            Channel::ResinHpPsi => self.resin_hp_psi,
            Channel::IsoLowPsi => self.iso_low_psi,
            Channel::ResinLowPsi => self.resin_low_psi,
            Channel::PrimaryAirPsi => self.primary_air_psi,
            Channel::GunAirPsi => self.gun_air_psi,
            Channel::IsoHpTempF => self.iso_hp_temp_f,
            Channel::ResinHpTempF => self.resin_hp_temp_f,
            Channel::IsoLowTempF => self.iso_low_temp_f,
            Channel::ResinLowTempF => self.resin_low_temp_f,
            Channel::Hose1TempF => self.hose1_temp_f,
            Channel::Hose2TempF => self.hose2_temp_f,
            Channel::Ratio => self.ratio,
        }
    }

    /// Ratio recomputed from the two high-pressure readings.
    ///
    /// Uses `iso_hp / resin_hp`; falls back to 1.0 while the resin side
    /// reads at or below 1 PSI (pump idle).
    ///
    /// ```rust
    /// use foamrig_panel::TelemetrySample;
    ///
    /// let sample = TelemetrySample {
    ///     iso_hp_psi: 1100.0,
    ///     resin_hp_psi: 1000.0,
    ///     ..TelemetrySample::default()
    /// };
    /// assert!((sample.derived_ratio() - 1.1).abs() < 1e-6);
    ///
    /// let idle = TelemetrySample::default();
    /// assert_eq!(idle.derived_ratio(), 1.0);
    /// ```
    pub fn derived_ratio(&self) -> f32 {
        if self.resin_hp_psi > 1.0 {
            self.iso_hp_psi / self.resin_hp_psi
        } else {
            1.0
        }
    }
}

/// Logical telemetry channel, one per [`TelemetrySample`] field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Channel {
    /// Iso high-pressure, PSI.
    IsoHpPsi,
    /// Resin high-pressure, PSI.
    ResinHpPsi,
    /// Iso transfer pressure, PSI.
    IsoLowPsi,
    /// Resin transfer pressure, PSI.
    ResinLowPsi,
    /// Primary air, PSI.
    PrimaryAirPsi,
    /// Gun air, PSI.
    GunAirPsi,
    /// Iso heater outlet, °F.
    IsoHpTempF,
    /// Resin heater outlet, °F.
    ResinHpTempF,
    /// Iso transfer temperature, °F.
    IsoLowTempF,
    /// Resin transfer temperature, °F.
    ResinLowTempF,
    /// Hose zone 1, °F.
    Hose1TempF,
    /// Hose zone 2, °F.
    Hose2TempF,
    /// Mix ratio, dimensionless.
    Ratio,
}

impl Channel {
    /// Number of channels.
    pub const COUNT: usize = 13;

    /// Every channel, in sample field order.
    pub const ALL: [Channel; Self::COUNT] = [
        Channel::IsoHpPsi,
        Channel::ResinHpPsi,
        Channel::IsoLowPsi,
        Channel::ResinLowPsi,
        Channel::PrimaryAirPsi,
        Channel::GunAirPsi,
        Channel::IsoHpTempF,
        Channel::ResinHpTempF,
        Channel::IsoLowTempF,
        Channel::ResinLowTempF,
        Channel::Hose1TempF,
        Channel::Hose2TempF,
        Channel::Ratio,
    ];

    /// Dense index, usable as a table slot.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name of the sample field this channel reads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::IsoHpPsi => "iso_hp_psi",
            Channel::ResinHpPsi => "resin_hp_psi",
            Channel::IsoLowPsi => "iso_low_psi",
            Channel::ResinLowPsi => "resin_low_psi",
            Channel::PrimaryAirPsi => "primary_air_psi",
            Channel::GunAirPsi => "gun_air_psi",
            Channel::IsoHpTempF => "iso_hp_temp_f",
            Channel::ResinHpTempF => "resin_hp_temp_f",
            Channel::IsoLowTempF => "iso_low_temp_f",
            Channel::ResinLowTempF => "resin_low_temp_f",
            Channel::Hose1TempF => "hose1_temp_f",
            Channel::Hose2TempF => "hose2_temp_f",
            Channel::Ratio => "ratio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distinct_sample() -> TelemetrySample {
        TelemetrySample {
            iso_hp_psi: 1.0,
            resin_hp_psi: 2.0,
            iso_low_psi: 3.0,
            resin_low_psi: 4.0,
            primary_air_psi: 5.0,
            gun_air_psi: 6.0,
            iso_hp_temp_f: 7.0,
            resin_hp_temp_f: 8.0,
            iso_low_temp_f: 9.0,
            resin_low_temp_f: 10.0,
            hose1_temp_f: 11.0,
            hose2_temp_f: 12.0,
            ratio: 13.0,
        }
    }

    #[test]
    fn value_follows_field_order() {
        let sample = distinct_sample();
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(sample.value(*channel), (i + 1) as f32, "{:?}", channel);
        }
    }

    #[test]
    fn index_matches_all_position() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn default_sample_is_at_rest() {
        let sample = TelemetrySample::default();
        assert_eq!(sample.iso_hp_psi, 0.0);
        assert_eq!(sample.ratio, 1.0);
    }

    #[test]
    fn derived_ratio_idle_resin() {
        let sample = TelemetrySample {
            iso_hp_psi: 500.0,
            resin_hp_psi: 1.0,
            ..TelemetrySample::default()
        };
        assert_eq!(sample.derived_ratio(), 1.0);
    }

    #[test]
    fn derived_ratio_running() {
        let sample = TelemetrySample {
            iso_hp_psi: 1000.0,
            resin_hp_psi: 1250.0,
            ..TelemetrySample::default()
        };
        assert!((sample.derived_ratio() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn channel_names() {
        assert_eq!(Channel::IsoHpPsi.as_str(), "iso_hp_psi");
        assert_eq!(Channel::Ratio.as_str(), "ratio");
    }
}
