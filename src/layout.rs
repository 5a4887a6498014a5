//! Widget handles produced by the scene builder.
//!
//! The scene builder lays out the widget tree once at startup and fills in a
//! [`PanelLayout`]. Every handle is optional: a layout that leaves a region
//! out (a smaller panel, a test harness) simply leaves its handles `None`,
//! and the panel core skips those widgets.

use crate::heat::Zone;
use crate::traits::WidgetId;

/// Dial plus numeric readout of one pressure gauge card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeWidgets {
    /// Arc gauge.
    pub dial: Option<WidgetId>,
    /// `"<n> PSI"` label.
    pub readout: Option<WidgetId>,
}

/// Widgets of the ratio deviation bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatioBarWidgets {
    /// Background track. Its size drives the fill geometry.
    pub track: Option<WidgetId>,
    /// Fill rectangle, a child of the track.
    pub fill: Option<WidgetId>,
    /// Numeric ratio label.
    pub readout: Option<WidgetId>,
}

/// Widgets of one hose heat zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneWidgets {
    /// `"ON"` / `"OFF"` status label.
    pub status: Option<WidgetId>,
    /// Caption of the toggle button (`"HEAT: ON"` / `"HEAT: OFF"`).
    pub toggle_label: Option<WidgetId>,
    /// `"Set: <n> °F"` label.
    pub setpoint: Option<WidgetId>,
    /// Measured hose temperature label.
    pub temp: Option<WidgetId>,
}

/// Status banner and interlock line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerWidgets {
    /// Tinted banner background.
    pub panel: Option<WidgetId>,
    /// Banner text.
    pub label: Option<WidgetId>,
    /// Interlock line, hidden unless the interlock is tripped.
    pub interlock_line: Option<WidgetId>,
}

/// All widget handles the panel core drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelLayout {
    /// Iso high-pressure gauge.
    pub iso_hp: GaugeWidgets,
    /// Resin high-pressure gauge.
    pub resin_hp: GaugeWidgets,
    /// Iso low-pressure gauge.
    pub iso_low: GaugeWidgets,
    /// Resin low-pressure gauge.
    pub resin_low: GaugeWidgets,
    /// Primary air gauge.
    pub primary_air: GaugeWidgets,
    /// Gun air gauge.
    pub gun_air: GaugeWidgets,
    /// Iso high-pressure temperature label.
    pub iso_hp_temp: Option<WidgetId>,
    /// Resin high-pressure temperature label.
    pub resin_hp_temp: Option<WidgetId>,
    /// `"Low: <t> °F"` line on the iso high-pressure card.
    pub iso_low_temp_hp_card: Option<WidgetId>,
    /// `"Low: <t> °F"` line on the resin high-pressure card.
    pub resin_low_temp_hp_card: Option<WidgetId>,
    /// Iso low-pressure temperature label.
    pub iso_low_temp: Option<WidgetId>,
    /// Resin low-pressure temperature label.
    pub resin_low_temp: Option<WidgetId>,
    /// Ratio deviation bar.
    pub ratio: RatioBarWidgets,
    /// Hose heat zones, zone 1 first.
    pub hoses: [ZoneWidgets; 2],
    /// Status banner.
    pub banner: BannerWidgets,
}

impl PanelLayout {
    /// Widgets of `zone`.
    pub fn zone(&self, zone: Zone) -> &ZoneWidgets {
        &self.hoses[zone.index()]
    }

    /// Assigns consecutive handles to every widget, starting at `first`.
    ///
    /// Handy for mocks and the simulator, which have no real scene registry.
    pub fn sequential(first: u16) -> Self {
        let mut next = first;
        let mut id = || {
            let id = WidgetId(next);
            next = next.wrapping_add(1);
            Some(id)
        };
        let mut gauge = || GaugeWidgets {
            dial: id(),
            readout: id(),
        };
        let iso_hp = gauge();
        let resin_hp = gauge();
        let iso_low = gauge();
        let resin_low = gauge();
        let primary_air = gauge();
        let gun_air = gauge();

        let mut zone = || ZoneWidgets {
            status: id(),
            toggle_label: id(),
            setpoint: id(),
            temp: id(),
        };
        let hoses = [zone(), zone()];

        Self {
            iso_hp,
            resin_hp,
            iso_low,
            resin_low,
            primary_air,
            gun_air,
            iso_hp_temp: id(),
            resin_hp_temp: id(),
            iso_low_temp_hp_card: id(),
            resin_low_temp_hp_card: id(),
            iso_low_temp: id(),
            resin_low_temp: id(),
            ratio: RatioBarWidgets {
                track: id(),
                fill: id(),
                readout: id(),
            },
            hoses,
            banner: BannerWidgets {
                panel: id(),
                label: id(),
                interlock_line: id(),
            },
        }
    }

    /// Number of handles [`PanelLayout::sequential`] assigns.
    pub const SEQUENTIAL_COUNT: u16 = 6 * 2 + 2 * 4 + 6 + 3 + 3;
}
