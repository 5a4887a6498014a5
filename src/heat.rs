//! Hose heat-zone control state.
//!
//! Two independently controlled hose heater circuits, each with an enable
//! flag and an integer setpoint in °F. The state here is operator intent
//! only: it changes on touch events, never on telemetry, and the external
//! heater controller is told about each change through the panel's
//! listeners.
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::config::HeatConfig;
//! use foamrig_panel::heat::HeatZones;
//! use foamrig_panel::Zone;
//!
//! let mut zones = HeatZones::new(HeatConfig::default());
//! assert!(zones.toggle(Zone::One));
//!
//! let change = zones.adjust(Zone::Two, 3);
//! assert_eq!(change.setpoint_f, 128);
//! assert!(change.changed);
//! ```

use log::{debug, info, warn};

use crate::config::HeatConfig;
use crate::error::PanelError;
use crate::format::{self, FormatKind, ReadoutText};
use crate::layout::ZoneWidgets;
use crate::traits::WidgetSink;

/// One of the two hose heater circuits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    /// Hose zone 1.
    One,
    /// Hose zone 2.
    Two,
}

impl Zone {
    /// Both zones in display order.
    pub const ALL: [Zone; 2] = [Zone::One, Zone::Two];

    /// Operator-facing zone number (1 or 2).
    pub const fn number(self) -> u8 {
        match self {
            Zone::One => 1,
            Zone::Two => 2,
        }
    }

    /// Zero-based index.
    pub const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl TryFrom<u8> for Zone {
    type Error = PanelError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Zone::One),
            2 => Ok(Zone::Two),
            other => Err(PanelError::InvalidZone(other)),
        }
    }
}

impl core::fmt::Display for Zone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "hose {}", self.number())
    }
}

/// Enable flag and setpoint of one zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoseZoneState {
    /// Heater switched on.
    pub enabled: bool,
    /// Target temperature in °F.
    pub setpoint_f: i32,
}

impl Default for HoseZoneState {
    fn default() -> Self {
        Self {
            enabled: false,
            setpoint_f: HeatConfig::default().default_setpoint_f,
        }
    }
}

/// Outcome of a setpoint adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetpointChange {
    /// Setpoint after the adjustment.
    pub setpoint_f: i32,
    /// True if the setpoint moved.
    pub changed: bool,
    /// True if the request was cut short by a limit.
    pub pinned: bool,
}

/// State of both zones.
#[derive(Clone, Debug)]
pub struct HeatZones {
    zones: [HoseZoneState; 2],
    config: HeatConfig,
}

impl Default for HeatZones {
    fn default() -> Self {
        Self::new(HeatConfig::default())
    }
}

impl HeatZones {
    /// Both zones off at the configured default setpoint.
    pub fn new(config: HeatConfig) -> Self {
        let initial = HoseZoneState {
            enabled: false,
            setpoint_f: config.clamp(config.default_setpoint_f),
        };
        Self {
            zones: [initial; 2],
            config,
        }
    }

    /// Current state of `zone`.
    pub fn get(&self, zone: Zone) -> HoseZoneState {
        self.zones[zone.index()]
    }

    /// Flips the enable flag of `zone` and returns the new value.
    pub fn toggle(&mut self, zone: Zone) -> bool {
        let state = &mut self.zones[zone.index()];
        state.enabled = !state.enabled;
        info!("{} heat {}", zone, status_text(state.enabled));
        state.enabled
    }

    /// Moves the setpoint of `zone` by `delta` °F within the configured limits.
    pub fn adjust(&mut self, zone: Zone, delta: i32) -> SetpointChange {
        let state = &mut self.zones[zone.index()];
        let requested = state.setpoint_f.saturating_add(delta);
        let setpoint_f = self.config.clamp(requested);
        let changed = setpoint_f != state.setpoint_f;
        let pinned = setpoint_f != requested;

        if pinned {
            warn!(
                "{} setpoint {} outside [{}, {}], held at {}",
                zone, requested, self.config.min_setpoint_f, self.config.max_setpoint_f, setpoint_f
            );
        }
        if changed {
            debug!("{} setpoint {} -> {}", zone, state.setpoint_f, setpoint_f);
        }

        state.setpoint_f = setpoint_f;
        SetpointChange {
            setpoint_f,
            changed,
            pinned,
        }
    }

    /// Configured step for one press of a setpoint button.
    pub fn step(&self) -> i32 {
        self.config.step_f
    }

    /// Heat configuration.
    pub fn config(&self) -> &HeatConfig {
        &self.config
    }
}

/// `"ON"` / `"OFF"` status text.
pub const fn status_text(enabled: bool) -> &'static str {
    if enabled {
        "ON"
    } else {
        "OFF"
    }
}

/// Toggle button caption.
pub const fn toggle_caption(enabled: bool) -> &'static str {
    if enabled {
        "HEAT: ON"
    } else {
        "HEAT: OFF"
    }
}

/// `"Set: <n> °F"` setpoint text.
pub fn setpoint_text(setpoint_f: i32) -> ReadoutText {
    let unit = FormatKind::FAHRENHEIT.unit().unwrap_or_default();
    format::format_count("Set: ", setpoint_f, unit)
}

/// Writes the enable status of a zone to its widgets.
pub fn paint_enabled<S: WidgetSink + ?Sized>(widgets: &ZoneWidgets, enabled: bool, sink: &mut S) {
    if let Some(status) = widgets.status {
        sink.set_text(status, status_text(enabled));
    }
    if let Some(caption) = widgets.toggle_label {
        sink.set_text(caption, toggle_caption(enabled));
    }
}

/// Writes the setpoint of a zone to its widget.
pub fn paint_setpoint<S: WidgetSink + ?Sized>(widgets: &ZoneWidgets, setpoint_f: i32, sink: &mut S) {
    if let Some(label) = widgets.setpoint {
        sink.set_text(label, &setpoint_text(setpoint_f));
    }
}
