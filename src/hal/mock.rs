//! Mock implementations for testing without a display.
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPanel`] | [`WidgetSink`] | Records the last value written to each widget |
//! | [`SimulatedRig`] | [`TelemetrySource`] | Synthetic rig telemetry (requires `std`) |
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::{ControlPanel, PanelConfig, PanelLayout, TelemetrySample};
//! use foamrig_panel::hal::MockPanel;
//! use foamrig_panel::traits::Size;
//!
//! let layout = PanelLayout::sequential(0);
//! let mut sink = MockPanel::new();
//! sink.set_size(layout.ratio.track.unwrap(), Size::new(60, 200));
//!
//! let mut panel = ControlPanel::new(sink, layout, PanelConfig::default()).unwrap();
//! panel.push_telemetry(TelemetrySample { gun_air_psi: 72.0, ..TelemetrySample::default() });
//!
//! let sink = panel.sink();
//! assert_eq!(sink.dial(layout.gun_air.dial.unwrap()), Some(72));
//! assert_eq!(sink.text(layout.gun_air.readout.unwrap()), Some("72 PSI"));
//! assert!(sink.geometry(layout.ratio.fill.unwrap()).is_some());
//! ```
//!
//! [`WidgetSink`]: crate::traits::WidgetSink
//! [`TelemetrySource`]: crate::traits::TelemetrySource

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::traits::{Geometry, Severity, Size, WidgetId, WidgetSink};

#[cfg(feature = "std")]
use crate::telemetry::TelemetrySample;
#[cfg(feature = "std")]
use crate::traits::TelemetrySource;

// ============================================================================
// Widget Sink Mock
// ============================================================================

/// Recording widget sink.
///
/// Keeps the last value written to each widget and counts writes. Sizes are
/// set by the test to stand in for the toolkit's layout pass.
///
/// # Example
///
/// ```rust
/// use foamrig_panel::hal::MockPanel;
/// use foamrig_panel::traits::{Size, WidgetId, WidgetSink};
///
/// let mut panel = MockPanel::new();
/// panel.set_text(WidgetId(4), "ON");
/// panel.set_size(WidgetId(9), Size::new(60, 200));
///
/// assert_eq!(panel.text(WidgetId(4)), Some("ON"));
/// assert_eq!(panel.size_of(WidgetId(9)), Some(Size::new(60, 200)));
/// assert_eq!(panel.call_count(), 1); // layout is not a write
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockPanel {
    dials: BTreeMap<WidgetId, i32>,
    texts: BTreeMap<WidgetId, String>,
    geometries: BTreeMap<WidgetId, Geometry>,
    styles: BTreeMap<WidgetId, Severity>,
    visibility: BTreeMap<WidgetId, bool>,
    sizes: BTreeMap<WidgetId, Size>,
    call_count: usize,
    text_writes: usize,
}

impl MockPanel {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out a widget at `size`.
    pub fn set_size(&mut self, id: WidgetId, size: Size) {
        self.sizes.insert(id, size);
    }

    /// Last dial value written to `id`.
    pub fn dial(&self, id: WidgetId) -> Option<i32> {
        self.dials.get(&id).copied()
    }

    /// Last text written to `id`.
    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    /// Last geometry written to `id`.
    pub fn geometry(&self, id: WidgetId) -> Option<Geometry> {
        self.geometries.get(&id).copied()
    }

    /// Last severity written to `id`.
    pub fn style(&self, id: WidgetId) -> Option<Severity> {
        self.styles.get(&id).copied()
    }

    /// Last visibility written to `id`.
    pub fn visible(&self, id: WidgetId) -> Option<bool> {
        self.visibility.get(&id).copied()
    }

    /// Total number of writes (all setters).
    pub fn call_count(&self) -> usize {
        self.call_count
    }

    /// Number of `set_text` calls.
    pub fn text_writes(&self) -> usize {
        self.text_writes
    }

    /// Resets the write counters, keeping recorded values.
    pub fn reset_counts(&mut self) {
        self.call_count = 0;
        self.text_writes = 0;
    }
}

impl WidgetSink for MockPanel {
    fn set_dial(&mut self, id: WidgetId, value: i32) {
        self.call_count += 1;
        self.dials.insert(id, value);
    }

    fn set_text(&mut self, id: WidgetId, text: &str) {
        self.call_count += 1;
        self.text_writes += 1;
        let slot = self.texts.entry(id).or_default();
        slot.clear();
        slot.push_str(text);
    }

    fn set_geometry(&mut self, id: WidgetId, geometry: Geometry) {
        self.call_count += 1;
        self.geometries.insert(id, geometry);
    }

    fn set_style(&mut self, id: WidgetId, severity: Severity) {
        self.call_count += 1;
        self.styles.insert(id, severity);
    }

    fn set_visible(&mut self, id: WidgetId, visible: bool) {
        self.call_count += 1;
        self.visibility.insert(id, visible);
    }

    fn size_of(&self, id: WidgetId) -> Option<Size> {
        self.sizes.get(&id).copied()
    }
}

// ============================================================================
// Telemetry Source Mock
// ============================================================================

/// Synthetic rig telemetry.
///
/// High-side pressures swing sinusoidally, a little out of phase, so the
/// ratio wanders around 1.0. Everything else holds steady.
///
/// # Example
///
/// ```rust
/// use foamrig_panel::hal::SimulatedRig;
/// use foamrig_panel::traits::TelemetrySource;
///
/// let mut rig = SimulatedRig::new();
/// let sample = rig.next_sample();
/// assert!((980.0..=1220.0).contains(&sample.iso_hp_psi));
/// assert_eq!(sample.gun_air_psi, 85.0);
/// ```
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SimulatedRig {
    t: f32,
}

#[cfg(feature = "std")]
impl SimulatedRig {
    /// Phase advance per tick.
    pub const STEP: f32 = 0.03;

    /// Starts at phase 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> f32 {
        self.t
    }

    /// Sample at phase `t`.
    pub fn sample_at(t: f32) -> TelemetrySample {
        let iso_hp_psi = 1100.0 + 120.0 * t.sin();
        let resin_hp_psi = 1080.0 + 120.0 * (t + 0.7).sin();
        let ratio = if resin_hp_psi > 1.0 {
            iso_hp_psi / resin_hp_psi
        } else {
            1.0
        };

        TelemetrySample {
            iso_hp_psi,
            resin_hp_psi,
            iso_low_psi: 120.0,
            resin_low_psi: 115.0,
            primary_air_psi: 95.0,
            gun_air_psi: 85.0,
            iso_hp_temp_f: 74.8,
            resin_hp_temp_f: 71.8,
            iso_low_temp_f: 72.4,
            resin_low_temp_f: 72.5,
            hose1_temp_f: 70.5,
            hose2_temp_f: 70.1,
            ratio,
        }
    }
}

#[cfg(feature = "std")]
impl TelemetrySource for SimulatedRig {
    fn next_sample(&mut self) -> TelemetrySample {
        self.t += Self::STEP;
        Self::sample_at(self.t)
    }
}
