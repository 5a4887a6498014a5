//! The control panel: public update and control surface.
//!
//! [`ControlPanel`] owns the widget sink and every piece of panel state. The
//! host drives it from two places:
//!
//! - the scheduler calls [`ControlPanel::push_telemetry`] once per tick;
//! - the touch path calls the operator entry points
//!   ([`toggle_zone`](ControlPanel::toggle_zone),
//!   [`adjust_setpoint`](ControlPanel::adjust_setpoint),
//!   [`press_estop`](ControlPanel::press_estop), ...) or hands a
//!   [`PanelEvent`] to [`handle_event`](ControlPanel::handle_event).
//!
//! Every operator action refreshes its labels immediately and, for heat
//! zones, notifies the registered listener. Nothing here blocks or fails at
//! runtime.
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::{ControlPanel, PanelConfig, PanelLayout, TelemetrySample, Zone};
//! use foamrig_panel::hal::MockPanel;
//!
//! let layout = PanelLayout::sequential(0);
//! let mut panel = ControlPanel::new(MockPanel::new(), layout, PanelConfig::default()).unwrap();
//!
//! panel.on_setpoint_changed(|zone: Zone, setpoint_f: i32| {
//!     println!("{} -> {} °F", zone, setpoint_f);
//! });
//!
//! panel.push_telemetry(TelemetrySample::default());
//! panel.setpoint_up(Zone::One);
//!
//! assert_eq!(panel.state().zones[0].setpoint_f, 126);
//! assert_eq!(panel.sink().text(layout.hoses[0].setpoint.unwrap()), Some("Set: 126 °F"));
//! ```

use alloc::boxed::Box;

use crate::bindings::BindingTable;
use crate::config::{PanelConfig, RatioSource};
use crate::error::PanelError;
use crate::heat::{self, HeatZones, HoseZoneState, Zone};
use crate::interlock::{self, Banner, Interlock, InterlockState};
use crate::layout::PanelLayout;
use crate::projector;
use crate::ratio::{RatioBar, RatioBarGeometry};
use crate::telemetry::TelemetrySample;
use crate::touch::PanelEvent;
use crate::traits::{SetpointListener, Severity, ToggleListener, WidgetSink};

/// Snapshot of the panel's operator-visible state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelState {
    /// Heat zones, zone 1 first.
    pub zones: [HoseZoneState; 2],
    /// Interlock state.
    pub interlock: InterlockState,
    /// Banner tint.
    pub banner_severity: Severity,
    /// Banner shown.
    pub banner_visible: bool,
    /// Last placed ratio fill, if the bar has been laid out.
    pub ratio_bar: Option<RatioBarGeometry>,
}

/// Touch-panel core for the spray-foam rig.
///
/// # Type Parameter
///
/// - `S`: the toolkit-facing widget sink ([`WidgetSink`] trait)
///
/// The panel is a plain owned value. It is not meant to be shared between
/// threads; the telemetry tick and touch handling run on the same loop.
pub struct ControlPanel<S: WidgetSink> {
    sink: S,
    layout: PanelLayout,
    bindings: BindingTable,
    ratio_bar: RatioBar,
    zones: HeatZones,
    interlock: Interlock,
    banner: Banner,
    config: PanelConfig,
    toggle_listener: Option<Box<dyn ToggleListener>>,
    setpoint_listener: Option<Box<dyn SetpointListener>>,
    last_sample: Option<TelemetrySample>,
}

impl<S: WidgetSink> ControlPanel<S> {
    /// Builds the panel over the scene builder's `layout` with the standard
    /// channel bindings, then paints the initial zone labels and banner.
    ///
    /// Fails with [`PanelError::InvalidConfig`] on inverted heat limits or a
    /// step below 1, and with [`PanelError::InvalidRange`] on a bad channel
    /// range.
    pub fn new(sink: S, layout: PanelLayout, config: PanelConfig) -> Result<Self, PanelError> {
        let bindings = BindingTable::from_layout(&layout, &config.ranges)?;
        Self::with_bindings(sink, layout, bindings, config)
    }

    /// Like [`ControlPanel::new`] with a caller-supplied binding table.
    pub fn with_bindings(
        sink: S,
        layout: PanelLayout,
        bindings: BindingTable,
        config: PanelConfig,
    ) -> Result<Self, PanelError> {
        config.heat.validate()?;
        let mut panel = Self {
            sink,
            ratio_bar: RatioBar::new(&layout.ratio, config.ratio_bar),
            zones: HeatZones::new(config.heat),
            interlock: Interlock::new(),
            banner: Banner::for_state(InterlockState::Normal, &config.banner),
            layout,
            bindings,
            config,
            toggle_listener: None,
            setpoint_listener: None,
            last_sample: None,
        };
        panel.repaint();
        Ok(panel)
    }

    // ------------------------------------------------------------------------
    // Telemetry
    // ------------------------------------------------------------------------

    /// Projects one telemetry sample onto the panel. Call once per tick.
    pub fn push_telemetry(&mut self, sample: TelemetrySample) {
        let sample = match self.config.ratio_source {
            RatioSource::Supplied => sample,
            RatioSource::Derived => TelemetrySample {
                ratio: sample.derived_ratio(),
                ..sample
            },
        };

        projector::project(&self.bindings, &sample, &mut self.sink);
        self.ratio_bar.render(sample.ratio, &mut self.sink);
        self.last_sample = Some(sample);
    }

    /// Last sample pushed, after ratio derivation.
    pub fn last_sample(&self) -> Option<&TelemetrySample> {
        self.last_sample.as_ref()
    }

    // ------------------------------------------------------------------------
    // Heat zones
    // ------------------------------------------------------------------------

    /// Flips the heater enable of `zone`, refreshes its labels and notifies
    /// the toggle listener. Returns the new enable flag.
    pub fn toggle_zone(&mut self, zone: Zone) -> bool {
        let enabled = self.zones.toggle(zone);
        heat::paint_enabled(self.layout.zone(zone), enabled, &mut self.sink);
        if let Some(listener) = self.toggle_listener.as_mut() {
            listener.zone_toggled(zone, enabled);
        }
        enabled
    }

    /// Moves the setpoint of `zone` by `delta` °F, clamped to the configured
    /// limits. Refreshes the label and, if the setpoint moved, notifies the
    /// setpoint listener. Returns the new setpoint.
    pub fn adjust_setpoint(&mut self, zone: Zone, delta: i32) -> i32 {
        let change = self.zones.adjust(zone, delta);
        heat::paint_setpoint(self.layout.zone(zone), change.setpoint_f, &mut self.sink);
        if change.changed {
            if let Some(listener) = self.setpoint_listener.as_mut() {
                listener.setpoint_changed(zone, change.setpoint_f);
            }
        }
        change.setpoint_f
    }

    /// One step up, as the `+` button does.
    pub fn setpoint_up(&mut self, zone: Zone) -> i32 {
        self.adjust_setpoint(zone, self.zones.step())
    }

    /// One step down, as the `-` button does.
    pub fn setpoint_down(&mut self, zone: Zone) -> i32 {
        self.adjust_setpoint(zone, self.zones.step().saturating_neg())
    }

    /// Current state of `zone`.
    pub fn zone(&self, zone: Zone) -> HoseZoneState {
        self.zones.get(zone)
    }

    /// Registers the heater enable listener, replacing any previous one.
    pub fn on_zone_toggled<L: ToggleListener + 'static>(&mut self, listener: L) {
        self.toggle_listener = Some(Box::new(listener));
    }

    /// Registers the heater setpoint listener, replacing any previous one.
    pub fn on_setpoint_changed<L: SetpointListener + 'static>(&mut self, listener: L) {
        self.setpoint_listener = Some(Box::new(listener));
    }

    // ------------------------------------------------------------------------
    // Interlock and banner
    // ------------------------------------------------------------------------

    /// E-stop button: toggles the interlock. Returns the new state.
    pub fn press_estop(&mut self) -> InterlockState {
        let state = self.interlock.press();
        self.show_interlock(state);
        state
    }

    /// Forces the interlock to tripped. Returns true on a transition.
    pub fn trip_interlock(&mut self) -> bool {
        let changed = self.interlock.trip();
        if changed {
            self.show_interlock(InterlockState::Tripped);
        }
        changed
    }

    /// Forces the interlock back to normal. Returns true on a transition.
    pub fn reset_interlock(&mut self) -> bool {
        let changed = self.interlock.reset();
        if changed {
            self.show_interlock(InterlockState::Normal);
        }
        changed
    }

    /// Current interlock state.
    pub fn interlock_state(&self) -> InterlockState {
        self.interlock.state()
    }

    /// Sets the banner directly. `None` or an empty message hides it.
    ///
    /// The interlock state is not affected.
    pub fn set_banner(&mut self, message: Option<&str>, severity: Severity) {
        self.banner.set(message, severity);
        self.banner.paint(&self.layout.banner, &mut self.sink);
    }

    /// Banner as currently displayed.
    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    fn show_interlock(&mut self, state: InterlockState) {
        self.banner = Banner::for_state(state, &self.config.banner);
        self.banner.paint(&self.layout.banner, &mut self.sink);
        interlock::paint_interlock_line(&self.layout.banner, state, &self.config.banner, &mut self.sink);
    }

    // ------------------------------------------------------------------------
    // Events and inspection
    // ------------------------------------------------------------------------

    /// Applies a touch event.
    pub fn handle_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::ToggleZone(zone) => {
                self.toggle_zone(zone);
            }
            PanelEvent::SetpointUp(zone) => {
                self.setpoint_up(zone);
            }
            PanelEvent::SetpointDown(zone) => {
                self.setpoint_down(zone);
            }
            PanelEvent::EStop => {
                self.press_estop();
            }
        }
    }

    /// Rewrites every operator-state widget from the current state.
    ///
    /// Telemetry widgets are left alone until the next push.
    pub fn repaint(&mut self) {
        for zone in Zone::ALL {
            let state = self.zones.get(zone);
            let widgets = self.layout.zone(zone);
            heat::paint_enabled(widgets, state.enabled, &mut self.sink);
            heat::paint_setpoint(widgets, state.setpoint_f, &mut self.sink);
        }
        self.banner.paint(&self.layout.banner, &mut self.sink);
        interlock::paint_interlock_line(
            &self.layout.banner,
            self.interlock.state(),
            &self.config.banner,
            &mut self.sink,
        );
    }

    /// Snapshot for the host UI or logs.
    pub fn state(&self) -> PanelState {
        PanelState {
            zones: [self.zones.get(Zone::One), self.zones.get(Zone::Two)],
            interlock: self.interlock.state(),
            banner_severity: self.banner.severity(),
            banner_visible: self.banner.is_visible(),
            ratio_bar: self.ratio_bar.last(),
        }
    }

    /// Channel bindings in use.
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Widget handles in use.
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Panel configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// The widget sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The widget sink, mutably (e.g. to lay out widgets or render).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the panel and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
