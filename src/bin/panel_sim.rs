//! Desktop simulator for the rig panel.
//!
//! Runs the panel core against a synthetic rig for a bounded number of ticks,
//! replays a short script of operator touches through the touch dispatcher,
//! and prints every label change to the console.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin panel_sim --features sim -- 600
//! ```
//!
//! The optional argument is the number of ticks to run (default 600, i.e.
//! three seconds at the 5 ms tick). Set `RUST_LOG=debug` (or `trace`) for
//! more detail.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use log::{info, Level};

use foamrig_panel::hal::SimulatedRig;
use foamrig_panel::touch::TouchPoint;
use foamrig_panel::traits::{Geometry, Severity, Size, TelemetrySource, WidgetId, WidgetSink};
use foamrig_panel::{
    ControlPanel, PanelConfig, PanelEvent, PanelLayout, TouchDispatcher, Zone,
};

const DEFAULT_TICKS: u32 = 600;

// ============================================================================
// Console sink
// ============================================================================

/// Prints label, banner and visibility changes; tracks dials and fills
/// quietly.
#[derive(Default)]
struct ConsoleSink {
    names: BTreeMap<WidgetId, &'static str>,
    texts: BTreeMap<WidgetId, String>,
    dials: BTreeMap<WidgetId, i32>,
    sizes: BTreeMap<WidgetId, Size>,
}

impl ConsoleSink {
    fn name(&self, id: WidgetId) -> &'static str {
        self.names.get(&id).copied().unwrap_or("?")
    }

    fn label(&mut self, id: Option<WidgetId>, name: &'static str) {
        if let Some(id) = id {
            self.names.insert(id, name);
        }
    }
}

impl WidgetSink for ConsoleSink {
    fn set_dial(&mut self, id: WidgetId, value: i32) {
        self.dials.insert(id, value);
    }

    fn set_text(&mut self, id: WidgetId, text: &str) {
        let previous = self.texts.insert(id, text.to_owned());
        if previous.as_deref() != Some(text) && self.names.contains_key(&id) {
            println!("  {:<14} {}", self.name(id), text);
        }
    }

    fn set_geometry(&mut self, _id: WidgetId, _geometry: Geometry) {}

    fn set_style(&mut self, id: WidgetId, severity: Severity) {
        if self.names.contains_key(&id) {
            println!("  {:<14} [{}]", self.name(id), severity.as_str());
        }
    }

    fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if self.names.contains_key(&id) && !visible {
            println!("  {:<14} (hidden)", self.name(id));
        }
    }

    fn size_of(&self, id: WidgetId) -> Option<Size> {
        self.sizes.get(&id).copied()
    }
}

// ============================================================================
// Scene
// ============================================================================

/// Button rectangles on an 800x480 screen.
fn buttons() -> [(Geometry, PanelEvent); 7] {
    let button = |x: i32, y: i32| Geometry {
        x,
        y,
        width: 120,
        height: 48,
    };
    [
        (button(20, 300), PanelEvent::ToggleZone(Zone::One)),
        (button(160, 300), PanelEvent::SetpointDown(Zone::One)),
        (button(300, 300), PanelEvent::SetpointUp(Zone::One)),
        (button(440, 300), PanelEvent::ToggleZone(Zone::Two)),
        (button(580, 300), PanelEvent::SetpointDown(Zone::Two)),
        (button(660, 360), PanelEvent::SetpointUp(Zone::Two)),
        (button(660, 420), PanelEvent::EStop),
    ]
}

fn console_sink(layout: &PanelLayout) -> ConsoleSink {
    let mut sink = ConsoleSink::default();
    for (zone, names) in [
        (Zone::One, ["hose1 status", "hose1 button", "hose1 setpoint"]),
        (Zone::Two, ["hose2 status", "hose2 button", "hose2 setpoint"]),
    ] {
        let widgets = layout.zone(zone);
        sink.label(widgets.status, names[0]);
        sink.label(widgets.toggle_label, names[1]);
        sink.label(widgets.setpoint, names[2]);
    }
    sink.label(layout.banner.panel, "banner");
    sink.label(layout.banner.label, "banner text");
    sink.label(layout.banner.interlock_line, "interlock");
    if let Some(track) = layout.ratio.track {
        sink.sizes.insert(track, Size::new(60, 200));
    }
    sink
}

/// Contact reported on `tick`, if any: each scripted press is held for three
/// polls and released on the fourth.
fn scripted_contact(tick: u32) -> Option<TouchPoint> {
    const SCRIPT: [(u32, TouchPoint); 6] = [
        (100, TouchPoint::new(40, 320)),  // hose 1 heat
        (150, TouchPoint::new(340, 320)), // hose 1 +
        (160, TouchPoint::new(340, 320)), // hose 1 +
        (170, TouchPoint::new(340, 320)), // hose 1 +
        (300, TouchPoint::new(700, 440)), // e-stop
        (450, TouchPoint::new(700, 440)), // e-stop
    ];
    SCRIPT
        .iter()
        .find(|(start, _)| (*start..*start + 3).contains(&tick))
        .map(|(_, point)| *point)
}

fn parse_ticks() -> anyhow::Result<u32> {
    match std::env::args().nth(1) {
        None => Ok(DEFAULT_TICKS),
        Some(arg) => {
            let ticks: u32 = arg
                .parse()
                .with_context(|| format!("tick count must be a number, got {arg:?}"))?;
            if ticks == 0 {
                bail!("tick count must be at least 1");
            }
            Ok(ticks)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let ticks = parse_ticks()?;

    println!("=================================");
    println!("  foamrig panel simulator");
    println!("=================================");

    let config = PanelConfig::default();
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));
    let layout = PanelLayout::sequential(0);

    let mut panel = ControlPanel::new(console_sink(&layout), layout, config)
        .context("building panel")?;
    panel.on_zone_toggled(|zone: Zone, enabled: bool| {
        info!("heater controller: {} enable={}", zone, enabled);
    });
    panel.on_setpoint_changed(|zone: Zone, setpoint_f: i32| {
        info!("heater controller: {} setpoint={} °F", zone, setpoint_f);
    });

    let mut touch: TouchDispatcher = TouchDispatcher::new();
    for (area, event) in buttons() {
        touch.add_region(area, event).context("registering touch regions")?;
    }

    let mut rig = SimulatedRig::new();
    for n in 0..ticks {
        panel.push_telemetry(rig.next_sample());
        if let Some(event) = touch.poll(scripted_contact(n)) {
            info!("tick {}: {:?}", n, event);
            panel.handle_event(event);
        }
        if n % 200 == 0 {
            if let Some(sample) = panel.last_sample() {
                println!(
                    "tick {:>4}: iso {:>6.1} PSI  resin {:>6.1} PSI  ratio {:.2}",
                    n, sample.iso_hp_psi, sample.resin_hp_psi, sample.ratio
                );
            }
        }
        thread::sleep(tick);
    }

    let state = panel.state();
    println!();
    println!("Final state:");
    for zone in Zone::ALL {
        let hose = state.zones[zone.index()];
        println!(
            "  {}: {} set {} °F",
            zone,
            if hose.enabled { "ON" } else { "OFF" },
            hose.setpoint_f
        );
    }
    println!("  interlock: {}", state.interlock.as_str());
    if let Some(bar) = state.ratio_bar {
        println!("  ratio bar: h={} y={}", bar.height, bar.y);
    }

    if log::max_level() >= Level::Debug {
        let sink = panel.sink();
        println!("  {} dials, {} labels written", sink.dials.len(), sink.texts.len());
    }
    Ok(())
}
