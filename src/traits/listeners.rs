//! Operator-intent listeners for the external heater controller.
//!
//! The panel notifies whoever drives the hose heaters when the operator
//! toggles a zone or nudges a setpoint. Each hook holds at most one listener;
//! registering again replaces the previous one. Listeners are called inline
//! from the touch-event path and must return promptly.
//!
//! Closures work directly thanks to the blanket implementations:
//!
//! ```rust
//! use foamrig_panel::traits::ToggleListener;
//! use foamrig_panel::Zone;
//!
//! let mut seen = Vec::new();
//! let mut listener = |zone: Zone, enabled: bool| seen.push((zone.number(), enabled));
//! listener.zone_toggled(Zone::One, true);
//! assert_eq!(seen, vec![(1, true)]);
//! ```

use crate::heat::Zone;

/// Receives heater enable/disable intent.
pub trait ToggleListener {
    /// Called after `zone` was switched to `enabled`.
    fn zone_toggled(&mut self, zone: Zone, enabled: bool);
}

/// Receives heater setpoint intent.
pub trait SetpointListener {
    /// Called after the setpoint of `zone` changed to `setpoint_f` (°F).
    fn setpoint_changed(&mut self, zone: Zone, setpoint_f: i32);
}

impl<F: FnMut(Zone, bool)> ToggleListener for F {
    fn zone_toggled(&mut self, zone: Zone, enabled: bool) {
        self(zone, enabled)
    }
}

impl<F: FnMut(Zone, i32)> SetpointListener for F {
    fn setpoint_changed(&mut self, zone: Zone, setpoint_f: i32) {
        self(zone, setpoint_f)
    }
}
