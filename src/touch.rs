//! Touch dispatch and operator events.
//!
//! The touch driver reports a single contact point per poll, or nothing when
//! the screen is not touched. [`TouchDispatcher`] turns those polls into
//! discrete [`PanelEvent`]s with click semantics:
//!
//! - a region fires on **release**, not on press;
//! - it fires only if the release lands in the region that took the press;
//! - a press outside every region, a drag off the region, and repeated
//!   reports while the finger stays down all produce nothing.
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::touch::{PanelEvent, TouchDispatcher, TouchPoint};
//! use foamrig_panel::traits::Geometry;
//!
//! let mut touch: TouchDispatcher = TouchDispatcher::new();
//! touch
//!     .add_region(Geometry { x: 0, y: 0, width: 100, height: 40 }, PanelEvent::EStop)
//!     .unwrap();
//!
//! assert_eq!(touch.poll(Some(TouchPoint::new(20, 20))), None);
//! assert_eq!(touch.poll(Some(TouchPoint::new(22, 21))), None);
//! assert_eq!(touch.poll(None), Some(PanelEvent::EStop));
//! ```

use heapless::Vec;

use crate::error::PanelError;
use crate::heat::Zone;
use crate::traits::Geometry;

/// Default number of touch regions a dispatcher holds.
pub const MAX_REGIONS: usize = 8;

/// Discrete operator action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PanelEvent {
    /// Heater enable button of a zone.
    ToggleZone(Zone),
    /// Setpoint `+` button of a zone.
    SetpointUp(Zone),
    /// Setpoint `-` button of a zone.
    SetpointDown(Zone),
    /// Emergency stop button.
    EStop,
}

/// A single touch contact in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchPoint {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl TouchPoint {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle bound to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchRegion {
    /// Hit area.
    pub area: Geometry,
    /// Event fired on click.
    pub event: PanelEvent,
}

/// Maps contact polls to click events over a fixed set of regions.
///
/// Regions are tested in insertion order; the first hit wins where they
/// overlap.
#[derive(Clone, Debug)]
pub struct TouchDispatcher<const N: usize = MAX_REGIONS> {
    regions: Vec<TouchRegion, N>,
    down: bool,
    pressed: Option<usize>,
    last: TouchPoint,
}

impl<const N: usize> Default for TouchDispatcher<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TouchDispatcher<N> {
    /// Creates a dispatcher with no regions.
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            down: false,
            pressed: None,
            last: TouchPoint::new(0, 0),
        }
    }

    /// Registers a region.
    ///
    /// Fails with [`PanelError::TooManyRegions`] when all `N` slots are used.
    pub fn add_region(&mut self, area: Geometry, event: PanelEvent) -> Result<(), PanelError> {
        self.regions
            .push(TouchRegion { area, event })
            .map_err(|_| PanelError::TooManyRegions)
    }

    /// Registered regions.
    pub fn regions(&self) -> &[TouchRegion] {
        &self.regions
    }

    /// True while a contact is held.
    pub fn is_pressed(&self) -> bool {
        self.down
    }

    /// Feeds one driver poll: `Some(point)` while touched, `None` when not.
    ///
    /// Returns the event of a completed click.
    pub fn poll(&mut self, contact: Option<TouchPoint>) -> Option<PanelEvent> {
        match contact {
            Some(point) => {
                self.press(point);
                None
            }
            None => self.release(),
        }
    }

    /// Contact down (or still down) at `point`.
    pub fn press(&mut self, point: TouchPoint) {
        if !self.down {
            self.down = true;
            self.pressed = self.hit(point);
        }
        self.last = point;
    }

    /// Contact lifted at the last reported point.
    pub fn release(&mut self) -> Option<PanelEvent> {
        if !self.down {
            return None;
        }
        self.down = false;
        let pressed = self.pressed.take()?;
        if self.hit(self.last) == Some(pressed) {
            Some(self.regions[pressed].event)
        } else {
            None
        }
    }

    fn hit(&self, point: TouchPoint) -> Option<usize> {
        self.regions
            .iter()
            .position(|region| region.area.contains(point.x, point.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32) -> Geometry {
        Geometry {
            x,
            y,
            width: 50,
            height: 50,
        }
    }

    fn dispatcher() -> TouchDispatcher<4> {
        let mut touch = TouchDispatcher::new();
        touch
            .add_region(rect(0, 0), PanelEvent::ToggleZone(Zone::One))
            .unwrap();
        touch
            .add_region(rect(100, 0), PanelEvent::SetpointUp(Zone::Two))
            .unwrap();
        touch
    }

    fn click(touch: &mut TouchDispatcher<4>, x: i32, y: i32) -> Option<PanelEvent> {
        assert_eq!(touch.poll(Some(TouchPoint::new(x, y))), None);
        touch.poll(None)
    }

    // =========================================================================
    // Click Tests
    // =========================================================================

    #[test]
    fn click_inside_region_fires_on_release() {
        let mut touch = dispatcher();
        assert_eq!(
            click(&mut touch, 10, 10),
            Some(PanelEvent::ToggleZone(Zone::One))
        );
        assert_eq!(
            click(&mut touch, 120, 20),
            Some(PanelEvent::SetpointUp(Zone::Two))
        );
    }

    #[test]
    fn press_outside_all_regions_is_ignored() {
        let mut touch = dispatcher();
        assert_eq!(click(&mut touch, 70, 10), None);
        assert!(!touch.is_pressed());
    }

    #[test]
    fn held_contact_fires_once() {
        let mut touch = dispatcher();
        for _ in 0..10 {
            assert_eq!(touch.poll(Some(TouchPoint::new(10, 10))), None);
        }
        assert!(touch.is_pressed());
        assert_eq!(touch.poll(None), Some(PanelEvent::ToggleZone(Zone::One)));
        assert_eq!(touch.poll(None), None);
    }

    #[test]
    fn drag_off_region_cancels() {
        let mut touch = dispatcher();
        touch.poll(Some(TouchPoint::new(10, 10)));
        touch.poll(Some(TouchPoint::new(80, 10)));
        assert_eq!(touch.poll(None), None);
    }

    #[test]
    fn drag_into_other_region_cancels() {
        let mut touch = dispatcher();
        touch.poll(Some(TouchPoint::new(10, 10)));
        touch.poll(Some(TouchPoint::new(110, 10)));
        assert_eq!(touch.poll(None), None);
    }

    #[test]
    fn drag_away_and_back_fires() {
        let mut touch = dispatcher();
        touch.poll(Some(TouchPoint::new(10, 10)));
        touch.poll(Some(TouchPoint::new(80, 10)));
        touch.poll(Some(TouchPoint::new(20, 20)));
        assert_eq!(touch.poll(None), Some(PanelEvent::ToggleZone(Zone::One)));
    }

    #[test]
    fn press_outside_then_drag_in_is_ignored() {
        let mut touch = dispatcher();
        touch.poll(Some(TouchPoint::new(80, 10)));
        touch.poll(Some(TouchPoint::new(10, 10)));
        assert_eq!(touch.poll(None), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut touch = dispatcher();
        assert_eq!(touch.release(), None);
    }

    // =========================================================================
    // Region Table Tests
    // =========================================================================

    #[test]
    fn overlapping_regions_first_wins() {
        let mut touch: TouchDispatcher<2> = TouchDispatcher::new();
        touch.add_region(rect(0, 0), PanelEvent::EStop).unwrap();
        touch
            .add_region(rect(0, 0), PanelEvent::SetpointDown(Zone::One))
            .unwrap();
        touch.press(TouchPoint::new(5, 5));
        assert_eq!(touch.release(), Some(PanelEvent::EStop));
    }

    #[test]
    fn region_capacity() {
        let mut touch: TouchDispatcher<1> = TouchDispatcher::new();
        assert!(touch.add_region(rect(0, 0), PanelEvent::EStop).is_ok());
        assert_eq!(
            touch.add_region(rect(60, 0), PanelEvent::EStop),
            Err(PanelError::TooManyRegions)
        );
        assert_eq!(touch.regions().len(), 1);
    }
}
