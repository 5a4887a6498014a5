//! Mix-ratio deviation bar.
//!
//! The bar is a vertical track with a fill rectangle anchored at its centre
//! line. A ratio above target grows the fill upward, a ratio below target
//! grows it downward. The fill height scales linearly with the size of the
//! deviation, from a minimum stub at exactly on-target to a maximum at the
//! tolerance limit, and saturates beyond it.
//!
//! With the default [`RatioBarConfig`] on a 200 px track:
//!
//! | ratio | deviation | fill height | y   |
//! |-------|-----------|-------------|-----|
//! | 1.00  | 0         | 24          | 76  |
//! | 1.05  | +0.05     | 102         | -2  |
//! | 1.15  | +0.10     | 180         | -80 |
//! | 0.95  | -0.05     | 102         | 100 |
//!
//! The numeric readout belongs to the [`Channel::Ratio`](crate::Channel::Ratio)
//! binding; this module only places the fill.

use crate::config::RatioBarConfig;
use crate::format::round_half_away;
use crate::layout::RatioBarWidgets;
use crate::traits::{Geometry, Size, WidgetId, WidgetSink};

/// Fill placement inside the track, in track-local pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatioBarGeometry {
    /// Fill width (always the track width).
    pub width: i32,
    /// Fill height.
    pub height: i32,
    /// Top edge of the fill.
    pub y: i32,
}

impl RatioBarGeometry {
    /// Geometry to hand to the sink (`x` is always 0).
    pub const fn to_geometry(self) -> Geometry {
        Geometry {
            x: 0,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// True if the fill extends above the centre line.
    pub const fn grows_up(&self, track_height: i32) -> bool {
        self.y < track_height / 2
    }
}

/// Signed deviation from target, limited to `±tolerance`.
///
/// A non-finite ratio reads as on-target.
pub fn deviation(ratio: f32, config: &RatioBarConfig) -> f32 {
    let dev = ratio - config.target;
    if !dev.is_finite() {
        return 0.0;
    }
    dev.max(-config.tolerance).min(config.tolerance)
}

/// Computes the fill geometry for `ratio` on a track of `track` size.
///
/// # Example
///
/// ```rust
/// use foamrig_panel::config::RatioBarConfig;
/// use foamrig_panel::ratio::compute;
/// use foamrig_panel::traits::Size;
///
/// let config = RatioBarConfig::default();
/// let bar = compute(1.15, Size::new(60, 200), &config);
/// assert_eq!(bar.height, 180);
/// assert_eq!(bar.y, -80);
/// assert_eq!(bar.width, 60);
/// ```
pub fn compute(ratio: f32, track: Size, config: &RatioBarConfig) -> RatioBarGeometry {
    let dev = deviation(ratio, config);
    let magnitude = dev.abs() / config.tolerance;

    let min_h = track.height * i32::from(config.min_fill_pct) / 100;
    let max_h = track.height * i32::from(config.max_fill_pct) / 100;
    let height = round_half_away(min_h as f32 + (max_h - min_h) as f32 * magnitude);

    let center = track.height / 2;
    let y = if dev >= 0.0 { center - height } else { center };

    RatioBarGeometry {
        width: track.width,
        height,
        y,
    }
}

/// Ratio bar bound to its track and fill widgets.
#[derive(Clone, Debug)]
pub struct RatioBar {
    track: Option<WidgetId>,
    fill: Option<WidgetId>,
    config: RatioBarConfig,
    last: Option<RatioBarGeometry>,
}

impl RatioBar {
    /// Creates a bar over the given widgets.
    pub fn new(widgets: &RatioBarWidgets, config: RatioBarConfig) -> Self {
        Self {
            track: widgets.track,
            fill: widgets.fill,
            config,
            last: None,
        }
    }

    /// Places the fill for `ratio`.
    ///
    /// Skipped (returns `None`) when either widget is missing or the track
    /// has not been laid out yet.
    pub fn render<S: WidgetSink + ?Sized>(&mut self, ratio: f32, sink: &mut S) -> Option<RatioBarGeometry> {
        let fill = self.fill?;
        let track = sink.size_of(self.track?)?;
        if track.width <= 0 || track.height <= 0 {
            return None;
        }

        let bar = compute(ratio, track, &self.config);
        sink.set_geometry(fill, bar.to_geometry());
        self.last = Some(bar);
        Some(bar)
    }

    /// Geometry placed by the last successful render.
    pub fn last(&self) -> Option<RatioBarGeometry> {
        self.last
    }

    /// Bar configuration.
    pub fn config(&self) -> &RatioBarConfig {
        &self.config
    }
}
