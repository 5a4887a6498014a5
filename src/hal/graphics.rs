//! Retained-mode widget store drawn with `embedded-graphics`.
//!
//! The scene builder places each widget once (a screen rectangle plus its
//! kind); the panel core then updates values through [`WidgetSink`], and the
//! host calls [`GraphicsPanel::render`] whenever it wants a frame.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ ╭──╮ 1100 PSI    ╭──╮ 1080 PSI   │▓│   │  dials + labels, ratio track/fill
//! │ ╰  ╯             ╰  ╯            │▓│   │
//! │ HEAT: ON  Set: 125 °F            1.02  │
//! │████████████████ OK ████████████████████│  banner panel, tinted by severity
//! └────────────────────────────────────────┘
//! ```
//!
//! Fill widgets are positioned relative to their track and clipped to it.

use alloc::collections::BTreeMap;

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::{Angle, Point, Size as PixelSize},
    mono_font::{iso_8859_1::FONT_6X10, MonoTextStyle},
    pixelcolor::{Rgb565, RgbColor},
    primitives::{Arc, Primitive, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
    Drawable,
};

use crate::config::{short_string, ShortString};
use crate::traits::{Geometry, Severity, Size, WidgetId, WidgetSink};

/// Start angle of a dial arc (lower left, clockwise).
const DIAL_START_DEG: f32 = 135.0;
/// Full sweep of a dial arc.
const DIAL_SWEEP_DEG: f32 = 270.0;
/// Dial arc stroke width in pixels.
const DIAL_STROKE: u32 = 6;

const TRACK_COLOR: Rgb565 = Rgb565::new(4, 8, 4);
const DIAL_BACKGROUND: Rgb565 = Rgb565::new(6, 12, 6);
const DIAL_INDICATOR: Rgb565 = Rgb565::new(0, 40, 31);

/// What a placed widget draws as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    /// Arc gauge over `min..=max`.
    Dial {
        /// Value at the start of the arc.
        min: i32,
        /// Value at the end of the arc.
        max: i32,
    },
    /// Single line of text, top-left anchored.
    Label,
    /// Background of a bar.
    Track,
    /// Bar fill, positioned inside `track`.
    Fill {
        /// Parent track.
        track: WidgetId,
    },
    /// Solid rectangle tinted by severity (the banner).
    Panel,
}

impl WidgetKind {
    /// Backgrounds draw before everything else.
    const fn is_background(&self) -> bool {
        matches!(self, WidgetKind::Track | WidgetKind::Panel)
    }
}

#[derive(Clone, Debug)]
struct Placed {
    kind: WidgetKind,
    area: Rectangle,
    value: i32,
    text: ShortString,
    severity: Severity,
    visible: bool,
}

/// Widget sink backed by `embedded-graphics` primitives.
///
/// Writes to handles that were never placed are ignored.
///
/// # Example
///
/// ```rust
/// use embedded_graphics::{geometry::{Point, Size}, primitives::Rectangle};
/// use foamrig_panel::hal::{GraphicsPanel, WidgetKind};
/// use foamrig_panel::traits::{WidgetId, WidgetSink};
///
/// let mut screen = GraphicsPanel::new();
/// screen.place(WidgetId(0), WidgetKind::Dial { min: 0, max: 1600 }, Rectangle::new(Point::new(0, 0), Size::new(80, 80)));
/// screen.set_dial(WidgetId(0), 1100);
/// assert_eq!(screen.dial_value(WidgetId(0)), Some(1100));
/// assert_eq!(screen.size_of(WidgetId(0)).map(|s| s.width), Some(80));
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphicsPanel {
    widgets: BTreeMap<WidgetId, Placed>,
}

impl GraphicsPanel {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places (or re-places) a widget. For [`WidgetKind::Fill`], `area` is
    /// relative to the track.
    pub fn place(&mut self, id: WidgetId, kind: WidgetKind, area: Rectangle) {
        self.widgets.insert(
            id,
            Placed {
                kind,
                area,
                value: 0,
                text: ShortString::new(),
                severity: Severity::Ok,
                visible: true,
            },
        );
    }

    /// Number of placed widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Current dial value of `id`.
    pub fn dial_value(&self, id: WidgetId) -> Option<i32> {
        self.widgets.get(&id).map(|w| w.value)
    }

    /// Current text of `id`.
    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.widgets.get(&id).map(|w| w.text.as_str())
    }

    /// Current visibility of `id`.
    pub fn is_visible(&self, id: WidgetId) -> Option<bool> {
        self.widgets.get(&id).map(|w| w.visible)
    }

    /// Draws every visible widget, backgrounds first.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        for background in [true, false] {
            for widget in self
                .widgets
                .values()
                .filter(|w| w.visible && w.kind.is_background() == background)
            {
                self.draw_widget(widget, target)?;
            }
        }
        Ok(())
    }

    fn draw_widget<D>(&self, widget: &Placed, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match widget.kind {
            WidgetKind::Panel => widget
                .area
                .into_styled(PrimitiveStyle::with_fill(tint(widget.severity)))
                .draw(target),
            WidgetKind::Track => widget
                .area
                .into_styled(PrimitiveStyle::with_fill(TRACK_COLOR))
                .draw(target),
            WidgetKind::Fill { track } => {
                let Some(track) = self.widgets.get(&track) else {
                    return Ok(());
                };
                if !track.visible {
                    return Ok(());
                }
                let area = Rectangle::new(track.area.top_left + widget.area.top_left, widget.area.size);
                area.into_styled(PrimitiveStyle::with_fill(tint(widget.severity)))
                    .draw(&mut target.clipped(&track.area))
            }
            WidgetKind::Dial { min, max } => draw_dial(widget, min, max, target),
            WidgetKind::Label => {
                let color = match widget.severity {
                    Severity::Ok => Rgb565::WHITE,
                    Severity::Error => Rgb565::RED,
                };
                let style = MonoTextStyle::new(&FONT_6X10, color);
                Text::with_baseline(&widget.text, widget.area.top_left, style, Baseline::Top)
                    .draw(target)?;
                Ok(())
            }
        }
    }
}

fn tint(severity: Severity) -> Rgb565 {
    match severity {
        Severity::Ok => Rgb565::GREEN,
        Severity::Error => Rgb565::RED,
    }
}

/// Fraction of the arc covered by `value`, in `0.0..=1.0`.
fn dial_fraction(value: i32, min: i32, max: i32) -> f32 {
    if max <= min {
        return 0.0;
    }
    let span = (max as f32) - (min as f32);
    (((value as f32) - (min as f32)) / span).clamp(0.0, 1.0)
}

fn draw_dial<D>(widget: &Placed, min: i32, max: i32, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let diameter = widget.area.size.width.min(widget.area.size.height);
    if diameter <= DIAL_STROKE {
        return Ok(());
    }
    let start = Angle::from_degrees(DIAL_START_DEG);

    Arc::new(widget.area.top_left, diameter, start, Angle::from_degrees(DIAL_SWEEP_DEG))
        .into_styled(PrimitiveStyle::with_stroke(DIAL_BACKGROUND, DIAL_STROKE))
        .draw(target)?;

    let sweep = DIAL_SWEEP_DEG * dial_fraction(widget.value, min, max);
    if sweep > 0.0 {
        Arc::new(widget.area.top_left, diameter, start, Angle::from_degrees(sweep))
            .into_styled(PrimitiveStyle::with_stroke(DIAL_INDICATOR, DIAL_STROKE))
            .draw(target)?;
    }
    Ok(())
}

impl WidgetSink for GraphicsPanel {
    fn set_dial(&mut self, id: WidgetId, value: i32) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.value = value;
        }
    }

    fn set_text(&mut self, id: WidgetId, text: &str) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.text = short_string(text);
        }
    }

    fn set_geometry(&mut self, id: WidgetId, geometry: Geometry) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.area = Rectangle::new(
                Point::new(geometry.x, geometry.y),
                PixelSize::new(geometry.width.max(0) as u32, geometry.height.max(0) as u32),
            );
        }
    }

    fn set_style(&mut self, id: WidgetId, severity: Severity) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.severity = severity;
        }
    }

    fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.visible = visible;
        }
    }

    fn size_of(&self, id: WidgetId) -> Option<Size> {
        self.widgets.get(&id).map(|w| {
            Size::new(
                i32::try_from(w.area.size.width).unwrap_or(i32::MAX),
                i32::try_from(w.area.size.height).unwrap_or(i32::MAX),
            )
        })
    }
}
