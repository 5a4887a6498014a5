//! Widget sink abstraction for the graphics toolkit.
//!
//! The scene builder creates the widget tree once at startup and hands back
//! opaque [`WidgetId`]s. The panel core only ever talks to those widgets
//! through the [`WidgetSink`] trait: it sets dial values, label text, fill
//! geometry, severity tint and visibility. It never creates or destroys a
//! widget.

/// Opaque, non-owning handle to a widget in the scene registry.
///
/// The scene builder owns the widget; the panel core only stores the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetId(pub u16);

impl WidgetId {
    /// Raw registry index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Width and height of a laid-out widget, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Size and position of a child widget relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Left edge, parent-relative.
    pub x: i32,
    /// Top edge, parent-relative.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Geometry {
    /// Bottom edge (exclusive).
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Right edge (exclusive).
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// True if the point lies inside the rectangle.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Presentational severity of a banner or status widget.
///
/// Drives tinting only; it carries no other behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Normal operation (green tint).
    #[default]
    Ok,
    /// Fault or emergency stop (red tint).
    Error,
}

impl Severity {
    /// Returns the severity as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Error => "error",
        }
    }
}

/// Toolkit-facing side of the panel.
///
/// Implementors update retained widget state; the toolkit draws it on its
/// next frame. All calls are infallible: an unknown handle is ignored.
///
/// # Example
///
/// ```rust
/// use foamrig_panel::traits::{Geometry, Severity, Size, WidgetId, WidgetSink};
///
/// #[derive(Default)]
/// struct LastText(Option<(WidgetId, String)>);
///
/// impl WidgetSink for LastText {
///     fn set_dial(&mut self, _id: WidgetId, _value: i32) {}
///     fn set_text(&mut self, id: WidgetId, text: &str) {
///         self.0 = Some((id, text.to_owned()));
///     }
///     fn set_geometry(&mut self, _id: WidgetId, _geometry: Geometry) {}
///     fn set_style(&mut self, _id: WidgetId, _severity: Severity) {}
///     fn set_visible(&mut self, _id: WidgetId, _visible: bool) {}
///     fn size_of(&self, _id: WidgetId) -> Option<Size> {
///         None
///     }
/// }
///
/// let mut sink = LastText::default();
/// sink.set_text(WidgetId(3), "OK");
/// assert_eq!(sink.0, Some((WidgetId(3), "OK".to_owned())));
/// ```
pub trait WidgetSink {
    /// Sets the indicator value of a bounded dial (arc gauge).
    fn set_dial(&mut self, id: WidgetId, value: i32);

    /// Replaces the text of a label.
    fn set_text(&mut self, id: WidgetId, text: &str);

    /// Resizes and repositions a widget inside its parent.
    fn set_geometry(&mut self, id: WidgetId, geometry: Geometry);

    /// Applies the severity tint (background and border) to a widget.
    fn set_style(&mut self, id: WidgetId, severity: Severity);

    /// Shows or hides a widget.
    fn set_visible(&mut self, id: WidgetId, visible: bool);

    /// Current laid-out size of a widget.
    ///
    /// Returns `None` for unknown handles or widgets not laid out yet.
    fn size_of(&self, id: WidgetId) -> Option<Size>;
}
