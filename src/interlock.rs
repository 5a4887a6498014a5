//! Interlock state machine and status banner.
//!
//! The interlock has two states. Entering [`InterlockState::Tripped`] turns
//! the banner red with the stop text and shows the interlock line; entering
//! [`InterlockState::Normal`] restores the green banner and clears the line.
//!
//! ```text
//!             press / trip
//!   Normal ─────────────────► Tripped
//!     ▲                          │
//!     └──────────────────────────┘
//!             press / reset
//! ```
//!
//! The banner can also be set directly by the host. That changes only what is
//! displayed; the interlock state is untouched.

use log::info;

use crate::config::{short_string, BannerConfig, ShortString};
use crate::layout::BannerWidgets;
use crate::traits::{Severity, WidgetSink};

/// Interlock state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterlockState {
    /// Running normally.
    #[default]
    Normal,
    /// Emergency stop engaged.
    Tripped,
}

impl InterlockState {
    /// Returns the state as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InterlockState::Normal => "normal",
            InterlockState::Tripped => "tripped",
        }
    }

    /// Banner severity for this state.
    pub const fn severity(&self) -> Severity {
        match self {
            InterlockState::Normal => Severity::Ok,
            InterlockState::Tripped => Severity::Error,
        }
    }
}

/// Two-state interlock.
///
/// # Example
///
/// ```rust
/// use foamrig_panel::interlock::{Interlock, InterlockState};
///
/// let mut interlock = Interlock::new();
/// assert_eq!(interlock.press(), InterlockState::Tripped);
/// assert!(!interlock.trip()); // already tripped
/// assert!(interlock.reset());
/// assert_eq!(interlock.state(), InterlockState::Normal);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Interlock {
    state: InterlockState,
}

impl Interlock {
    /// Starts in [`InterlockState::Normal`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> InterlockState {
        self.state
    }

    /// True while tripped.
    pub fn is_tripped(&self) -> bool {
        self.state == InterlockState::Tripped
    }

    /// E-stop button press: toggles between the two states.
    pub fn press(&mut self) -> InterlockState {
        let next = match self.state {
            InterlockState::Normal => InterlockState::Tripped,
            InterlockState::Tripped => InterlockState::Normal,
        };
        self.enter(next);
        next
    }

    /// Forces [`InterlockState::Tripped`]. Returns true on a transition.
    pub fn trip(&mut self) -> bool {
        self.force(InterlockState::Tripped)
    }

    /// Forces [`InterlockState::Normal`]. Returns true on a transition.
    pub fn reset(&mut self) -> bool {
        self.force(InterlockState::Normal)
    }

    fn force(&mut self, state: InterlockState) -> bool {
        if self.state == state {
            return false;
        }
        self.enter(state);
        true
    }

    fn enter(&mut self, state: InterlockState) {
        info!("interlock {} -> {}", self.state.as_str(), state.as_str());
        self.state = state;
    }
}

/// Displayed banner: text, tint and visibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    text: ShortString,
    severity: Severity,
    visible: bool,
}

impl Banner {
    /// Visible banner with `text` and `severity`.
    pub fn new(text: &str, severity: Severity) -> Self {
        let mut banner = Self {
            text: ShortString::new(),
            severity,
            visible: false,
        };
        banner.set(Some(text), severity);
        banner
    }

    /// Banner for `state` with the configured texts.
    pub fn for_state(state: InterlockState, config: &BannerConfig) -> Self {
        let text = match state {
            InterlockState::Normal => &config.normal_text,
            InterlockState::Tripped => &config.tripped_text,
        };
        Self::new(text, state.severity())
    }

    /// Replaces the banner. `None` or an empty message hides it.
    ///
    /// Text longer than the buffer is cut at a character boundary.
    pub fn set(&mut self, message: Option<&str>, severity: Severity) {
        self.severity = severity;
        match message {
            Some(text) if !text.is_empty() => {
                self.text = short_string(text);
                self.visible = true;
            }
            _ => {
                self.text.clear();
                self.visible = false;
            }
        }
    }

    /// Banner text (empty when hidden).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Banner tint.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// True if shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Writes the banner to its widgets.
    pub fn paint<S: WidgetSink + ?Sized>(&self, widgets: &BannerWidgets, sink: &mut S) {
        if let Some(label) = widgets.label {
            sink.set_text(label, &self.text);
            sink.set_visible(label, self.visible);
        }
        if let Some(panel) = widgets.panel {
            sink.set_style(panel, self.severity);
            sink.set_visible(panel, self.visible);
        }
    }
}

/// Writes the interlock line for `state`.
pub fn paint_interlock_line<S: WidgetSink + ?Sized>(
    widgets: &BannerWidgets,
    state: InterlockState,
    config: &BannerConfig,
    sink: &mut S,
) {
    if let Some(line) = widgets.interlock_line {
        match state {
            InterlockState::Tripped => {
                sink.set_text(line, &config.interlock_text);
                sink.set_visible(line, true);
            }
            InterlockState::Normal => {
                sink.set_text(line, "");
                sink.set_visible(line, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockPanel;
    use crate::traits::WidgetId;

    fn widgets() -> BannerWidgets {
        BannerWidgets {
            panel: Some(WidgetId(1)),
            label: Some(WidgetId(2)),
            interlock_line: Some(WidgetId(3)),
        }
    }

    // =========================================================================
    // Interlock Tests
    // =========================================================================

    #[test]
    fn starts_normal() {
        let interlock = Interlock::new();
        assert_eq!(interlock.state(), InterlockState::Normal);
        assert!(!interlock.is_tripped());
    }

    #[test]
    fn press_toggles() {
        let mut interlock = Interlock::new();
        assert_eq!(interlock.press(), InterlockState::Tripped);
        assert!(interlock.is_tripped());
        assert_eq!(interlock.press(), InterlockState::Normal);
        assert!(!interlock.is_tripped());
    }

    #[test]
    fn trip_and_reset_are_idempotent() {
        let mut interlock = Interlock::new();
        assert!(!interlock.reset());
        assert!(interlock.trip());
        assert!(!interlock.trip());
        assert!(interlock.is_tripped());
        assert!(interlock.reset());
        assert!(!interlock.reset());
    }

    #[test]
    fn state_severity() {
        assert_eq!(InterlockState::Normal.severity(), Severity::Ok);
        assert_eq!(InterlockState::Tripped.severity(), Severity::Error);
        assert_eq!(InterlockState::Tripped.as_str(), "tripped");
    }

    // =========================================================================
    // Banner Tests
    // =========================================================================

    #[test]
    fn banner_for_state() {
        let config = BannerConfig::default();
        let normal = Banner::for_state(InterlockState::Normal, &config);
        assert_eq!(normal.text(), "OK");
        assert_eq!(normal.severity(), Severity::Ok);
        assert!(normal.is_visible());

        let tripped = Banner::for_state(InterlockState::Tripped, &config);
        assert_eq!(tripped.text(), "E-STOP");
        assert_eq!(tripped.severity(), Severity::Error);
    }

    #[test]
    fn empty_message_hides() {
        let mut banner = Banner::new("OK", Severity::Ok);
        banner.set(Some(""), Severity::Error);
        assert!(!banner.is_visible());
        assert_eq!(banner.text(), "");

        banner.set(Some("PUMP FAULT"), Severity::Error);
        assert!(banner.is_visible());
        banner.set(None, Severity::Ok);
        assert!(!banner.is_visible());
    }

    #[test]
    fn banner_paint() {
        let mut panel = MockPanel::new();
        let banner = Banner::new("E-STOP", Severity::Error);
        banner.paint(&widgets(), &mut panel);

        assert_eq!(panel.text(WidgetId(2)), Some("E-STOP"));
        assert_eq!(panel.style(WidgetId(1)), Some(Severity::Error));
        assert_eq!(panel.visible(WidgetId(1)), Some(true));
    }

    #[test]
    fn hidden_banner_paint() {
        let mut panel = MockPanel::new();
        let mut banner = Banner::new("OK", Severity::Ok);
        banner.set(None, Severity::Ok);
        banner.paint(&widgets(), &mut panel);

        assert_eq!(panel.visible(WidgetId(1)), Some(false));
        assert_eq!(panel.visible(WidgetId(2)), Some(false));
    }

    #[test]
    fn interlock_line_follows_state() {
        let mut panel = MockPanel::new();
        let config = BannerConfig::default();

        paint_interlock_line(&widgets(), InterlockState::Tripped, &config, &mut panel);
        assert_eq!(panel.text(WidgetId(3)), Some("E-STOP ACTIVE"));
        assert_eq!(panel.visible(WidgetId(3)), Some(true));

        paint_interlock_line(&widgets(), InterlockState::Normal, &config, &mut panel);
        assert_eq!(panel.text(WidgetId(3)), Some(""));
        assert_eq!(panel.visible(WidgetId(3)), Some(false));
    }
}
