//! Interface configuration.

use crate::highlight::Theme;
use serde::Deserialize;
use std::time::Duration;

/// Diff layout used by the presentation.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One column, deletions above insertions.
    #[default]
    Unified,
    /// Old and new side by side.
    Split,
}

impl ViewMode {
    /// Returns the other layout.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unified => Self::Split,
            Self::Split => Self::Unified,
        }
    }
}

/// Interface settings.
#[derive(Debug, Deserialize, Clone)]
pub struct UiSettings {
    /// Recompute on every edit after the debounce delay (default: true)
    #[serde(default = "default_true")]
    pub live_updates: bool,

    /// Quiet period before a live recomputation, in milliseconds (default: 200)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How long the copied/cleared indicators stay up, in milliseconds (default: 2000)
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,

    /// Highlighting theme (default: dark)
    #[serde(default)]
    pub theme: Theme,

    /// Initial diff layout (default: unified)
    #[serde(default)]
    pub view_mode: ViewMode,

    /// Wrap long diff lines (default: true)
    #[serde(default = "default_true")]
    pub wrap: bool,

    /// Emphasise changed words inside modified lines (default: true)
    #[serde(default = "default_true")]
    pub inline_highlight: bool,

    /// Spaces inserted for a tab key press (default: 2)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
}

impl UiSettings {
    /// Debounce delay as a duration.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Indicator lifetime as a duration.
    #[must_use]
    pub const fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            live_updates: default_true(),
            debounce_ms: default_debounce_ms(),
            feedback_ms: default_feedback_ms(),
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            wrap: default_true(),
            inline_highlight: default_true(),
            tab_width: default_tab_width(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_feedback_ms() -> u64 {
    2000
}

fn default_tab_width() -> usize {
    2
}
