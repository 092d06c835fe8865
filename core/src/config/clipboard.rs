//! Clipboard configuration.

use serde::Deserialize;

/// Which clipboard mechanism to use.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// Use a platform command when one is installed, else OSC 52.
    #[default]
    Auto,
    /// Always emit the OSC 52 escape sequence.
    Osc52,
    /// Always use a platform command.
    Command,
}

/// Clipboard settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ClipboardSettings {
    /// Backend selection (default: auto)
    #[serde(default)]
    pub backend: ClipboardBackend,

    /// Largest base64 payload sent through OSC 52 (default: 100000)
    #[serde(default = "default_max_payload")]
    pub max_payload: usize,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            backend: ClipboardBackend::default(),
            max_payload: default_max_payload(),
        }
    }
}

fn default_max_payload() -> usize {
    100_000
}
