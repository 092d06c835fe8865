//! Configuration management for diffpad.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `DIFFPAD__`-style environment variables.
//!
//! # Example
//!
//! ```
//! use diffpad_core::config::Settings;
//!
//! let settings = Settings::new().expect("Failed to load configuration");
//! assert!(settings.ui.debounce_ms > 0);
//! ```

pub mod clipboard;
pub mod diff;
pub mod language;
pub mod telemetry;
pub mod ui;

pub use clipboard::{ClipboardBackend, ClipboardSettings};
pub use diff::{DiffAlgorithmKind, DiffSettings};
pub use language::LanguageSettings;
pub use telemetry::TelemetrySettings;
pub use ui::{UiSettings, ViewMode};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "DIFFPAD_CONFIG";

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "diffpad.toml";

/// Top-level configuration for diffpad.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Interface behaviour.
    #[serde(default)]
    pub ui: UiSettings,
    /// Diff engine settings.
    #[serde(default)]
    pub diff: DiffSettings,
    /// Language selection settings.
    #[serde(default)]
    pub language: LanguageSettings,
    /// Clipboard backend settings.
    #[serde(default)]
    pub clipboard: ClipboardSettings,
    /// Logging settings.
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Loads settings from the default file location and the environment.
    ///
    /// The file is `$DIFFPAD_CONFIG` when set, otherwise `diffpad.toml` in
    /// the working directory. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        Self::load(Some(&path))
    }

    /// Loads settings from an optional file plus the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if a value
    /// cannot be deserialized into its setting.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let s = builder
            .add_source(
                Environment::with_prefix("DIFFPAD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
