//! Logging configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Telemetry settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Filter directive used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for the rolling log file (default: platform data dir)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl TelemetrySettings {
    /// Returns the configured log directory or the platform default.
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map_or_else(|| PathBuf::from("logs"), |d| d.join("diffpad").join("logs"))
        })
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
