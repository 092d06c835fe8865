use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Builder for setting up logging.
///
/// The terminal belongs to the interface, so events go to a rolling daily
/// JSON file instead of stdout.
pub struct TelemetryBuilder {
    service_name: String,
    log_level: String,
    log_dir: PathBuf,
}

impl TelemetryBuilder {
    /// Creates a builder logging `<log_dir>/<service_name>.log.<date>`.
    pub fn new(service_name: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_string(),
            log_dir: log_dir.into(),
        }
    }

    /// Sets the filter used when `RUST_LOG` is not set.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Initializes the global subscriber.
    ///
    /// The returned guard flushes buffered events when dropped and must be
    /// held for the lifetime of the program.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log directory cannot be created
    /// - A global subscriber is already installed
    pub fn init(self) -> Result<WorkerGuard> {
        std::fs::create_dir_all(&self.log_dir).with_context(|| {
            format!("Failed to create log directory {}", self.log_dir.display())
        })?;

        let appender =
            tracing_appender::rolling::daily(&self.log_dir, format!("{}.log", self.service_name));
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let fmt_layer = fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(FmtSpan::CLOSE)
            .boxed();

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to init subscriber")?;

        Ok(guard)
    }
}
