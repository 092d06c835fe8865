//! Clipboard backends.
//!
//! Terminals offer two practical ways to reach the system clipboard: the
//! OSC 52 escape sequence, understood by most modern emulators (and over
//! SSH), or a platform helper such as `pbcopy` or `wl-copy`.

use crate::config::{ClipboardBackend, ClipboardSettings};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use parking_lot::Mutex;
use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Clipboard errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No backend is available.
    #[error("Clipboard Unavailable")]
    Unavailable,
    /// Encoded payload exceeds the OSC 52 limit.
    #[error("Payload Too Large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge {
        /// Encoded size.
        size: usize,
        /// Configured limit.
        limit: usize,
    },
    /// Writing the escape sequence failed.
    #[error("Write Error: {0}")]
    Write(String),
    /// The helper command failed.
    #[error("Command Error: {0}")]
    Command(String),
}

/// Asynchronous clipboard sink.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Places `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipboardError`] when the backend rejects the write.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Builds the OSC 52 sequence that sets the system clipboard.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Clipboard that emits OSC 52 to a writer, normally the terminal.
pub struct Osc52Clipboard<W> {
    writer: Mutex<W>,
    max_payload: usize,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    /// Creates a clipboard writing to `writer`.
    pub fn new(writer: W, max_payload: usize) -> Self {
        Self {
            writer: Mutex::new(writer),
            max_payload,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let encoded_len = text.len().div_ceil(3) * 4;
        if encoded_len > self.max_payload {
            return Err(ClipboardError::TooLarge {
                size: encoded_len,
                limit: self.max_payload,
            });
        }

        let sequence = osc52_sequence(text);
        let mut writer = self.writer.lock();
        writer
            .write_all(sequence.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Clipboard that pipes text into a helper program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Creates a clipboard for an explicit command line.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// Finds an installed helper for the current platform.
    #[must_use]
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") && command_exists("pbcopy") {
            return Some(Self::new("pbcopy", &[]));
        }
        if cfg!(target_os = "windows") && command_exists("clip") {
            return Some(Self::new("clip", &[]));
        }
        if std::env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy") {
            return Some(Self::new("wl-copy", &[]));
        }
        if std::env::var_os("DISPLAY").is_some() {
            if command_exists("xclip") {
                return Some(Self::new("xclip", &["-selection", "clipboard"]));
            }
            if command_exists("xsel") {
                return Some(Self::new("xsel", &["--clipboard", "--input"]));
            }
        }
        None
    }

    /// The program this clipboard runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClipboardError::Command(format!("{}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::Command(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::Command(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Command(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

/// Clipboard used when nothing else is configured or found.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

#[async_trait]
impl Clipboard for UnavailableClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// Picks the clipboard backend from settings.
///
/// `auto` prefers an installed helper command and falls back to OSC 52 on
/// stdout.
#[must_use]
pub fn clipboard_from_settings(settings: &ClipboardSettings) -> Arc<dyn Clipboard> {
    let osc52 = || -> Arc<dyn Clipboard> {
        Arc::new(Osc52Clipboard::new(std::io::stdout(), settings.max_payload))
    };

    match settings.backend {
        ClipboardBackend::Osc52 => osc52(),
        ClipboardBackend::Command => match CommandClipboard::detect() {
            Some(command) => {
                debug!(program = command.program(), "clipboard command selected");
                Arc::new(command)
            }
            None => Arc::new(UnavailableClipboard),
        },
        ClipboardBackend::Auto => match CommandClipboard::detect() {
            Some(command) => {
                debug!(program = command.program(), "clipboard command selected");
                Arc::new(command)
            }
            None => osc52(),
        },
    }
}

fn command_exists(command: &str) -> bool {
    if command.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(command).is_file();
    }
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        dir.join(command).is_file()
            || (cfg!(target_os = "windows") && dir.join(format!("{command}.exe")).is_file())
    })
}
