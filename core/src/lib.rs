//! Diffpad Core - state and diff logic for the diffpad comparison tool.
//!
//! This crate owns everything that is not drawing: the two editable text
//! panes, the language catalog, the comparison controller with its
//! debounced live updates, the diff engine, syntax highlighting, clipboard
//! backends, configuration and telemetry.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Clipboard backends (OSC 52 and external commands).
pub mod clipboard;
/// Layered configuration (defaults, file, environment).
pub mod config;
/// Comparison controller orchestrating recomputation of the diff.
pub mod controller;
/// Cancellable delayed callbacks for live updates.
pub mod debounce;
/// Diff engine: line diff, hunks and the render-ready diff file.
pub mod diff;
/// Syntax highlighting backed by syntect.
pub mod highlight;
/// Language catalog, selector and detection.
pub mod language;
/// Editable text panes with gutter and transient feedback.
pub mod pane;
/// Logging setup.
pub mod telemetry;

pub use controller::{ComparisonController, PaneSide, RecomputeOutcome};
pub use diff::{DiffError, DiffFile};
pub use language::{Language, LanguageSelector};
pub use pane::TextPane;
