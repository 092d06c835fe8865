//! Line diff engine.
//!
//! Texts are split on `\n`, diffed line by line through a swappable
//! [`DiffAlgorithm`], grouped into hunks and packaged as a [`DiffFile`]
//! ready for rendering.

pub mod algorithm;
pub mod file;
pub mod hunk;
pub mod inline;
pub mod traits;

pub use algorithm::SimilarDiff;
pub use file::{DiffFile, DiffStats, FileSide, SplitCell, SplitRow, UnifiedLine};
pub use hunk::{DiffLine, Hunk, LineKind, build_hunks};
pub use inline::inline_changes;
pub use traits::{DiffAlgorithm, DiffOp};

use crate::config::DiffSettings;
use crate::language::Language;
use thiserror::Error;
use tracing::instrument;

/// Errors produced while building a diff.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// One side exceeds the configured size limit.
    #[error("Input Too Large: {size} bytes exceeds the {limit} byte limit")]
    InputTooLarge {
        /// Size of the offending input.
        size: usize,
        /// Configured limit.
        limit: usize,
    },
    /// One side contains a NUL byte.
    #[error("Binary Input: text contains NUL bytes")]
    Binary,
    /// Syntax highlighting failed.
    #[error("Highlight Error: {0}")]
    Highlight(String),
}

/// Builds [`DiffFile`]s with a configured algorithm and context size.
pub struct DiffEngine {
    algorithm: Box<dyn DiffAlgorithm>,
    context_lines: usize,
    max_input_bytes: usize,
}

impl std::fmt::Debug for DiffEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffEngine")
            .field("context_lines", &self.context_lines)
            .field("max_input_bytes", &self.max_input_bytes)
            .finish_non_exhaustive()
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::from_settings(&DiffSettings::default())
    }
}

impl DiffEngine {
    /// Creates an engine with a custom algorithm.
    #[must_use]
    pub fn new(algorithm: Box<dyn DiffAlgorithm>, context_lines: usize, max_input_bytes: usize) -> Self {
        Self {
            algorithm,
            context_lines,
            max_input_bytes,
        }
    }

    /// Creates an engine from settings.
    #[must_use]
    pub fn from_settings(settings: &DiffSettings) -> Self {
        Self::new(
            Box::new(SimilarDiff::new(settings.algorithm)),
            settings.context_lines,
            settings.max_input_bytes,
        )
    }

    /// Context lines kept around changes.
    #[must_use]
    pub const fn context_lines(&self) -> usize {
        self.context_lines
    }

    /// Diffs two named texts into a [`DiffFile`].
    ///
    /// Identical inputs produce a file with no hunks.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InputTooLarge`] or [`DiffError::Binary`] when a
    /// side is rejected.
    #[instrument(skip_all, fields(old = old_name, new = new_name))]
    pub fn generate_diff_file(
        &self,
        old_name: &str,
        old_content: &str,
        new_name: &str,
        new_content: &str,
        old_language: &'static Language,
        new_language: &'static Language,
    ) -> Result<DiffFile, DiffError> {
        self.check(old_content)?;
        self.check(new_content)?;

        let old_lines: Vec<&str> = old_content.split('\n').collect();
        let new_lines: Vec<&str> = new_content.split('\n').collect();
        let ops = self.algorithm.diff(&old_lines, &new_lines);
        let hunks = build_hunks(&old_lines, &new_lines, &ops, self.context_lines);

        Ok(DiffFile::new(
            FileSide {
                name: old_name.to_string(),
                content: old_content.to_string(),
                language: old_language,
            },
            FileSide {
                name: new_name.to_string(),
                content: new_content.to_string(),
                language: new_language,
            },
            hunks,
        ))
    }

    fn check(&self, content: &str) -> Result<(), DiffError> {
        if content.len() > self.max_input_bytes {
            return Err(DiffError::InputTooLarge {
                size: content.len(),
                limit: self.max_input_bytes,
            });
        }
        if content.contains('\0') {
            return Err(DiffError::Binary);
        }
        Ok(())
    }
}
