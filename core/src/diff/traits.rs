//! Diff algorithm traits and types.
//!
//! Algorithms report line-range operations; everything downstream (hunks,
//! unified and split layouts) is built from these.

use std::ops::Range;

/// A single diff operation over line indices (0-based, end exclusive).
///
/// Operations are reported in order and together cover both inputs
/// exactly once, so positions of `Insert` in the old text and `Delete` in
/// the new text follow from the preceding operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    /// Lines present unchanged in both texts.
    Equal {
        /// Lines in the old text.
        old: Range<usize>,
        /// Lines in the new text.
        new: Range<usize>,
    },
    /// Lines only in the new text.
    Insert {
        /// Lines in the new text.
        new: Range<usize>,
    },
    /// Lines only in the old text.
    Delete {
        /// Lines in the old text.
        old: Range<usize>,
    },
    /// Old lines replaced by new lines.
    Replace {
        /// Lines removed from the old text.
        old: Range<usize>,
        /// Lines added in the new text.
        new: Range<usize>,
    },
}

impl DiffOp {
    /// Old-text lines covered by this operation (empty for inserts).
    #[must_use]
    pub fn old_range(&self) -> Option<Range<usize>> {
        match self {
            Self::Equal { old, .. } | Self::Delete { old } | Self::Replace { old, .. } => {
                Some(old.clone())
            }
            Self::Insert { .. } => None,
        }
    }

    /// New-text lines covered by this operation (empty for deletes).
    #[must_use]
    pub fn new_range(&self) -> Option<Range<usize>> {
        match self {
            Self::Equal { new, .. } | Self::Insert { new } | Self::Replace { new, .. } => {
                Some(new.clone())
            }
            Self::Delete { .. } => None,
        }
    }

    /// Returns true if this operation represents a change (not equal).
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Equal { .. })
    }

    /// Number of old lines consumed.
    #[must_use]
    pub fn old_len(&self) -> usize {
        self.old_range().map_or(0, |r| r.len())
    }

    /// Number of new lines produced.
    #[must_use]
    pub fn new_len(&self) -> usize {
        self.new_range().map_or(0, |r| r.len())
    }
}

/// Trait for line diff algorithms.
///
/// The `Send + Sync` bound lets an engine be shared with worker threads.
pub trait DiffAlgorithm: Send + Sync {
    /// Computes the operations transforming `base` into `target`.
    fn diff(&self, base: &[&str], target: &[&str]) -> Vec<DiffOp>;
}
