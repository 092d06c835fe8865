//! Diff engine configuration.

use serde::Deserialize;

/// Line diff algorithm.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithmKind {
    /// Myers' O(ND) algorithm.
    #[default]
    Myers,
    /// Patience diff, anchored on unique lines.
    Patience,
    /// Longest common subsequence.
    Lcs,
}

/// Diff engine settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DiffSettings {
    /// Unchanged lines kept around each change (default: 3)
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Algorithm used for the line diff (default: myers)
    #[serde(default)]
    pub algorithm: DiffAlgorithmKind,

    /// Largest accepted input per side, in bytes (default: 4 MiB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
            algorithm: DiffAlgorithmKind::default(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

fn default_context_lines() -> usize {
    3
}

fn default_max_input_bytes() -> usize {
    4 * 1024 * 1024
}
