//! Line diff backed by the `similar` crate.

use super::{DiffAlgorithm, DiffOp};
use crate::config::DiffAlgorithmKind;
use similar::{Algorithm, capture_diff_slices};

/// [`DiffAlgorithm`] delegating to `similar`.
#[derive(Debug, Clone, Copy)]
pub struct SimilarDiff {
    algorithm: Algorithm,
}

impl SimilarDiff {
    /// Creates a diff for the configured algorithm.
    #[must_use]
    pub const fn new(kind: DiffAlgorithmKind) -> Self {
        let algorithm = match kind {
            DiffAlgorithmKind::Myers => Algorithm::Myers,
            DiffAlgorithmKind::Patience => Algorithm::Patience,
            DiffAlgorithmKind::Lcs => Algorithm::Lcs,
        };
        Self { algorithm }
    }
}

impl Default for SimilarDiff {
    fn default() -> Self {
        Self::new(DiffAlgorithmKind::default())
    }
}

impl DiffAlgorithm for SimilarDiff {
    fn diff(&self, base: &[&str], target: &[&str]) -> Vec<DiffOp> {
        capture_diff_slices(self.algorithm, base, target)
            .into_iter()
            .map(|op| match op {
                similar::DiffOp::Equal {
                    old_index,
                    new_index,
                    len,
                } => DiffOp::Equal {
                    old: old_index..old_index + len,
                    new: new_index..new_index + len,
                },
                similar::DiffOp::Delete {
                    old_index, old_len, ..
                } => DiffOp::Delete {
                    old: old_index..old_index + old_len,
                },
                similar::DiffOp::Insert {
                    new_index, new_len, ..
                } => DiffOp::Insert {
                    new: new_index..new_index + new_len,
                },
                similar::DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => DiffOp::Replace {
                    old: old_index..old_index + old_len,
                    new: new_index..new_index + new_len,
                },
            })
            .filter(|op| op.old_len() + op.new_len() > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(ops: &[DiffOp]) -> (usize, usize) {
        ops.iter()
            .fold((0, 0), |(o, n), op| (o + op.old_len(), n + op.new_len()))
    }

    #[test]
    fn test_identical_is_single_equal() {
        let lines = ["a", "b", "c"];
        let ops = SimilarDiff::default().diff(&lines, &lines);
        assert_eq!(
            ops,
            vec![DiffOp::Equal {
                old: 0..3,
                new: 0..3
            }]
        );
    }

    #[test]
    fn test_changed_last_line() {
        let ops = SimilarDiff::default().diff(&["hello", "world"], &["hello", "world!"]);
        assert_eq!(
            ops,
            vec![
                DiffOp::Equal {
                    old: 0..1,
                    new: 0..1
                },
                DiffOp::Replace {
                    old: 1..2,
                    new: 1..2
                },
            ]
        );
    }

    #[test]
    fn test_ops_cover_both_inputs() {
        let base = ["a", "b", "c", "d", "e"];
        let target = ["a", "x", "c", "e", "f", "g"];
        for kind in [
            DiffAlgorithmKind::Myers,
            DiffAlgorithmKind::Patience,
            DiffAlgorithmKind::Lcs,
        ] {
            let ops = SimilarDiff::new(kind).diff(&base, &target);
            assert_eq!(covered(&ops), (base.len(), target.len()), "{kind:?}");
        }
    }

    #[test]
    fn test_empty_sides() {
        let ops = SimilarDiff::default().diff(&[], &["a", "b"]);
        assert_eq!(ops, vec![DiffOp::Insert { new: 0..2 }]);

        let ops = SimilarDiff::default().diff(&["a"], &[]);
        assert_eq!(ops, vec![DiffOp::Delete { old: 0..1 }]);
    }
}
