//! The render-ready diff artifact.

use super::hunk::{DiffLine, Hunk, LineKind};
use super::inline::inline_changes;
use crate::highlight::{HighlightedLine, Highlighter, Theme};
use crate::language::Language;
use std::ops::Range;

/// One side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSide {
    /// Synthetic file name, e.g. `old_file.rs`.
    pub name: String,
    /// Full content as compared.
    pub content: String,
    /// Language tag used for highlighting this side.
    pub language: &'static Language,
}

/// A row of the unified layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifiedLine {
    /// `@@ -a,b +c,d @@` separator before each hunk.
    HunkHeader(String),
    /// A diff line with the byte ranges to emphasise.
    Line {
        /// The line itself.
        line: DiffLine,
        /// Changed words, empty for context lines.
        inline: Vec<Range<usize>>,
    },
}

/// One half of a split row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCell {
    /// The line shown in this column.
    pub line: DiffLine,
    /// Changed words, empty for context lines.
    pub inline: Vec<Range<usize>>,
}

/// A row of the split layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitRow {
    /// Separator before each hunk.
    HunkHeader(String),
    /// Old line on the left, new line on the right; either may be blank.
    Pair {
        /// Old side.
        left: Option<SplitCell>,
        /// New side.
        right: Option<SplitCell>,
    },
}

/// Summary figures for the results header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    /// Inserted lines.
    pub additions: usize,
    /// Deleted lines.
    pub deletions: usize,
    /// Number of hunks.
    pub hunks: usize,
}

/// The diff between two texts, with precomputed layouts.
///
/// A `DiffFile` is assembled mutably (`init_*`, `build_*`) and then shared
/// read-only; the controller never mutates a published one.
#[derive(Debug, Clone)]
pub struct DiffFile {
    old: FileSide,
    new: FileSide,
    hunks: Vec<Hunk>,
    theme: Theme,
    old_highlight: Option<Vec<HighlightedLine>>,
    new_highlight: Option<Vec<HighlightedLine>>,
    unified: Vec<UnifiedLine>,
    split: Vec<SplitRow>,
}

impl DiffFile {
    /// Creates a diff file from both sides and their hunks.
    #[must_use]
    pub fn new(old: FileSide, new: FileSide, hunks: Vec<Hunk>) -> Self {
        Self {
            old,
            new,
            hunks,
            theme: Theme::default(),
            old_highlight: None,
            new_highlight: None,
            unified: Vec::new(),
            split: Vec::new(),
        }
    }

    /// Old side.
    #[must_use]
    pub const fn old(&self) -> &FileSide {
        &self.old
    }

    /// New side.
    #[must_use]
    pub const fn new_side(&self) -> &FileSide {
        &self.new
    }

    /// Hunks in order.
    #[must_use]
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// Theme the file was prepared for.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Sets the theme.
    pub fn init_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Syntax highlights both sides with the file's theme.
    ///
    /// # Errors
    ///
    /// Propagates highlighter failures.
    pub fn init_highlight(&mut self) -> Result<(), super::DiffError> {
        let highlighter = Highlighter::new(self.theme);
        self.old_highlight = Some(highlighter.highlight(self.old.language, &self.old.content)?);
        self.new_highlight = Some(highlighter.highlight(self.new.language, &self.new.content)?);
        Ok(())
    }

    /// Highlighted fragments for a diff line, if highlighting ran.
    #[must_use]
    pub fn highlighted(&self, line: &DiffLine) -> Option<&HighlightedLine> {
        let (lines, number) = match line.kind {
            LineKind::Insert => (self.new_highlight.as_ref()?, line.new_number?),
            LineKind::Delete | LineKind::Context => (self.old_highlight.as_ref()?, line.old_number?),
        };
        lines.get(number.checked_sub(1)?)
    }

    /// Precomputes the unified layout.
    pub fn build_unified_lines(&mut self) {
        let mut rows = Vec::new();
        for hunk in &self.hunks {
            rows.push(UnifiedLine::HunkHeader(hunk.header()));
            for (line, inline) in with_inline(&hunk.lines) {
                rows.push(UnifiedLine::Line { line, inline });
            }
        }
        self.unified = rows;
    }

    /// Precomputes the split layout, pairing deletions with insertions.
    pub fn build_split_lines(&mut self) {
        let mut rows = Vec::new();
        for hunk in &self.hunks {
            rows.push(SplitRow::HunkHeader(hunk.header()));

            let mut deletes: Vec<SplitCell> = Vec::new();
            let mut inserts: Vec<SplitCell> = Vec::new();
            for (line, inline) in with_inline(&hunk.lines) {
                match line.kind {
                    LineKind::Delete => deletes.push(SplitCell { line, inline }),
                    LineKind::Insert => inserts.push(SplitCell { line, inline }),
                    LineKind::Context => {
                        flush_pairs(&mut rows, &mut deletes, &mut inserts);
                        rows.push(SplitRow::Pair {
                            left: Some(SplitCell {
                                line: line.clone(),
                                inline: Vec::new(),
                            }),
                            right: Some(SplitCell {
                                line,
                                inline: Vec::new(),
                            }),
                        });
                    }
                }
            }
            flush_pairs(&mut rows, &mut deletes, &mut inserts);
        }
        self.split = rows;
    }

    /// Unified rows; empty until [`Self::build_unified_lines`] runs.
    #[must_use]
    pub fn unified_lines(&self) -> &[UnifiedLine] {
        &self.unified
    }

    /// Split rows; empty until [`Self::build_split_lines`] runs.
    #[must_use]
    pub fn split_rows(&self) -> &[SplitRow] {
        &self.split
    }

    /// Counts of added and removed lines.
    #[must_use]
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats {
            hunks: self.hunks.len(),
            ..DiffStats::default()
        };
        for line in self.hunks.iter().flat_map(|h| &h.lines) {
            match line.kind {
                LineKind::Insert => stats.additions += 1,
                LineKind::Delete => stats.deletions += 1,
                LineKind::Context => {}
            }
        }
        stats
    }

    /// True if this file was built from exactly these inputs.
    #[must_use]
    pub fn matches(&self, old: &str, new: &str, language: &Language) -> bool {
        self.old.content == old
            && self.new.content == new
            && self.old.language == language
            && self.new.language == language
    }
}

fn flush_pairs(rows: &mut Vec<SplitRow>, deletes: &mut Vec<SplitCell>, inserts: &mut Vec<SplitCell>) {
    let count = deletes.len().max(inserts.len());
    let mut left = deletes.drain(..);
    let mut right = inserts.drain(..);
    for _ in 0..count {
        rows.push(SplitRow::Pair {
            left: left.next(),
            right: right.next(),
        });
    }
}

/// Pairs each line with its changed-word ranges. Runs of deletions are
/// matched with the insertions that follow them, row by row.
fn with_inline(lines: &[DiffLine]) -> Vec<(DiffLine, Vec<Range<usize>>)> {
    let mut out: Vec<(DiffLine, Vec<Range<usize>>)> =
        lines.iter().map(|l| (l.clone(), Vec::new())).collect();

    let mut idx = 0;
    while idx < lines.len() {
        if lines[idx].kind != LineKind::Delete {
            idx += 1;
            continue;
        }
        let del_start = idx;
        while idx < lines.len() && lines[idx].kind == LineKind::Delete {
            idx += 1;
        }
        let ins_start = idx;
        while idx < lines.len() && lines[idx].kind == LineKind::Insert {
            idx += 1;
        }

        let paired = (ins_start - del_start).min(idx - ins_start);
        for offset in 0..paired {
            let (d, i) = (del_start + offset, ins_start + offset);
            let (old_ranges, new_ranges) = inline_changes(&lines[d].content, &lines[i].content);
            out[d].1 = old_ranges;
            out[i].1 = new_ranges;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffAlgorithm, SimilarDiff, build_hunks};

    fn file(old: &str, new: &str) -> DiffFile {
        let lang = Language::from_id("rust").unwrap();
        let old_lines: Vec<&str> = old.split('\n').collect();
        let new_lines: Vec<&str> = new.split('\n').collect();
        let ops = SimilarDiff::default().diff(&old_lines, &new_lines);
        let hunks = build_hunks(&old_lines, &new_lines, &ops, 3);
        DiffFile::new(
            FileSide {
                name: "old_file.rs".into(),
                content: old.into(),
                language: lang,
            },
            FileSide {
                name: "new_file.rs".into(),
                content: new.into(),
                language: lang,
            },
            hunks,
        )
    }

    #[test]
    fn test_unified_layout() {
        let mut file = file("hello\nworld", "hello\nworld!");
        file.build_unified_lines();
        let rows = file.unified_lines();
        assert_eq!(rows.len(), 4);
        assert!(matches!(&rows[0], UnifiedLine::HunkHeader(h) if h == "@@ -1,2 +1,2 @@"));

        let changed: Vec<_> = rows
            .iter()
            .filter_map(|r| match r {
                UnifiedLine::Line { line, inline } if line.is_change() => Some((line, inline)),
                _ => None,
            })
            .collect();
        assert_eq!(changed.len(), 2);
        assert_eq!(changed[0].0.content, "world");
        assert_eq!(changed[1].0.content, "world!");
        assert!(!changed[1].1.is_empty());
    }

    #[test]
    fn test_split_layout_pairs_rows() {
        let mut file = file("a\nb\nc", "a\nB\nc\nd");
        file.build_split_lines();
        let pairs: Vec<_> = file
            .split_rows()
            .iter()
            .filter_map(|r| match r {
                SplitRow::Pair { left, right } => Some((
                    left.as_ref().map(|c| c.line.content.as_str()),
                    right.as_ref().map(|c| c.line.content.as_str()),
                )),
                SplitRow::HunkHeader(_) => None,
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Some("a"), Some("a")),
                (Some("b"), Some("B")),
                (Some("c"), Some("c")),
                (None, Some("d")),
            ]
        );
    }

    #[test]
    fn test_stats() {
        let file = file("a\nb\nc", "a\nB\nc\nd");
        assert_eq!(
            file.stats(),
            DiffStats {
                additions: 2,
                deletions: 1,
                hunks: 1
            }
        );
    }

    #[test]
    fn test_highlight_lookup_by_side() {
        let mut file = file("let a = 1;", "let b = 2;");
        file.init_theme(Theme::Dark);
        file.init_highlight().unwrap();
        file.build_unified_lines();

        for row in file.unified_lines() {
            if let UnifiedLine::Line { line, .. } = row {
                let spans = file.highlighted(line).unwrap();
                let text: String = spans.iter().map(|s| s.text.as_str()).collect();
                assert_eq!(text, line.content);
            }
        }
    }

    #[test]
    fn test_matches_inputs() {
        let file = file("x", "y");
        let rust = Language::from_id("rust").unwrap();
        assert!(file.matches("x", "y", rust));
        assert!(!file.matches("x", "z", rust));
        assert!(!file.matches("x", "y", Language::PLAIN_TEXT));
    }
}
