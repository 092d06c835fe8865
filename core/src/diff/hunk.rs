//! Grouping of diff operations into hunks with surrounding context.

use super::DiffOp;

/// Role of a line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line shown for context.
    Context,
    /// Line removed from the old text.
    Delete,
    /// Line added in the new text.
    Insert,
}

/// A line of a hunk with its 1-based numbers on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Role of the line.
    pub kind: LineKind,
    /// Line number in the old text, absent for insertions.
    pub old_number: Option<usize>,
    /// Line number in the new text, absent for deletions.
    pub new_number: Option<usize>,
    /// Line content without the trailing newline.
    pub content: String,
}

impl DiffLine {
    /// Returns true for deletions and insertions.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.kind != LineKind::Context
    }
}

/// A contiguous block of changed lines plus context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// First old line (1-based), or the line before an empty range.
    pub old_start: usize,
    /// Number of old lines.
    pub old_len: usize,
    /// First new line (1-based), or the line before an empty range.
    pub new_start: usize,
    /// Number of new lines.
    pub new_len: usize,
    /// Lines in display order.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Unified diff header, e.g. `@@ -1,2 +1,2 @@`.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_len, self.new_start, self.new_len
        )
    }

    fn from_lines(lines: &[DiffLine], old_before: usize, new_before: usize) -> Self {
        let old_len = lines.iter().filter(|l| l.old_number.is_some()).count();
        let new_len = lines.iter().filter(|l| l.new_number.is_some()).count();
        Self {
            old_start: if old_len == 0 { old_before } else { old_before + 1 },
            old_len,
            new_start: if new_len == 0 { new_before } else { new_before + 1 },
            new_len,
            lines: lines.to_vec(),
        }
    }
}

fn flatten(old_lines: &[&str], new_lines: &[&str], ops: &[DiffOp]) -> Vec<DiffLine> {
    let mut out = Vec::with_capacity(old_lines.len().max(new_lines.len()));

    let removed = |out: &mut Vec<DiffLine>, range: std::ops::Range<usize>| {
        out.extend(range.map(|i| DiffLine {
            kind: LineKind::Delete,
            old_number: Some(i + 1),
            new_number: None,
            content: old_lines[i].to_string(),
        }));
    };
    let added = |out: &mut Vec<DiffLine>, range: std::ops::Range<usize>| {
        out.extend(range.map(|i| DiffLine {
            kind: LineKind::Insert,
            old_number: None,
            new_number: Some(i + 1),
            content: new_lines[i].to_string(),
        }));
    };

    for op in ops {
        match op {
            DiffOp::Equal { old, new } => {
                out.extend(old.clone().zip(new.clone()).map(|(o, n)| DiffLine {
                    kind: LineKind::Context,
                    old_number: Some(o + 1),
                    new_number: Some(n + 1),
                    content: old_lines[o].to_string(),
                }));
            }
            DiffOp::Delete { old } => removed(&mut out, old.clone()),
            DiffOp::Insert { new } => added(&mut out, new.clone()),
            DiffOp::Replace { old, new } => {
                removed(&mut out, old.clone());
                added(&mut out, new.clone());
            }
        }
    }

    out
}

/// Builds hunks from diff operations, keeping `context` unchanged lines
/// around each change. Changes separated by at most `2 * context` unchanged
/// lines share a hunk.
#[must_use]
pub fn build_hunks(
    old_lines: &[&str],
    new_lines: &[&str],
    ops: &[DiffOp],
    context: usize,
) -> Vec<Hunk> {
    let lines = flatten(old_lines, new_lines, ops);
    let mut hunks = Vec::new();
    let mut cursor = 0;

    while let Some(first) = lines[cursor..]
        .iter()
        .position(DiffLine::is_change)
        .map(|p| p + cursor)
    {
        let start = first.saturating_sub(context).max(cursor);
        let mut last = first;

        while let Some(next) = lines[last + 1..]
            .iter()
            .position(DiffLine::is_change)
            .map(|p| p + last + 1)
        {
            if next - last - 1 > 2 * context {
                break;
            }
            last = next;
        }

        let stop = (last + 1 + context).min(lines.len());
        let old_before = lines[..start]
            .iter()
            .filter(|l| l.old_number.is_some())
            .count();
        let new_before = lines[..start]
            .iter()
            .filter(|l| l.new_number.is_some())
            .count();

        hunks.push(Hunk::from_lines(&lines[start..stop], old_before, new_before));
        cursor = stop;
    }

    hunks
}
