//! Editable text pane with a line-number gutter.
//!
//! A pane owns one text buffer, its cursor and scroll position, and the
//! transient "Cleared"/"Copied" indicators of its toolbar. Text is stored
//! as lines split on `\n`, so there is always at least one (possibly
//! empty) line and the gutter shows exactly `text.split('\n').count()`
//! numbers.

pub mod feedback;

pub use feedback::TransientIndicator;

use crate::clipboard::{Clipboard, ClipboardError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error};

/// Default duration of toolbar feedback.
pub const DEFAULT_FEEDBACK: Duration = Duration::from_secs(2);

/// One editable text area.
#[derive(Debug, Clone)]
pub struct TextPane {
    label: String,
    placeholder: String,
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
    column_offset: usize,
    viewport_height: usize,
    viewport_width: usize,
    tab_width: usize,
    revision: u64,
    cleared: TransientIndicator,
    copied: TransientIndicator,
    copying: bool,
}

impl TextPane {
    /// Creates an empty pane.
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: 0,
            column_offset: 0,
            viewport_height: 1,
            viewport_width: usize::MAX,
            tab_width: 2,
            revision: 0,
            cleared: TransientIndicator::new(DEFAULT_FEEDBACK),
            copied: TransientIndicator::new(DEFAULT_FEEDBACK),
            copying: false,
        }
    }

    /// Sets how long clear/copy feedback stays visible.
    #[must_use]
    pub fn with_feedback(mut self, duration: Duration) -> Self {
        self.cleared = TransientIndicator::new(duration);
        self.copied = TransientIndicator::new(duration);
        self
    }

    /// Sets the number of spaces inserted by [`Self::insert_tab`].
    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Title shown above the pane.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Hint shown while the pane is empty.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Lines of the current text.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replaces the text and moves the cursor to its end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        self.row = self.lines.len() - 1;
        self.col = self.current_line().chars().count();
        self.touch();
    }

    /// True if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Number of lines, counting a trailing empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>() + self.lines.len() - 1
    }

    /// Gutter labels, one per line.
    pub fn gutter_numbers(&self) -> impl Iterator<Item = usize> {
        1..=self.line_count()
    }

    /// Incremented on every text mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Cursor as (row, column) in characters.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    // Scrolling

    /// First visible line.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// First line number shown in the gutter; tracks the text scroll.
    #[must_use]
    pub const fn gutter_offset(&self) -> usize {
        self.scroll
    }

    /// First visible column.
    #[must_use]
    pub const fn column_offset(&self) -> usize {
        self.column_offset
    }

    /// Records the visible area. The scroll position is only clamped, so a
    /// pane scrolled away from the cursor stays where it is.
    pub fn set_viewport(&mut self, height: usize, width: usize) {
        self.viewport_height = height.max(1);
        self.viewport_width = width.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Scrolls to an absolute line, clamped to the text.
    pub fn scroll_to(&mut self, line: usize) {
        self.scroll = line.min(self.max_scroll());
    }

    /// Scrolls by `delta` lines.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_to(self.scroll.saturating_add_signed(delta));
    }

    fn max_scroll(&self) -> usize {
        self.line_count().saturating_sub(self.viewport_height)
    }

    fn follow_cursor(&mut self) {
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + self.viewport_height {
            self.scroll = self.row + 1 - self.viewport_height;
        }
        self.scroll = self.scroll.min(self.max_scroll());
        if self.col < self.column_offset {
            self.column_offset = self.col;
        } else if self.col >= self.column_offset.saturating_add(self.viewport_width) {
            self.column_offset = self.col + 1 - self.viewport_width;
        }
    }

    // Editing

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let at = byte_index(self.current_line(), self.col);
        self.lines[self.row].insert(at, c);
        self.col += 1;
        self.touch();
    }

    /// Inserts text at the cursor, normalising `\r\n` and `\r` to `\n`.
    pub fn insert_str(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if text.is_empty() {
            return;
        }

        let at = byte_index(self.current_line(), self.col);
        let tail = self.lines[self.row].split_off(at);
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.lines[self.row].push_str(first);
        }
        for piece in pieces {
            self.row += 1;
            self.lines.insert(self.row, piece.to_string());
        }
        self.col = self.current_line().chars().count();
        self.lines[self.row].push_str(&tail);
        self.touch();
    }

    /// Inserts spaces up to the configured tab width.
    pub fn insert_tab(&mut self) {
        self.insert_str(&" ".repeat(self.tab_width));
    }

    /// Splits the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let at = byte_index(self.current_line(), self.col);
        let tail = self.lines[self.row].split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, tail);
        self.touch();
    }

    /// Deletes the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = byte_index(self.current_line(), self.col);
            self.lines[self.row].remove(at);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_line().chars().count();
            self.lines[self.row].push_str(&line);
        } else {
            return;
        }
        self.touch();
    }

    /// Deletes the character under the cursor, joining lines at the end.
    pub fn delete(&mut self) {
        let len = self.current_line().chars().count();
        if self.col < len {
            let at = byte_index(self.current_line(), self.col);
            self.lines[self.row].remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        } else {
            return;
        }
        self.touch();
    }

    /// Moves the cursor one character left, wrapping to the previous line.
    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_line().chars().count();
        }
        self.follow_cursor();
    }

    /// Moves the cursor one character right, wrapping to the next line.
    pub fn move_right(&mut self) {
        if self.col < self.current_line().chars().count() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
        self.follow_cursor();
    }

    /// Moves the cursor up one line.
    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col();
        }
        self.follow_cursor();
    }

    /// Moves the cursor down one line.
    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.clamp_col();
        }
        self.follow_cursor();
    }

    /// Moves the cursor to the start of the line.
    pub fn move_home(&mut self) {
        self.col = 0;
        self.follow_cursor();
    }

    /// Moves the cursor to the end of the line.
    pub fn move_end(&mut self) {
        self.col = self.current_line().chars().count();
        self.follow_cursor();
    }

    /// Moves the cursor to the start of the text.
    pub fn move_top(&mut self) {
        self.row = 0;
        self.col = 0;
        self.follow_cursor();
    }

    /// Moves the cursor to the end of the text.
    pub fn move_bottom(&mut self) {
        self.row = self.lines.len() - 1;
        self.col = self.current_line().chars().count();
        self.follow_cursor();
    }

    // Toolbar

    /// Empties the pane and raises the "Cleared" indicator.
    ///
    /// Returns false, doing nothing, when the pane is already empty.
    pub fn clear(&mut self, now: Instant) -> bool {
        if self.is_empty() {
            return false;
        }
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
        self.column_offset = 0;
        self.cleared.trigger(now);
        self.touch();
        debug!(pane = %self.label, "pane cleared");
        true
    }

    /// True while the "Cleared" indicator is shown.
    #[must_use]
    pub fn is_cleared(&self, now: Instant) -> bool {
        self.cleared.is_active(now)
    }

    /// Begins a copy: raises the "Copied" indicator and returns the text to
    /// write, or `None` when the pane is empty.
    pub fn start_copy(&mut self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        self.copying = true;
        Some(self.text())
    }

    /// Completes a copy. Failures are logged; in both cases the indicator
    /// lowers one feedback period after `now`.
    pub fn finish_copy(&mut self, result: Result<(), ClipboardError>, now: Instant) {
        if let Err(e) = result {
            error!(pane = %self.label, error = %e, "Failed to copy text");
        }
        self.copying = false;
        self.copied.trigger(now);
    }

    /// True while a copy is in flight or its indicator is shown.
    #[must_use]
    pub fn is_copied(&self, now: Instant) -> bool {
        self.copying || self.copied.is_active(now)
    }

    /// Copies the text through `clipboard`. Returns false when the pane is
    /// empty.
    pub async fn copy_to<C: Clipboard + ?Sized>(&mut self, clipboard: &C) -> bool {
        let Some(text) = self.start_copy() else {
            return false;
        };
        let result = clipboard.write_text(&text).await;
        self.finish_copy(result, Instant::now());
        true
    }

    /// Earliest instant at which an indicator lowers, for redraw scheduling.
    #[must_use]
    pub fn next_feedback_deadline(&self, now: Instant) -> Option<Instant> {
        [self.cleared.expires_at(), self.copied.expires_at()]
            .into_iter()
            .flatten()
            .filter(|t| *t > now)
            .min()
    }

    fn current_line(&self) -> &str {
        &self.lines[self.row]
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(self.current_line().chars().count());
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.follow_cursor();
    }
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}
