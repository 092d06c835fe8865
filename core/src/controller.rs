//! Comparison controller.
//!
//! Owns both panes, the language selection and the live-update flag, and
//! turns them into a published [`DiffFile`]. Recomputation is synchronous;
//! the only deferred work is the debounce timer that triggers it in live
//! mode.

use crate::config::Settings;
use crate::debounce::{Debouncer, Ticket};
use crate::diff::{DiffEngine, DiffError, DiffFile};
use crate::highlight::Theme;
use crate::language::{self, Language, LanguageError, LanguageSelector};
use crate::pane::TextPane;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

const OLD_FILE: &str = "old_file";
const NEW_FILE: &str = "new_file";

/// Identifies one of the two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneSide {
    /// Left pane, the "before" text.
    Original,
    /// Right pane, the "after" text.
    Modified,
}

impl PaneSide {
    /// The other pane.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Original => Self::Modified,
            Self::Modified => Self::Original,
        }
    }
}

/// What a call to [`ComparisonController::recompute`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeOutcome {
    /// Both panes empty; no artifact.
    Cleared,
    /// The published artifact already reflects the inputs.
    Skipped,
    /// The texts are equal; no artifact.
    Identical,
    /// A new artifact was published.
    Updated,
    /// Building the diff failed; no artifact.
    Failed,
}

/// Coordinates panes, language and diff computation.
#[derive(Debug)]
pub struct ComparisonController {
    original: TextPane,
    modified: TextPane,
    language: LanguageSelector,
    auto_detect: bool,
    live: bool,
    engine: DiffEngine,
    theme: Theme,
    debounce_delay: Duration,
    debouncer: Option<Debouncer>,
    artifact: Option<Arc<DiffFile>>,
    recomputations: u64,
}

impl ComparisonController {
    /// Creates a controller with empty panes.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::Unknown`] if the configured default
    /// language is not in the catalog.
    pub fn new(settings: &Settings) -> Result<Self, LanguageError> {
        let pane = |label: &str, placeholder: &str| {
            TextPane::new(label, placeholder)
                .with_feedback(settings.ui.feedback())
                .with_tab_width(settings.ui.tab_width)
        };

        Ok(Self {
            original: pane("Original", "Paste original text here..."),
            modified: pane("Modified", "Paste modified text here..."),
            language: LanguageSelector::with_default(&settings.language.default)?,
            auto_detect: settings.language.auto_detect,
            live: settings.ui.live_updates,
            engine: DiffEngine::from_settings(&settings.diff),
            theme: settings.ui.theme,
            debounce_delay: settings.ui.debounce(),
            debouncer: None,
            artifact: None,
            recomputations: 0,
        })
    }

    /// Routes live-update tickets to `sender`. Until this is called, live
    /// edits recompute immediately.
    pub fn attach_debouncer(&mut self, sender: UnboundedSender<Ticket>) {
        self.debouncer = Some(Debouncer::new(self.debounce_delay, sender));
    }

    /// A pane by side.
    #[must_use]
    pub const fn pane(&self, side: PaneSide) -> &TextPane {
        match side {
            PaneSide::Original => &self.original,
            PaneSide::Modified => &self.modified,
        }
    }

    /// Mutable access to a pane for non-editing state (scroll, viewport).
    /// Text changes should go through [`Self::edit`].
    pub const fn pane_mut(&mut self, side: PaneSide) -> &mut TextPane {
        match side {
            PaneSide::Original => &mut self.original,
            PaneSide::Modified => &mut self.modified,
        }
    }

    /// The original pane.
    #[must_use]
    pub const fn original(&self) -> &TextPane {
        &self.original
    }

    /// The modified pane.
    #[must_use]
    pub const fn modified(&self) -> &TextPane {
        &self.modified
    }

    /// Applies `f` to a pane and reacts if the text changed.
    pub fn edit<R>(&mut self, side: PaneSide, f: impl FnOnce(&mut TextPane) -> R) -> R {
        let pane = self.pane_mut(side);
        let before = pane.revision();
        let result = f(pane);
        if pane.revision() != before {
            self.changed();
        }
        result
    }

    /// Clears a pane. Returns false when it was already empty.
    pub fn clear_pane(&mut self, side: PaneSide, now: Instant) -> bool {
        self.edit(side, |pane| pane.clear(now))
    }

    /// Language selector state.
    #[must_use]
    pub const fn language(&self) -> &LanguageSelector {
        &self.language
    }

    /// Mutable selector state for menu navigation.
    pub const fn language_mut(&mut self) -> &mut LanguageSelector {
        &mut self.language
    }

    /// Selects a language by id.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::Unknown`] for ids outside the catalog.
    pub fn select_language(&mut self, id: &str) -> Result<(), LanguageError> {
        self.language.select(id)?;
        self.changed();
        Ok(())
    }

    /// Selects the highlighted menu row.
    pub fn confirm_language(&mut self) -> &'static Language {
        let language = self.language.confirm();
        self.changed();
        language
    }

    /// The language both sides are tagged with on the next recompute.
    #[must_use]
    pub fn effective_language(&self) -> &'static Language {
        if self.auto_detect && !self.language.is_explicit() {
            let text = if self.modified.is_empty() {
                self.original.text()
            } else {
                self.modified.text()
            };
            return language::detect(&text);
        }
        self.language.selected()
    }

    /// True when edits recompute automatically.
    #[must_use]
    pub const fn live_updates(&self) -> bool {
        self.live
    }

    /// Turns live updates on or off. Turning them off drops any pending
    /// recomputation; turning them on schedules one.
    pub fn set_live_updates(&mut self, live: bool) {
        if self.live == live {
            return;
        }
        self.live = live;
        debug!(live, "live updates toggled");
        if live {
            self.changed();
        } else if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.cancel();
        }
    }

    /// True when explicit submission is allowed: both panes hold text.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.original.is_empty() && !self.modified.is_empty()
    }

    /// Recomputes on explicit request. Returns `None` when disabled.
    pub fn submit(&mut self) -> Option<RecomputeOutcome> {
        if !self.can_submit() {
            return None;
        }
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.cancel();
        }
        Some(self.recompute())
    }

    /// Handles a debounce ticket. Stale tickets and tickets arriving after
    /// live updates were turned off are ignored.
    pub fn handle_tick(&mut self, ticket: Ticket) -> Option<RecomputeOutcome> {
        let accepted = self
            .debouncer
            .as_mut()
            .is_some_and(|debouncer| debouncer.accept(ticket));
        (accepted && self.live).then(|| self.recompute())
    }

    /// True while a live recomputation is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.as_ref().is_some_and(Debouncer::is_pending)
    }

    /// The published diff, if any.
    #[must_use]
    pub fn artifact(&self) -> Option<&Arc<DiffFile>> {
        self.artifact.as_ref()
    }

    /// Number of times [`Self::recompute`] has run.
    #[must_use]
    pub const fn recompute_count(&self) -> u64 {
        self.recomputations
    }

    /// Rebuilds the diff artifact from the current inputs.
    #[instrument(skip(self), fields(n = self.recomputations + 1))]
    pub fn recompute(&mut self) -> RecomputeOutcome {
        self.recomputations += 1;

        if self.original.is_empty() && self.modified.is_empty() {
            debug!("both panes empty");
            self.artifact = None;
            return RecomputeOutcome::Cleared;
        }

        let original = self.original.text();
        let modified = self.modified.text();
        let old_content = or_newline(&original);
        let new_content = or_newline(&modified);
        let language = self.effective_language();

        if self
            .artifact
            .as_ref()
            .is_some_and(|file| file.matches(old_content, new_content, language))
        {
            debug!("inputs unchanged");
            return RecomputeOutcome::Skipped;
        }

        if old_content == new_content {
            debug!("texts identical");
            self.artifact = None;
            return RecomputeOutcome::Identical;
        }

        match self.build(old_content, new_content, language) {
            Ok(file) => {
                let stats = file.stats();
                info!(
                    language = language.id,
                    additions = stats.additions,
                    deletions = stats.deletions,
                    hunks = stats.hunks,
                    "diff updated"
                );
                self.artifact = Some(Arc::new(file));
                RecomputeOutcome::Updated
            }
            Err(e) => {
                error!(error = %e, "Failed to build diff");
                self.artifact = None;
                RecomputeOutcome::Failed
            }
        }
    }

    fn build(
        &self,
        old_content: &str,
        new_content: &str,
        language: &'static Language,
    ) -> Result<DiffFile, DiffError> {
        let mut file = self.engine.generate_diff_file(
            &language.file_name(OLD_FILE),
            old_content,
            &language.file_name(NEW_FILE),
            new_content,
            language,
            language,
        )?;
        file.init_theme(self.theme);
        file.init_highlight()?;
        file.build_unified_lines();
        file.build_split_lines();
        Ok(file)
    }

    fn changed(&mut self) {
        if !self.live {
            return;
        }
        match self.debouncer.as_mut() {
            Some(debouncer) => {
                debouncer.schedule();
            }
            None => {
                self.recompute();
            }
        }
    }
}

fn or_newline(text: &str) -> &str {
    if text.is_empty() { "\n" } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{LineKind, UnifiedLine};

    fn controller(live: bool) -> ComparisonController {
        let mut settings = Settings::default();
        settings.ui.live_updates = live;
        ComparisonController::new(&settings).unwrap()
    }

    fn set(c: &mut ComparisonController, side: PaneSide, text: &str) {
        c.edit(side, |pane| pane.set_text(text));
    }

    #[test]
    fn test_both_empty_has_no_artifact() {
        let mut c = controller(false);
        assert_eq!(c.recompute(), RecomputeOutcome::Cleared);
        assert!(c.artifact().is_none());
    }

    #[test]
    fn test_identical_has_no_artifact() {
        let mut c = controller(false);
        set(&mut c, PaneSide::Original, "same");
        set(&mut c, PaneSide::Modified, "same");
        assert_eq!(c.submit(), Some(RecomputeOutcome::Identical));
        assert!(c.artifact().is_none());
    }

    #[test]
    fn test_single_changed_line() {
        let mut c = controller(false);
        set(&mut c, PaneSide::Original, "hello\nworld");
        set(&mut c, PaneSide::Modified, "hello\nworld!");
        assert_eq!(c.submit(), Some(RecomputeOutcome::Updated));

        let file = c.artifact().unwrap();
        assert_eq!(file.old().content, "hello\nworld");
        assert_eq!(file.new_side().content, "hello\nworld!");
        assert_eq!(file.old().name, "old_file.txt");

        let changed: Vec<_> = file
            .unified_lines()
            .iter()
            .filter_map(|row| match row {
                UnifiedLine::Line { line, .. } if line.is_change() => Some(line.kind),
                _ => None,
            })
            .collect();
        assert_eq!(changed, vec![LineKind::Delete, LineKind::Insert]);
    }

    #[test]
    fn test_empty_side_is_newline_defaulted() {
        let mut c = controller(false);
        set(&mut c, PaneSide::Modified, "added");
        assert_eq!(c.recompute(), RecomputeOutcome::Updated);
        assert_eq!(c.artifact().unwrap().old().content, "\n");
    }

    #[test]
    fn test_empty_and_blank_line_are_identical() {
        let mut c = controller(false);
        set(&mut c, PaneSide::Modified, "\n");
        assert_eq!(c.recompute(), RecomputeOutcome::Identical);
        assert!(c.artifact().is_none());

        set(&mut c, PaneSide::Original, "x");
        assert_eq!(c.recompute(), RecomputeOutcome::Updated);
        set(&mut c, PaneSide::Original, "");
        assert_eq!(c.recompute(), RecomputeOutcome::Identical);
        assert!(c.artifact().is_none());
    }

    #[test]
    fn test_unchanged_inputs_skip() {
        let mut c = controller(false);
        set(&mut c, PaneSide::Original, "a");
        set(&mut c, PaneSide::Modified, "b");
        assert_eq!(c.recompute(), RecomputeOutcome::Updated);
        let first = Arc::clone(c.artifact().unwrap());
        assert_eq!(c.recompute(), RecomputeOutcome::Skipped);
        assert!(Arc::ptr_eq(&first, c.artifact().unwrap()));
    }

    #[test]
    fn test_language_changes_file_names() {
        let mut c = controller(false);
        set(&mut c, PaneSide::Original, "fn a() {}");
        set(&mut c, PaneSide::Modified, "fn b() {}");
        c.select_language("rust").unwrap();
        assert_eq!(c.language().label(), "Rust");
        c.submit();
        let file = c.artifact().unwrap();
        assert_eq!(file.old().name, "old_file.rs");
        assert_eq!(file.new_side().name, "new_file.rs");
    }

    #[test]
    fn test_submit_requires_both_panes() {
        let mut c = controller(false);
        set(&mut c, PaneSide::Original, "only one");
        assert!(!c.can_submit());
        assert_eq!(c.submit(), None);
        assert_eq!(c.recompute_count(), 0);
    }

    #[test]
    fn test_failure_clears_artifact() {
        let mut settings = Settings::default();
        settings.ui.live_updates = false;
        settings.diff.max_input_bytes = 8;
        let mut c = ComparisonController::new(&settings).unwrap();
        set(&mut c, PaneSide::Original, "short");
        set(&mut c, PaneSide::Modified, "tiny");
        assert_eq!(c.submit(), Some(RecomputeOutcome::Updated));
        set(&mut c, PaneSide::Modified, "much longer than eight bytes");
        assert_eq!(c.submit(), Some(RecomputeOutcome::Failed));
        assert!(c.artifact().is_none());
    }

    #[test]
    fn test_live_without_debouncer_recomputes_on_edit() {
        let mut c = controller(true);
        set(&mut c, PaneSide::Original, "x");
        assert!(c.artifact().is_some());
        set(&mut c, PaneSide::Modified, "x");
        assert!(c.artifact().is_none());
    }

    #[test]
    fn test_auto_detect_until_explicit_pick() {
        let mut settings = Settings::default();
        settings.ui.live_updates = false;
        settings.language.auto_detect = true;
        let mut c = ComparisonController::new(&settings).unwrap();
        set(&mut c, PaneSide::Modified, "#!/usr/bin/env python3\nprint('hi')");
        assert_eq!(c.effective_language().id, "python");

        c.select_language("plaintext").unwrap();
        assert_eq!(c.effective_language().id, "plaintext");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_recompute_once() {
        let mut c = controller(true);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        c.attach_debouncer(tx);

        for text in ["a", "ab", "abc"] {
            set(&mut c, PaneSide::Modified, text);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(c.recompute_count(), 0);

        tokio::time::sleep(Duration::from_millis(300)).await;
        while let Ok(ticket) = rx.try_recv() {
            c.handle_tick(ticket);
        }
        assert_eq!(c.recompute_count(), 1);
        assert_eq!(c.artifact().unwrap().new_side().content, "abc");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabling_live_drops_pending() {
        let mut c = controller(true);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        c.attach_debouncer(tx);

        set(&mut c, PaneSide::Original, "pending");
        assert!(c.is_pending());
        c.set_live_updates(false);
        assert!(!c.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(c.recompute_count(), 0);
    }
}
