//! Integration tests for the comparison controller.
//!
//! Exercises the full path from pane text through the diff engine to the
//! published artifact: identity, newline defaulting, language tagging,
//! clearing and failure handling.

use diffpad_core::diff::{LineKind, UnifiedLine};
use diffpad_core::{PaneSide, RecomputeOutcome};
use std::sync::Arc;
use tokio::time::Instant;

mod common;

use common::{manual_controller, set_text};

/// Two empty panes produce no diff section.
#[test]
fn test_empty_inputs_have_no_artifact() {
    let mut controller = manual_controller();
    assert_eq!(controller.recompute(), RecomputeOutcome::Cleared);
    assert!(controller.artifact().is_none());
}

/// Equal texts produce no artifact, and replace an earlier one.
#[test]
fn test_equal_texts_discard_artifact() {
    let mut controller = manual_controller();
    set_text(&mut controller, PaneSide::Original, "one\ntwo");
    set_text(&mut controller, PaneSide::Modified, "one\n2");
    assert_eq!(controller.submit(), Some(RecomputeOutcome::Updated));
    assert!(controller.artifact().is_some());

    set_text(&mut controller, PaneSide::Modified, "one\ntwo");
    assert_eq!(controller.submit(), Some(RecomputeOutcome::Identical));
    assert!(controller.artifact().is_none());
}

/// The artifact stores exactly the compared contents.
#[test]
fn test_artifact_holds_inputs() {
    let mut controller = manual_controller();
    set_text(&mut controller, PaneSide::Original, "alpha\nbeta\n");
    set_text(&mut controller, PaneSide::Modified, "alpha\ngamma\n");
    controller.submit();

    let file = controller.artifact().expect("artifact");
    assert_eq!(file.old().content, "alpha\nbeta\n");
    assert_eq!(file.new_side().content, "alpha\ngamma\n");
    let stats = file.stats();
    assert_eq!((stats.additions, stats.deletions, stats.hunks), (1, 1, 1));
}

/// An empty side is compared as a single newline.
#[test]
fn test_empty_side_defaults_to_newline() {
    let mut controller = manual_controller();
    set_text(&mut controller, PaneSide::Original, "only original");
    assert_eq!(controller.recompute(), RecomputeOutcome::Updated);

    let file = controller.artifact().expect("artifact");
    assert_eq!(file.old().content, "only original");
    assert_eq!(file.new_side().content, "\n");
}

/// One changed line shows as one deletion and one insertion.
#[test]
fn test_hello_world_unified_view() {
    let mut controller = manual_controller();
    set_text(&mut controller, PaneSide::Original, "hello\nworld");
    set_text(&mut controller, PaneSide::Modified, "hello\nworld!");
    controller.submit();

    let file = controller.artifact().expect("artifact");
    let changes: Vec<(LineKind, &str)> = file
        .unified_lines()
        .iter()
        .filter_map(|row| match row {
            UnifiedLine::Line { line, .. } if line.is_change() => {
                Some((line.kind, line.content.as_str()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![(LineKind::Delete, "world"), (LineKind::Insert, "world!")]
    );
}

/// Picking a language renames both files and relabels the selector.
#[test]
fn test_language_selection_renames_files() {
    let mut controller = manual_controller();
    controller.select_language("python").expect("python is in the catalog");
    assert_eq!(controller.language().label(), "Python");

    set_text(&mut controller, PaneSide::Original, "x = 1");
    set_text(&mut controller, PaneSide::Modified, "x = 2");
    controller.submit();

    let file = controller.artifact().expect("artifact");
    assert_eq!(file.old().name, "old_file.py");
    assert_eq!(file.new_side().name, "new_file.py");
    assert_eq!(file.old().language.id, "python");
}

/// Unknown ids leave the selection alone.
#[test]
fn test_unknown_language_is_rejected() {
    let mut controller = manual_controller();
    assert!(controller.select_language("cobol").is_err());
    assert_eq!(controller.language().selected().id, "plaintext");
}

/// Re-running without changes keeps the same artifact.
#[test]
fn test_unchanged_inputs_keep_artifact() {
    let mut controller = manual_controller();
    set_text(&mut controller, PaneSide::Original, "a");
    set_text(&mut controller, PaneSide::Modified, "b");
    controller.submit();
    let first = Arc::clone(controller.artifact().expect("artifact"));

    assert_eq!(controller.submit(), Some(RecomputeOutcome::Skipped));
    assert!(Arc::ptr_eq(&first, controller.artifact().expect("artifact")));

    controller.select_language("rust").expect("rust is in the catalog");
    assert_eq!(controller.submit(), Some(RecomputeOutcome::Updated));
    assert!(!Arc::ptr_eq(&first, controller.artifact().expect("artifact")));
}

/// Binary input fails the diff and clears the artifact without panicking.
#[test]
fn test_binary_input_clears_artifact() {
    let mut controller = manual_controller();
    set_text(&mut controller, PaneSide::Original, "text");
    set_text(&mut controller, PaneSide::Modified, "other");
    controller.submit();
    assert!(controller.artifact().is_some());

    set_text(&mut controller, PaneSide::Modified, "bin\0ary");
    assert_eq!(controller.submit(), Some(RecomputeOutcome::Failed));
    assert!(controller.artifact().is_none());
}

/// Clearing a pane empties it and disables submission.
#[test]
fn test_clear_pane() {
    let mut controller = manual_controller();
    set_text(&mut controller, PaneSide::Original, "left\nside");
    set_text(&mut controller, PaneSide::Modified, "right");
    assert!(controller.can_submit());

    let now = Instant::now();
    assert!(controller.clear_pane(PaneSide::Original, now));
    assert_eq!(controller.original().text(), "");
    assert_eq!(controller.original().line_count(), 1);
    assert!(controller.original().is_cleared(now));
    assert!(!controller.can_submit());
    assert_eq!(controller.submit(), None);

    assert!(!controller.clear_pane(PaneSide::Original, now));
}
