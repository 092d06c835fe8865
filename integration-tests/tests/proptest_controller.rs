//! Property tests for pane bookkeeping and the comparison controller.

use diffpad_core::{PaneSide, RecomputeOutcome, TextPane};
use proptest::prelude::*;

mod common;

use common::{manual_controller, set_text};

/// Strategy to generate multi-line text, including empty lines and empty text
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z ]{0,12}", 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn line_count_matches_newlines(text in text_strategy()) {
        let mut pane = TextPane::new("Original", "");
        pane.set_text(&text);
        prop_assert_eq!(pane.line_count(), text.split('\n').count());
        prop_assert_eq!(pane.gutter_numbers().count(), pane.line_count());
        prop_assert_eq!(pane.text(), text);
    }

    #[test]
    fn empty_side_matching_a_blank_line_produces_no_diff(other in prop::sample::select(vec!["", "\n"])) {
        let mut controller = manual_controller();
        set_text(&mut controller, PaneSide::Original, other);
        set_text(&mut controller, PaneSide::Modified, "\n");
        let outcome = controller.recompute();
        prop_assert_eq!(outcome, RecomputeOutcome::Identical);
        prop_assert!(controller.artifact().is_none());
    }

    #[test]
    fn identical_texts_never_produce_a_diff(text in text_strategy()) {
        let mut controller = manual_controller();
        set_text(&mut controller, PaneSide::Original, &text);
        set_text(&mut controller, PaneSide::Modified, &text);
        let outcome = controller.recompute();
        prop_assert!(matches!(outcome, RecomputeOutcome::Identical | RecomputeOutcome::Cleared));
        prop_assert!(controller.artifact().is_none());
    }

    #[test]
    fn distinct_texts_are_stored_in_the_artifact(
        old in text_strategy(),
        new in text_strategy(),
    ) {
        let expect_old = if old.is_empty() { "\n" } else { old.as_str() };
        let expect_new = if new.is_empty() { "\n" } else { new.as_str() };
        prop_assume!(expect_old != expect_new);
        let mut controller = manual_controller();
        set_text(&mut controller, PaneSide::Original, &old);
        set_text(&mut controller, PaneSide::Modified, &new);
        prop_assert_eq!(controller.recompute(), RecomputeOutcome::Updated);

        let file = controller.artifact().expect("artifact");
        prop_assert!(!file.hunks().is_empty());
        prop_assert_eq!(file.old().content.as_str(), expect_old);
        prop_assert_eq!(file.new_side().content.as_str(), expect_new);
    }
}
