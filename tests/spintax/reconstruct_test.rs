//! Folding alternatives into spintax and back.

use spinwheel::spintax::{fold, unfold};

#[test]
fn fold_single_alternative_is_unchanged() {
    assert_eq!(fold(&["Only"]), "Only");
}

#[test]
fn fold_many_wraps_with_slashes() {
    assert_eq!(fold(&["Hi", "Hello", "Hey"]), "{Hi/Hello/Hey}");
}

#[test]
fn fold_empty_list_is_empty_string() {
    let empty: [&str; 0] = [];
    assert_eq!(fold(&empty), "");
}

#[test]
fn unfold_empty_is_empty_list() {
    assert!(unfold("").is_empty());
    assert!(unfold("   \n").is_empty());
}

#[test]
fn round_trip_restores_alternatives() {
    assert_eq!(unfold(&fold(&["Hi", "Hello"])), vec!["Hi", "Hello"]);
}

#[test]
fn round_trip_trims_and_drops_empty_entries() {
    let folded = fold(&[" Hi ", "", "Hello", "   "]);
    assert_eq!(unfold(&folded), vec!["Hi", "Hello"]);
}

#[test]
fn unfold_accepts_either_separator() {
    assert_eq!(unfold("{ a | b / c }"), vec!["a", "b", "c"]);
}

#[test]
fn unfold_keeps_nested_groups_intact() {
    assert_eq!(
        unfold("{Hi {there|you}/Hello}"),
        vec!["Hi {there|you}", "Hello"]
    );
}

#[test]
fn unfold_unwrapped_text_is_one_alternative() {
    assert_eq!(unfold("  just text  "), vec!["just text"]);
    assert_eq!(unfold("see https://example.com/a"), vec!["see https://example.com/a"]);
}

#[test]
fn unfold_adjacent_groups_are_not_stripped() {
    assert_eq!(unfold("{a|b}{c|d}"), vec!["{a|b}{c|d}"]);
}

#[test]
fn unfold_strips_only_the_outer_pair() {
    assert_eq!(unfold("{{a|b}|c}"), vec!["{a|b}", "c"]);
}
