//! Group scanning and top-level splitting.

use spinwheel::spintax::{find_matching_close, is_wrapped, split_top_level};

#[test]
fn matching_close_returns_index_after_brace() {
    assert_eq!(find_matching_close("{a|b}", 0), Some(5));
    assert_eq!(find_matching_close("x{a}y", 1), Some(4));
}

#[test]
fn matching_close_respects_nesting() {
    let text = "{a|{b|c}}tail";
    assert_eq!(find_matching_close(text, 0), Some(9));
    assert_eq!(find_matching_close(text, 3), Some(8));
}

#[test]
fn matching_close_is_none_when_unbalanced() {
    assert_eq!(find_matching_close("{a|b", 0), None);
    assert_eq!(find_matching_close("{{a}", 0), None);
}

#[test]
fn matching_close_requires_open_brace_at_index() {
    assert_eq!(find_matching_close("a{b}", 0), None);
    assert_eq!(find_matching_close("{}", 7), None);
}

#[test]
fn split_treats_both_separators_alike() {
    assert_eq!(split_top_level("a|b/c"), vec!["a", "b", "c"]);
}

#[test]
fn split_ignores_separators_in_nested_groups() {
    assert_eq!(split_top_level("a|{b/c}|d"), vec!["a", "{b/c}", "d"]);
}

#[test]
fn split_preserves_whitespace_and_empty_pieces() {
    assert_eq!(split_top_level(" a || b "), vec![" a ", "", " b "]);
    assert_eq!(split_top_level(""), vec![""]);
}

#[test]
fn split_handles_multibyte_text() {
    assert_eq!(split_top_level("héllo/wörld|日本"), vec!["héllo", "wörld", "日本"]);
}

#[test]
fn wrapped_only_when_one_pair_spans_everything() {
    assert!(is_wrapped("{a|b}"));
    assert!(is_wrapped("{a|{b}}"));
    assert!(!is_wrapped("{a}{b}"));
    assert!(!is_wrapped("a{b}"));
    assert!(!is_wrapped("{a"));
    assert!(!is_wrapped(""));
}
