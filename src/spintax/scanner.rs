//! Brace scanning primitives shared by every spintax operation.
//!
//! A group is a `{...}` span whose opening brace is balanced by a closing
//! brace. Alternatives inside a group are separated by `|` or `/` at the
//! group's own nesting level. All four grammar characters are ASCII, so
//! scanning bytes never lands inside a multi-byte UTF-8 sequence.

use std::ops::Range;

/// Characters that separate alternatives inside a group.
pub const SEPARATORS: [char; 2] = ['|', '/'];

/// Whether `byte` is one of [`SEPARATORS`].
fn is_separator(byte: u8) -> bool {
    SEPARATORS.contains(&char::from(byte))
}

/// Find the end of the group opened at byte index `open`.
///
/// Walks forward keeping a balance counter (`{` adds one, `}` removes one)
/// and returns the index immediately after the `}` that brings the balance
/// back to zero. Returns `None` when `open` is not a `{` or the text ends
/// before the group closes.
pub fn find_matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut balance: usize = 0;
    for (offset, &byte) in bytes[open..].iter().enumerate() {
        match byte {
            b'{' => balance = balance.saturating_add(1),
            b'}' => {
                // The walk starts on a `{`, so balance is positive here.
                balance = balance.saturating_sub(1);
                if balance == 0 {
                    return open.checked_add(offset)?.checked_add(1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Close positions for every `{` in `text`, computed in one pass.
///
/// Entry `i` is `Some(end)` exactly when `find_matching_close(text, i)`
/// would return `Some(end)`. A stack of open positions gives the same
/// answer as the balance scan because the `}` that returns an opener's
/// balance to zero is the one that pops it.
pub(crate) fn matching_closes(text: &str) -> Vec<Option<usize>> {
    let bytes = text.as_bytes();
    let mut closes = vec![None; bytes.len()];
    let mut open_stack: Vec<usize> = Vec::new();

    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'{' => open_stack.push(i),
            b'}' => {
                // A `}` with nothing open is literal text.
                if let Some(open) = open_stack.pop() {
                    closes[open] = i.checked_add(1);
                }
            }
            _ => {}
        }
    }
    closes
}

/// Byte ranges of the top-level pieces of `content`.
///
/// Splits on [`SEPARATORS`] only while the brace balance is zero. The
/// result always has at least one range, empty pieces included.
pub(crate) fn split_top_level_ranges(content: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut depth: isize = 0;
    let mut start = 0;

    for (i, byte) in content.bytes().enumerate() {
        match byte {
            b'{' => depth = depth.saturating_add(1),
            b'}' => depth = depth.saturating_sub(1),
            b if depth == 0 && is_separator(b) => {
                ranges.push(start..i);
                // `i` indexes a byte of `content`, so `i + 1 <= content.len()`.
                start = i.saturating_add(1);
            }
            _ => {}
        }
    }
    ranges.push(start..content.len());
    ranges
}

/// Split group content into its top-level alternatives.
///
/// Both separators are interchangeable. Pieces are returned verbatim,
/// without trimming, and separators inside nested groups are left alone:
/// `"a|{b/c}"` splits into `["a", "{b/c}"]`.
pub fn split_top_level(content: &str) -> Vec<&str> {
    split_top_level_ranges(content)
        .into_iter()
        .map(|range| &content[range])
        .collect()
}

/// Whether one brace pair encloses the whole of `text`.
///
/// True when `text` opens with `{` and the balance first returns to zero
/// at its final character. `"{a}{b}"` is not wrapped; `"{a{b}}"` is.
pub fn is_wrapped(text: &str) -> bool {
    text.starts_with('{') && find_matching_close(text, 0) == Some(text.len())
}
