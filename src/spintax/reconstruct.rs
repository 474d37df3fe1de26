//! Folding stored alternatives into one spintax string and back.

use super::scanner::{is_wrapped, split_top_level};

/// Join alternatives into a single group.
///
/// One alternative is returned unchanged, several become
/// `{first/second/...}`, and none folds to an empty string.
pub fn fold<S: AsRef<str>>(alternatives: &[S]) -> String {
    match alternatives {
        [] => String::new(),
        [only] => only.as_ref().to_owned(),
        many => {
            let joined = many.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("/");
            format!("{{{joined}}}")
        }
    }
}

/// Split a spintax string back into trimmed alternatives.
///
/// A string wrapped in one outer brace pair loses that pair and is split
/// at its top level; pieces are trimmed and empty ones dropped. Anything
/// else is a single alternative. Nested groups survive inside the
/// alternative that contains them.
pub fn unfold(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if !is_wrapped(trimmed) {
        return vec![trimmed.to_owned()];
    }

    // Wrapped text starts with `{` and ends with its `}`.
    let inner = &trimmed[1..trimmed.len().saturating_sub(1)];
    split_top_level(inner)
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}
