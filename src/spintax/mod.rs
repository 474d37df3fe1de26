//! Spintax grammar engine.
//!
//! Templates mix static text with `{option/option|...}` groups, nested to
//! any depth. There is no escape syntax: `{`, `}`, `|` and `/` are always
//! grammar when they form a balanced group, and literal text otherwise.
//!
//! The free functions here are the surface callers use. None of them fail;
//! malformed input degrades to the most literal reading of the text.
//! [`Template`] exposes the underlying parse for callers that want to run
//! several traversals over one template.

pub mod ast;
pub mod blocks;
pub mod count;
pub mod reconstruct;
pub mod sampler;
pub mod scanner;

use rand::Rng;
use tracing::{debug, warn};

pub use ast::{Node, NodeId, Sequence, Template, MAX_NESTING_DEPTH};
pub use blocks::Block;
pub use reconstruct::{fold, unfold};
pub use sampler::{Sample, MAX_SAMPLE_ITERATIONS};
pub use scanner::{find_matching_close, is_wrapped, split_top_level, SEPARATORS};

/// Errors produced while parsing a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpintaxError {
    /// Groups nest deeper than the parser accepts.
    #[error("groups nest deeper than {limit} levels (group at byte {offset})")]
    NestingTooDeep {
        /// Maximum accepted depth.
        limit: usize,
        /// Byte offset of the group that crossed the limit.
        offset: usize,
    },
}

/// Number of distinct expansions of `text`. Always at least one.
///
/// Text without groups has exactly one rendering. Input the parser rejects
/// is treated as a single un-variated message.
pub fn count_variations(text: &str) -> u64 {
    if !text.contains('{') {
        return 1;
    }
    match Template::parse(text) {
        Ok(template) => template.variation_count(),
        Err(e) => {
            debug!(error = %e, "variation count degraded to 1");
            1
        }
    }
}

/// Split `text` into static and group blocks for highlighting.
pub fn segment(text: &str) -> Vec<Block> {
    match Template::parse(text) {
        Ok(template) => template.blocks(),
        Err(e) => {
            warn!(error = %e, "segmenting template as plain text");
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Block::Static {
                    text: text.to_owned(),
                }]
            }
        }
    }
}

/// Expand `text` once, choosing every alternative with `rng`.
///
/// Best effort: if more than [`MAX_SAMPLE_ITERATIONS`] groups would need
/// resolving, the rest are left in the output as written.
pub fn sample_one<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if !text.contains('{') {
        return text.to_owned();
    }
    match Template::parse(text) {
        Ok(template) => {
            let sample = template.sample(rng);
            if sample.truncated {
                warn!(
                    resolved = sample.resolved,
                    groups = template.group_count(),
                    "sampling stopped at iteration ceiling"
                );
            }
            sample.text
        }
        Err(e) => {
            warn!(error = %e, "template left unexpanded");
            text.to_owned()
        }
    }
}

/// Every expansion of `text`, up to `limit` of them, in alternative order.
pub fn expand_all(text: &str, limit: usize) -> Vec<String> {
    match Template::parse(text) {
        Ok(template) => template.expansions(limit),
        Err(e) => {
            debug!(error = %e, "enumerating template as plain text");
            if limit == 0 {
                Vec::new()
            } else {
                vec![text.to_owned()]
            }
        }
    }
}
