//! Visual segmentation of a template into static and group blocks.
//!
//! Segmentation is one level deep: a group block lists its top-level
//! alternatives as raw text, nested groups included verbatim. Its count is
//! still the fully recursive count of the group.

use serde::Serialize;

use super::ast::{Node, Template};

/// One contiguous piece of a segmented template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// Literal text, unmatched braces included.
    Static {
        /// The literal run.
        text: String,
    },
    /// A balanced top-level group.
    Group {
        /// The group exactly as written, braces included.
        raw_text: String,
        /// Top-level alternatives, untrimmed and not sub-parsed.
        alternatives: Vec<String>,
        /// Number of expansions of this group alone.
        count: u64,
    },
}

impl Block {
    /// Source text this block covers.
    pub fn raw_text(&self) -> &str {
        match self {
            Self::Static { text } => text,
            Self::Group { raw_text, .. } => raw_text,
        }
    }

    /// Whether this is a group block.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }
}

impl Template<'_> {
    /// Segment the top level of the template into blocks.
    ///
    /// Concatenating every block's [`Block::raw_text`] reproduces the source.
    pub fn blocks(&self) -> Vec<Block> {
        self.root()
            .nodes
            .iter()
            .map(|&id| match self.node(id) {
                Node::Text { span } => Block::Static {
                    text: self.slice(span).to_owned(),
                },
                Node::Group { span, alternatives } => Block::Group {
                    raw_text: self.slice(span).to_owned(),
                    alternatives: alternatives
                        .iter()
                        .map(|alternative| self.slice(&alternative.span).to_owned())
                        .collect(),
                    count: self.group_count_of(alternatives),
                },
            })
            .collect()
    }
}
