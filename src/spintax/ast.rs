//! Arena-backed parse tree for spintax templates.
//!
//! A template parses once into a flat `Vec<Node>` addressed by [`NodeId`].
//! Counting, segmentation, sampling, and enumeration are independent
//! traversals over the same tree.

use std::ops::Range;

use super::scanner::{matching_closes, split_top_level_ranges};
use super::SpintaxError;

/// Deepest group nesting accepted by [`Template::parse`].
pub const MAX_NESTING_DEPTH: usize = 256;

/// Index of a node inside a [`Template`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Ordered run of nodes covering one byte range of the source.
///
/// The template root is a sequence, and so is every alternative of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Byte range of the source this sequence covers.
    pub span: Range<usize>,
    /// Children in source order.
    pub nodes: Vec<NodeId>,
}

/// One parse-tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, including any unmatched braces.
    Text {
        /// Byte range of the literal run.
        span: Range<usize>,
    },
    /// A balanced `{...}` group.
    Group {
        /// Byte range from the opening `{` through the closing `}`.
        span: Range<usize>,
        /// Top-level alternatives in source order. Never empty.
        alternatives: Vec<Sequence>,
    },
}

/// Parsed spintax template borrowing its source text.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    source: &'a str,
    nodes: Vec<Node>,
    root: Sequence,
}

impl<'a> Template<'a> {
    /// Parse `source` into a tree.
    ///
    /// Unbalanced braces never fail the parse; they become literal text.
    ///
    /// # Errors
    ///
    /// Returns [`SpintaxError::NestingTooDeep`] when groups nest deeper than
    /// [`MAX_NESTING_DEPTH`].
    pub fn parse(source: &'a str) -> Result<Self, SpintaxError> {
        let mut parser = Parser {
            source,
            closes: matching_closes(source),
            nodes: Vec::new(),
        };
        let root = parser.sequence(0..source.len(), 0)?;
        Ok(Self {
            source,
            nodes: parser.nodes,
            root,
        })
    }

    /// The text this template was parsed from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Top-level sequence.
    pub fn root(&self) -> &Sequence {
        &self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the template produced no nodes (empty source).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of groups anywhere in the tree.
    pub fn group_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Group { .. }))
            .count()
    }

    /// Source slice for a byte range.
    pub(crate) fn slice(&self, span: &Range<usize>) -> &'a str {
        &self.source[span.clone()]
    }
}

struct Parser<'a> {
    source: &'a str,
    closes: Vec<Option<usize>>,
    nodes: Vec<Node>,
}

impl Parser<'_> {
    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn sequence(&mut self, span: Range<usize>, depth: usize) -> Result<Sequence, SpintaxError> {
        let source = self.source;
        let bytes = source.as_bytes();
        let mut nodes = Vec::new();
        let mut text_start = span.start;
        let mut i = span.start;

        while i < span.end {
            let close = match (bytes[i], self.closes[i]) {
                (b'{', Some(close)) => close,
                _ => {
                    i = i.saturating_add(1);
                    continue;
                }
            };
            if text_start < i {
                nodes.push(self.push(Node::Text {
                    span: text_start..i,
                }));
            }
            nodes.push(self.group(i..close, depth.saturating_add(1))?);
            i = close;
            text_start = close;
        }

        if text_start < span.end {
            nodes.push(self.push(Node::Text {
                span: text_start..span.end,
            }));
        }
        Ok(Sequence { span, nodes })
    }

    fn group(&mut self, span: Range<usize>, depth: usize) -> Result<NodeId, SpintaxError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(SpintaxError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                offset: span.start,
            });
        }

        // A group spans at least its two braces.
        let content_start = span.start.saturating_add(1);
        let content_end = span.end.saturating_sub(1);
        let pieces = split_top_level_ranges(&self.source[content_start..content_end]);

        let mut alternatives = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let piece = content_start.saturating_add(piece.start)
                ..content_start.saturating_add(piece.end);
            alternatives.push(self.sequence(piece, depth)?);
        }
        Ok(self.push(Node::Group { span, alternatives }))
    }
}
