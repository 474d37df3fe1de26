//! Variation counting and bounded enumeration.

use super::ast::{Node, Sequence, Template};

impl Template<'_> {
    /// Number of distinct expansions of the whole template.
    ///
    /// The product of every top-level group's count. Saturates at
    /// `u64::MAX` instead of overflowing.
    pub fn variation_count(&self) -> u64 {
        self.sequence_count(self.root())
    }

    /// Count of a sequence: product of its groups, text contributes nothing.
    pub(crate) fn sequence_count(&self, sequence: &Sequence) -> u64 {
        sequence
            .nodes
            .iter()
            .fold(1u64, |total, &id| match self.node(id) {
                Node::Text { .. } => total,
                Node::Group { alternatives, .. } => {
                    total.saturating_mul(self.group_count_of(alternatives))
                }
            })
    }

    /// Count of a group: sum over its alternatives, never below one.
    pub(crate) fn group_count_of(&self, alternatives: &[Sequence]) -> u64 {
        alternatives
            .iter()
            .map(|alternative| self.sequence_count(alternative).max(1))
            .fold(0u64, u64::saturating_add)
            .max(1)
    }

    /// Enumerate expansions in alternative order, stopping after `limit`.
    pub fn expansions(&self, limit: usize) -> Vec<String> {
        if limit == 0 {
            return Vec::new();
        }
        self.expand_sequence(self.root(), limit)
    }

    fn expand_sequence(&self, sequence: &Sequence, limit: usize) -> Vec<String> {
        let mut partials = vec![String::new()];

        for &id in &sequence.nodes {
            match self.node(id) {
                Node::Text { span } => {
                    let text = self.slice(span);
                    for partial in &mut partials {
                        partial.push_str(text);
                    }
                }
                Node::Group { alternatives, .. } => {
                    let options: Vec<String> = alternatives
                        .iter()
                        .flat_map(|alternative| self.expand_sequence(alternative, limit))
                        .take(limit)
                        .collect();
                    partials = partials
                        .iter()
                        .flat_map(|prefix| {
                            options
                                .iter()
                                .map(move |option| format!("{prefix}{option}"))
                        })
                        .take(limit)
                        .collect();
                }
            }
        }
        partials
    }
}
