//! Random expansion of a template.
//!
//! Groups resolve innermost-first, left to right: a post-order walk of the
//! tree. Each resolution draws one uniform index from the caller's RNG.
//! After [`MAX_SAMPLE_ITERATIONS`] resolutions the walk stops choosing and
//! writes the remaining groups back out as spintax.

use rand::Rng;

use super::ast::{Node, Sequence, Template};

/// Maximum number of groups resolved in one sample.
pub const MAX_SAMPLE_ITERATIONS: usize = 100;

/// Result of one sampling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// The expanded text.
    pub text: String,
    /// Groups that were resolved.
    pub resolved: usize,
    /// Whether groups were left unresolved because the ceiling was hit.
    pub truncated: bool,
}

struct Walk<'r, R: ?Sized> {
    rng: &'r mut R,
    remaining: usize,
    resolved: usize,
    truncated: bool,
}

impl Template<'_> {
    /// Produce one random expansion using `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Sample {
        let mut walk = Walk {
            rng,
            remaining: MAX_SAMPLE_ITERATIONS,
            resolved: 0,
            truncated: false,
        };
        let text = self.render_sequence(self.root(), &mut walk);
        Sample {
            text,
            resolved: walk.resolved,
            truncated: walk.truncated,
        }
    }

    fn render_sequence<R: Rng + ?Sized>(
        &self,
        sequence: &Sequence,
        walk: &mut Walk<'_, R>,
    ) -> String {
        let mut out = String::new();
        for &id in &sequence.nodes {
            match self.node(id) {
                Node::Text { span } => out.push_str(self.slice(span)),
                Node::Group { alternatives, .. } => {
                    out.push_str(&self.render_group(alternatives, walk));
                }
            }
        }
        out
    }

    fn render_group<R: Rng + ?Sized>(
        &self,
        alternatives: &[Sequence],
        walk: &mut Walk<'_, R>,
    ) -> String {
        let mut rendered: Vec<String> = alternatives
            .iter()
            .map(|alternative| self.render_sequence(alternative, walk))
            .collect();

        let Some(remaining) = walk.remaining.checked_sub(1) else {
            walk.truncated = true;
            return self.rewrap(alternatives, &rendered);
        };

        walk.remaining = remaining;
        walk.resolved = walk.resolved.saturating_add(1);
        let index = walk.rng.gen_range(0..rendered.len());
        rendered.swap_remove(index)
    }

    /// Rebuild an unresolved group around already-rendered alternatives,
    /// keeping the separators it was written with.
    fn rewrap(&self, alternatives: &[Sequence], rendered: &[String]) -> String {
        let bytes = self.source().as_bytes();
        let mut out = String::from("{");
        // Each alternative but the last ends on the separator after it.
        let separators = alternatives
            .iter()
            .map(|alternative| Some(char::from(bytes[alternative.span.end])));
        for (text, separator) in rendered.iter().zip(std::iter::once(None).chain(separators)) {
            if let Some(separator) = separator {
                out.push(separator);
            }
            out.push_str(text);
        }
        out.push('}');
        out
    }
}
