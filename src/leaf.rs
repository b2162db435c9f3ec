//! # leaf.rs
//!
//! Classification of operator-free spans.
//!
//! A span is a placeholder, a constant, a declared variable or a numeric
//! literal. Adjacent values without an operator between them (`3x`, `xe`,
//! `2|_1_|`) are joined by implicit multiplication.

use crate::error::CompileError;
use crate::literal;
use crate::node::Node;
use crate::operators::BinaryOperatorKind;
use crate::parser::ParseContext;
use num_complex::Complex;
use std::ops::Range;

/// What a matched part of a span refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entity {
    Placeholder,
    Constant,
    Variable(usize),
}

/// Returns the leftmost occurrence among `candidates`, preferring the
/// longest name when two start at the same position.
fn leftmost<'n, I>(text: &str, candidates: I) -> Option<(Range<usize>, &'n str)>
where
    I: IntoIterator<Item = &'n str>,
{
    candidates.into_iter()
        .filter(|name| !name.is_empty())
        .filter_map(|name| text.find(name).map(|start| (start..start + name.len(), name)))
        .min_by(|(a, _), (b, _)| a.start.cmp(&b.start).then(b.end.cmp(&a.end)))
}

/// Returns every range of `text` covered by an occurrence of one of `names`.
fn occurrences_of<'n, I>(text: &str, names: I) -> Vec<Range<usize>>
where
    I: IntoIterator<Item = &'n String>,
{
    names.into_iter()
        .filter(|name| !name.is_empty())
        .flat_map(|name| text.match_indices(name.as_str()).map(|(start, m)| start..start + m.len()))
        .collect()
}

/// Returns true if `outer` covers all of `inner` and is strictly longer.
fn encloses(outer: &Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start && inner.end <= outer.end && outer.len() > inner.len()
}

impl ParseContext<'_> {
    /// Resolves an operator-free, bracket-free span into a node.
    pub(crate) fn resolve_leaf(&mut self, text: &str) -> Result<Node, CompileError> {
        match text {
            "-" => return Ok(Node::from(Complex::new(-1.0, 0.0))),
            "+" => return Ok(Node::from(Complex::new(1.0, 0.0))),
            _ => {},
        }
        if let Some(val) = literal::parse(text) {
            return Ok(Node::from(val));
        }

        let Some((range, entity)) = self.find_entity(text) else {
            return Err(CompileError::UnparseableToken(text.to_string()));
        };
        let matched = self.entity_node(&text[range.clone()], entity)?;

        let before = &text[..range.start];
        let after = &text[range.end..];
        let mut node = matched;
        if !before.is_empty() {
            node = Node::binary(BinaryOperatorKind::Mul, self.resolve_leaf(before)?, node);
        }
        if !after.is_empty() {
            node = Node::binary(BinaryOperatorKind::Mul, node, self.resolve_leaf(after)?);
        }
        Ok(node)
    }

    /// Finds the entity to split `text` around, in priority order:
    /// placeholders, then constants, then declared variables.
    fn find_entity(&self, text: &str) -> Option<(Range<usize>, Entity)> {
        let placeholders = self.replacements.keys().map(|name| name.as_str());
        if let Some((range, _)) = leftmost(text, placeholders) {
            return Some((range, Entity::Placeholder));
        }

        // a constant inside a longer variable name (`i` in `time`) is not a constant
        let taken = occurrences_of(text, self.variables);
        let constants = self.constants.keys()
            .filter(|name| !name.is_empty())
            .filter_map(|name| {
                text.match_indices(name)
                    .map(|(start, _)| start..start + name.len())
                    .find(|range| !taken.iter().any(|var| encloses(var, range)))
            })
            .min_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        if let Some(range) = constants {
            return Some((range, Entity::Constant));
        }

        let variables = self.variables.iter().map(|name| name.as_str());
        leftmost(text, variables).and_then(|(range, name)| {
            self.variables.iter()
                .position(|declared| declared == name)
                .map(|slot| (range, Entity::Variable(slot)))
        })
    }

    fn entity_node(&mut self, name: &str, entity: Entity) -> Result<Node, CompileError> {
        match entity {
            Entity::Placeholder => self.replacements.remove(name)
                .ok_or_else(|| CompileError::UnparseableToken(name.to_string())),
            Entity::Constant => self.constants.get(name)
                .map(Node::from)
                .ok_or_else(|| CompileError::UnparseableToken(name.to_string())),
            Entity::Variable(slot) => Ok(self.new_variable(slot)),
        }
    }
}
