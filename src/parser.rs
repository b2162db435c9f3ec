//! # parser.rs
//!
//! String-rewriting resolution of normalized expression text into a tree.
//!
//! There is no token stream. Resolved parts of the text are replaced by
//! placeholder tokens `|_<n>_|` that stand for an already built subtree:
//!
//! 1. Brackets are resolved innermost-first, left to right. A bracket
//!    preceded by a function name becomes a function application.
//! 2. Once no bracket remains, every `^` is folded into a placeholder, from
//!    the left.
//! 3. The rest is split at the last additive sign, then at the first
//!    multiplicative operator.
//! 4. Operator-free spans are classified by the leaf resolver (`leaf.rs`).
//!
//! All working state lives in a [`ParseContext`] that exists for a single
//! compilation.

use crate::constants::Constants;
use crate::error::CompileError;
use crate::functions::FunctionKind;
use crate::literal;
use crate::node::{LeafId, Node};
use crate::normalizer::{CLOSE, OPEN};
use crate::operators::{is_operator, is_sign, BinaryOperatorKind};
use crate::variable::OccurrenceIndex;
use std::collections::HashMap;

/// Working state of one compilation.
pub(crate) struct ParseContext<'a> {
    pub(crate) constants: &'a Constants,
    pub(crate) variables: &'a [String],
    pub(crate) replacements: HashMap<String, Node>,
    pub(crate) occurrences: OccurrenceIndex,
    counter: usize,
    next_leaf: usize,
}

impl<'a> ParseContext<'a> {
    /// Creates fresh working state.
    ///
    /// `variables` are the declared names; the position of a name is the
    /// slot its leaves read from.
    pub(crate) fn new(constants: &'a Constants, variables: &'a [String]) -> Self {
        Self {
            constants,
            variables,
            replacements: HashMap::new(),
            occurrences: OccurrenceIndex::new(),
            counter: 0,
            next_leaf: 0,
        }
    }

    /// Consumes the context, returning the occurrence index it built.
    pub(crate) fn into_occurrences(self) -> OccurrenceIndex {
        self.occurrences
    }

    /// Binds `node` to a new placeholder token and returns the token.
    fn mint(&mut self, node: Node) -> String {
        self.counter += 1;
        let token = format!("|_{}_|", self.counter);
        self.replacements.insert(token.clone(), node);
        token
    }

    /// Creates a new variable leaf for the declared name at `slot`.
    pub(crate) fn new_variable(&mut self, slot: usize) -> Node {
        let leaf = LeafId(self.next_leaf);
        self.next_leaf += 1;
        self.occurrences.register(&self.variables[slot], leaf);
        Node::Variable { leaf, slot }
    }

    /// Resolves normalized text into a tree.
    pub(crate) fn parse_expression(&mut self, text: &str) -> Result<Node, CompileError> {
        let mut text = text.to_string();
        while let Some(open) = text.find(OPEN) {
            text = self.resolve_brackets(&text, open)?;
        }
        if text.contains(CLOSE) {
            return Err(CompileError::UnbalancedBrackets(text));
        }

        if text.chars().any(is_operator) {
            self.resolve_operators(text)
        } else {
            self.resolve_leaf(&text)
        }
    }

    /// Replaces the bracket span opened at `open`, together with a function
    /// name right before it, by a placeholder.
    fn resolve_brackets(&mut self, text: &str, open: usize) -> Result<String, CompileError> {
        let close = closing_bracket_index(text, open)
            .ok_or_else(|| CompileError::UnbalancedBrackets(text[open..].to_string()))?;
        let function = FunctionKind::suffix_of(&text[..open]);
        let span_start = open - function.map_or(0, |kind| kind.name().len());

        let inner = self.parse_expression(&text[open + 1..close])?;
        let node = match function {
            Some(kind) => Node::unary(kind, inner),
            None => inner,
        };
        let token = self.mint(node);
        log::trace!("resolved `{}` as {}", &text[span_start..=close], token);

        Ok(format!("{}{}{}", &text[..span_start], token, &text[close + 1..]))
    }

    fn resolve_operators(&mut self, mut text: String) -> Result<Node, CompileError> {
        if text.ends_with(is_operator) {
            return Err(CompileError::UnparseableToken(text));
        }
        while let Some(pos) = text.find('^') {
            text = self.resolve_power(&text, pos)?;
        }
        self.resolve_additive(&text)
    }

    /// Folds the `^` at `pos` and its two operands into a placeholder.
    fn resolve_power(&mut self, text: &str, pos: usize) -> Result<String, CompileError> {
        let head = &text[..pos];
        let tail = &text[pos + 1..];
        let base_len = self.trailing_atom_len(head)
            .ok_or_else(|| CompileError::UnparseableToken(text.to_string()))?;
        let exp_len = self.leading_atom_len(tail)
            .ok_or_else(|| CompileError::UnparseableToken(text.to_string()))?;

        let base_start = pos - base_len;
        let base = self.resolve_leaf(&head[base_start..])?;
        let exponent = self.resolve_leaf(&tail[..exp_len])?;
        let token = self.mint(Node::binary(BinaryOperatorKind::Pow, base, exponent));
        log::trace!("resolved `{}` as {}", &text[base_start..pos + 1 + exp_len], token);

        Ok(format!("{}{}{}", &text[..base_start], token, &tail[exp_len..]))
    }

    /// Splits at the last additive sign; the left part may hold further
    /// additive signs, the right part may not.
    fn resolve_additive(&mut self, text: &str) -> Result<Node, CompileError> {
        match additive_split_index(text) {
            Some(idx) => {
                let kind = if text.as_bytes()[idx] == b'+' {
                    BinaryOperatorKind::Add
                } else {
                    BinaryOperatorKind::Sub
                };
                let left = self.resolve_additive(&text[..idx])?;
                let right = self.resolve_multiplicative(&text[idx + 1..])?;
                Ok(Node::binary(kind, left, right))
            },
            None => self.resolve_multiplicative(text),
        }
    }

    /// Splits at the first `*` or `/`; the right part is resolved
    /// recursively, so `a/b/c` becomes `a/(b/c)`.
    fn resolve_multiplicative(&mut self, text: &str) -> Result<Node, CompileError> {
        match text.find(['*', '/']) {
            Some(idx) => {
                let kind = if text.as_bytes()[idx] == b'*' {
                    BinaryOperatorKind::Mul
                } else {
                    BinaryOperatorKind::Div
                };
                let left = self.resolve_leaf(&text[..idx])?;
                let right = self.resolve_multiplicative(&text[idx + 1..])?;
                Ok(Node::binary(kind, left, right))
            },
            None => self.resolve_leaf(text),
        }
    }

    /// Every name a power operand may be: placeholders, constants and
    /// declared variables.
    fn atom_names(&self) -> impl Iterator<Item = &str> {
        self.replacements.keys().map(|name| name.as_str())
            .chain(self.constants.keys())
            .chain(self.variables.iter().map(|name| name.as_str()))
            .filter(|name| !name.is_empty())
    }

    /// Byte length of the power base `text` ends with: the longer of an
    /// unsigned numeric literal and a known name.
    fn trailing_atom_len(&self, text: &str) -> Option<usize> {
        let name_len = self.atom_names()
            .filter(|name| text.ends_with(name))
            .map(str::len)
            .max();
        literal::trailing_len(text).max(name_len)
    }

    /// Byte length of the exponent `text` starts with: the longer of a
    /// signed numeric literal and an optionally signed known name.
    fn leading_atom_len(&self, text: &str) -> Option<usize> {
        let sign_len = usize::from(text.starts_with(is_sign));
        let rest = &text[sign_len..];
        let name_len = self.atom_names()
            .filter(|name| rest.starts_with(name))
            .map(|name| sign_len + name.len())
            .max();
        literal::leading_len(text, true).max(name_len)
    }
}

/// Finds the `)` matching the `(` at `open`.
fn closing_bracket_index(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text[open..].char_indices() {
        match c {
            OPEN => depth += 1,
            CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            },
            _ => {},
        }
    }
    None
}

/// Finds the last additive sign that splits `text` into two operands.
///
/// The first and last characters are never split points, nor is a sign
/// directly after another operator (`2*-3`) or the exponent sign of a
/// numeric literal (`1e-5`).
fn additive_split_index(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    (1..bytes.len() - 1).rev().find(|&idx| {
        matches!(bytes[idx], b'+' | b'-')
            && !is_operator(char::from(bytes[idx - 1]))
            && !literal::is_exponent_sign(text, idx)
    })
}
