//! # normalizer.rs
//!
//! First stage of compilation: turns raw input into the canonical text the
//! resolvers work on.
//!
//! Whitespace is removed entirely and every alternate bracket glyph is
//! replaced by `(` or `)`. No structural validation happens here; malformed
//! input is reported by later stages.

use crate::error::CompileError;

/// Canonical opening bracket.
pub const OPEN: char = '(';
/// Canonical closing bracket.
pub const CLOSE: char = ')';

/// Rewrites expression text into canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    opening: Vec<String>,
    closing: Vec<String>,
}

impl Normalizer {
    /// Creates a normalizer with the given alternate bracket glyphs.
    ///
    /// # Arguments
    ///
    /// * `opening` - Glyphs rewritten to `(`.
    /// * `closing` - Glyphs rewritten to `)`.
    pub fn with_brackets<I, J, S>(opening: I, closing: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keep = |glyph: &String| !glyph.trim().is_empty();
        Self {
            opening: opening.into_iter().map(Into::into).filter(keep).collect(),
            closing: closing.into_iter().map(Into::into).filter(keep).collect(),
        }
    }

    /// Normalizes an expression.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidExpression`] if the expression is empty
    /// or consists only of whitespace.
    pub fn normalize(&self, expression: &str) -> Result<String, CompileError> {
        if expression.trim().is_empty() {
            return Err(CompileError::InvalidExpression("expression is blank".into()));
        }

        let mut text = strip_whitespace(expression);
        for glyph in &self.opening {
            text = text.replace(glyph.as_str(), "(");
        }
        for glyph in &self.closing {
            text = text.replace(glyph.as_str(), ")");
        }
        Ok(text)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_brackets(["[", "{"], ["]", "}"])
    }
}

/// Removes every whitespace character from `text`.
pub(crate) fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
