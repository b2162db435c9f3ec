//! # error.rs
//!
//! Error types returned while compiling and evaluating expressions.

/// Errors detected while compiling an expression.
///
/// Every variant is fatal to the compilation that produced it; no partial
/// tree is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The expression is empty or consists only of whitespace.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// A bracket has no matching counterpart.
    #[error("unbalanced brackets in `{0}`")]
    UnbalancedBrackets(String),

    /// A span matched none of placeholder, constant, variable or numeric literal.
    #[error("unparseable token `{0}`")]
    UnparseableToken(String),

    /// A declared variable name is not an identifier.
    #[error("`{0}` is not a valid variable name")]
    InvalidVariableName(String),

    /// A declared variable name collides with a constant.
    #[error("`{0}` is a constant and cannot be used as a variable name")]
    ReservedVariableName(String),

    /// A registered constant name is not an identifier.
    #[error("`{0}` is not a valid constant name")]
    InvalidConstantName(String),
}

/// Errors detected while evaluating a compiled expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// A variable referenced by the expression has no value bound.
    #[error("variable `{0}` is not bound")]
    UnboundVariable(String),

    /// Positional evaluation received the wrong number of values.
    #[error("expected {expected} value(s), got {found}")]
    ArityMismatch { expected: usize, found: usize },
}
