//! # complexpr
//!
//! `complexpr` compiles infix expressions over **complex numbers** into
//! evaluation trees that can be evaluated again and again with new variable
//! values, without parsing the text a second time.
//!
//! ## Overview
//! - Real and imaginary literals, the constants `e`, `i` and `pi`, and any
//!   constants registered on the [`Compiler`].
//! - The operators `+ - * / ^`, unary signs and implicit multiplication
//!   (`2x`, `3sin(z)`, `(a)(b)`).
//! - One-argument functions such as `sin`, `ln`, `sqrt` or `conj`.
//! - Alternate brackets `[ ]` and `{ }`, interchangeable with `( )`.
//!
//! Compilation rewrites the text step by step: brackets are resolved
//! innermost-first, then powers, then additive and multiplicative
//! operators, and every resolved part is replaced by a placeholder token
//! standing for the subtree already built. The resulting tree is simplified
//! once and returned as a [`CompiledExpression`].
//!
//! ## Example
//! ```rust
//! use complexpr::{compile, Bindings};
//! use num_complex::Complex;
//!
//! let expr = compile("sin(z) + 2i*cos(z)", &["z"]).expect("Failed to compile");
//!
//! let z = Complex::new(1.0, 2.0);
//! let result = expr.evaluate(&Bindings::from(&[("z", z)])).unwrap();
//! println!("Result = {}", result);
//! ```
//!
//! ## Example: Retrieving All Names
//! ```rust
//! use complexpr::{constants, BinaryOperatorKind, FunctionKind};
//!
//! let constant_names: Vec<&'static str> = constants::names();
//! println!("Constants: {:?}", constant_names);
//!
//! let operator_symbols: &[char] = BinaryOperatorKind::names();
//! println!("Operators: {:?}", operator_symbols);
//!
//! let function_names: &[&str] = FunctionKind::names();
//! println!("Functions: {:?}", function_names);
//! ```
//!
//! ## Concurrency
//! A [`CompiledExpression`] is never modified by evaluation and can be
//! shared between threads, for example through an `Arc`.
//!
//! ## License
//! Licensed under either **MIT** or **Apache-2.0** at your option.

mod compiler;
pub mod constants;
mod error;
mod evaluator;
pub mod functions;
mod leaf;
mod literal;
mod node;
mod normalizer;
pub mod operators;
mod parser;
pub mod simplify;
mod variable;

pub use compiler::Compiler;
pub use constants::Constants;
pub use error::{CompileError, EvalError};
pub use evaluator::CompiledExpression;
pub use functions::FunctionKind;
pub use node::{LeafId, Node};
pub use normalizer::Normalizer;
pub use operators::BinaryOperatorKind;
pub use simplify::{ConstantFolder, Passthrough, Simplifier};
pub use variable::{Bindings, OccurrenceIndex};

/// Compiles an expression with the default [`Compiler`] configuration.
///
/// # Parameters
/// - `expression`: The infix expression text.
/// - `variable_names`: The free variables the expression may reference.
///   Values are supplied at evaluation time by name, or positionally in this
///   order through [`CompiledExpression::evaluate_with`].
///
/// # Example
/// ```rust
/// use complexpr::compile;
/// use num_complex::Complex;
///
/// let expr = compile("a*x + b", &["x", "a", "b"]).unwrap();
/// let result = expr.evaluate_with(&[
///     Complex::new(1.0, 0.0),
///     Complex::new(2.0, 1.0),
///     Complex::new(-4.0, 2.0),
/// ]).unwrap();
/// assert_eq!(result, Complex::new(-2.0, 3.0));
/// ```
///
/// # Errors
/// See [`Compiler::compile`].
pub fn compile(expression: &str, variable_names: &[&str]) -> Result<CompiledExpression, CompileError>
{
    Compiler::new().compile(expression, variable_names)
}
