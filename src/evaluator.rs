//! # evaluator.rs
//!
//! The reusable result of compilation.
//!
//! Bindings are copied into a small per-call buffer, indexed by variable
//! slot, and passed down the tree; the tree itself is never written to.
//! A `CompiledExpression` can therefore be evaluated from several threads
//! at once.

use crate::error::EvalError;
use crate::node::Node;
use crate::variable::{Bindings, OccurrenceIndex};
use num_complex::Complex;
use smallvec::SmallVec;

/// Number of variables evaluated without a heap allocation.
const INLINE_SLOTS: usize = 8;

type Slots = SmallVec<[Complex<f64>; INLINE_SLOTS]>;

/// A compiled expression, ready to be evaluated for many bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    root: Node,
    variables: Vec<String>,
    occurrences: OccurrenceIndex,
}

impl CompiledExpression {
    pub(crate) fn new(root: Node, variables: Vec<String>, occurrences: OccurrenceIndex) -> Self {
        Self { root, variables, occurrences }
    }

    /// Evaluates the expression with values looked up by name.
    ///
    /// Every variable that occurs in the expression must be bound. Declared
    /// variables that do not occur are ignored, as are extra bindings.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnboundVariable`] naming the first occurring
    /// variable without a binding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use complexpr::{compile, Bindings};
    /// use num_complex::Complex;
    ///
    /// let expr = compile("z^2 + c", &["z", "c"]).unwrap();
    /// let mut bindings = Bindings::from(&[("c", Complex::new(-0.4, 0.6))]);
    ///
    /// let mut z = Complex::new(0.0, 0.0);
    /// for _ in 0..3 {
    ///     bindings.set("z", z);
    ///     z = expr.evaluate(&bindings).unwrap();
    /// }
    /// ```
    pub fn evaluate(&self, bindings: &Bindings) -> Result<Complex<f64>, EvalError> {
        let mut slots: Slots = SmallVec::from_elem(Complex::new(0.0, 0.0), self.variables.len());
        for (slot, name) in self.variables.iter().enumerate() {
            match bindings.get(name) {
                Some(val) => slots[slot] = val,
                None if self.occurrences.contains(name) => {
                    return Err(EvalError::UnboundVariable(name.clone()));
                },
                None => {},
            }
        }
        Ok(self.root.evaluate(&slots))
    }

    /// Evaluates the expression with values given in the order of
    /// [`variables`](Self::variables).
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ArityMismatch`] if `values` does not hold exactly
    /// one value per declared variable.
    pub fn evaluate_with(&self, values: &[Complex<f64>]) -> Result<Complex<f64>, EvalError> {
        if values.len() != self.variables.len() {
            return Err(EvalError::ArityMismatch {
                expected: self.variables.len(),
                found: values.len(),
            });
        }
        Ok(self.root.evaluate(values))
    }

    /// Returns the declared variable names, deduplicated, in declaration order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Returns the leaves created for each variable that occurs in the expression.
    pub fn occurrences(&self) -> &OccurrenceIndex {
        &self.occurrences
    }

    /// Returns the root of the simplified tree.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

impl std::fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.root.write(f, &self.variables)
    }
}
