//! # node.rs
//!
//! The expression tree produced by compilation.
//!
//! Every non-leaf node owns its children through a `Box`, so a tree has
//! exactly one root and no node is ever shared. Variable leaves do not hold
//! a value: they name a slot in the value buffer passed in at evaluation,
//! which keeps evaluation a pure function of the tree and the bindings.

use crate::functions::FunctionKind;
use crate::operators::BinaryOperatorKind;
use num_complex::Complex;

/// Identity of a variable leaf, unique within one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafId(pub(crate) usize);

impl LeafId {
    /// Returns the raw index of the leaf, in creation order.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LeafId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Immutable complex value.
    Constant(Complex<f64>),

    /// One textual occurrence of a declared variable.
    Variable {
        leaf: LeafId,
        slot: usize,
    },

    /// Function applied to an expression.
    Unary {
        kind: FunctionKind,
        expr: Box<Node>,
    },

    /// Binary operator applied to left and right expressions.
    Binary {
        kind: BinaryOperatorKind,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub(crate) fn unary(kind: FunctionKind, expr: Node) -> Self {
        Self::Unary { kind, expr: Box::new(expr) }
    }

    pub(crate) fn binary(kind: BinaryOperatorKind, left: Node, right: Node) -> Self {
        Self::Binary { kind, left: Box::new(left), right: Box::new(right) }
    }

    /// Evaluates the tree bottom-up.
    ///
    /// `values` holds one value per variable slot; every slot referenced by
    /// a variable leaf must be present.
    pub(crate) fn evaluate(&self, values: &[Complex<f64>]) -> Complex<f64> {
        match self {
            Self::Constant(val) => *val,
            Self::Variable { slot, .. } => values[*slot],
            Self::Unary { kind, expr } => kind.apply(expr.evaluate(values)),
            Self::Binary { kind, left, right } => {
                kind.apply(left.evaluate(values), right.evaluate(values))
            },
        }
    }

    /// Calls `f` with the identity and slot of every variable leaf, left to right.
    pub fn for_each_variable<F>(&self, f: &mut F)
    where
        F: FnMut(LeafId, usize),
    {
        match self {
            Self::Constant(_) => {},
            Self::Variable { leaf, slot } => f(*leaf, *slot),
            Self::Unary { expr, .. } => expr.for_each_variable(f),
            Self::Binary { left, right, .. } => {
                left.for_each_variable(f);
                right.for_each_variable(f);
            },
        }
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Variable { .. } => 1,
            Self::Unary { expr, .. } => 1 + expr.node_count(),
            Self::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Writes the tree fully parenthesized, naming variables through `names`.
    pub(crate) fn write(&self, f: &mut std::fmt::Formatter<'_>, names: &[String]) -> std::fmt::Result {
        match self {
            Self::Constant(val) if val.im == 0.0 => write!(f, "{}", val.re),
            Self::Constant(val) => write!(f, "({})", val),
            Self::Variable { slot, .. } => match names.get(*slot) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "${}", slot),
            },
            Self::Unary { kind, expr } => {
                write!(f, "{}(", kind)?;
                expr.write(f, names)?;
                write!(f, ")")
            },
            Self::Binary { kind, left, right } => {
                write!(f, "(")?;
                left.write(f, names)?;
                write!(f, " {} ", kind)?;
                right.write(f, names)?;
                write!(f, ")")
            },
        }
    }
}

impl From<Complex<f64>> for Node {
    fn from(val: Complex<f64>) -> Self {
        Self::Constant(val)
    }
}
