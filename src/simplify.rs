//! # simplify.rs
//!
//! Tree simplification applied once to every freshly resolved tree.
//!
//! [`ConstantFolder`] evaluates every subtree that contains no variable and
//! drops neutral operands. It never removes a variable leaf, so the set of
//! leaves referenced by the occurrence index is preserved; the compiler
//! still prunes the index against the simplified tree for simplifiers that
//! do remove leaves.

use crate::node::Node;
use crate::operators::BinaryOperatorKind;
use num_complex::Complex;
use num_traits::{One, Zero};

/// Rewrites a tree into an equivalent, possibly smaller one.
///
/// Implementations must be idempotent: simplifying an already simplified
/// tree must not change the values it evaluates to.
pub trait Simplifier: Send + Sync {
    fn simplify(&self, node: Node) -> Node;
}

/// Returns the tree unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Simplifier for Passthrough {
    fn simplify(&self, node: Node) -> Node {
        node
    }
}

/// Folds constant subtrees and neutral operands.
///
/// - `2 + 3 * 4` → `14`
/// - `sin(0) * x` → `0 * x` (a zero factor is kept; `x` may be infinite)
/// - `x + 0`, `0 + x`, `x - 0` → `x`
/// - `x * 1`, `1 * x`, `x / 1`, `x ^ 1` → `x`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantFolder;

impl Simplifier for ConstantFolder {
    fn simplify(&self, node: Node) -> Node {
        let before = node.node_count();
        let folded = fold(node);
        log::trace!("folded {} node(s) into {}", before, folded.node_count());
        folded
    }
}

fn fold(node: Node) -> Node {
    match node {
        Node::Unary { kind, expr } => match fold(*expr) {
            Node::Constant(val) => Node::Constant(kind.apply(val)),
            expr => Node::unary(kind, expr),
        },
        Node::Binary { kind, left, right } => fold_binary(kind, fold(*left), fold(*right)),
        leaf => leaf,
    }
}

fn fold_binary(kind: BinaryOperatorKind, left: Node, right: Node) -> Node {
    if let (Node::Constant(l), Node::Constant(r)) = (&left, &right) {
        return Node::Constant(kind.apply(*l, *r));
    }

    let is = |node: &Node, f: fn(&Complex<f64>) -> bool| {
        matches!(node, Node::Constant(val) if f(val))
    };
    match kind {
        BinaryOperatorKind::Add if is(&right, Complex::is_zero) => left,
        BinaryOperatorKind::Add if is(&left, Complex::is_zero) => right,
        BinaryOperatorKind::Sub if is(&right, Complex::is_zero) => left,
        BinaryOperatorKind::Mul if is(&right, Complex::is_one) => left,
        BinaryOperatorKind::Mul if is(&left, Complex::is_one) => right,
        BinaryOperatorKind::Div if is(&right, Complex::is_one) => left,
        BinaryOperatorKind::Pow if is(&right, Complex::is_one) => left,
        _ => Node::binary(kind, left, right),
    }
}
