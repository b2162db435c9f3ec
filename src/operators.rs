//! # operators.rs
//!
//! Binary operators recognised by the operator resolver.

use num_complex::Complex;

/// Judge whether the exponent can be applied with repeated multiplication.
fn is_exp_compatible_with_i32(exp: &Complex<f64>) -> bool {
    (exp.im == 0.0) && (exp.re.fract() == 0.0)
        && (i32::MIN as f64 <= exp.re) && (exp.re <= i32::MAX as f64)
}

fn power(base: Complex<f64>, exp: Complex<f64>) -> Complex<f64> {
    if is_exp_compatible_with_i32(&exp) {
        base.powi(exp.re as i32)
    } else {
        base.powc(exp)
    }
}

#[doc(hidden)]
/// Internal macro to define all binary operators.
///
/// It centralizes the enum variants, symbol and apply logic, so that the
/// operator is resolved once while compiling and never looked up by name
/// during evaluation.
macro_rules! binary_operators {
    ($($name:ident => { symbol: $symbol:expr, apply: $apply:expr }),* $(,)?) => {
        /// Represents a binary operator in a mathematical expression.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum BinaryOperatorKind {
            $($name),*
        }

        impl BinaryOperatorKind {
            /// Converts an operator character to the corresponding operator.
            pub fn from(c: char) -> Option<Self> {
                match c {
                    $($symbol => Some(Self::$name),)*
                    _ => None,
                }
            }

            /// Returns the character the operator is written with.
            pub fn symbol(&self) -> char {
                match self {
                    $(Self::$name => $symbol,)*
                }
            }

            /// Applies the operator to two complex numbers.
            pub fn apply(&self, l: Complex<f64>, r: Complex<f64>) -> Complex<f64> {
                match self {
                    $(Self::$name => $apply(l, r),)*
                }
            }

            /// Returns a list of all supported binary operator symbols.
            pub fn names() -> &'static [char] {
                &[$($symbol),*]
            }
        }

        impl std::fmt::Display for BinaryOperatorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.symbol())
            }
        }
    };
}

binary_operators! {
    Add => { symbol: '+', apply: |l: Complex<f64>, r: Complex<f64>| l + r },
    Sub => { symbol: '-', apply: |l: Complex<f64>, r: Complex<f64>| l - r },
    Mul => { symbol: '*', apply: |l: Complex<f64>, r: Complex<f64>| l * r },
    Div => { symbol: '/', apply: |l: Complex<f64>, r: Complex<f64>| l / r },
    Pow => { symbol: '^', apply: power },
}

/// Returns true if `c` is one of the binary operator characters.
pub(crate) fn is_operator(c: char) -> bool {
    BinaryOperatorKind::from(c).is_some()
}

/// Returns true if `c` is an additive sign.
pub(crate) fn is_sign(c: char) -> bool {
    matches!(c, '+' | '-')
}
