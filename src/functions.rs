//! # functions.rs
//!
//! Built-in one-argument functions that may precede a bracketed argument.
//!
//! A function name is only recognised immediately before `(`; there are no
//! bare function references.

use num_complex::Complex;

#[doc(hidden)]
/// Internal macro for defining built-in mathematical functions.
///
/// Each entry declares the enum variant, its canonical name and how it is
/// applied to the evaluated argument. To add or remove a built-in function,
/// update the list below.
macro_rules! functions {
    ($( $variant: ident => { name: $name:expr, apply: |$a:ident| $body:expr }, )*) => {
        /// Represents a mathematical function applied to one complex number.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum FunctionKind {
            $( $variant, )*
        }

        impl FunctionKind {
            /// Converts a function name into a `FunctionKind`.
            ///
            /// Returns `None` if the string does not match any supported function.
            pub fn from(s: &str) -> Option<Self> {
                match s {
                    $( $name => Some(Self::$variant), )*
                    _ => None,
                }
            }

            /// Returns a list of all supported function names.
            pub fn names() -> &'static [&'static str] {
                &[$($name),*]
            }

            /// Returns the canonical name of the function.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            /// Applies the function to a complex number.
            pub fn apply(&self, x: Complex<f64>) -> Complex<f64> {
                match self {
                    $( Self::$variant => {
                        let $a = x;
                        $body
                    }, )*
                }
            }
        }

        impl std::fmt::Display for FunctionKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

functions! {
    Sin     => { name: "sin",       apply: |a| a.sin() },
    Cos     => { name: "cos",       apply: |a| a.cos() },
    Tan     => { name: "tan",       apply: |a| a.tan() },
    Asin    => { name: "asin",      apply: |a| a.asin() },
    Acos    => { name: "acos",      apply: |a| a.acos() },
    Atan    => { name: "atan",      apply: |a| a.atan() },
    Sinh    => { name: "sinh",      apply: |a| a.sinh() },
    Cosh    => { name: "cosh",      apply: |a| a.cosh() },
    Tanh    => { name: "tanh",      apply: |a| a.tanh() },
    Asinh   => { name: "asinh",     apply: |a| a.asinh() },
    Acosh   => { name: "acosh",     apply: |a| a.acosh() },
    Atanh   => { name: "atanh",     apply: |a| a.atanh() },
    Exp     => { name: "exp",       apply: |a| a.exp() },
    Ln      => { name: "ln",        apply: |a| a.ln() },
    Log10   => { name: "log10",     apply: |a| a.log10() },
    Sqrt    => { name: "sqrt",      apply: |a| a.sqrt() },
    Abs     => { name: "abs",       apply: |a| Complex::from(a.norm()) },
    Conj    => { name: "conj",      apply: |a| a.conj() },
}

impl FunctionKind {
    /// Finds the longest function name that `text` ends with.
    ///
    /// Used to decide whether a bracket is a function application: the text
    /// right before `(` is inspected, so `asin(` is read as `asin` and not
    /// as `a` followed by `sin`.
    pub(crate) fn suffix_of(text: &str) -> Option<Self> {
        Self::names()
            .iter()
            .copied()
            .filter(|name| text.ends_with(name))
            .max_by_key(|name| name.len())
            .and_then(Self::from)
    }
}
