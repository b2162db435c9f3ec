//! # compiler.rs
//!
//! Entry point of compilation: configuration plus the pipeline that turns
//! expression text into a [`CompiledExpression`].
//!
//! A [`Compiler`] only holds configuration and is never mutated by
//! `compile`, so one instance can compile any number of expressions, from
//! any number of threads.

use crate::constants::Constants;
use crate::error::CompileError;
use crate::evaluator::CompiledExpression;
use crate::normalizer::{strip_whitespace, Normalizer};
use crate::parser::ParseContext;
use crate::simplify::{ConstantFolder, Simplifier};
use num_complex::Complex;
use std::sync::Arc;

/// Compiles expressions into reusable evaluation trees.
///
/// # Examples
///
/// ```rust
/// use complexpr::{Bindings, Compiler};
/// use num_complex::Complex;
///
/// let compiler = Compiler::new()
///     .with_constants([("c", Complex::new(-0.8, 0.156))]);
/// let expr = compiler.compile("z^2 + c", &["z"]).expect("Failed to compile");
///
/// let z = Complex::new(0.1, 0.2);
/// let result = expr.evaluate(&Bindings::from(&[("z", z)])).unwrap();
/// assert_eq!(result, z * z + Complex::new(-0.8, 0.156));
/// ```
#[derive(Clone)]
pub struct Compiler
{
    constants: Constants,
    normalizer: Normalizer,
    simplifier: Arc<dyn Simplifier>,
}

impl Compiler
{
    /// Creates a compiler with the built-in constants, `[ ]` and `{ }` as
    /// alternate brackets, and constant folding.
    pub fn new() -> Self
    {
        Self {
            constants: Constants::default(),
            normalizer: Normalizer::default(),
            simplifier: Arc::new(ConstantFolder),
        }
    }

    /// Registers additional named constants.
    ///
    /// Constant names take part in implicit multiplication and cannot be
    /// declared as variables. A name that is not an identifier makes every
    /// later [`compile`](Self::compile) fail with
    /// [`CompileError::InvalidConstantName`].
    pub fn with_constants<I, S, V>(mut self, constants: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        String: From<S>,
        Complex<f64>: From<V>,
    {
        self.constants.extend(constants);
        self
    }

    /// Replaces the alternate bracket glyphs rewritten to `(` and `)`.
    pub fn with_brackets<I, J, S>(mut self, opening: I, closing: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.normalizer = Normalizer::with_brackets(opening, closing);
        self
    }

    /// Replaces the simplifier applied to every compiled tree.
    pub fn with_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: Simplifier + 'static,
    {
        self.simplifier = Arc::new(simplifier);
        self
    }

    /// Returns the constant table used when compiling.
    pub fn constants(&self) -> &Constants
    {
        &self.constants
    }

    /// Compiles `expression` with the free variables `variable_names`.
    ///
    /// Variable names are whitespace-insensitive and case-sensitive. A
    /// declared name does not have to occur in the expression.
    ///
    /// # Errors
    ///
    /// - [`CompileError::InvalidExpression`] for blank input.
    /// - [`CompileError::UnbalancedBrackets`] when a bracket has no counterpart.
    /// - [`CompileError::UnparseableToken`] when a part of the text is not a
    ///   number, constant, declared variable or function application.
    /// - [`CompileError::InvalidVariableName`] and
    ///   [`CompileError::ReservedVariableName`] for unusable variable names.
    /// - [`CompileError::InvalidConstantName`] for a registered constant whose
    ///   name is not an identifier.
    pub fn compile(&self, expression: &str, variable_names: &[&str]) -> Result<CompiledExpression, CompileError>
    {
        let text = self.normalizer.normalize(expression)?;
        self.check_constants()?;
        let variables = self.declare_variables(variable_names)?;
        log::debug!("compiling `{}` with variables {:?}", text, variables);

        let mut context = ParseContext::new(&self.constants, &variables);
        let raw = context.parse_expression(&text)?;
        let mut occurrences = context.into_occurrences();

        let raw_count = raw.node_count();
        let root = self.simplifier.simplify(raw);
        occurrences.retain_present(&root);
        log::debug!(
            "compiled `{}`: {} node(s), {} after simplification, {} variable leaf(s)",
            text, raw_count, root.node_count(), occurrences.leaf_count()
        );

        Ok(CompiledExpression::new(root, variables, occurrences))
    }

    /// Rejects registered constant names that are not identifiers.
    fn check_constants(&self) -> Result<(), CompileError>
    {
        match self.constants.keys().filter(|name| !is_identifier(name)).min() {
            Some(name) => Err(CompileError::InvalidConstantName(name.to_string())),
            None => Ok(()),
        }
    }

    /// Normalizes and validates declared names, merging duplicates while
    /// keeping the first-declared order.
    fn declare_variables(&self, variable_names: &[&str]) -> Result<Vec<String>, CompileError>
    {
        let mut variables: Vec<String> = Vec::with_capacity(variable_names.len());
        for name in variable_names {
            let name = strip_whitespace(name);
            if !is_identifier(&name) {
                return Err(CompileError::InvalidVariableName(name));
            }
            if self.constants.contains(&name) {
                return Err(CompileError::ReservedVariableName(name));
            }
            if !variables.contains(&name) {
                variables.push(name);
            }
        }
        Ok(variables)
    }
}

impl Default for Compiler
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl std::fmt::Debug for Compiler
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct("Compiler")
            .field("constants", &self.constants)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

/// A letter followed by letters, digits or underscores.
fn is_identifier(name: &str) -> bool
{
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod compiler_tests {
    use super::*;
    use crate::simplify::Passthrough;
    use crate::variable::Bindings;
    use crate::node::Node;
    use approx::assert_abs_diff_eq;

    fn assert_complex_eq(result: Complex<f64>, expected: Complex<f64>) {
        assert_abs_diff_eq!(result.re, expected.re, epsilon = 1.0e-12);
        assert_abs_diff_eq!(result.im, expected.im, epsilon = 1.0e-12);
    }

    fn eval(expression: &str) -> Complex<f64> {
        Compiler::new().compile(expression, &[]).unwrap()
            .evaluate(&Bindings::new()).unwrap()
    }

    fn eval_with(expression: &str, bindings: &[(&str, Complex<f64>)]) -> Complex<f64> {
        let names: Vec<&str> = bindings.iter().map(|(name, _)| *name).collect();
        Compiler::new().compile(expression, &names).unwrap()
            .evaluate(&Bindings::from(bindings)).unwrap()
    }

    fn render(expression: &str, names: &[&str]) -> String {
        Compiler::new()
            .with_simplifier(Passthrough)
            .compile(expression, names)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_reference_values() {
        assert_complex_eq(eval("2+3*4"), Complex::new(14.0, 0.0));
        assert_complex_eq(eval("(1+2)^2"), Complex::new(9.0, 0.0));
        assert_complex_eq(eval("10-3-2"), Complex::new(5.0, 0.0));
        assert_complex_eq(eval("sin(0)"), Complex::new(0.0, 0.0));
        assert_complex_eq(eval("i^2"), Complex::new(-1.0, 0.0));
        assert_complex_eq(eval_with("2x", &[("x", Complex::new(3.0, 0.0))]), Complex::new(6.0, 0.0));
    }

    #[test]
    fn test_power_is_left_associative() {
        assert_eq!(render("a^b^c", &["a", "b", "c"]), "((a ^ b) ^ c)");
        assert_complex_eq(eval("2^3^2"), Complex::new(64.0, 0.0));
    }

    #[test]
    fn test_division_chain_is_right_associative() {
        assert_eq!(render("a/b/c", &["a", "b", "c"]), "(a / (b / c))");
        assert_complex_eq(eval("8/4/2"), Complex::new(4.0, 0.0));
        assert_eq!(render("a*b/c", &["a", "b", "c"]), "(a * (b / c))");
    }

    #[test]
    fn test_additive_chain_is_left_associative() {
        assert_eq!(render("a-b+c-d", &["a", "b", "c", "d"]), "(((a - b) + c) - d)");
        assert_eq!(render("a+b*c", &["a", "b", "c"]), "(a + (b * c))");
    }

    #[test]
    fn test_power_binds_tighter_than_sign_and_product() {
        assert_eq!(render("-x^2", &["x"]), "(-1 * (x ^ 2))");
        assert_eq!(render("2x^2", &["x"]), "(2 * (x ^ 2))");
        assert_eq!(render("2-3^2", &[]), "(2 - (3 ^ 2))");
        assert_complex_eq(eval("2-3^2"), Complex::new(-7.0, 0.0));
        assert_complex_eq(eval("2^-1"), Complex::new(0.5, 0.0));
        assert_eq!(render("2^-x", &["x"]), "(2 ^ (-1 * x))");
    }

    #[test]
    fn test_unary_signs() {
        assert_complex_eq(eval("-3"), Complex::new(-3.0, 0.0));
        assert_complex_eq(eval("2*-3"), Complex::new(-6.0, 0.0));
        assert_complex_eq(eval("1--2"), Complex::new(3.0, 0.0));
        assert_complex_eq(eval("-(1+2)"), Complex::new(-3.0, 0.0));
        assert_complex_eq(eval("4/-2"), Complex::new(-2.0, 0.0));
    }

    #[test]
    fn test_scientific_notation() {
        assert_complex_eq(eval("1e-5+2"), Complex::new(2.00001, 0.0));
        assert_complex_eq(eval("2.5E3"), Complex::new(2500.0, 0.0));
        assert_complex_eq(eval("1e-2^2"), Complex::new(1.0e-4, 0.0));
        // `2e` without exponent digits is two times e
        assert_complex_eq(eval("2e"), Complex::new(2.0 * std::f64::consts::E, 0.0));
    }

    #[test]
    fn test_functions_and_brackets() {
        let z = Complex::new(0.3, -0.7);
        assert_complex_eq(eval_with("sin(z)^2+cos(z)^2", &[("z", z)]), Complex::new(1.0, 0.0));
        assert_complex_eq(eval_with("asin(sin(z))", &[("z", z)]), z);
        assert_complex_eq(eval_with("2sqrt(z)", &[("z", z)]), z.sqrt() * 2.0);
        assert_complex_eq(eval_with("[z+1]{z-1}", &[("z", z)]), (z + 1.0) * (z - 1.0));
        assert_complex_eq(eval("exp(i*pi)"), Complex::new(-1.0, 0.0));
        assert_complex_eq(eval("abs(3+4i)"), Complex::new(5.0, 0.0));
    }

    #[test]
    fn test_function_name_applies_only_before_bracket() {
        assert_eq!(render("xsin(x)", &["x"]), "(x * sin(x))");
        assert_eq!(render("(x)(x)", &["x"]), "(x * x)");
    }

    #[test]
    fn test_variable_names_with_constant_letters() {
        let t = Complex::new(2.0, 0.0);
        assert_complex_eq(eval_with("time*i", &[("time", t)]), Complex::new(0.0, 2.0));
        assert_complex_eq(eval_with("2time", &[("time", t)]), Complex::new(4.0, 0.0));
    }

    #[test]
    fn test_whitespace_in_variable_names() {
        let expr = Compiler::new().compile("z * z", &[" z "]).unwrap();
        assert_eq!(expr.variables(), &["z".to_string()]);
    }

    #[test]
    fn test_errors() {
        let compiler = Compiler::new();
        assert!(matches!(compiler.compile("(1+2", &[]), Err(CompileError::UnbalancedBrackets(_))));
        assert!(matches!(compiler.compile("1+2)", &[]), Err(CompileError::UnbalancedBrackets(_))));
        assert!(matches!(compiler.compile("", &[]), Err(CompileError::InvalidExpression(_))));
        assert!(matches!(compiler.compile("   ", &[]), Err(CompileError::InvalidExpression(_))));
        assert_eq!(compiler.compile("?", &[]).unwrap_err(), CompileError::UnparseableToken("?".into()));
        assert!(matches!(compiler.compile("x+1", &[]), Err(CompileError::UnparseableToken(_))));
        assert!(matches!(compiler.compile("2+", &[]), Err(CompileError::UnparseableToken(_))));
        assert!(matches!(compiler.compile("^2", &[]), Err(CompileError::UnparseableToken(_))));
        assert!(matches!(compiler.compile("()", &[]), Err(CompileError::UnparseableToken(_))));
        assert!(matches!(compiler.compile("2**3", &[]), Err(CompileError::UnparseableToken(_))));
    }

    #[test]
    fn test_variable_name_validation() {
        let compiler = Compiler::new();
        assert_eq!(
            compiler.compile("x", &["e"]).unwrap_err(),
            CompileError::ReservedVariableName("e".into())
        );
        assert_eq!(
            compiler.compile("x", &["i"]).unwrap_err(),
            CompileError::ReservedVariableName("i".into())
        );
        assert_eq!(
            compiler.compile("x", &["2x"]).unwrap_err(),
            CompileError::InvalidVariableName("2x".into())
        );
        assert_eq!(
            compiler.compile("x", &[""]).unwrap_err(),
            CompileError::InvalidVariableName("".into())
        );
        assert!(matches!(compiler.compile("x", &["x+y"]), Err(CompileError::InvalidVariableName(_))));

        let custom = Compiler::new().with_constants([("c", 1.0)]);
        assert_eq!(
            custom.compile("c", &["c"]).unwrap_err(),
            CompileError::ReservedVariableName("c".into())
        );
    }

    #[test]
    fn test_constant_names_are_validated() {
        let compiler = Compiler::new().with_constants([("", 1.0)]);
        assert_eq!(
            compiler.compile("?", &[]).unwrap_err(),
            CompileError::InvalidConstantName("".into())
        );
        assert_eq!(
            compiler.compile("2", &[]).unwrap_err(),
            CompileError::InvalidConstantName("".into())
        );

        let compiler = Compiler::new().with_constants([("a+b", 1.0)]);
        assert_eq!(
            compiler.compile("1", &[]).unwrap_err(),
            CompileError::InvalidConstantName("a+b".into())
        );
    }

    #[test]
    fn test_blank_expression_is_reported_before_names() {
        let compiler = Compiler::new();
        assert!(matches!(compiler.compile("", &["2x"]), Err(CompileError::InvalidExpression(_))));
        assert!(matches!(compiler.compile(" ", &["e"]), Err(CompileError::InvalidExpression(_))));
    }

    #[test]
    fn test_constant_wins_over_shorter_variable() {
        let pi = Complex::new(std::f64::consts::PI, 0.0);
        let p = Complex::new(5.0, 0.0);
        assert_complex_eq(eval_with("pi", &[("p", p)]), pi);
        assert_complex_eq(eval_with("pi^1", &[("p", p)]), pi);
        assert_complex_eq(eval_with("p*pi", &[("p", p)]), p * pi);
    }

    #[test]
    fn test_exponent_sign_after_non_ascii_name() {
        // λ2e-1 is λ times 2 times e, minus one
        let lambda = Complex::new(1.0, 0.0);
        let expected = Complex::new(2.0 * std::f64::consts::E - 1.0, 0.0);
        assert_complex_eq(eval_with("λ2e-1", &[("λ", lambda)]), expected);
    }

    #[test]
    fn test_custom_constants_and_brackets() {
        let compiler = Compiler::new()
            .with_constants([("c", Complex::new(-0.8, 0.156))])
            .with_brackets(["<"], [">"]);
        let z = Complex::new(0.25, 0.5);
        let expr = compiler.compile("<z^2> + c", &["z"]).unwrap();
        let result = expr.evaluate(&Bindings::from(&[("z", z)])).unwrap();
        assert_complex_eq(result, z * z + Complex::new(-0.8, 0.156));
    }

    #[test]
    fn test_duplicate_declarations_are_merged() {
        let expr = Compiler::new().compile("x+y", &["x", "y", "x"]).unwrap();
        assert_eq!(expr.variables(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_simplifier_runs_once_per_compile() {
        let expr = Compiler::new().compile("(1+2)*3 + sin(0)", &[]).unwrap();
        assert_eq!(expr.root(), &Node::from(Complex::new(9.0, 0.0)));

        let raw = Compiler::new().with_simplifier(Passthrough).compile("(1+2)*3", &[]).unwrap();
        assert_eq!(raw.root().node_count(), 5);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("x"));
        assert!(is_identifier("z_1"));
        assert!(is_identifier("λ"));
        assert!(!is_identifier("_x"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("x y"));
        assert!(!is_identifier(""));
    }
}
