//! # constants.rs
//!
//! Named constants that may appear in an expression.
//!
//! The built-in names `e`, `i` and `pi` are always available through
//! [`Constants::default`]; further constants can be registered before
//! compiling. Constant names are reserved and cannot be declared as
//! variables.

use num_complex::Complex;
use phf::Map;
use phf_macros::phf_map;
use std::collections::HashMap;

/// Map of built-in constants by their name in an expression.
static DEFAULT_CONSTANTS: Map<&'static str, Complex<f64>> = phf_map! {
    "e" => Complex::new(std::f64::consts::E, 0.0),
    "i" => Complex::new(0.0, 1.0),
    "pi" => Complex::new(std::f64::consts::PI, 0.0),
};

/// A collection of named constants.
///
/// `Constants` maps constant names to values, allowing expressions to
/// reference these values by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Constants
{
    map: HashMap<String, Complex<f64>>,
}

impl Constants
{
    /// Creates an empty `Constants` table, without the built-in names.
    pub fn new() -> Self { Self { map: HashMap::new() } }

    /// Constructs a `Constants` table from an iterator of key-value pairs.
    pub fn from<I, S, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        String: From<S>,
        Complex<f64>: From<V>,
    {
        let mut consts = Self::new();
        consts.extend(items);
        consts
    }

    /// Inserts a constant into the table, replacing any previous value.
    pub fn insert<S, V>(&mut self, key: S, value: V)
    where
        String: From<S>,
        Complex<f64>: From<V>,
    {
        self.map.insert(String::from(key), Complex::from(value));
    }

    /// Inserts every pair of `items` into the table.
    pub fn extend<I, S, V>(&mut self, items: I)
    where
        I: IntoIterator<Item = (S, V)>,
        String: From<S>,
        Complex<f64>: From<V>,
    {
        for (key, val) in items {
            self.insert(key, val);
        }
    }

    /// Checks if a constant with the given name exists in the table.
    pub fn contains(&self, key: &str) -> bool
    {
        self.map.contains_key(key)
    }

    /// Retrieves the value of a constant by name.
    pub fn get(&self, key: &str) -> Option<Complex<f64>>
    {
        self.map.get(key).copied()
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns true if the table contains no elements.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the names of all constants in the table.
    pub fn keys(&self) -> impl Iterator<Item = &str>
    {
        self.map.keys().map(|s| s.as_str())
    }
}

impl Default for Constants
{
    fn default() -> Self
    {
        Self::from(DEFAULT_CONSTANTS.entries().map(|(name, value)| (*name, *value)))
    }
}

/// Returns the names of the built-in constants.
pub fn names() -> Vec<&'static str>
{
    DEFAULT_CONSTANTS.keys().copied().collect()
}
