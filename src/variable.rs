//! # variable.rs
//!
//! Variable bindings supplied at evaluation time, and the occurrence index
//! built at compile time.
//!
//! Each bound value is stored as a `Complex<f64>`, allowing both real and
//! complex values to be represented.

use crate::node::{LeafId, Node};
use num_complex::Complex;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// A collection of named values for expression evaluation.
///
/// # Examples
///
/// ```
/// use complexpr::Bindings;
/// use num_complex::Complex;
///
/// let mut bindings = Bindings::default();
/// bindings.insert(&[("z", Complex::new(1.0, 0.0)), ("c", Complex::new(-0.8, 0.156))]);
///
/// assert!(bindings.contains("z"));
/// assert_eq!(bindings.get("c"), Some(Complex::new(-0.8, 0.156)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    table: HashMap<String, Complex<f64>>
}

impl Bindings {
    /// Creates a new empty `Bindings` table.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Constructs a `Bindings` table from a slice of name-value pairs.
    ///
    /// Values can be any type convertible into `Complex<f64>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexpr::Bindings;
    ///
    /// let bindings = Bindings::from(&[("a", 1.0), ("b", 2.0)]);
    /// assert!(bindings.contains("a"));
    /// ```
    pub fn from<V>(items: &[(&str, V)]) -> Self
    where
        V: Clone,
        Complex<f64>: From<V>,
    {
        let mut bindings = Self::new();
        bindings.insert(items);
        bindings
    }

    /// Inserts multiple values into the table, replacing previous ones.
    pub fn insert<V>(&mut self, items: &[(&str, V)])
    where
        V: Clone,
        Complex<f64>: From<V>,
    {
        for (key, val) in items {
            self.table.insert(key.to_string(), Complex::from(val.clone()));
        }
    }

    /// Binds a single name to a value.
    pub fn set<V>(&mut self, key: &str, val: V)
    where
        Complex<f64>: From<V>,
    {
        match self.table.get_mut(key) {
            Some(slot) => *slot = Complex::from(val),
            None => {
                self.table.insert(key.to_string(), Complex::from(val));
            },
        }
    }

    /// Checks if a value is bound to the given name.
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Retrieves the value bound to a name.
    pub fn get(&self, key: &str) -> Option<Complex<f64>> {
        self.table.get(key).copied()
    }

    /// Clears all bindings.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

/// Mapping from declared variable name to the leaves created for it.
///
/// Each textual occurrence of a variable becomes its own leaf; the index
/// groups them by name so a binding can be broadcast to all of them and so
/// callers can inspect which leaves a name affects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceIndex {
    buckets: BTreeMap<String, BTreeSet<LeafId>>,
}

impl OccurrenceIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, name: &str, leaf: LeafId) {
        match self.buckets.get_mut(name) {
            Some(bucket) => {
                bucket.insert(leaf);
            },
            None => {
                self.buckets.insert(name.to_string(), BTreeSet::from([leaf]));
            },
        }
    }

    /// Drops every leaf that no longer appears in `root`, and every name
    /// left without leaves.
    pub(crate) fn retain_present(&mut self, root: &Node) {
        let mut present = HashSet::new();
        root.for_each_variable(&mut |leaf, _| {
            present.insert(leaf);
        });
        for bucket in self.buckets.values_mut() {
            bucket.retain(|leaf| present.contains(leaf));
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }

    /// Returns the leaves created for `name`, if it occurs in the expression.
    pub fn leaves(&self, name: &str) -> Option<&BTreeSet<LeafId>> {
        self.buckets.get(name)
    }

    /// Returns true if `name` occurs in the expression.
    pub fn contains(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Iterates over the occurring names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(|name| name.as_str())
    }

    /// Iterates over names and their leaves in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<LeafId>)> {
        self.buckets.iter().map(|(name, leaves)| (name.as_str(), leaves))
    }

    /// Returns the total number of variable leaves.
    pub fn leaf_count(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    /// Returns true if the expression references no variable.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
