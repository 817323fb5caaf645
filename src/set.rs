//! Canonical finite indexed sets.
//!
//! `FiniteSet<T>` captures a deduplicated collection with a fixed,
//! caller-supplied iteration order. Every element has a stable zero-based
//! index equal to its position in that order; the index is the coordinate
//! system the adjacency matrices in this crate are expressed in.
//!
//! # Determinism
//! - Iteration order is the insertion order of first occurrences, captured
//!   once at construction and never resorted.
//! - Element-to-index lookup goes through the backing [`IndexSet`] and is
//!   O(1) expected.
//!
//! # Citations
//! - Halmos, "Naive Set Theory" (1960) – finite sets and indexing

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A deduplicated finite set with a canonical element order.
///
/// # Invariants
/// - No duplicate elements; the first occurrence of a duplicate wins and
///   fixes its index.
/// - `index_of(e) == Some(i)` iff `element(i) == e`.
///
/// Equality is order-insensitive (two sets with the same elements in
/// different canonical orders compare equal); `Hash` is consistent with
/// that equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Eq + Hash"
))]
pub struct FiniteSet<T> {
    elements: IndexSet<T>,
}

impl<T: Eq + Hash> FiniteSet<T> {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self {
            elements: IndexSet::new(),
        }
    }

    /// Number of elements (the "cardinal").
    #[inline]
    pub fn cardinal(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements in canonical order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }

    /// Looks up an element by its canonical index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get_index(index)
    }

    /// Looks up an element by index.
    ///
    /// # Panics
    /// If `index >= self.cardinal()`. Internal callers only pass indices
    /// produced by this set.
    #[inline]
    pub(crate) fn element(&self, index: usize) -> &T {
        self.elements
            .get_index(index)
            .unwrap_or_else(|| panic!("index {} out of bounds for finite set", index))
    }

    /// Returns the canonical index of an element, if present.
    #[inline]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.elements.get_index_of(element)
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    /// Returns `true` if every element of `self` is an element of `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.elements.iter().all(|e| other.contains(e))
    }

    /// Returns `true` if both sets list their elements in the same
    /// canonical order. Used to pick the word-wise fast path in binary
    /// matrix algebra.
    pub(crate) fn same_order(&self, other: &Self) -> bool {
        self.cardinal() == other.cardinal()
            && self.elements.iter().zip(other.elements.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq + Hash> Default for FiniteSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for FiniteSet<T> {
    /// Collects elements, deduplicating while preserving first-occurrence
    /// order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash> PartialEq for FiniteSet<T> {
    /// Order-insensitive set equality.
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq + Hash> Eq for FiniteSet<T> {}

impl<T: Eq + Hash> Hash for FiniteSet<T> {
    /// Order-insensitive hash, consistent with `PartialEq`.
    ///
    /// Each element is hashed independently and the results are combined
    /// with a commutative operation, so permuted canonical orders produce
    /// the same hash.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined: u64 = 0;
        for element in &self.elements {
            let mut hasher = DefaultHasher::new();
            element.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }
        state.write_usize(self.elements.len());
        state.write_u64(combined);
    }
}
