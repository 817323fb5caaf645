//! Finrel: an analysis engine for finite binary relations.
//!
//! This crate models two abstractions over boolean adjacency matrices:
//! - [`Relation`]: R ⊆ A×B for two finite sets of possibly different
//!   element types, with set-theoretic queries, function-likeness
//!   properties and the non-order algebra (union, intersection, symmetric
//!   difference, converse, complement, composition, restriction).
//! - [`EndoRelation`]: R ⊆ A×A, mirroring the algebra homogeneously and
//!   adding order/equivalence theory: the reflexivity, symmetry and
//!   transitivity families, preorder/order/equivalence classification,
//!   bounds, quotient-set partitioning and reflexive/symmetric closures.
//!
//! A relation is constructed from a predicate, an explicit pair set, or an
//! explicit 0/1 matrix; all three are resolved into one canonical boolean
//! matrix at construction time, and everything downstream reads only that
//! matrix. Instances are immutable, derived properties are memoized, and
//! algebra returns fresh instances, so a relation can be shared read-only
//! across threads without synchronization.
//!
//! # Example
//!
//! ```
//! use finrel::prelude::*;
//!
//! let digits: FiniteSet<u32> = (0..10).collect();
//! let mod2 = EndoRelation::from_predicate(digits.clone(), |a, b| a % 2 == b % 2);
//! let mod3 = EndoRelation::from_predicate(digits, |a, b| a % 3 == b % 3);
//!
//! let mod6 = mod2.intersection(&mod3).unwrap();
//! assert!(mod6.is_equivalence());
//! assert_eq!(mod6.quotient_set().unwrap().len(), 6);
//! ```

pub mod endo;
pub mod error;
pub mod fingerprint;
pub mod matrix;
pub mod relation;
pub mod set;

pub use endo::EndoRelation;
pub use error::RelationError;
pub use matrix::BoolMatrix;
pub use relation::Relation;
pub use set::FiniteSet;

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::endo::EndoRelation;
    pub use crate::error::RelationError;
    pub use crate::fingerprint::{
        endo_fingerprint, relation_fingerprint, CanonicalBytes, HashValue,
    };
    pub use crate::matrix::BoolMatrix;
    pub use crate::relation::Relation;
    pub use crate::set::FiniteSet;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    /// Relations over empty sets are degenerate but well-defined.
    #[test]
    fn empty_sets() {
        let empty: FiniteSet<u32> = FiniteSet::new();
        let relation = Relation::from_predicate(empty.clone(), empty.clone(), |_, _| true);
        assert_eq!(relation.domain_cardinal(), 0);
        assert!(relation.as_pairs().is_empty());
        assert!(relation.is_application());
        assert!(relation.is_bijective());

        let endo = EndoRelation::universal(empty);
        assert!(endo.is_equivalence());
        assert!(endo.quotient_set().unwrap().is_empty());
        assert_eq!(endo.maximum().unwrap(), None);
    }

    /// The three construction forms normalize to the same relation.
    #[test]
    fn construction_forms_agree() {
        let set: FiniteSet<u32> = (0..3).collect();
        let by_predicate =
            EndoRelation::from_predicate(set.clone(), |&a, &b| b == (a + 1) % 3);
        let by_pairs =
            EndoRelation::from_pairs(set.clone(), vec![(0, 1), (1, 2), (2, 0)]);
        let by_matrix =
            EndoRelation::from_rows(set, &[[0u8, 1, 0], [0, 0, 1], [1, 0, 0]]).unwrap();
        assert_eq!(by_predicate, by_pairs);
        assert_eq!(by_pairs, by_matrix);
    }

    /// Bijective is exactly injective and surjective.
    #[test]
    fn bijective_decomposition() {
        let small: FiniteSet<u32> = (0..3).collect();
        let large: FiniteSet<u32> = (0..4).collect();
        let embed = Relation::from_predicate(small, large, |a, b| a == b);
        assert!(embed.is_injective());
        assert!(!embed.is_surjective());
        assert_eq!(embed.is_bijective(), embed.is_injective() && embed.is_surjective());
    }
}
