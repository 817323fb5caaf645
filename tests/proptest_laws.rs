//! Property tests for the algebraic laws of relation algebra.

use finrel::prelude::*;
use proptest::prelude::*;

/// Arbitrary homogeneous relation over the set {0, .., n-1} for a small n,
/// built from a random pair set.
fn arb_endo() -> impl Strategy<Value = EndoRelation<u32>> {
    (1usize..7).prop_flat_map(|n| {
        proptest::collection::vec((0..n as u32, 0..n as u32), 0..=n * n).prop_map(move |pairs| {
            let set: FiniteSet<u32> = (0..n as u32).collect();
            EndoRelation::from_pairs(set, pairs)
        })
    })
}

/// Two arbitrary homogeneous relations over one shared set.
fn arb_endo_pair() -> impl Strategy<Value = (EndoRelation<u32>, EndoRelation<u32>)> {
    (1usize..7).prop_flat_map(|n| {
        let pairs = proptest::collection::vec((0..n as u32, 0..n as u32), 0..=n * n);
        (pairs.clone(), pairs).prop_map(move |(first, second)| {
            let set: FiniteSet<u32> = (0..n as u32).collect();
            (
                EndoRelation::from_pairs(set.clone(), first),
                EndoRelation::from_pairs(set, second),
            )
        })
    })
}

/// Three arbitrary homogeneous relations over one shared set.
fn arb_endo_triple(
) -> impl Strategy<Value = (EndoRelation<u32>, EndoRelation<u32>, EndoRelation<u32>)> {
    (1usize..7).prop_flat_map(|n| {
        let pairs = proptest::collection::vec((0..n as u32, 0..n as u32), 0..=n * n);
        (pairs.clone(), pairs.clone(), pairs).prop_map(move |(first, second, third)| {
            let set: FiniteSet<u32> = (0..n as u32).collect();
            (
                EndoRelation::from_pairs(set.clone(), first),
                EndoRelation::from_pairs(set.clone(), second),
                EndoRelation::from_pairs(set, third),
            )
        })
    })
}

/// Arbitrary strict partial order: elements are compared by random
/// weights, so transitivity and irreflexivity hold by construction.
fn arb_strict_order() -> impl Strategy<Value = EndoRelation<u32>> {
    (1usize..7).prop_flat_map(|n| {
        proptest::collection::vec(0u8..6, n).prop_map(move |weights| {
            let set: FiniteSet<u32> = (0..n as u32).collect();
            EndoRelation::from_predicate(set, |&a, &b| {
                weights[a as usize] < weights[b as usize]
            })
        })
    })
}

/// Arbitrary equivalence: each element gets a random class label and two
/// elements are related iff their labels agree.
fn arb_equivalence() -> impl Strategy<Value = EndoRelation<u32>> {
    (1usize..7).prop_flat_map(|n| {
        proptest::collection::vec(0u8..4, n).prop_map(move |labels| {
            let set: FiniteSet<u32> = (0..n as u32).collect();
            EndoRelation::from_predicate(set, |&a, &b| {
                labels[a as usize] == labels[b as usize]
            })
        })
    })
}

proptest! {
    /// Converse is involutive.
    #[test]
    fn converse_involution(r in arb_endo()) {
        prop_assert_eq!(r.converse().converse(), r);
    }

    /// Complement is involutive.
    #[test]
    fn complement_involution(r in arb_endo()) {
        prop_assert_eq!(r.complement().complement(), r);
    }

    /// De Morgan: the complement of a union is the intersection of the
    /// complements.
    #[test]
    fn de_morgan((r, s) in arb_endo_pair()) {
        let lhs = r.union(&s).unwrap().complement();
        let rhs = r.complement().intersection(&s.complement()).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    /// Symmetric difference agrees with union-minus-intersection.
    #[test]
    fn xor_is_union_minus_intersection((r, s) in arb_endo_pair()) {
        let xor = r.xor(&s).unwrap();
        let other = r
            .union(&s)
            .unwrap()
            .intersection(&r.intersection(&s).unwrap().complement())
            .unwrap();
        prop_assert_eq!(xor, other);
    }

    /// Composition over one set is associative.
    #[test]
    fn composition_associativity((f, g, h) in arb_endo_triple()) {
        let left = f.compose(&g).unwrap().compose(&h).unwrap();
        let right = f.compose(&g.compose(&h).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    /// The converse of a composition is the reversed composition of the
    /// converses.
    #[test]
    fn converse_antidistributes_over_composition((f, g) in arb_endo_pair()) {
        let lhs = f.compose(&g).unwrap().converse();
        let rhs = g.converse().compose(&f.converse()).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    /// The reflexive closure is reflexive, contains the original, and is
    /// exactly the union with the identity.
    #[test]
    fn reflexive_closure_properties(r in arb_endo()) {
        let closed = r.reflexive_closure();
        prop_assert!(closed.is_reflexive());
        prop_assert!(r.matrix().is_leq(closed.matrix()));
        let identity = EndoRelation::identity(r.set().clone());
        prop_assert_eq!(closed, r.union(&identity).unwrap());
    }

    /// The symmetric closure is symmetric and contains the original.
    #[test]
    fn symmetric_closure_properties(r in arb_endo()) {
        let closed = r.symmetric_closure();
        prop_assert!(closed.is_symmetric());
        prop_assert!(r.matrix().is_leq(closed.matrix()));
    }

    /// Quotient classes of an equivalence are disjoint, non-empty, and
    /// cover the whole set.
    #[test]
    fn quotient_partitions(r in arb_equivalence()) {
        prop_assert!(r.is_equivalence());
        let classes = r.quotient_set().unwrap();
        prop_assert!(classes.iter().all(|class| !class.is_empty()));
        let mut all: Vec<u32> = classes.iter().flatten().copied().collect();
        let total: usize = classes.iter().map(Vec::len).sum();
        prop_assert_eq!(total, r.cardinal()); // disjointness, given coverage
        all.sort_unstable();
        let expected: Vec<u32> = (0..r.cardinal() as u32).collect();
        prop_assert_eq!(all, expected);
    }

    /// Bijectivity is exactly injectivity plus surjectivity.
    #[test]
    fn bijective_decomposition(r in arb_endo()) {
        let hetero = r.to_relation();
        prop_assert_eq!(
            hetero.is_bijective(),
            hetero.is_injective() && hetero.is_surjective()
        );
    }

    /// A unique maximum, when present, is the only maximal element.
    #[test]
    fn maximum_is_the_only_maximal(r in arb_strict_order()) {
        prop_assert!(r.is_strict_partial_order());
        if let Some(max) = r.maximum().unwrap() {
            let maximals = r.maximals().unwrap();
            prop_assert_eq!(maximals, vec![max]);
        }
    }

    /// Hash is consistent with equality for relations built from the same
    /// data through different construction forms.
    #[test]
    fn construction_forms_hash_alike(r in arb_endo()) {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let rebuilt = EndoRelation::from_pairs(r.set().clone(), r.as_pairs());
        prop_assert_eq!(&rebuilt, &r);
        let mut first = DefaultHasher::new();
        let mut second = DefaultHasher::new();
        r.hash(&mut first);
        rebuilt.hash(&mut second);
        prop_assert_eq!(first.finish(), second.finish());
    }
}
