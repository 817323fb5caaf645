//! Homogeneous finite relations and their order/equivalence theory.
//!
//! `EndoRelation<T>` models R ⊆ A×A over a single finite set. It sits
//! directly on the matrix substrate rather than wrapping [`Relation`], so
//! composition and closures stay well-typed over one set, and it carries
//! the predicate surface the heterogeneous type has no analogue for:
//! the reflexivity, symmetry and transitivity families, order and
//! equivalence classification, bounds, quotient partitioning and the
//! reflexive/symmetric closures.
//!
//! The `is_circular`, `is_antitransitive` and `is_intransitive` predicates
//! deliberately follow the formulas in the module documentation below, not
//! the stricter textbook phrasings (in particular, intransitive is the
//! plain negation of transitive).
//!
//! # Citations
//! - Davey & Priestley, "Introduction to Lattices and Order", 2nd ed.
//!   (2002) – partial orders, bounds, maximal/minimal elements
//! - Schmidt, "Relational Mathematics" (2011) – closures and logical
//!   matrix characterizations

use crate::error::RelationError;
use crate::matrix::BoolMatrix;
use crate::relation::Relation;
use crate::set::FiniteSet;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitXor, Div, Mul, Neg, Not};

/// Memoized predicate block. Everything here is a pure function of the
/// square matrix, computed in one pass on first access (the boolean square
/// is shared between the transitivity family and circularity).
#[derive(Debug, Clone, Copy)]
struct EndoProps {
    reflexive: bool,
    irreflexive: bool,
    symmetric: bool,
    antisymmetric: bool,
    transitive: bool,
    antitransitive: bool,
    circular: bool,
    connected: bool,
}

/// A relation from a finite set to itself, backed by a square boolean
/// adjacency matrix.
///
/// Same equality/hash contract as [`Relation`]: the set is compared as an
/// unordered set, the matrix bit-for-bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Eq + Hash"
))]
pub struct EndoRelation<T> {
    set: FiniteSet<T>,
    matrix: BoolMatrix,
    #[serde(skip)]
    props: OnceCell<EndoProps>,
    #[serde(skip)]
    preimage: OnceCell<Vec<usize>>,
    #[serde(skip)]
    image: OnceCell<Vec<usize>>,
}

impl<T> EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    pub(crate) fn from_parts(set: FiniteSet<T>, matrix: BoolMatrix) -> Self {
        debug_assert_eq!(matrix.rows(), set.cardinal());
        debug_assert_eq!(matrix.cols(), set.cardinal());
        Self {
            set,
            matrix,
            props: OnceCell::new(),
            preimage: OnceCell::new(),
            image: OnceCell::new(),
        }
    }

    /// Builds a homogeneous relation from a membership predicate,
    /// evaluated once per cell at construction.
    pub fn from_predicate(set: FiniteSet<T>, mut pred: impl FnMut(&T, &T) -> bool) -> Self {
        let n = set.cardinal();
        let matrix = BoolMatrix::from_fn(n, n, |i, j| pred(set.element(i), set.element(j)));
        Self::from_parts(set, matrix)
    }

    /// Builds a homogeneous relation from an explicit set of related
    /// pairs. Pairs with components outside the set are ignored.
    pub fn from_pairs(set: FiniteSet<T>, pairs: impl IntoIterator<Item = (T, T)>) -> Self {
        let n = set.cardinal();
        let mut matrix = BoolMatrix::zeros(n, n);
        for (a, b) in pairs {
            if let (Some(i), Some(j)) = (set.index_of(&a), set.index_of(&b)) {
                matrix.set(i, j, true);
            }
        }
        Self::from_parts(set, matrix)
    }

    /// Builds a homogeneous relation from an explicit 0/1 matrix,
    /// validated against the set cardinal. Accepts list-of-rows and
    /// 2D-array forms.
    pub fn from_rows<R: AsRef<[u8]>>(
        set: FiniteSet<T>,
        rows: &[R],
    ) -> Result<Self, RelationError> {
        let n = set.cardinal();
        let matrix = BoolMatrix::from_rows(n, n, rows)?;
        Ok(Self::from_parts(set, matrix))
    }

    /// The identity relation (each element related only to itself).
    pub fn identity(set: FiniteSet<T>) -> Self {
        let matrix = BoolMatrix::identity(set.cardinal());
        Self::from_parts(set, matrix)
    }

    /// The universal relation (every pair related).
    pub fn universal(set: FiniteSet<T>) -> Self {
        let n = set.cardinal();
        let matrix = BoolMatrix::from_fn(n, n, |_, _| true);
        Self::from_parts(set, matrix)
    }

    /// The underlying set.
    #[inline]
    pub fn set(&self) -> &FiniteSet<T> {
        &self.set
    }

    /// Cardinal of the underlying set.
    #[inline]
    pub fn cardinal(&self) -> usize {
        self.set.cardinal()
    }

    /// The canonical adjacency matrix.
    #[inline]
    pub fn matrix(&self) -> &BoolMatrix {
        &self.matrix
    }

    /// Canonical index of an element, if present.
    #[inline]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.set.index_of(element)
    }

    /// Cell access by canonical indices.
    ///
    /// # Panics
    /// If either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.matrix.get(row, col)
    }

    /// Cell access by element lookup. Elements outside the set are not
    /// related to anything.
    pub fn related(&self, a: &T, b: &T) -> bool {
        match (self.set.index_of(a), self.set.index_of(b)) {
            (Some(i), Some(j)) => self.matrix.get(i, j),
            _ => false,
        }
    }

    /// Elements related to `a`, in canonical order.
    pub fn post_related_to(&self, a: &T) -> Vec<T> {
        match self.set.index_of(a) {
            Some(i) => {
                let mut out = Vec::new();
                self.matrix
                    .for_each_one_in_row(i, |j| out.push(self.set.element(j).clone()));
                out
            }
            None => Vec::new(),
        }
    }

    /// Elements that relate to `b`, in canonical order.
    pub fn pre_related_to(&self, b: &T) -> Vec<T> {
        match self.set.index_of(b) {
            Some(j) => (0..self.matrix.rows())
                .filter(|&i| self.matrix.get(i, j))
                .map(|i| self.set.element(i).clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Elements that relate to at least one element, in canonical order.
    pub fn preimage(&self) -> Vec<T> {
        self.preimage
            .get_or_init(|| {
                (0..self.matrix.rows())
                    .filter(|&i| self.matrix.row_count_ones(i) > 0)
                    .collect()
            })
            .iter()
            .map(|&i| self.set.element(i).clone())
            .collect()
    }

    /// Elements reached by at least one element, in canonical order.
    pub fn image(&self) -> Vec<T> {
        self.image
            .get_or_init(|| {
                (0..self.matrix.cols())
                    .filter(|&j| self.matrix.col_count_ones(j) > 0)
                    .collect()
            })
            .iter()
            .map(|&j| self.set.element(j).clone())
            .collect()
    }

    /// All related pairs in row-major canonical order.
    pub fn as_pairs(&self) -> Vec<(T, T)> {
        let mut pairs = Vec::new();
        for i in 0..self.matrix.rows() {
            self.matrix.for_each_one_in_row(i, |j| {
                pairs.push((self.set.element(i).clone(), self.set.element(j).clone()));
            });
        }
        pairs
    }

    /// The same relation viewed heterogeneously, with the set as both
    /// domain and codomain. Always valid.
    pub fn to_relation(&self) -> Relation<T, T> {
        Relation::from_parts(self.set.clone(), self.set.clone(), self.matrix.clone())
    }

    fn props(&self) -> &EndoProps {
        self.props.get_or_init(|| {
            let n = self.matrix.rows();
            let mut reflexive = true;
            let mut irreflexive = true;
            for i in 0..n {
                if self.matrix.get(i, i) {
                    irreflexive = false;
                } else {
                    reflexive = false;
                }
            }

            let mut symmetric = true;
            let mut antisymmetric = true;
            let mut connected = true;
            for i in 0..n {
                for j in (i + 1)..n {
                    let forward = self.matrix.get(i, j);
                    let backward = self.matrix.get(j, i);
                    symmetric &= forward == backward;
                    antisymmetric &= !(forward && backward);
                    connected &= forward || backward;
                }
            }

            let square = self.matrix.product(&self.matrix);
            // square(i, j) is 1 iff a 2-path i → k → j exists.
            let transitive = square.is_leq(&self.matrix);
            let antitransitive = square.intersection(&self.matrix).is_zero();
            let circular = square.is_leq(&self.matrix.transpose());

            EndoProps {
                reflexive,
                irreflexive,
                symmetric,
                antisymmetric,
                transitive,
                antitransitive,
                circular,
                connected,
            }
        })
    }

    /// Every element is related to itself.
    pub fn is_reflexive(&self) -> bool {
        self.props().reflexive
    }

    /// No element is related to itself.
    pub fn is_irreflexive(&self) -> bool {
        self.props().irreflexive
    }

    /// a R b implies b R a.
    pub fn is_symmetric(&self) -> bool {
        self.props().symmetric
    }

    /// No two distinct elements are related in both directions.
    pub fn is_antisymmetric(&self) -> bool {
        self.props().antisymmetric
    }

    /// Irreflexive and antisymmetric.
    pub fn is_asymmetric(&self) -> bool {
        self.is_irreflexive() && self.is_antisymmetric()
    }

    /// a R k and k R b imply a R b (the boolean square of the matrix is
    /// entrywise at most the matrix).
    pub fn is_transitive(&self) -> bool {
        self.props().transitive
    }

    /// Plain negation of transitivity.
    pub fn is_intransitive(&self) -> bool {
        !self.is_transitive()
    }

    /// No related pair is also joined by a 2-path.
    pub fn is_antitransitive(&self) -> bool {
        self.props().antitransitive
    }

    /// a R k and k R b imply b R a.
    pub fn is_circular(&self) -> bool {
        self.props().circular
    }

    /// Every two distinct elements are related in at least one direction.
    pub fn is_connected(&self) -> bool {
        self.props().connected
    }

    /// Reflexive and connected.
    pub fn is_total(&self) -> bool {
        self.is_reflexive() && self.is_connected()
    }

    /// Reflexive and symmetric.
    pub fn is_dependency(&self) -> bool {
        self.is_reflexive() && self.is_symmetric()
    }

    /// Reflexive and transitive.
    pub fn is_preorder(&self) -> bool {
        self.is_reflexive() && self.is_transitive()
    }

    /// Reflexive, symmetric and transitive.
    pub fn is_equivalence(&self) -> bool {
        self.is_dependency() && self.is_transitive()
    }

    /// Preorder and antisymmetric.
    pub fn is_partial_order(&self) -> bool {
        self.is_preorder() && self.is_antisymmetric()
    }

    /// Partial order and total.
    pub fn is_total_order(&self) -> bool {
        self.is_partial_order() && self.is_total()
    }

    /// Irreflexive and transitive.
    pub fn is_strict_partial_order(&self) -> bool {
        self.is_irreflexive() && self.is_transitive()
    }

    /// Strict partial order and connected.
    pub fn is_strict_total_order(&self) -> bool {
        self.is_strict_partial_order() && self.is_connected()
    }

    /// Baseline count of self-loops for bound computations: 1 for a
    /// partial order (a maximal element still relates to itself), 0 for a
    /// strict one. State error for anything else.
    fn order_value(&self) -> Result<usize, RelationError> {
        if self.is_partial_order() {
            Ok(1)
        } else if self.is_strict_partial_order() {
            Ok(0)
        } else {
            Err(RelationError::NotAnOrder)
        }
    }

    /// Elements with nothing above them, in canonical order. Requires a
    /// (strict) partial order.
    pub fn maximals(&self) -> Result<Vec<T>, RelationError> {
        let value = self.order_value()?;
        Ok((0..self.cardinal())
            .filter(|&i| self.matrix.row_count_ones(i) == value)
            .map(|i| self.set.element(i).clone())
            .collect())
    }

    /// Elements with nothing below them, in canonical order. Requires a
    /// (strict) partial order.
    pub fn minimals(&self) -> Result<Vec<T>, RelationError> {
        let value = self.order_value()?;
        Ok((0..self.cardinal())
            .filter(|&i| self.matrix.col_count_ones(i) == value)
            .map(|i| self.set.element(i).clone())
            .collect())
    }

    /// The greatest element (everything precedes it), if any. Requires a
    /// (strict) partial order.
    pub fn maximum(&self) -> Result<Option<T>, RelationError> {
        let value = self.order_value()?;
        // Row count == value and column count == cardinal - 1 + value,
        // written additively to stay safe on the empty set.
        Ok((0..self.cardinal())
            .find(|&i| {
                self.matrix.row_count_ones(i) == value
                    && self.matrix.col_count_ones(i) + 1 == self.cardinal() + value
            })
            .map(|i| self.set.element(i).clone()))
    }

    /// The least element (it precedes everything), if any. Requires a
    /// (strict) partial order.
    pub fn minimum(&self) -> Result<Option<T>, RelationError> {
        let value = self.order_value()?;
        Ok((0..self.cardinal())
            .find(|&i| {
                self.matrix.col_count_ones(i) == value
                    && self.matrix.row_count_ones(i) + 1 == self.cardinal() + value
            })
            .map(|i| self.set.element(i).clone()))
    }

    /// `true` iff a maximum exists. Requires a (strict) partial order.
    pub fn is_bounded_above(&self) -> Result<bool, RelationError> {
        Ok(self.maximum()?.is_some())
    }

    /// `true` iff a minimum exists. Requires a (strict) partial order.
    pub fn is_bounded_below(&self) -> Result<bool, RelationError> {
        Ok(self.minimum()?.is_some())
    }

    /// `true` iff both a maximum and a minimum exist. Requires a (strict)
    /// partial order.
    pub fn is_bounded(&self) -> Result<bool, RelationError> {
        Ok(self.is_bounded_above()? && self.is_bounded_below()?)
    }

    /// Partitions the set into equivalence classes by a single linear
    /// sweep: the first unvisited index seeds a class, and every later
    /// unvisited index related to it joins. Classes come out in sweep
    /// order with elements in canonical order; they are disjoint,
    /// non-empty, and their union is the whole set.
    ///
    /// Requires an equivalence, else the state error.
    pub fn quotient_set(&self) -> Result<Vec<Vec<T>>, RelationError> {
        if !self.is_equivalence() {
            return Err(RelationError::NotAnEquivalence);
        }
        let n = self.cardinal();
        let mut visited = vec![false; n];
        let mut classes = Vec::new();
        for i in 0..n {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            let mut class = vec![self.set.element(i).clone()];
            for j in (i + 1)..n {
                if !visited[j] && self.matrix.get(i, j) {
                    visited[j] = true;
                    class.push(self.set.element(j).clone());
                }
            }
            classes.push(class);
        }
        Ok(classes)
    }

    /// Smallest reflexive extension: every diagonal cell forced to 1.
    pub fn reflexive_closure(&self) -> Self {
        Self::from_parts(self.set.clone(), self.matrix.with_diagonal_set())
    }

    /// Smallest symmetric extension: union with the converse.
    pub fn symmetric_closure(&self) -> Self {
        let matrix = self.matrix.union(&self.matrix.transpose());
        Self::from_parts(self.set.clone(), matrix)
    }

    fn check_same_set(&self, other: &Self) -> Result<(), RelationError> {
        if self.set != other.set {
            return Err(RelationError::DomainMismatch);
        }
        Ok(())
    }

    /// Returns `other`'s matrix expressed in `self`'s canonical order.
    fn aligned_matrix(&self, other: &Self) -> BoolMatrix {
        if self.set.same_order(&other.set) {
            other.matrix.clone()
        } else {
            let n = self.cardinal();
            BoolMatrix::from_fn(n, n, |i, j| {
                other.related(self.set.element(i), self.set.element(j))
            })
        }
    }

    /// Cell-wise OR over the same set.
    pub fn union(&self, other: &Self) -> Result<Self, RelationError> {
        self.check_same_set(other)?;
        let matrix = self.matrix.union(&self.aligned_matrix(other));
        Ok(Self::from_parts(self.set.clone(), matrix))
    }

    /// Cell-wise AND over the same set.
    pub fn intersection(&self, other: &Self) -> Result<Self, RelationError> {
        self.check_same_set(other)?;
        let matrix = self.matrix.intersection(&self.aligned_matrix(other));
        Ok(Self::from_parts(self.set.clone(), matrix))
    }

    /// Cell-wise XOR over the same set.
    pub fn xor(&self, other: &Self) -> Result<Self, RelationError> {
        self.check_same_set(other)?;
        let matrix = self.matrix.xor(&self.aligned_matrix(other));
        Ok(Self::from_parts(self.set.clone(), matrix))
    }

    /// The converse relation over the same set (transposed matrix).
    pub fn converse(&self) -> Self {
        Self::from_parts(self.set.clone(), self.matrix.transpose())
    }

    /// The complementary relation over the same set.
    pub fn complement(&self) -> Self {
        Self::from_parts(self.set.clone(), self.matrix.complement())
    }

    /// Composes `self` after `inner` (self ∘ inner). Both operands must be
    /// over the same set, the stricter homogeneous precondition.
    pub fn compose(&self, inner: &Self) -> Result<Self, RelationError> {
        self.check_same_set(inner)?;
        let matrix = self.aligned_matrix(inner).product(&self.matrix);
        Ok(Self::from_parts(self.set.clone(), matrix))
    }

    /// Restriction to a subset, homogeneously: a relation over
    /// (subset, subset) agreeing with `self`.
    pub fn restrict(&self, subset: &FiniteSet<T>) -> Result<Self, RelationError> {
        if !subset.is_subset_of(&self.set) {
            return Err(RelationError::NotASubset);
        }
        let n = subset.cardinal();
        let matrix = BoolMatrix::from_fn(n, n, |i, j| {
            self.related(subset.element(i), subset.element(j))
        });
        Ok(Self::from_parts(subset.clone(), matrix))
    }

    /// Serializes the relation to CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>
    where
        T: Serialize,
    {
        let bytes = serde_cbor::to_vec(self)?;
        Ok(bytes)
    }

    /// Deserializes a relation from CBOR bytes.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, Box<dyn std::error::Error>>
    where
        T: serde::de::DeserializeOwned,
    {
        let relation: Self = serde_cbor::from_slice(bytes)?;
        Ok(relation)
    }
}

impl<T> PartialEq for EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set && self.matrix == other.matrix
    }
}

impl<T> Eq for EndoRelation<T> where T: Clone + Eq + Hash {}

impl<T> Hash for EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.set.hash(state);
        self.matrix.hash(state);
    }
}

/// Union, `&r + &r'`. Panics on mismatched sets; use
/// [`EndoRelation::union`] for the fallible form.
impl<T> Add for &EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    type Output = EndoRelation<T>;

    fn add(self, rhs: Self) -> EndoRelation<T> {
        self.union(rhs)
            .unwrap_or_else(|e| panic!("relation union: {}", e))
    }
}

/// Intersection, `&r * &r'`. Panics on mismatched sets.
impl<T> Mul for &EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    type Output = EndoRelation<T>;

    fn mul(self, rhs: Self) -> EndoRelation<T> {
        self.intersection(rhs)
            .unwrap_or_else(|e| panic!("relation intersection: {}", e))
    }
}

/// Symmetric difference, `&r ^ &r'`. Panics on mismatched sets.
impl<T> BitXor for &EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    type Output = EndoRelation<T>;

    fn bitxor(self, rhs: Self) -> EndoRelation<T> {
        self.xor(rhs)
            .unwrap_or_else(|e| panic!("relation xor: {}", e))
    }
}

/// Converse, `-&r`.
impl<T> Neg for &EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    type Output = EndoRelation<T>;

    fn neg(self) -> EndoRelation<T> {
        self.converse()
    }
}

/// Complement, `!&r`.
impl<T> Not for &EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    type Output = EndoRelation<T>;

    fn not(self) -> EndoRelation<T> {
        self.complement()
    }
}

/// Restriction, `&r / &subset`. Panics if the divisor is not a subset.
impl<T> Div<&FiniteSet<T>> for &EndoRelation<T>
where
    T: Clone + Eq + Hash,
{
    type Output = EndoRelation<T>;

    fn div(self, subset: &FiniteSet<T>) -> EndoRelation<T> {
        self.restrict(subset)
            .unwrap_or_else(|e| panic!("relation restriction: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> FiniteSet<u32> {
        (0..10).collect()
    }

    #[test]
    fn identity_matrix_is_an_equivalence_of_singletons() {
        let set: FiniteSet<u32> = (0..4).collect();
        let rows = [[1u8, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]];
        let relation = EndoRelation::from_rows(set.clone(), &rows).unwrap();
        assert_eq!(relation, EndoRelation::identity(set));
        assert!(relation.is_reflexive());
        assert!(relation.is_symmetric());
        assert!(relation.is_transitive());
        assert!(relation.is_equivalence());
        let classes = relation.quotient_set().unwrap();
        assert_eq!(classes, vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn congruences_intersect_to_mod_six() {
        let mod2 = EndoRelation::from_predicate(digits(), |a, b| a % 2 == b % 2);
        let mod3 = EndoRelation::from_predicate(digits(), |a, b| a % 3 == b % 3);
        assert!(mod2.is_equivalence());
        assert!(mod3.is_equivalence());

        let mod6 = mod2.intersection(&mod3).unwrap();
        assert!(mod6.is_dependency());
        assert!(mod6.is_equivalence());
        let classes = mod6.quotient_set().unwrap();
        assert_eq!(classes.len(), 6);
        assert_eq!(
            classes,
            vec![
                vec![0, 6],
                vec![1, 7],
                vec![2, 8],
                vec![3, 9],
                vec![4],
                vec![5],
            ]
        );
    }

    #[test]
    fn quotient_classes_partition_the_set() {
        let mod3 = EndoRelation::from_predicate(digits(), |a, b| a % 3 == b % 3);
        let classes = mod3.quotient_set().unwrap();
        let mut all: Vec<u32> = classes.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
        assert!(classes.iter().all(|class| !class.is_empty()));
    }

    #[test]
    fn divisibility_is_a_partial_order_with_bottom_but_no_top() {
        let one_to_ten: FiniteSet<u32> = (1..=10).collect();
        let divides = EndoRelation::from_predicate(one_to_ten, |&a, &b| b % a == 0);
        assert!(divides.is_partial_order());
        assert!(!divides.is_total_order());
        assert_eq!(divides.minimum().unwrap(), Some(1));
        assert_eq!(divides.maximum().unwrap(), None);
        assert_eq!(divides.maximals().unwrap(), vec![6, 7, 8, 9, 10]);
        assert_eq!(divides.minimals().unwrap(), vec![1]);
        assert!(divides.is_bounded_below().unwrap());
        assert!(!divides.is_bounded_above().unwrap());
        assert!(!divides.is_bounded().unwrap());
    }

    #[test]
    fn strict_less_than_and_its_reflexive_closure() {
        let one_to_ten: FiniteSet<u32> = (1..=10).collect();
        let less_than = EndoRelation::from_predicate(one_to_ten, |a, b| a < b);
        assert!(less_than.is_strict_partial_order());
        assert!(less_than.is_strict_total_order());
        assert!(less_than.is_asymmetric());
        assert_eq!(less_than.minimum().unwrap(), Some(1));
        assert_eq!(less_than.maximum().unwrap(), Some(10));

        let less_equal = less_than.reflexive_closure();
        assert!(less_equal.is_total_order());
        assert_eq!(less_equal.minimum().unwrap(), Some(1));
        assert_eq!(less_equal.maximum().unwrap(), Some(10));
        assert_eq!(less_equal.maximals().unwrap(), vec![10]);
    }

    #[test]
    fn universal_relation_on_four_elements() {
        let set: FiniteSet<char> = ['a', 'b', 'c', 'd'].into_iter().collect();
        let universal = EndoRelation::universal(set);
        assert_eq!(universal.as_pairs().len(), 16);
        assert!(universal.is_equivalence());
        let classes = universal.quotient_set().unwrap();
        assert_eq!(classes, vec![vec!['a', 'b', 'c', 'd']]);
    }

    #[test]
    fn symmetric_closure_is_union_with_converse() {
        let set: FiniteSet<u32> = (0..5).collect();
        let successor = EndoRelation::from_predicate(set, |&a, &b| b == a + 1);
        assert_eq!(successor.preimage(), vec![0, 1, 2, 3]);
        assert_eq!(successor.image(), vec![1, 2, 3, 4]);

        let closed = successor.symmetric_closure();
        assert!(closed.is_symmetric());
        assert_eq!(closed, successor.union(&successor.converse()).unwrap());
        assert!(closed.related(&3, &2));
        assert!(closed.related(&2, &3));
    }

    #[test]
    fn circularity_and_antitransitivity_follow_the_matrix_formulas() {
        // A 3-cycle: 0 → 1 → 2 → 0. Any 2-path i → k → j closes back with
        // j → i, so the relation is circular; every direct edge is also
        // free of a duplicating 2-path, so it is antitransitive.
        let set: FiniteSet<u32> = (0..3).collect();
        let cycle = EndoRelation::from_predicate(set.clone(), |&a, &b| b == (a + 1) % 3);
        assert!(cycle.is_circular());
        assert!(cycle.is_antitransitive());
        assert!(cycle.is_intransitive());
        assert!(!cycle.is_transitive());

        // Successor on a line is not circular: 0 → 1 → 2 but not 2 → 0.
        let line = EndoRelation::from_predicate(set, |&a, &b| b == a + 1);
        assert!(!line.is_circular());
    }

    #[test]
    fn bounds_require_an_order() {
        let mod2 = EndoRelation::from_predicate(digits(), |a, b| a % 2 == b % 2);
        assert_eq!(mod2.maximals().unwrap_err(), RelationError::NotAnOrder);
        assert_eq!(mod2.maximum().unwrap_err(), RelationError::NotAnOrder);
        assert_eq!(mod2.is_bounded().unwrap_err(), RelationError::NotAnOrder);
    }

    #[test]
    fn quotient_requires_an_equivalence() {
        let one_to_ten: FiniteSet<u32> = (1..=10).collect();
        let divides = EndoRelation::from_predicate(one_to_ten, |&a, &b| b % a == 0);
        assert_eq!(
            divides.quotient_set().unwrap_err(),
            RelationError::NotAnEquivalence
        );
    }

    #[test]
    fn homogeneous_composition_requires_the_same_set() {
        let set: FiniteSet<u32> = (0..4).collect();
        let other: FiniteSet<u32> = (1..5).collect();
        let rotate = EndoRelation::from_predicate(set.clone(), |&a, &b| b == (a + 1) % 4);
        let shifted = EndoRelation::from_predicate(other, |&a, &b| b == a);
        assert_eq!(
            rotate.compose(&shifted).unwrap_err(),
            RelationError::DomainMismatch
        );

        let twice = rotate.compose(&rotate).unwrap();
        assert!(twice.related(&0, &2));
        assert!(!twice.related(&0, &1));
    }

    #[test]
    fn restriction_stays_homogeneous() {
        let one_to_ten: FiniteSet<u32> = (1..=10).collect();
        let divides = EndoRelation::from_predicate(one_to_ten, |&a, &b| b % a == 0);
        let evens: FiniteSet<u32> = [2, 4, 6, 8, 10].into_iter().collect();
        let restricted = divides.restrict(&evens).unwrap();
        assert_eq!(restricted.cardinal(), 5);
        assert!(restricted.is_partial_order());
        assert!(restricted.related(&2, &8));
        assert!(!restricted.related(&4, &6));
        assert_eq!(&divides / &evens, restricted);
    }

    #[test]
    fn round_trips_through_relation() {
        let set: FiniteSet<u32> = (0..6).collect();
        let endo = EndoRelation::from_predicate(set, |a, b| a % 2 == b % 2);
        let back = endo.to_relation().to_endo().unwrap();
        assert_eq!(back, endo);
        assert!(endo.to_relation().is_surjective());
    }

    #[test]
    fn preorder_that_is_not_a_partial_order() {
        // Compare by absolute value over {-2, -1, 1, 2}: reflexive and
        // transitive, but -1 and 1 relate both ways.
        let set: FiniteSet<i32> = [-2, -1, 1, 2].into_iter().collect();
        let by_abs = EndoRelation::from_predicate(set, |&a, &b| a.abs() <= b.abs());
        assert!(by_abs.is_preorder());
        assert!(!by_abs.is_antisymmetric());
        assert!(!by_abs.is_partial_order());
    }

    #[test]
    fn cbor_round_trip() {
        let set: FiniteSet<u32> = (0..6).collect();
        let endo = EndoRelation::from_predicate(set, |a, b| a % 3 == b % 3);
        let bytes = endo.to_cbor().expect("serialization should succeed");
        let decoded: EndoRelation<u32> =
            EndoRelation::from_cbor(&bytes).expect("deserialization should succeed");
        assert_eq!(decoded, endo);
        assert!(decoded.is_equivalence());
    }
}
