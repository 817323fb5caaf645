//! Heterogeneous finite binary relations.
//!
//! `Relation<T, S>` models R ⊆ A×B for two finite sets A and B of possibly
//! different element types. The definition source (predicate, pair set, or
//! explicit matrix) is resolved into one canonical boolean adjacency matrix
//! at construction; every derived property and algebraic operation reads
//! that matrix and never re-invokes the original predicate.
//!
//! # Invariants
//! - Matrix shape is domain cardinal × codomain cardinal.
//! - Instances are immutable; algebra returns fresh instances.
//! - Derived views (preimage, image, function properties) are computed at
//!   most once per instance and cached.
//!
//! # Citations
//! - Binary relations as logical matrices: Schmidt, "Relational
//!   Mathematics" (2011), Chapter 3

use crate::endo::EndoRelation;
use crate::error::RelationError;
use crate::matrix::BoolMatrix;
use crate::set::FiniteSet;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitXor, Div, Mul, Neg, Not};

/// Memoized function-likeness properties of a relation.
#[derive(Debug, Clone, Copy)]
struct FunctionProps {
    application: bool,
    injective: bool,
    surjective: bool,
}

/// A relation between two finite sets, backed by a boolean adjacency
/// matrix.
///
/// Equality compares the two sets (as unordered sets) and the full matrix;
/// `Hash` is consistent with that equality, so relations can serve as map
/// keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, S: Serialize",
    deserialize = "T: Deserialize<'de> + Eq + Hash, S: Deserialize<'de> + Eq + Hash"
))]
pub struct Relation<T, S> {
    domain: FiniteSet<T>,
    codomain: FiniteSet<S>,
    matrix: BoolMatrix,
    #[serde(skip)]
    props: OnceCell<FunctionProps>,
    #[serde(skip)]
    preimage: OnceCell<Vec<usize>>,
    #[serde(skip)]
    image: OnceCell<Vec<usize>>,
}

impl<T, S> Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    pub(crate) fn from_parts(
        domain: FiniteSet<T>,
        codomain: FiniteSet<S>,
        matrix: BoolMatrix,
    ) -> Self {
        debug_assert_eq!(matrix.rows(), domain.cardinal());
        debug_assert_eq!(matrix.cols(), codomain.cardinal());
        Self {
            domain,
            codomain,
            matrix,
            props: OnceCell::new(),
            preimage: OnceCell::new(),
            image: OnceCell::new(),
        }
    }

    /// Builds a relation from a membership predicate over (domain element,
    /// codomain element). The predicate is evaluated once per cell during
    /// construction and never again.
    pub fn from_predicate(
        domain: FiniteSet<T>,
        codomain: FiniteSet<S>,
        mut pred: impl FnMut(&T, &S) -> bool,
    ) -> Self {
        let matrix = BoolMatrix::from_fn(domain.cardinal(), codomain.cardinal(), |i, j| {
            pred(domain.element(i), codomain.element(j))
        });
        Self::from_parts(domain, codomain, matrix)
    }

    /// Builds a relation from an explicit set of related pairs. Pairs
    /// whose components are not elements of the respective sets are
    /// ignored (they are outside A×B and cannot be represented).
    pub fn from_pairs(
        domain: FiniteSet<T>,
        codomain: FiniteSet<S>,
        pairs: impl IntoIterator<Item = (T, S)>,
    ) -> Self {
        let mut matrix = BoolMatrix::zeros(domain.cardinal(), codomain.cardinal());
        for (a, b) in pairs {
            if let (Some(i), Some(j)) = (domain.index_of(&a), codomain.index_of(&b)) {
                matrix.set(i, j, true);
            }
        }
        Self::from_parts(domain, codomain, matrix)
    }

    /// Builds a relation from an explicit 0/1 matrix, validated against
    /// the set cardinals. Accepts list-of-rows and 2D-array forms.
    pub fn from_rows<R: AsRef<[u8]>>(
        domain: FiniteSet<T>,
        codomain: FiniteSet<S>,
        rows: &[R],
    ) -> Result<Self, RelationError> {
        let matrix = BoolMatrix::from_rows(domain.cardinal(), codomain.cardinal(), rows)?;
        Ok(Self::from_parts(domain, codomain, matrix))
    }

    /// The domain set.
    #[inline]
    pub fn domain(&self) -> &FiniteSet<T> {
        &self.domain
    }

    /// The codomain set.
    #[inline]
    pub fn codomain(&self) -> &FiniteSet<S> {
        &self.codomain
    }

    /// Cardinal of the domain set.
    #[inline]
    pub fn domain_cardinal(&self) -> usize {
        self.domain.cardinal()
    }

    /// Cardinal of the codomain set.
    #[inline]
    pub fn codomain_cardinal(&self) -> usize {
        self.codomain.cardinal()
    }

    /// The canonical adjacency matrix.
    #[inline]
    pub fn matrix(&self) -> &BoolMatrix {
        &self.matrix
    }

    /// Canonical index of a domain element, if present.
    #[inline]
    pub fn domain_index(&self, element: &T) -> Option<usize> {
        self.domain.index_of(element)
    }

    /// Canonical index of a codomain element, if present.
    #[inline]
    pub fn codomain_index(&self, element: &S) -> Option<usize> {
        self.codomain.index_of(element)
    }

    /// Cell access by canonical indices.
    ///
    /// # Panics
    /// If either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.matrix.get(row, col)
    }

    /// Cell access by element lookup. Elements outside the sets are not
    /// related to anything.
    pub fn related(&self, a: &T, b: &S) -> bool {
        match (self.domain.index_of(a), self.codomain.index_of(b)) {
            (Some(i), Some(j)) => self.matrix.get(i, j),
            _ => false,
        }
    }

    /// Codomain elements related to `a`, in codomain canonical order.
    pub fn post_related_to(&self, a: &T) -> Vec<S> {
        match self.domain.index_of(a) {
            Some(i) => {
                let mut out = Vec::new();
                self.matrix
                    .for_each_one_in_row(i, |j| out.push(self.codomain.element(j).clone()));
                out
            }
            None => Vec::new(),
        }
    }

    /// Domain elements related to `b`, in domain canonical order.
    pub fn pre_related_to(&self, b: &S) -> Vec<T> {
        match self.codomain.index_of(b) {
            Some(j) => (0..self.matrix.rows())
                .filter(|&i| self.matrix.get(i, j))
                .map(|i| self.domain.element(i).clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Domain elements that relate to at least one codomain element, in
    /// domain canonical order.
    pub fn preimage(&self) -> Vec<T> {
        self.preimage
            .get_or_init(|| {
                (0..self.matrix.rows())
                    .filter(|&i| self.matrix.row_count_ones(i) > 0)
                    .collect()
            })
            .iter()
            .map(|&i| self.domain.element(i).clone())
            .collect()
    }

    /// Codomain elements reached by at least one domain element, in
    /// codomain canonical order.
    pub fn image(&self) -> Vec<S> {
        self.image
            .get_or_init(|| {
                (0..self.matrix.cols())
                    .filter(|&j| self.matrix.col_count_ones(j) > 0)
                    .collect()
            })
            .iter()
            .map(|&j| self.codomain.element(j).clone())
            .collect()
    }

    /// All related pairs in row-major canonical order.
    pub fn as_pairs(&self) -> Vec<(T, S)> {
        let mut pairs = Vec::new();
        for i in 0..self.matrix.rows() {
            self.matrix.for_each_one_in_row(i, |j| {
                pairs.push((self.domain.element(i).clone(), self.codomain.element(j).clone()));
            });
        }
        pairs
    }

    fn props(&self) -> &FunctionProps {
        self.props.get_or_init(|| {
            let application = (0..self.matrix.rows()).all(|i| self.matrix.row_count_ones(i) == 1);
            let mut injective = true;
            let mut surjective = true;
            for j in 0..self.matrix.cols() {
                let count = self.matrix.col_count_ones(j);
                injective &= count <= 1;
                surjective &= count >= 1;
            }
            FunctionProps {
                application,
                injective,
                surjective,
            }
        })
    }

    /// `true` iff every domain element relates to exactly one codomain
    /// element (the relation is a total function A → B).
    pub fn is_application(&self) -> bool {
        self.props().application
    }

    /// `true` iff no codomain element is reached by more than one domain
    /// element.
    pub fn is_injective(&self) -> bool {
        self.props().injective
    }

    /// `true` iff every codomain element is reached.
    pub fn is_surjective(&self) -> bool {
        self.props().surjective
    }

    /// `true` iff injective and surjective.
    pub fn is_bijective(&self) -> bool {
        self.is_injective() && self.is_surjective()
    }

    fn check_same_sets(&self, other: &Self) -> Result<(), RelationError> {
        if self.domain != other.domain {
            return Err(RelationError::DomainMismatch);
        }
        if self.codomain != other.codomain {
            return Err(RelationError::CodomainMismatch);
        }
        Ok(())
    }

    /// Returns `other`'s matrix expressed in `self`'s canonical orders.
    /// Set equality must already be established. When the orders coincide
    /// this is a plain copy; otherwise cells are re-indexed one by one.
    fn aligned_matrix(&self, other: &Self) -> BoolMatrix {
        if self.domain.same_order(&other.domain) && self.codomain.same_order(&other.codomain) {
            other.matrix.clone()
        } else {
            BoolMatrix::from_fn(self.domain.cardinal(), self.codomain.cardinal(), |i, j| {
                other.related(self.domain.element(i), self.codomain.element(j))
            })
        }
    }

    /// Cell-wise OR of two relations over the same sets.
    pub fn union(&self, other: &Self) -> Result<Self, RelationError> {
        self.check_same_sets(other)?;
        let matrix = self.matrix.union(&self.aligned_matrix(other));
        Ok(Self::from_parts(
            self.domain.clone(),
            self.codomain.clone(),
            matrix,
        ))
    }

    /// Cell-wise AND of two relations over the same sets.
    pub fn intersection(&self, other: &Self) -> Result<Self, RelationError> {
        self.check_same_sets(other)?;
        let matrix = self.matrix.intersection(&self.aligned_matrix(other));
        Ok(Self::from_parts(
            self.domain.clone(),
            self.codomain.clone(),
            matrix,
        ))
    }

    /// Cell-wise XOR (symmetric difference) of two relations over the
    /// same sets.
    pub fn xor(&self, other: &Self) -> Result<Self, RelationError> {
        self.check_same_sets(other)?;
        let matrix = self.matrix.xor(&self.aligned_matrix(other));
        Ok(Self::from_parts(
            self.domain.clone(),
            self.codomain.clone(),
            matrix,
        ))
    }

    /// The converse relation over (codomain, domain): b is related to a in
    /// the result iff a is related to b in `self`.
    pub fn converse(&self) -> Relation<S, T> {
        Relation::from_parts(
            self.codomain.clone(),
            self.domain.clone(),
            self.matrix.transpose(),
        )
    }

    /// The complementary relation over the same sets: every cell negated.
    pub fn complement(&self) -> Self {
        Self::from_parts(
            self.domain.clone(),
            self.codomain.clone(),
            self.matrix.complement(),
        )
    }

    /// Composes `self` after `inner` (self ∘ inner): the result relates
    /// a ∈ U to b ∈ S iff some t has `inner(a, t)` and `self(t, b)`.
    ///
    /// Precondition: every element of `inner`'s image must belong to
    /// `self`'s domain set, otherwise composition would pass through an
    /// element `self` cannot see and the argument error is returned.
    pub fn compose<U>(&self, inner: &Relation<U, T>) -> Result<Relation<U, S>, RelationError>
    where
        U: Clone + Eq + Hash,
    {
        for t in inner.image() {
            if !self.domain.contains(&t) {
                return Err(RelationError::ImageNotInDomain);
            }
        }
        // Bridge matrix over inner's codomain order: cell (t, j) is 1 iff
        // t relates to the j-th codomain element of self. Elements outside
        // self's domain have all-zero rows, but their columns in inner's
        // matrix are all-zero too (they are not in the image).
        let bridge = BoolMatrix::from_fn(
            inner.codomain.cardinal(),
            self.codomain.cardinal(),
            |t, j| self.related(inner.codomain.element(t), self.codomain.element(j)),
        );
        let matrix = inner.matrix.product(&bridge);
        Ok(Relation::from_parts(
            inner.domain.clone(),
            self.codomain.clone(),
            matrix,
        ))
    }

    /// Restriction to a subset of the domain: a relation over
    /// (subset, codomain) agreeing with `self` on every remaining pair.
    pub fn restrict(&self, subset: &FiniteSet<T>) -> Result<Self, RelationError> {
        if !subset.is_subset_of(&self.domain) {
            return Err(RelationError::NotASubset);
        }
        let matrix = BoolMatrix::from_fn(subset.cardinal(), self.codomain.cardinal(), |i, j| {
            self.related(subset.element(i), self.codomain.element(j))
        });
        Ok(Self::from_parts(
            subset.clone(),
            self.codomain.clone(),
            matrix,
        ))
    }

    /// Serializes the relation to CBOR bytes.
    pub fn to_cbor(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>
    where
        T: Serialize,
        S: Serialize,
    {
        let bytes = serde_cbor::to_vec(self)?;
        Ok(bytes)
    }

    /// Deserializes a relation from CBOR bytes.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, Box<dyn std::error::Error>>
    where
        T: serde::de::DeserializeOwned,
        S: serde::de::DeserializeOwned,
    {
        let relation: Self = serde_cbor::from_slice(bytes)?;
        Ok(relation)
    }
}

impl<T> Relation<T, T>
where
    T: Clone + Eq + Hash,
{
    /// Converts to a homogeneous relation. Valid only when the domain and
    /// codomain are equal as unordered sets; the matrix is re-indexed to
    /// the domain's canonical order when the two orders differ.
    pub fn to_endo(&self) -> Result<EndoRelation<T>, RelationError> {
        if self.domain != self.codomain {
            return Err(RelationError::HeterogeneousSets);
        }
        let matrix = if self.domain.same_order(&self.codomain) {
            self.matrix.clone()
        } else {
            BoolMatrix::from_fn(self.domain.cardinal(), self.domain.cardinal(), |i, j| {
                self.related(self.domain.element(i), self.domain.element(j))
            })
        };
        Ok(EndoRelation::from_parts(self.domain.clone(), matrix))
    }
}

impl<T, S> PartialEq for Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.codomain == other.codomain
            && self.matrix == other.matrix
    }
}

impl<T, S> Eq for Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
}

impl<T, S> Hash for Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain.hash(state);
        self.codomain.hash(state);
        self.matrix.hash(state);
    }
}

/// Union, `&r + &r'`. Panics on mismatched sets; use [`Relation::union`]
/// for the fallible form.
impl<T, S> Add for &Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    type Output = Relation<T, S>;

    fn add(self, rhs: Self) -> Relation<T, S> {
        self.union(rhs)
            .unwrap_or_else(|e| panic!("relation union: {}", e))
    }
}

/// Intersection, `&r * &r'`. Panics on mismatched sets.
impl<T, S> Mul for &Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    type Output = Relation<T, S>;

    fn mul(self, rhs: Self) -> Relation<T, S> {
        self.intersection(rhs)
            .unwrap_or_else(|e| panic!("relation intersection: {}", e))
    }
}

/// Symmetric difference, `&r ^ &r'`. Panics on mismatched sets.
impl<T, S> BitXor for &Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    type Output = Relation<T, S>;

    fn bitxor(self, rhs: Self) -> Relation<T, S> {
        self.xor(rhs)
            .unwrap_or_else(|e| panic!("relation xor: {}", e))
    }
}

/// Converse, `-&r`.
impl<T, S> Neg for &Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    type Output = Relation<S, T>;

    fn neg(self) -> Relation<S, T> {
        self.converse()
    }
}

/// Complement, `!&r`.
impl<T, S> Not for &Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    type Output = Relation<T, S>;

    fn not(self) -> Relation<T, S> {
        self.complement()
    }
}

/// Restriction, `&r / &subset`. Panics if the divisor is not a subset of
/// the domain; use [`Relation::restrict`] for the fallible form.
impl<T, S> Div<&FiniteSet<T>> for &Relation<T, S>
where
    T: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    type Output = Relation<T, S>;

    fn div(self, subset: &FiniteSet<T>) -> Relation<T, S> {
        self.restrict(subset)
            .unwrap_or_else(|e| panic!("relation restriction: {}", e))
    }
}
