//! Deterministic structural fingerprints for relations.
//!
//! Provides SHA-256 digests of a relation's canonical presentation (element
//! order plus packed adjacency matrix) with domain separation and length
//! prefixing, so identical presentations produce identical fingerprints
//! across fresh builds and processes. Unlike `Hash`/`Eq`, which treat the
//! underlying sets as unordered, the fingerprint is a digest of the
//! canonical form: two relations that list the same set in different
//! orders fingerprint differently.
//!
//! # Citations
//! - SHA-256: NIST FIPS 180-4 (2015)
//! - Domain separation & length prefixing: Bernstein et al., "How to hash
//!   into elliptic curves" (2009)

use crate::endo::EndoRelation;
use crate::relation::Relation;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::hash::Hash;

/// A 256-bit digest value.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashValue(pub [u8; 32]);

impl HashValue {
    /// The all-zero digest.
    #[inline]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Creates a digest from a raw byte array.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw byte array.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Computes SHA-256 of `data` with domain separation.
    ///
    /// The input is framed as `b"FRL:<domain>:v1" || len(data) as u64 LE
    /// || data`.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"FRL:");
        hasher.update(domain);
        hasher.update(b":v1");
        hasher.update((data.len() as u64).to_le_bytes());
        hasher.update(data);
        Self(hasher.finalize().into())
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HashValue({:02x}{:02x}{:02x}{:02x}…)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Element types that can contribute deterministic canonical bytes to a
/// fingerprint.
pub trait CanonicalBytes {
    /// Appends this value's canonical byte form to `out`. Variable-length
    /// encodings must be self-delimiting or length-prefixed.
    fn write_canonical_bytes(&self, out: &mut Vec<u8>);
}

macro_rules! impl_canonical_for_int {
    ($($ty:ty),*) => {
        $(
            impl CanonicalBytes for $ty {
                #[inline]
                fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_canonical_for_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl CanonicalBytes for usize {
    #[inline]
    fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(*self as u64).to_le_bytes());
    }
}

impl CanonicalBytes for isize {
    #[inline]
    fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(*self as i64).to_le_bytes());
    }
}

impl CanonicalBytes for bool {
    #[inline]
    fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }
}

impl CanonicalBytes for char {
    #[inline]
    fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(*self as u32).to_le_bytes());
    }
}

impl CanonicalBytes for String {
    #[inline]
    fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        out.extend_from_slice(self.as_bytes());
    }
}

impl CanonicalBytes for &str {
    #[inline]
    fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        out.extend_from_slice(self.as_bytes());
    }
}

fn write_set_bytes<'a, T: CanonicalBytes + 'a>(
    out: &mut Vec<u8>,
    cardinal: usize,
    elements: impl Iterator<Item = &'a T>,
) {
    out.extend_from_slice(&(cardinal as u64).to_le_bytes());
    for element in elements {
        element.write_canonical_bytes(out);
    }
}

fn write_matrix_bytes(out: &mut Vec<u8>, matrix: &crate::matrix::BoolMatrix) {
    out.extend_from_slice(&(matrix.rows() as u64).to_le_bytes());
    out.extend_from_slice(&(matrix.cols() as u64).to_le_bytes());
    // Row-major cell stream, packed eight cells per byte.
    let mut byte = 0u8;
    let mut filled = 0;
    for i in 0..matrix.rows() {
        for j in 0..matrix.cols() {
            if matrix.get(i, j) {
                byte |= 1 << filled;
            }
            filled += 1;
            if filled == 8 {
                out.push(byte);
                byte = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        out.push(byte);
    }
}

/// Structural fingerprint of a heterogeneous relation's canonical
/// presentation.
pub fn relation_fingerprint<T, S>(relation: &Relation<T, S>) -> HashValue
where
    T: Clone + Eq + Hash + CanonicalBytes,
    S: Clone + Eq + Hash + CanonicalBytes,
{
    let mut bytes = Vec::new();
    write_set_bytes(&mut bytes, relation.domain_cardinal(), relation.domain().iter());
    write_set_bytes(
        &mut bytes,
        relation.codomain_cardinal(),
        relation.codomain().iter(),
    );
    write_matrix_bytes(&mut bytes, relation.matrix());
    HashValue::hash_with_domain(b"RELATION", &bytes)
}

/// Structural fingerprint of a homogeneous relation's canonical
/// presentation.
pub fn endo_fingerprint<T>(relation: &EndoRelation<T>) -> HashValue
where
    T: Clone + Eq + Hash + CanonicalBytes,
{
    let mut bytes = Vec::new();
    write_set_bytes(&mut bytes, relation.cardinal(), relation.set().iter());
    write_matrix_bytes(&mut bytes, relation.matrix());
    HashValue::hash_with_domain(b"ENDO_RELATION", &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::FiniteSet;

    #[test]
    fn fingerprints_are_deterministic() {
        let set: FiniteSet<u32> = (0..8).collect();
        let first = EndoRelation::from_predicate(set.clone(), |a, b| a % 2 == b % 2);
        let second = EndoRelation::from_predicate(set, |a, b| a % 2 == b % 2);
        assert_eq!(endo_fingerprint(&first), endo_fingerprint(&second));
    }

    #[test]
    fn different_structures_fingerprint_differently() {
        let set: FiniteSet<u32> = (0..8).collect();
        let mod2 = EndoRelation::from_predicate(set.clone(), |a, b| a % 2 == b % 2);
        let mod4 = EndoRelation::from_predicate(set, |a, b| a % 4 == b % 4);
        assert_ne!(endo_fingerprint(&mod2), endo_fingerprint(&mod4));
    }

    #[test]
    fn domain_separation_distinguishes_hetero_from_endo() {
        let set: FiniteSet<u32> = (0..4).collect();
        let endo = EndoRelation::from_predicate(set, |a, b| a == b);
        let hetero = endo.to_relation();
        assert_ne!(
            endo_fingerprint(&endo).as_bytes(),
            relation_fingerprint(&hetero).as_bytes()
        );
    }

    #[test]
    fn hash_with_domain_framing() {
        let one = HashValue::hash_with_domain(b"TEST", b"payload");
        let two = HashValue::hash_with_domain(b"TEST", b"payload");
        let other_domain = HashValue::hash_with_domain(b"OTHER", b"payload");
        assert_eq!(one, two);
        assert_ne!(one, other_domain);
        assert_ne!(one, HashValue::zero());
    }
}
