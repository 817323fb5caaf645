//! Error taxonomy for relation construction and algebra.
//!
//! Four kinds of failure exist, all raised synchronously at the operation
//! that detects the violation and never downgraded to a default value:
//! - shape: an explicit matrix does not match the declared set cardinals;
//! - value: an explicit matrix contains a cell outside {0, 1};
//! - argument: algebra between relations over mismatched sets, composition
//!   through elements the consuming relation cannot see, or restriction to
//!   a non-subset;
//! - state: an order- or equivalence-theoretic query on a relation that is
//!   not the required kind, or a heterogeneous-to-homogeneous conversion
//!   over unequal sets.

use std::fmt;

/// Error type for all fallible relation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationError {
    /// Explicit matrix has the wrong number of rows.
    RowCountMismatch {
        /// Expected row count (domain cardinal).
        expected: usize,
        /// Row count actually supplied.
        found: usize,
    },
    /// A row of an explicit matrix has the wrong length.
    RowLengthMismatch {
        /// Index of the offending row.
        row: usize,
        /// Expected row length (codomain cardinal).
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },
    /// An explicit matrix cell is neither 0 nor 1.
    InvalidCell {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The cell value that was supplied.
        value: u8,
    },
    /// Binary algebra between relations over different domain sets.
    DomainMismatch,
    /// Binary algebra between relations over different codomain sets.
    CodomainMismatch,
    /// Composition whose inner image is not contained in the outer domain.
    ImageNotInDomain,
    /// Restriction to a set that is not a subset of the original set.
    NotASubset,
    /// Order-theoretic query on a relation that is neither a partial order
    /// nor a strict partial order.
    NotAnOrder,
    /// Quotient-set query on a relation that is not an equivalence.
    NotAnEquivalence,
    /// Conversion to a homogeneous relation when domain and codomain differ.
    HeterogeneousSets,
}

impl fmt::Display for RelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationError::RowCountMismatch { expected, found } => {
                write!(f, "matrix has {} rows, expected {}", found, expected)
            }
            RelationError::RowLengthMismatch {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "matrix row {} has length {}, expected {}",
                    row, found, expected
                )
            }
            RelationError::InvalidCell { row, col, value } => {
                write!(
                    f,
                    "matrix cell ({}, {}) is {}, expected 0 or 1",
                    row, col, value
                )
            }
            RelationError::DomainMismatch => {
                write!(f, "operands are defined over different domain sets")
            }
            RelationError::CodomainMismatch => {
                write!(f, "operands are defined over different codomain sets")
            }
            RelationError::ImageNotInDomain => {
                write!(f, "inner image is not contained in the outer domain")
            }
            RelationError::NotASubset => {
                write!(f, "restriction set is not a subset of the original set")
            }
            RelationError::NotAnOrder => {
                write!(f, "relation is neither a partial order nor a strict partial order")
            }
            RelationError::NotAnEquivalence => {
                write!(f, "relation is not an equivalence")
            }
            RelationError::HeterogeneousSets => {
                write!(f, "domain and codomain sets differ")
            }
        }
    }
}

impl std::error::Error for RelationError {}
