//! Bit-packed boolean matrices.
//!
//! `BoolMatrix` is the storage substrate for adjacency matrices: row-major
//! bit-packed words, with cell-wise algebra (OR, AND, XOR, NOT), transpose,
//! and the boolean matrix product used for relation composition. The
//! product is logical (OR-of-ANDs), not arithmetic.
//!
//! # Invariants
//! - Each row occupies `words_per_row` 64-bit words.
//! - Bits at positions `>= cols` in a row's last word are always zero, so
//!   derived `Eq`/`Hash` and word-wise comparisons are well-defined.
//!
//! # Citations
//! - Logical matrices of relations: Schmidt, "Relational Mathematics" (2011)
//! - Bit-parallel boolean products: Warren, "Hacker's Delight", 2nd ed. (2012)

use crate::error::RelationError;
use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// A dense boolean matrix with bit-packed rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl BoolMatrix {
    /// Creates an all-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let words_per_row = cols.div_ceil(WORD_BITS);
        Self {
            rows,
            cols,
            words_per_row,
            bits: vec![0; rows * words_per_row],
        }
    }

    /// Builds a matrix from a predicate on (row, column) index pairs.
    pub fn from_fn(rows: usize, cols: usize, mut pred: impl FnMut(usize, usize) -> bool) -> Self {
        let mut matrix = Self::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                if pred(i, j) {
                    matrix.set(i, j, true);
                }
            }
        }
        matrix
    }

    /// Builds a matrix from explicit rows of 0/1 cells, validating shape
    /// and cell values against the declared cardinals.
    ///
    /// Accepts both list-of-rows (`&[Vec<u8>]`) and 2D-array
    /// (`&[[u8; N]; M]`) forms through the `AsRef<[u8]>` bound.
    pub fn from_rows<R: AsRef<[u8]>>(
        rows: usize,
        cols: usize,
        data: &[R],
    ) -> Result<Self, RelationError> {
        if data.len() != rows {
            return Err(RelationError::RowCountMismatch {
                expected: rows,
                found: data.len(),
            });
        }
        let mut matrix = Self::zeros(rows, cols);
        for (i, row) in data.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(RelationError::RowLengthMismatch {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (j, &cell) in row.iter().enumerate() {
                match cell {
                    0 => {}
                    1 => matrix.set(i, j, true),
                    value => {
                        return Err(RelationError::InvalidCell {
                            row: i,
                            col: j,
                            value,
                        })
                    }
                }
            }
        }
        Ok(matrix)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reads the cell at (row, col).
    ///
    /// # Panics
    /// If the position is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "cell out of bounds");
        let word = self.bits[row * self.words_per_row + col / WORD_BITS];
        (word >> (col % WORD_BITS)) & 1 == 1
    }

    /// Writes the cell at (row, col). Construction-time only; matrices are
    /// never mutated once wrapped in a relation.
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.rows && col < self.cols, "cell out of bounds");
        let word = &mut self.bits[row * self.words_per_row + col / WORD_BITS];
        let mask = 1u64 << (col % WORD_BITS);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    fn assert_same_shape(&self, other: &Self) {
        assert!(
            self.rows == other.rows && self.cols == other.cols,
            "matrix shapes differ: {}x{} vs {}x{}",
            self.rows,
            self.cols,
            other.rows,
            other.cols
        );
    }

    /// Cell-wise OR. Shapes must match; relation-level callers check set
    /// equality before reaching this point.
    pub fn union(&self, other: &Self) -> Self {
        self.assert_same_shape(other);
        let mut out = self.clone();
        for (word, &rhs) in out.bits.iter_mut().zip(&other.bits) {
            *word |= rhs;
        }
        out
    }

    /// Cell-wise AND.
    pub fn intersection(&self, other: &Self) -> Self {
        self.assert_same_shape(other);
        let mut out = self.clone();
        for (word, &rhs) in out.bits.iter_mut().zip(&other.bits) {
            *word &= rhs;
        }
        out
    }

    /// Cell-wise XOR.
    pub fn xor(&self, other: &Self) -> Self {
        self.assert_same_shape(other);
        let mut out = self.clone();
        for (word, &rhs) in out.bits.iter_mut().zip(&other.bits) {
            *word ^= rhs;
        }
        out
    }

    /// Cell-wise NOT, masking the unused tail bits of each row back to
    /// zero so the packing invariant holds.
    pub fn complement(&self) -> Self {
        let mut out = self.clone();
        for word in &mut out.bits {
            *word = !*word;
        }
        let tail_bits = self.cols % WORD_BITS;
        if tail_bits != 0 && self.words_per_row > 0 {
            let mask = (1u64 << tail_bits) - 1;
            for row in 0..self.rows {
                out.bits[row * self.words_per_row + self.words_per_row - 1] &= mask;
            }
        }
        out
    }

    /// Transposed copy: cell (j, i) of the result equals cell (i, j) of
    /// `self`.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            self.for_each_one_in_row(i, |j| out.set(j, i, true));
        }
        out
    }

    /// Boolean matrix product: cell (i, k) of the result is 1 iff some j
    /// has `self[i][j] && rhs[j][k]`.
    ///
    /// Implemented by OR-ing whole rows of `rhs` into the result, once per
    /// set bit of the corresponding `self` row, which keeps the inner loop
    /// word-parallel.
    ///
    /// # Panics
    /// If `self.cols() != rhs.rows()`; relation-level callers establish
    /// this shape by construction.
    pub fn product(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.cols, rhs.rows,
            "inner dimensions differ in boolean product"
        );
        let mut out = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            let dst = i * out.words_per_row;
            self.for_each_one_in_row(i, |j| {
                let src = j * rhs.words_per_row;
                for w in 0..rhs.words_per_row {
                    out.bits[dst + w] |= rhs.bits[src + w];
                }
            });
        }
        out
    }

    /// Entrywise `self <= other` (every 1 of `self` is a 1 of `other`).
    /// This is the transitivity test: a relation is transitive iff its
    /// boolean square is `<=` itself.
    pub fn is_leq(&self, other: &Self) -> bool {
        self.assert_same_shape(other);
        self.bits
            .iter()
            .zip(&other.bits)
            .all(|(&lhs, &rhs)| lhs & !rhs == 0)
    }

    /// Returns `true` if no cell is set.
    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|&word| word == 0)
    }

    /// Number of 1-cells in a row.
    pub fn row_count_ones(&self, row: usize) -> usize {
        assert!(row < self.rows, "row out of bounds");
        let base = row * self.words_per_row;
        self.bits[base..base + self.words_per_row]
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Number of 1-cells in a column.
    pub fn col_count_ones(&self, col: usize) -> usize {
        assert!(col < self.cols, "column out of bounds");
        (0..self.rows).filter(|&row| self.get(row, col)).count()
    }

    /// Square-matrix copy with every diagonal cell forced to 1 (union
    /// with the identity matrix).
    ///
    /// # Panics
    /// If the matrix is not square.
    pub fn with_diagonal_set(&self) -> Self {
        assert_eq!(self.rows, self.cols, "diagonal requires a square matrix");
        let mut out = self.clone();
        for i in 0..self.rows {
            out.set(i, i, true);
        }
        out
    }

    /// Identity matrix of the given size.
    pub fn identity(size: usize) -> Self {
        let mut out = Self::zeros(size, size);
        for i in 0..size {
            out.set(i, i, true);
        }
        out
    }

    /// Invokes `visit` with the column index of every set bit in the row,
    /// in ascending column order.
    pub(crate) fn for_each_one_in_row(&self, row: usize, mut visit: impl FnMut(usize)) {
        let base = row * self.words_per_row;
        for w in 0..self.words_per_row {
            let mut word = self.bits[base + w];
            while word != 0 {
                let col = w * WORD_BITS + word.trailing_zeros() as usize;
                visit(col);
                word &= word - 1; // clear lowest set bit
            }
        }
    }
}
