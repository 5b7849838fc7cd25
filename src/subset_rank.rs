//! Subset rank queries over the columns of the index
//!
//! The search engines never look at how the per-column symbol sets are stored;
//! they only count occurrences through [`SubsetRank`]. [`BitMatrix`] is the
//! default backing: one rank-enabled bit vector per symbol.

use std::io::{Read, Write};

use auto_impl::auto_impl;
use sucds::bit_vectors::{Access, BitVector, NumBits, Rank, Rank9Sel};
use sucds::Serializable;

use crate::alphabet::{Symbol, SIGMA};
use crate::error::{BuildError, Error, LoadError, Result};
use crate::succinct;

/// Read-only rank capability over a sequence of symbol subsets.
///
/// Implementations must answer `rank` from shared references without any
/// external locking, so that one index can be queried from many threads.
#[auto_impl(&, Box, Arc)]
pub trait SubsetRank: Send + Sync {
    /// Number of columns (subsets) in the sequence
    fn len(&self) -> usize;

    /// Checks if the sequence has no columns
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns in `[0, pos)` whose subset contains `symbol`
    ///
    /// The result never exceeds `pos` and is non-decreasing in `pos`.
    fn rank(&self, pos: usize, symbol: Symbol) -> usize;
}

/// Self-delimiting binary form of a rank capability
pub trait SubsetRankSerialize: Sized {
    /// Writes the structure and returns the number of bytes written
    fn serialize_into<W: Write>(&self, writer: &mut W) -> Result<usize>;

    /// Reads a structure previously written with [`SubsetRankSerialize::serialize_into`]
    fn deserialize_from<R: Read>(reader: &mut R) -> Result<Self>;
}

/// Plain bit matrix: for each symbol, a bit vector marking the columns whose
/// subset contains it, each with a rank9 directory.
#[derive(Clone, Debug)]
pub struct BitMatrix {
    rows: [Rank9Sel; SIGMA],
}
impl BitMatrix {
    /// Builds the matrix from the per-symbol membership bit vectors, in A,C,G,T order.
    pub fn new(rows: [BitVector; SIGMA]) -> Result<Self> {
        let expected = rows[0].len();
        for (symbol, row) in Symbol::ALL.iter().zip(rows.iter()) {
            if row.len() != expected {
                return Err(BuildError::MismatchedRows {
                    symbol: char::from(*symbol),
                    found: row.len(),
                    expected,
                }
                .into());
            }
        }
        Ok(Self {
            rows: rows.map(Rank9Sel::new),
        })
    }

    /// Checks if the subset of column `col` contains `symbol`
    #[must_use]
    pub fn contains(&self, col: usize, symbol: Symbol) -> bool {
        self.rows[symbol.index()].access(col).unwrap_or(false)
    }

    /// The symbols in the subset of column `col`, in alphabet order
    #[must_use]
    pub fn subset(&self, col: usize) -> Vec<Symbol> {
        Symbol::ALL
            .into_iter()
            .filter(|symbol| self.contains(col, *symbol))
            .collect()
    }
}

impl SubsetRank for BitMatrix {
    fn len(&self) -> usize {
        self.rows[0].num_bits()
    }

    #[inline]
    fn rank(&self, pos: usize, symbol: Symbol) -> usize {
        let row = &self.rows[symbol.index()];
        row.rank1(pos.min(row.num_bits())).unwrap_or(0)
    }
}

impl SubsetRankSerialize for BitMatrix {
    fn serialize_into<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let mut written = 0;
        for row in &self.rows {
            written += row
                .serialize_into(&mut *writer)
                .map_err(Error::from_succinct_write)?;
        }
        Ok(written)
    }

    fn deserialize_from<R: Read>(reader: &mut R) -> Result<Self> {
        let a = read_row(reader)?;
        let c = read_row(reader)?;
        let g = read_row(reader)?;
        let t = read_row(reader)?;

        let expected = a.num_bits();
        for row in [&c, &g, &t] {
            if row.num_bits() != expected {
                return Err(LoadError::InconsistentLength {
                    field: "subset rank row",
                    found: row.num_bits(),
                    expected,
                }
                .into());
            }
        }
        Ok(Self { rows: [a, c, g, t] })
    }
}

fn read_row<R: Read>(reader: &mut R) -> Result<Rank9Sel> {
    succinct::read_rank9sel(reader, "subset rank")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn bits(pattern: &str) -> BitVector {
        BitVector::from_bits(pattern.bytes().map(|b| b == b'1'))
    }

    fn sample_matrix() -> BitMatrix {
        BitMatrix::new([bits("10010"), bits("01000"), bits("00110"), bits("00011")]).unwrap()
    }

    #[test]
    fn test_rank_counts_before_position() {
        let matrix = sample_matrix();
        assert_eq!(matrix.len(), 5);
        assert_eq!(matrix.rank(0, Symbol::A), 0);
        assert_eq!(matrix.rank(1, Symbol::A), 1);
        assert_eq!(matrix.rank(4, Symbol::A), 2);
        assert_eq!(matrix.rank(5, Symbol::G), 2);
        assert_eq!(matrix.rank(5, Symbol::T), 2);
        assert_eq!(matrix.rank(3, Symbol::T), 0);
    }

    #[test]
    fn test_rank_is_monotone_and_bounded() {
        let matrix = sample_matrix();
        for symbol in Symbol::ALL {
            let mut last = 0;
            for pos in 0..=matrix.len() {
                let r = matrix.rank(pos, symbol);
                assert!(r <= pos);
                assert!(r >= last);
                last = r;
            }
        }
    }

    #[test]
    fn test_rank_saturates_past_end() {
        let matrix = sample_matrix();
        assert_eq!(matrix.rank(100, Symbol::A), 2);
    }

    #[test]
    fn test_subset_access() {
        let matrix = sample_matrix();
        assert_eq!(matrix.subset(3), vec![Symbol::A, Symbol::G, Symbol::T]);
        assert_eq!(matrix.subset(1), vec![Symbol::C]);
        assert!(!matrix.contains(1, Symbol::A));
    }

    #[test]
    fn test_mismatched_rows() {
        let result = BitMatrix::new([bits("100"), bits("010"), bits("0010"), bits("000")]);
        assert!(matches!(
            result,
            Err(Error::BuildError(BuildError::MismatchedRows {
                symbol: 'G',
                found: 4,
                expected: 3
            }))
        ));
    }

    #[test]
    fn test_blanket_impls() {
        let matrix = sample_matrix();
        let by_ref: &dyn SubsetRank = &matrix;
        assert_eq!(by_ref.rank(5, Symbol::A), 2);

        let shared: Arc<BitMatrix> = Arc::new(matrix.clone());
        assert_eq!(shared.rank(5, Symbol::C), 1);

        let boxed: Box<BitMatrix> = Box::new(matrix);
        assert!(!boxed.is_empty());
    }

    #[test]
    fn test_serialize_round_trip() {
        let matrix = sample_matrix();
        let mut buf = Vec::new();
        let written = matrix.serialize_into(&mut buf).unwrap();
        assert_eq!(written, buf.len());

        let loaded = BitMatrix::deserialize_from(&mut buf.as_slice()).unwrap();
        for symbol in Symbol::ALL {
            for pos in 0..=matrix.len() {
                assert_eq!(loaded.rank(pos, symbol), matrix.rank(pos, symbol));
            }
        }

        let mut again = Vec::new();
        loaded.serialize_into(&mut again).unwrap();
        assert_eq!(buf, again);
    }

    #[test]
    fn test_deserialize_truncated() {
        let mut buf = Vec::new();
        sample_matrix().serialize_into(&mut buf).unwrap();
        buf.truncate(buf.len() - 3);
        let result = BitMatrix::deserialize_from(&mut buf.as_slice());
        assert!(result.unwrap_err().is_io());
    }
}
