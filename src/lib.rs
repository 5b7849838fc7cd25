//! Succinct k-mer set index over the spectral Burrows-Wheeler transform.
//!
//! An [`SbwtIndex`] answers whether a k-mer belongs to an indexed set and,
//! if so, returns its column. Construction of the bit vectors is left to an
//! external pipeline; [`SbwtBuilder`] assembles and validates its output.
//!
//! ```
//! use sbwt_index::{BitVector, SbwtBuilder};
//!
//! // 3-mers of ACGT, columns $$$, $$A, $AC, ACG, CGT
//! let row = |s: &str| BitVector::from_bits(s.bytes().map(|b| b == b'1'));
//! let index = SbwtBuilder::new()
//!     .k(3)
//!     .streaming_support(row("11111"))
//!     .build_from_bit_vectors([row("10000"), row("01000"), row("00100"), row("00010")])?;
//!
//! assert_eq!(index.search(b"CGT")?, Some(4));
//! assert_eq!(index.search(b"TTT")?, None);
//! assert_eq!(index.streaming_search(b"ACGT")?, vec![Some(3), Some(4)]);
//! # Ok::<(), sbwt_index::Error>(())
//! ```

mod alphabet;
mod builder;
pub mod error;
mod index;
mod io;
mod parallel;
mod search;
mod streaming;
mod subset_rank;
mod succinct;
mod suffix_group;

#[cfg(test)]
mod testing;

pub use alphabet::{Symbol, DNA_ALPHABET, SIGMA};
pub use builder::SbwtBuilder;
pub use error::{BuildError, Error, LoadError, Result, SearchError};
pub use index::SbwtIndex;
pub use parallel::{QueryProcessor, BATCH_SIZE};
pub use subset_rank::{BitMatrix, SubsetRank, SubsetRankSerialize};
pub use suffix_group::SuffixGroups;

/// Re-export of the bit vector type the builder consumes
pub use sucds::bit_vectors::BitVector;
