use sucds::bit_vectors::BitVector;

use crate::alphabet::SIGMA;
use crate::error::{BuildError, Result};
use crate::index::SbwtIndex;
use crate::subset_rank::{BitMatrix, SubsetRank};
use crate::suffix_group::SuffixGroups;

/// Builder for assembling an [`SbwtIndex`] from construction output
///
/// The construction pipeline (k-mer counting, graph assembly) produces four
/// per-symbol bit vectors, an optional suffix-group marker and a few scalars.
/// This builder checks that the pieces fit together and derives the C-array.
///
/// | Setting | Default |
/// |---------|---------|
/// | `k(n)` | **required** |
/// | `n_kmers(n)` | 0 |
/// | `colex(b)` | `true` |
/// | `streaming_support(bits)` | none |
#[derive(Debug, Clone)]
pub struct SbwtBuilder {
    k: Option<usize>,
    n_kmers: usize,
    colex: bool,
    streaming_support: Option<BitVector>,
}

impl Default for SbwtBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SbwtBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            k: None,
            n_kmers: 0,
            colex: true,
            streaming_support: None,
        }
    }

    /// Set the k-mer length
    #[must_use]
    pub fn k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Set the number of distinct k-mers indexed
    #[must_use]
    pub fn n_kmers(mut self, n_kmers: usize) -> Self {
        self.n_kmers = n_kmers;
        self
    }

    /// Set whether columns are in colexicographic (`true`) or lexicographic order
    #[must_use]
    pub fn colex(mut self, colex: bool) -> Self {
        self.colex = colex;
        self
    }

    /// Set the suffix-group marker enabling streaming search
    ///
    /// An empty bit vector is the same as not setting it.
    #[must_use]
    pub fn streaming_support(mut self, marks: BitVector) -> Self {
        self.streaming_support = Some(marks);
        self
    }

    /// Build the index over the default [`BitMatrix`] backing
    ///
    /// # Errors
    ///
    /// Returns an error if the bit vectors differ in length or any check of
    /// [`SbwtBuilder::build`] fails.
    pub fn build_from_bit_vectors(self, rows: [BitVector; SIGMA]) -> Result<SbwtIndex<BitMatrix>> {
        self.build(BitMatrix::new(rows)?)
    }

    /// Build the index over any rank capability
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `k` is not set or zero
    /// - the marker is non-empty and its length differs from the number of columns
    /// - the marker is non-empty and does not mark column 0
    /// - the C-array does not account for every column
    pub fn build<R: SubsetRank>(self, subset_rank: R) -> Result<SbwtIndex<R>> {
        let k = match self.k {
            Some(k) if k > 0 => k,
            _ => return Err(BuildError::InvalidK.into()),
        };

        let suffix_groups = match self.streaming_support {
            Some(marks) if !marks.is_empty() => {
                let groups = SuffixGroups::new(marks);
                if groups.len() != subset_rank.len() {
                    return Err(BuildError::MarkerLength {
                        found: groups.len(),
                        expected: subset_rank.len(),
                    }
                    .into());
                }
                if !groups.is_group_start(0) {
                    return Err(BuildError::UnmarkedFirstColumn.into());
                }
                groups
            }
            _ => SuffixGroups::empty(),
        };

        log::debug!(
            "Assembling index: k={k}, {} columns, colex={}, streaming={}",
            subset_rank.len(),
            self.colex,
            !suffix_groups.is_empty()
        );
        SbwtIndex::from_parts(subset_rank, suffix_groups, k, self.n_kmers, self.colex)
    }
}
