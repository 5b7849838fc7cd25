use crate::alphabet::{Symbol, SIGMA};
use crate::error::{BuildError, Result};
use crate::subset_rank::{BitMatrix, SubsetRank};
use crate::suffix_group::SuffixGroups;

/// Succinct index over a set of k-mers.
///
/// The index is a column-partitioned automaton with `n_nodes` columns, each
/// holding the set of labels of its outgoing edges. Columns are sorted
/// colexicographically (`colex == true`) or lexicographically, in which case
/// queries are read right to left.
///
/// The index is immutable: it is assembled once with
/// [`SbwtBuilder`](crate::SbwtBuilder) or restored with
/// [`SbwtIndex::load`], and every query only reads it.
#[derive(Clone, Debug)]
pub struct SbwtIndex<R = BitMatrix> {
    /// Orientation of the column order
    pub(crate) colex: bool,
    /// Rank capability over the per-column symbol subsets
    pub(crate) subset_rank: R,
    /// Suffix-group starts (empty = no streaming support)
    pub(crate) suffix_groups: SuffixGroups,
    /// Cumulative symbol counts, including one slot for the root
    pub(crate) c_array: [u64; SIGMA],
    pub(crate) n_nodes: usize,
    pub(crate) k: usize,
    pub(crate) n_kmers: usize,
}

impl<R: SubsetRank> SbwtIndex<R> {
    /// Assembles an index and derives its C-array from the rank capability.
    pub(crate) fn from_parts(
        subset_rank: R,
        suffix_groups: SuffixGroups,
        k: usize,
        n_kmers: usize,
        colex: bool,
    ) -> Result<Self> {
        let n_nodes = subset_rank.len();
        let c_array = compute_c_array(&subset_rank);
        log::debug!("C-array for {n_nodes} columns: {c_array:?}");

        let total = c_array[SIGMA - 1] + subset_rank.rank(n_nodes, Symbol::T) as u64;
        if total != n_nodes as u64 {
            return Err(BuildError::InconsistentCounts { c_array, n_nodes }.into());
        }

        Ok(Self {
            colex,
            subset_rank,
            suffix_groups,
            c_array,
            n_nodes,
            k,
            n_kmers,
        })
    }

    /// One narrowing step: `C[symbol] + rank(pos, symbol)`
    #[inline]
    #[must_use]
    pub fn lf_step(&self, pos: usize, symbol: Symbol) -> usize {
        self.c_array[symbol.index()] as usize + self.subset_rank.rank(pos, symbol)
    }
}

/// Accessors
impl<R> SbwtIndex<R> {
    /// Whether columns are in colexicographic order
    #[must_use]
    pub fn is_colex(&self) -> bool {
        self.colex
    }

    /// Length of the indexed k-mers
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Total number of columns, dummy columns included
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of distinct k-mers indexed
    ///
    /// This count is informational and not persisted: a loaded index reports 0.
    #[must_use]
    pub fn n_kmers(&self) -> usize {
        self.n_kmers
    }

    /// The C-array: `C[s]` is one plus the number of columns with an incoming
    /// edge labeled by a symbol smaller than `s`.
    #[must_use]
    pub fn c_array(&self) -> &[u64; SIGMA] {
        &self.c_array
    }

    #[must_use]
    pub fn subset_rank(&self) -> &R {
        &self.subset_rank
    }

    #[must_use]
    pub fn suffix_groups(&self) -> &SuffixGroups {
        &self.suffix_groups
    }

    /// Checks if [`SbwtIndex::streaming_search`] is available
    #[must_use]
    pub fn has_streaming_support(&self) -> bool {
        !self.suffix_groups.is_empty()
    }
}

pub(crate) fn compute_c_array<R: SubsetRank>(subset_rank: &R) -> [u64; SIGMA] {
    let n_nodes = subset_rank.len();
    let mut c_array = [0u64; SIGMA];
    // one incoming ghost edge to the root
    c_array[0] = 1;
    for i in 1..SIGMA {
        c_array[i] = c_array[i - 1] + subset_rank.rank(n_nodes, Symbol::ALL[i - 1]) as u64;
    }
    c_array
}
