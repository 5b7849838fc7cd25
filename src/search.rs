use crate::alphabet::Symbol;
use crate::error::{Result, SearchError};
use crate::index::SbwtIndex;
use crate::subset_rank::SubsetRank;

impl<R: SubsetRank> SbwtIndex<R> {
    /// Resolves a k-mer to its column.
    ///
    /// Only the first `k` characters of `kmer` are consulted. Characters are
    /// matched case-insensitively; any character outside {A,C,G,T}, an absent
    /// k-mer or a query shorter than `k` yields `Ok(None)`.
    ///
    /// Costs exactly one narrowing step (two rank queries) per character read.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DegenerateInterval`] if all `k` characters were
    /// consumed but the interval still spans more than one column, which only
    /// happens on a malformed index.
    pub fn search(&self, kmer: &[u8]) -> Result<Option<usize>> {
        if kmer.len() < self.k {
            return Ok(None);
        }
        let kmer = &kmer[..self.k];

        // half-open [left, right)
        let mut left = 0;
        let mut right = self.n_nodes;
        for i in 0..self.k {
            let c = if self.colex {
                kmer[i]
            } else {
                kmer[self.k - 1 - i]
            };
            let Some(symbol) = Symbol::from_ascii(c) else {
                return Ok(None);
            };
            left = self.lf_step(left, symbol);
            right = self.lf_step(right, symbol);
            if left >= right {
                return Ok(None);
            }
        }

        if right - left != 1 {
            return Err(SearchError::DegenerateInterval {
                left,
                right: right - 1,
            }
            .into());
        }
        Ok(Some(left))
    }

    /// Checks if the index contains the k-mer
    pub fn contains(&self, kmer: &[u8]) -> Result<bool> {
        Ok(self.search(kmer)?.is_some())
    }
}
