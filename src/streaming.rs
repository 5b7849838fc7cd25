use crate::alphabet::Symbol;
use crate::error::{Result, SearchError};
use crate::index::SbwtIndex;
use crate::subset_rank::SubsetRank;

impl<R: SubsetRank> SbwtIndex<R> {
    /// Resolves every k-mer of `text`, one result per window, left to right.
    ///
    /// After a hit, the next window is resolved with a single narrowing step
    /// from the start of the hit's suffix group. After a miss, the next window
    /// is searched from scratch.
    ///
    /// A text shorter than `k` yields an empty vector.
    ///
    /// # Errors
    ///
    /// - [`SearchError::StreamingUnsupported`] if the index has no suffix-group marker
    /// - [`SearchError::DegenerateInterval`] on a malformed index
    pub fn streaming_search(&self, text: &[u8]) -> Result<Vec<Option<usize>>> {
        let mut hits = Vec::new();
        self.streaming_search_into(text, &mut hits)?;
        Ok(hits)
    }

    /// Same as [`SbwtIndex::streaming_search`], writing into a reusable buffer.
    ///
    /// The buffer is cleared first.
    pub fn streaming_search_into(&self, text: &[u8], hits: &mut Vec<Option<usize>>) -> Result<()> {
        if !self.has_streaming_support() {
            return Err(SearchError::StreamingUnsupported.into());
        }
        hits.clear();
        if text.len() < self.k {
            return Ok(());
        }

        let len = text.len();
        let n_windows = len - self.k + 1;
        hits.reserve(n_windows);

        // lex indexes consume the text right to left
        let window = |i: usize| {
            let start = if self.colex { i } else { len - self.k - i };
            &text[start..start + self.k]
        };
        let incoming = |i: usize| {
            if self.colex {
                text[i + self.k - 1]
            } else {
                text[len - self.k - i]
            }
        };

        hits.push(self.search(window(0))?);
        for i in 1..n_windows {
            let next = match hits[i - 1] {
                None => self.search(window(i))?,
                Some(col) => self.extend(col, incoming(i)),
            };
            hits.push(next);
        }

        if !self.colex {
            hits.reverse();
        }
        Ok(())
    }

    /// Single narrowing step from the suffix group of `col` by character `c`.
    #[inline]
    fn extend(&self, col: usize, c: u8) -> Option<usize> {
        let symbol = Symbol::from_ascii(c)?;
        let start = self.suffix_groups.group_start(col);
        let left = self.lf_step(start, symbol);
        let right = self.lf_step(start + 1, symbol);
        (right - left == 1).then_some(left)
    }

    /// Resolves every k-mer of `text` with an independent search per window.
    ///
    /// Needs no suffix-group marker. Results are identical to
    /// [`SbwtIndex::streaming_search`] but every window costs `k` steps.
    pub fn search_windows(&self, text: &[u8]) -> Result<Vec<Option<usize>>> {
        let mut hits = Vec::new();
        self.search_windows_into(text, &mut hits)?;
        Ok(hits)
    }

    /// Same as [`SbwtIndex::search_windows`], writing into a reusable buffer.
    pub fn search_windows_into(&self, text: &[u8], hits: &mut Vec<Option<usize>>) -> Result<()> {
        hits.clear();
        if text.len() < self.k {
            return Ok(());
        }
        for window in text.windows(self.k) {
            hits.push(self.search(window)?);
        }
        Ok(())
    }
}
