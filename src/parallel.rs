use crate::error::{Error, Result};
use crate::index::SbwtIndex;
use crate::subset_rank::SubsetRank;

/// Number of queries a worker resolves between calls to
/// [`QueryProcessor::on_batch_complete`]
pub const BATCH_SIZE: usize = 1024;

/// Trait for types that consume query results in parallel.
///
/// Each worker thread owns its own clone of the processor. Shared state
/// (counters, output buffers) belongs behind an `Arc` inside the processor.
pub trait QueryProcessor: Send + Clone {
    /// Process the per-window hits of a single query
    ///
    /// `hits` holds one entry per k-mer window of `query`, left to right.
    fn process_hits(&mut self, query_id: usize, query: &[u8], hits: &[Option<usize>])
        -> Result<()>;

    /// Called after a worker has passed every query of a batch to
    /// [`QueryProcessor::process_hits`], at most [`BATCH_SIZE`] queries apart.
    fn on_batch_complete(&mut self) -> Result<()> {
        Ok(())
    }

    /// Set the thread ID for this processor
    ///
    /// Each thread calls this method with its own unique ID.
    fn set_tid(&mut self, _tid: usize) {
        // Default implementation does nothing
    }

    /// Get the thread ID for this processor
    fn get_tid(&self) -> Option<usize> {
        None
    }
}

impl<R: SubsetRank> SbwtIndex<R> {
    /// Resolves every k-mer window of every query across worker threads.
    ///
    /// Queries are split into contiguous chunks, one per thread. Streaming
    /// search is used when the index supports it, otherwise each window is
    /// searched independently.
    ///
    /// # Arguments
    ///
    /// * `queries` - The texts to query
    /// * `processor` - The processor cloned into each worker
    /// * `num_threads` - The number of threads to spawn (0 = all cores)
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every query was processed successfully
    /// * `Err(Error)` - The first error raised by a worker, or
    ///   [`Error::WorkerPanic`] if a worker panicked
    pub fn process_parallel<P: QueryProcessor>(
        &self,
        queries: &[&[u8]],
        processor: P,
        num_threads: usize,
    ) -> Result<()> {
        // Calculate the number of threads to use
        let num_threads = if num_threads == 0 {
            num_cpus::get()
        } else {
            num_threads.min(num_cpus::get())
        };
        if queries.is_empty() {
            return Ok(());
        }
        let queries_per_thread = queries.len().div_ceil(num_threads);
        log::debug!(
            "Querying {} texts on {num_threads} threads ({queries_per_thread} per thread)",
            queries.len()
        );

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(num_threads);
            for tid in 0..num_threads {
                let mut processor = processor.clone();
                processor.set_tid(tid);

                let handle = scope.spawn(move || -> Result<()> {
                    let start_idx = tid * queries_per_thread;
                    let end_idx = (start_idx + queries_per_thread).min(queries.len());
                    if start_idx >= end_idx {
                        return Ok(()); // No queries for this thread
                    }

                    // reusable hit buffer
                    let mut hits = Vec::new();

                    for batch_start in (start_idx..end_idx).step_by(BATCH_SIZE) {
                        let batch_end = (batch_start + BATCH_SIZE).min(end_idx);
                        for (query_id, query) in queries[batch_start..batch_end]
                            .iter()
                            .enumerate()
                            .map(|(i, q)| (batch_start + i, *q))
                        {
                            if self.has_streaming_support() {
                                self.streaming_search_into(query, &mut hits)?;
                            } else {
                                self.search_windows_into(query, &mut hits)?;
                            }
                            processor.process_hits(query_id, query, &hits)?;
                        }
                        processor.on_batch_complete()?;
                    }
                    Ok(())
                });
                handles.push((tid, handle));
            }

            let mut first_error = None;
            for (tid, handle) in handles {
                let outcome = handle.join().unwrap_or(Err(Error::WorkerPanic(tid)));
                if let Err(err) = outcome {
                    first_error.get_or_insert(err);
                }
            }
            first_error.map_or(Ok(()), Err)
        })
    }
}
