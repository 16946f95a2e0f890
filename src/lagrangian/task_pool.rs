//! Submodule providing [`TaskPool`], the cooperative slice-parallel executor
//! used by the Lagrangian engine's reduced-cost and subgradient passes.

/// Runs a fixed number of disjoint-slice tasks, optionally on a `rayon`
/// thread pool.
///
/// With the `rayon` feature enabled, [`TaskPool::for_each_chunk_mut`]
/// schedules one task per chunk on a dedicated `rayon::ThreadPool` and
/// blocks until all complete (the barrier named in `spec.md` §5). Without
/// the feature, tasks run inline on the calling thread in chunk order — no
/// feature means no parallelism, never an error, matching the "optionally
/// uses a thread pool" contract. Each task only ever sees its own
/// non-overlapping chunk, so there is never a need for unsafe code or
/// locking to share the output buffer.
#[derive(Debug)]
pub struct TaskPool {
    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
    #[cfg(not(feature = "rayon"))]
    _marker: (),
}

impl TaskPool {
    /// A pool running everything inline on the calling thread.
    #[must_use]
    pub fn inline() -> Self {
        #[cfg(feature = "rayon")]
        {
            Self { pool: None }
        }
        #[cfg(not(feature = "rayon"))]
        {
            Self { _marker: () }
        }
    }

    /// A pool backed by `num_threads` rayon worker threads. Falls back to
    /// [`TaskPool::inline`] if the `rayon` feature is disabled or the pool
    /// fails to build.
    #[must_use]
    #[cfg_attr(not(feature = "rayon"), allow(unused_variables))]
    pub fn with_threads(num_threads: usize) -> Self {
        #[cfg(feature = "rayon")]
        {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(num_threads).build().ok();
            Self { pool }
        }
        #[cfg(not(feature = "rayon"))]
        {
            Self { _marker: () }
        }
    }

    /// Splits `values` into chunks of at most `chunk_size` and runs
    /// `task(chunk_start, chunk)` on each, barriering before returning.
    pub fn for_each_chunk_mut<T: Send>(&self, values: &mut [T], chunk_size: usize, task: impl Fn(usize, &mut [T]) + Sync) {
        let chunk_size = chunk_size.max(1);

        #[cfg(feature = "rayon")]
        {
            if let Some(pool) = &self.pool {
                pool.install(|| {
                    use rayon::prelude::*;
                    values.par_chunks_mut(chunk_size).enumerate().for_each(|(i, chunk)| task(i * chunk_size, chunk));
                });
                return;
            }
        }
        for (i, chunk) in values.chunks_mut(chunk_size).enumerate() {
            task(i * chunk_size, chunk);
        }
    }
}
