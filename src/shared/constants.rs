//! Sizing constants for the parallel frontend and pass worker pools.

/// Thread pool sizing for `useParallelFrontends` / `useParallelPasses`.
pub mod thread_pool {
    /// Fraction of available cores to use, leaving headroom for the host process.
    pub const CPU_UTILIZATION_PERCENT: f64 = 0.75;
    pub const MIN_THREADS: usize = 1;

    /// Resolve the worker count for the rayon pool backing a translation.
    pub fn worker_count() -> usize {
        let cores = num_cpus::get();
        let scaled = (cores as f64 * CPU_UTILIZATION_PERCENT).round() as usize;
        scaled.max(MIN_THREADS)
    }
}
