//! Bounded worker pool for batch generation.
//!
//! Each slot of a batch is computed independently and written to its own
//! position in the output; there is no shared mutable state between slots.
//! Small batches run inline since spreading them over threads costs more than
//! it saves.

use anyhow::{Context, Result};
use common::ErrorCode;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::config::EngineConfig;

/// Dedicated rayon pool plus the batch size at which it is used.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    parallel_threshold: usize,
}

impl WorkerPool {
    /// Build a pool sized by `config.worker_threads` (`0` = one per CPU).
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system refuses to spawn the threads.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("engine-worker-{i}"))
            .build()
            .context("failed to build batch worker pool")?;
        debug!(
            threads = pool.current_num_threads(),
            parallel_threshold = config.parallel_threshold,
            "worker pool ready"
        );
        Ok(Self {
            pool,
            parallel_threshold: config.parallel_threshold,
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Compute `f(i)` for every `i in 0..count`, returning results in slot
    /// order. Stops at the first failing slot.
    pub fn map_indexed<T, F>(&self, count: usize, f: F) -> Result<Vec<T>, ErrorCode>
    where
        T: Send,
        F: Fn(usize) -> Result<T, ErrorCode> + Send + Sync,
    {
        if count < self.parallel_threshold {
            return (0..count).map(f).collect();
        }
        self.pool
            .install(|| (0..count).into_par_iter().map(f).collect())
    }
}
