//! Execution engines for controlling computation strategy
//!
//! This module provides the execution engine abstraction used by the
//! ensemble aggregations. An engine decides whether independent units of work
//! run in the calling thread or fan out over a Rayon thread pool.
//!
//! # Design Philosophy
//!
//! - **Partitioned work**: units receive disjoint slices, results are collected
//!   positionally, so no locking is involved
//! - **Deterministic**: output never depends on the pool size or the chunking
//! - **Thread Pool Integration**: the global Rayon pool is created lazily on
//!   first use; dedicated pools can be injected

mod any;

pub use any::AnyEngine;

#[cfg(feature = "parallel")]
use crate::Result;
use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStrategy {
    /// Process items sequentially
    Sequential,
    /// Process items in parallel
    Parallel,
    /// Automatically choose based on the machine
    #[default]
    Auto,
}

/// Trait for execution engines that control how computations are performed
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Execute a function in the engine's execution context
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send;

    /// Map a function over read-only chunks of data
    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send;

    /// Map a function over disjoint mutable chunks of data
    ///
    /// Result `i` belongs to chunk `i`. The last chunk may be shorter.
    fn map_chunks_mut<U, F, R>(&self, data: &mut [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Send,
        F: Fn(&mut [U]) -> R + Sync + Send,
        R: Send;

    /// Execute an indexed operation `count` times
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Check if parallel execution is available
    fn is_parallel(&self) -> bool {
        matches!(
            self.strategy(),
            ExecutionStrategy::Parallel | ExecutionStrategy::Auto
        )
    }

    /// Get the number of threads available
    fn num_threads(&self) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        f()
    }

    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send,
    {
        data.chunks(chunk_size).map(f).collect()
    }

    fn map_chunks_mut<U, F, R>(&self, data: &mut [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Send,
        F: Fn(&mut [U]) -> R + Sync + Send,
        R: Send,
    {
        data.chunks_mut(chunk_size).map(f).collect()
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_threads(&self) -> usize {
        1
    }
}

/// Default minimum number of units handed to one Rayon task
pub const DEFAULT_MIN_UNITS_PER_TASK: usize = 64;

/// Parallel execution engine using Rayon
///
/// Without a dedicated pool, work runs on Rayon's global pool, which is
/// initialized on first use and lives until process exit.
#[cfg(feature = "parallel")]
#[derive(Clone, Debug)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
    min_units_per_task: usize,
}

#[cfg(feature = "parallel")]
impl Default for ParallelEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine on the global thread pool
    pub fn new() -> Self {
        Self {
            thread_pool: None,
            min_units_per_task: DEFAULT_MIN_UNITS_PER_TASK,
        }
    }

    /// Create a new parallel engine with a custom thread pool
    pub fn with_thread_pool(pool: std::sync::Arc<rayon::ThreadPool>) -> Self {
        Self {
            thread_pool: Some(pool),
            min_units_per_task: DEFAULT_MIN_UNITS_PER_TASK,
        }
    }

    /// Create with a dedicated pool of `num_threads` threads
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        if num_threads == 0 {
            return Err(crate::Error::InvalidParameter(
                "thread count must be positive".to_string(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("ensemble-worker-{i}"))
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;
        log::debug!("built dedicated thread pool with {num_threads} threads");

        Ok(Self::with_thread_pool(std::sync::Arc::new(pool)))
    }

    /// Set the minimum number of units each Rayon task processes
    ///
    /// Only throughput is affected; results are identical for every value.
    pub fn with_min_units_per_task(mut self, min_units: usize) -> Self {
        self.min_units_per_task = min_units.max(1);
        self
    }

    pub fn min_units_per_task(&self) -> usize {
        self.min_units_per_task
    }

    fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.thread_pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if let Some(pool) = &self.thread_pool {
            pool.install(f)
        } else {
            rayon::scope(|_| f())
        }
    }

    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        let min_len = self.min_units_per_task;
        self.install(|| {
            data.par_chunks(chunk_size)
                .with_min_len(min_len)
                .map(f)
                .collect()
        })
    }

    fn map_chunks_mut<U, F, R>(&self, data: &mut [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Send,
        F: Fn(&mut [U]) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        let min_len = self.min_units_per_task;
        self.install(|| {
            data.par_chunks_mut(chunk_size)
                .with_min_len(min_len)
                .map(f)
                .collect()
        })
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        let min_len = self.min_units_per_task;
        self.install(|| {
            (0..count)
                .into_par_iter()
                .with_min_len(min_len)
                .map(f)
                .collect()
        })
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_threads(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine
}

/// Create a parallel engine on the global thread pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}

/// Create an auto-selected engine based on available features
///
/// Picks the parallel engine when the `parallel` feature is enabled and the
/// machine has more than one CPU.
pub fn auto_engine() -> AnyEngine {
    #[cfg(feature = "parallel")]
    {
        if num_cpus::get() > 1 {
            return AnyEngine::Parallel(ParallelEngine::new());
        }
    }
    AnyEngine::Sequential(SequentialEngine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_engine() {
        let engine = sequential();

        let result = engine.execute(|| 42);
        assert_eq!(result, 42);

        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sums = engine.map_chunks(&data, 2, |chunk| chunk.iter().sum::<f64>());
        assert_eq!(sums, vec![3.0, 7.0, 11.0]);

        let squares = engine.execute_batch(5, |i| i * i);
        assert_eq!(squares, vec![0, 1, 4, 9, 16]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Sequential);
        assert_eq!(engine.num_threads(), 1);
        assert!(!engine.is_parallel());
    }

    #[test]
    fn test_sequential_map_chunks_mut() {
        let engine = sequential();
        let mut data = vec![3.0, 1.0, 2.0, 9.0, 7.0, 8.0];
        let mins = engine.map_chunks_mut(&mut data, 3, |chunk| {
            chunk.sort_by(f64::total_cmp);
            chunk[0]
        });
        assert_eq!(mins, vec![1.0, 7.0]);
        assert_eq!(data, vec![1.0, 2.0, 3.0, 7.0, 8.0, 9.0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine() {
        let engine = parallel();

        let data: Vec<i32> = (0..1000).collect();
        let sum = engine.execute(|| {
            use rayon::prelude::*;
            data.par_iter().sum::<i32>()
        });
        assert_eq!(sum, 499500);

        let data = vec![1.0; 100];
        let sums = engine.map_chunks(&data, 25, |chunk| chunk.iter().sum::<f64>());
        assert_eq!(sums, vec![25.0, 25.0, 25.0, 25.0]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Parallel);
        assert!(engine.num_threads() > 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_map_chunks_mut_preserves_order() {
        let engine = ParallelEngine::with_num_threads(3)
            .unwrap()
            .with_min_units_per_task(1);
        assert_eq!(engine.num_threads(), 3);

        let mut data: Vec<f64> = (0..1000).rev().map(|x| x as f64).collect();
        let maxima = engine.map_chunks_mut(&mut data, 10, |chunk| {
            chunk.sort_by(f64::total_cmp);
            chunk[chunk.len() - 1]
        });
        let expected: Vec<f64> = (0..100).map(|i| (999 - 10 * i) as f64).collect();
        assert_eq!(maxima, expected);

        let indices = engine.execute_batch(257, |i| i);
        assert_eq!(indices, (0..257).collect::<Vec<_>>());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_rejects_zero_threads() {
        assert!(matches!(
            ParallelEngine::with_num_threads(0),
            Err(crate::Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_auto_engine() {
        let engine = auto_engine();
        assert!(engine.num_threads() > 0);
    }
}
