//! Runtime-selected engine
//!
//! Configuration decides between engines at runtime, so [`AnyEngine`] wraps
//! the concrete engines and forwards every call.

#[cfg(feature = "parallel")]
use super::ParallelEngine;
use super::{ExecutionEngine, ExecutionStrategy, SequentialEngine};

/// Either a sequential or a parallel engine
#[derive(Clone, Debug)]
pub enum AnyEngine {
    Sequential(SequentialEngine),
    #[cfg(feature = "parallel")]
    Parallel(ParallelEngine),
}

impl Default for AnyEngine {
    fn default() -> Self {
        super::auto_engine()
    }
}

impl From<SequentialEngine> for AnyEngine {
    fn from(engine: SequentialEngine) -> Self {
        Self::Sequential(engine)
    }
}

#[cfg(feature = "parallel")]
impl From<ParallelEngine> for AnyEngine {
    fn from(engine: ParallelEngine) -> Self {
        Self::Parallel(engine)
    }
}

macro_rules! dispatch {
    ($self:ident, $engine:ident => $body:expr) => {
        match $self {
            AnyEngine::Sequential($engine) => $body,
            #[cfg(feature = "parallel")]
            AnyEngine::Parallel($engine) => $body,
        }
    };
}

impl ExecutionEngine for AnyEngine {
    fn execute<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        dispatch!(self, engine => engine.execute(f))
    }

    fn map_chunks<'a, U, F, R>(&self, data: &'a [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Sync,
        F: Fn(&'a [U]) -> R + Sync + Send,
        R: Send,
    {
        dispatch!(self, engine => engine.map_chunks(data, chunk_size, f))
    }

    fn map_chunks_mut<U, F, R>(&self, data: &mut [U], chunk_size: usize, f: F) -> Vec<R>
    where
        U: Send,
        F: Fn(&mut [U]) -> R + Sync + Send,
        R: Send,
    {
        dispatch!(self, engine => engine.map_chunks_mut(data, chunk_size, f))
    }

    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        dispatch!(self, engine => engine.execute_batch(count, f))
    }

    fn strategy(&self) -> ExecutionStrategy {
        dispatch!(self, engine => engine.strategy())
    }

    fn num_threads(&self) -> usize {
        dispatch!(self, engine => engine.num_threads())
    }
}
