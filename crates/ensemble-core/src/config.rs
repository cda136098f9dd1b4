//! Engine configuration
//!
//! [`EngineConfig`] is a plain serde struct so it can be embedded in an
//! application's own configuration file and turned into an engine on demand.

use crate::error::{Error, Result};
#[cfg(feature = "parallel")]
use crate::execution::ParallelEngine;
use crate::execution::{AnyEngine, ExecutionStrategy, SequentialEngine, DEFAULT_MIN_UNITS_PER_TASK};
use serde::{Deserialize, Serialize};

/// How ensemble aggregations are scheduled
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sequential, parallel, or chosen from the machine
    pub strategy: ExecutionStrategy,
    /// Dedicated pool size; `None` shares the global Rayon pool
    pub num_threads: Option<usize>,
    /// Minimum number of units processed by one Rayon task
    pub min_units_per_task: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::Auto,
            num_threads: None,
            min_units_per_task: DEFAULT_MIN_UNITS_PER_TASK,
        }
    }
}

impl EngineConfig {
    /// Sequential configuration
    pub fn sequential() -> Self {
        Self {
            strategy: ExecutionStrategy::Sequential,
            ..Self::default()
        }
    }

    /// Parallel configuration on the global pool
    pub fn parallel() -> Self {
        Self {
            strategy: ExecutionStrategy::Parallel,
            ..Self::default()
        }
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_min_units_per_task(mut self, min_units: usize) -> Self {
        self.min_units_per_task = min_units;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_threads == Some(0) {
            return Err(Error::InvalidParameter(
                "num_threads must be positive".to_string(),
            ));
        }
        if self.min_units_per_task == 0 {
            return Err(Error::InvalidParameter(
                "min_units_per_task must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the configured engine
    pub fn build(&self) -> Result<AnyEngine> {
        self.validate()?;
        let wants_parallel = match self.strategy {
            ExecutionStrategy::Sequential => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => self.num_threads.unwrap_or_else(num_cpus::get) > 1,
        };
        log::debug!(
            "building engine: strategy={:?} parallel={} threads={:?}",
            self.strategy,
            wants_parallel,
            self.num_threads
        );

        #[cfg(feature = "parallel")]
        {
            if wants_parallel {
                let engine = match self.num_threads {
                    Some(n) => ParallelEngine::with_num_threads(n)?,
                    None => ParallelEngine::new(),
                };
                return Ok(AnyEngine::Parallel(
                    engine.with_min_units_per_task(self.min_units_per_task),
                ));
            }
        }

        #[cfg(not(feature = "parallel"))]
        {
            if wants_parallel {
                log::warn!("parallel execution requested without the `parallel` feature, running sequentially");
            }
        }

        Ok(AnyEngine::Sequential(SequentialEngine))
    }
}
