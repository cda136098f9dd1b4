//! Quantiles per vertex and component of a process sample

use crate::sample::ProcessSample;
use ensemble_core::{Error, ExecutionEngine, Field, Result};
use ensemble_quantile::QuantileEngine;
use std::sync::Arc;
use tracing::debug;

impl ProcessSample {
    /// Quantile field at probability `p`, on the default engine
    pub fn compute_quantile_per_component(&self, p: f64) -> Result<Field> {
        self.compute_quantile_per_component_with(&QuantileEngine::default(), p)
    }

    /// Quantile sample with one realization per probability, on the default engine
    pub fn compute_quantiles_per_component(&self, probabilities: &[f64]) -> Result<Self> {
        self.compute_quantiles_per_component_with(&QuantileEngine::default(), probabilities)
    }

    /// Quantile field at probability `p`
    ///
    /// Empty sample: empty field. One realization: that realization.
    pub fn compute_quantile_per_component_with<E: ExecutionEngine>(
        &self,
        engine: &QuantileEngine<E>,
        p: f64,
    ) -> Result<Field> {
        Error::check_probability(p)?;
        if self.is_empty() {
            return Ok(Field::default());
        }
        let values = engine.quantile(self.realizations(), p)?;
        Field::new(Arc::clone(self.shared_mesh()), values)
    }

    /// One realization per probability level, in the order given
    ///
    /// An empty sample gives an empty sample, and a sample with a single
    /// realization is returned as is whatever the levels. Otherwise every
    /// level is validated before any work is done.
    pub fn compute_quantiles_per_component_with<E: ExecutionEngine>(
        &self,
        engine: &QuantileEngine<E>,
        probabilities: &[f64],
    ) -> Result<Self> {
        match self.size() {
            0 => return Ok(Self::new()),
            1 => return Ok(self.clone()),
            _ => {}
        }
        for &p in probabilities {
            Error::check_probability(p)?;
        }
        debug!(
            size = self.size(),
            levels = probabilities.len(),
            "computing quantile sample"
        );
        let tables = engine.quantiles(self.realizations(), probabilities)?;
        let mut result = Self::with_mesh(Arc::clone(self.shared_mesh()), 0, self.dimension())
            .with_name(self.name());
        for values in tables {
            result.add_values(values)?;
        }
        Ok(result)
    }
}
