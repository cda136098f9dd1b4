//! Mean aggregations over a process sample

use crate::sample::ProcessSample;
use ensemble_core::{auto_engine, AnyEngine, Error, ExecutionEngine, Field, Result, VectorTable};
use std::sync::Arc;
use tracing::instrument;

/// Ensemble and spatial means of a process sample
#[derive(Clone, Debug)]
pub struct MeanEngine<E: ExecutionEngine = AnyEngine> {
    engine: E,
}

impl Default for MeanEngine<AnyEngine> {
    fn default() -> Self {
        Self::new(auto_engine())
    }
}

impl<E: ExecutionEngine> MeanEngine<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Elementwise mean of all realizations, over the sample mesh
    ///
    /// Empty sample: empty field. One realization: returned unchanged.
    #[instrument(skip(self, sample), fields(size = sample.size()))]
    pub fn compute_mean(&self, sample: &ProcessSample) -> Result<Field> {
        match sample.realizations() {
            [] => Ok(Field::default()),
            [only] => Field::new(Arc::clone(sample.shared_mesh()), only.clone()),
            [first, rest @ ..] => {
                let mut sum = first.clone();
                for values in rest {
                    sum.add_assign(values)?;
                }
                sum.scale(1.0 / sample.size() as f64);
                Field::new(Arc::clone(sample.shared_mesh()), sum)
            }
        }
    }

    /// One row per realization: its per-component mean over the vertices
    #[instrument(skip(self, sample), fields(size = sample.size()))]
    pub fn compute_spatial_mean(&self, sample: &ProcessSample) -> Result<VectorTable> {
        let dimension = sample.dimension();
        let realizations = sample.realizations();
        let means = self
            .engine
            .execute_batch(realizations.len(), |i| realizations[i].compute_mean());
        let data = means.into_iter().flatten().collect();
        VectorTable::from_flat(realizations.len(), dimension, data)
    }

    /// Spatial mean restricted to regular one-dimensional meshes
    pub fn compute_temporal_mean(&self, sample: &ProcessSample) -> Result<VectorTable> {
        let mesh = sample.mesh();
        if mesh.dimension() != 1 || !mesh.is_regular() {
            return Err(Error::InvalidDomain(format!(
                "the temporal mean needs a regular mesh of dimension 1, got dimension {}{}",
                mesh.dimension(),
                if mesh.is_regular() { "" } else { " (irregular)" }
            )));
        }
        self.compute_spatial_mean(sample)
    }
}

impl ProcessSample {
    /// Elementwise mean field, see [`MeanEngine::compute_mean`]
    pub fn compute_mean(&self) -> Result<Field> {
        MeanEngine::default().compute_mean(self)
    }

    /// Per-realization vertex means, see [`MeanEngine::compute_spatial_mean`]
    pub fn compute_spatial_mean(&self) -> Result<VectorTable> {
        MeanEngine::default().compute_spatial_mean(self)
    }

    /// Per-realization time means, see [`MeanEngine::compute_temporal_mean`]
    pub fn compute_temporal_mean(&self) -> Result<VectorTable> {
        MeanEngine::default().compute_temporal_mean(self)
    }
}
