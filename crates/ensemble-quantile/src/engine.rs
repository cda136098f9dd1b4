//! Per-vertex, per-component empirical quantiles across realizations
//!
//! The engine transposes the realizations once, then fans out one task per
//! (vertex, component) unit. Every unit receives its own disjoint `&mut`
//! slice of the transposed buffer and produces one value, collected in unit
//! order, so the output is identical for any thread count.

use crate::rank::QuantileRank;
use crate::selection::select_quantile;
use crate::transpose::TransposedBuffer;
use ensemble_core::{auto_engine, AnyEngine, Error, ExecutionEngine, Result, VectorTable};
use tracing::{debug, instrument};

/// Empirical quantile engine
#[derive(Clone, Debug)]
pub struct QuantileEngine<E: ExecutionEngine = AnyEngine> {
    engine: E,
}

impl Default for QuantileEngine<AnyEngine> {
    fn default() -> Self {
        Self::new(auto_engine())
    }
}

impl<E: ExecutionEngine> QuantileEngine<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Get the underlying execution engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Quantile at probability `p` of every unit across `realizations`
    ///
    /// Returns an empty table for no realizations and the realization itself
    /// when there is only one.
    #[instrument(skip(self, realizations), fields(size = realizations.len()))]
    pub fn quantile(&self, realizations: &[VectorTable], p: f64) -> Result<VectorTable> {
        Error::check_probability(p)?;
        match realizations {
            [] => Ok(VectorTable::default()),
            [only] => Ok(only.clone()),
            _ => {
                let mut buffer = TransposedBuffer::from_realizations(realizations)?;
                let rank = QuantileRank::new(p, buffer.size())?;
                self.select_table(&mut buffer, rank)
            }
        }
    }

    /// Quantiles at every probability of `probabilities`, in the given order
    ///
    /// With no realization the result is empty and with one it is that
    /// realization once per level, whatever the levels. Otherwise all
    /// probabilities are checked before any work is done. The transpose is
    /// built once and shared by all levels. Duplicates and unsorted levels are
    /// kept as given.
    #[instrument(skip(self, realizations, probabilities), fields(size = realizations.len(), levels = probabilities.len()))]
    pub fn quantiles(
        &self,
        realizations: &[VectorTable],
        probabilities: &[f64],
    ) -> Result<Vec<VectorTable>> {
        match realizations {
            [] => Ok(Vec::new()),
            [only] => Ok(vec![only.clone(); probabilities.len()]),
            _ => {
                for &p in probabilities {
                    Error::check_probability(p)?;
                }
                let mut buffer = TransposedBuffer::from_realizations(realizations)?;
                self.quantiles_from_buffer(&mut buffer, probabilities)
            }
        }
    }

    /// Quantiles over an already transposed buffer
    ///
    /// The buffer is reordered within units and can be reused afterwards.
    pub fn quantiles_from_buffer(
        &self,
        buffer: &mut TransposedBuffer,
        probabilities: &[f64],
    ) -> Result<Vec<VectorTable>> {
        let ranks = probabilities
            .iter()
            .map(|&p| QuantileRank::new(p, buffer.size()))
            .collect::<Result<Vec<_>>>()?;
        ranks
            .into_iter()
            .map(|rank| self.select_table(buffer, rank))
            .collect()
    }

    fn select_table(&self, buffer: &mut TransposedBuffer, rank: QuantileRank) -> Result<VectorTable> {
        let size = buffer.size();
        let (length, dimension) = (buffer.length(), buffer.dimension());
        debug!(
            size,
            units = buffer.units(),
            index = rank.index,
            beta = rank.beta,
            "selecting order statistics"
        );
        let values = self
            .engine
            .map_chunks_mut(buffer.as_mut_slice(), size, |unit| select_quantile(unit, rank));
        VectorTable::from_flat(length, dimension, values)
    }
}
