//! Parallel empirical quantiles across realizations
//!
//! This crate computes, for every mesh vertex and every component
//! independently, the empirical quantile of the values taken by an ensemble
//! of realizations.
//!
//! # Algorithm
//!
//! - **Transpose**: realizations are copied once into a unit-major buffer so
//!   the values of one (vertex, component) unit are contiguous
//! - **Rank**: `p * size - 0.5` gives the order statistic and interpolation
//!   weight, clamped to the extreme observations
//! - **Selection**: one or two partial selections per unit, no full sort
//! - **Fan-out**: one task per unit on the configured execution engine
//!
//! # Example
//!
//! ```rust
//! use ensemble_core::{sequential, VectorTable};
//! use ensemble_quantile::QuantileEngine;
//!
//! let engine = QuantileEngine::new(sequential());
//! let realizations: Vec<VectorTable> = [1.0, 2.0, 3.0]
//!     .iter()
//!     .map(|&x| VectorTable::from_column(&[x]))
//!     .collect();
//!
//! let median = engine.quantile(&realizations, 0.5).unwrap();
//! assert_eq!(median.as_slice(), &[2.0]);
//! ```

pub mod engine;
pub mod rank;
pub mod selection;
pub mod transpose;

// Re-export main types
pub use engine::QuantileEngine;
pub use rank::QuantileRank;
pub use selection::select_quantile;
pub use transpose::TransposedBuffer;

// Re-export from ensemble-core
pub use ensemble_core::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Error, QuantileEngine, QuantileRank, Result, TransposedBuffer};
}
