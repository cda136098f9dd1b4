//! Ensemble statistics over process samples
//!
//! Facade over the workspace crates:
//!
//! - `core`: tables, meshes, fields, errors and execution engines
//! - `quantile`: parallel empirical quantiles across realizations
//! - `process`: process samples with their means, quantiles, marginals
//!   and codecs
//!
//! ```rust
//! use ensemble_stats::prelude::*;
//!
//! let mesh = RegularGrid::new(0.0, 1.0, 2).unwrap().to_mesh();
//! let mut sample = ProcessSample::with_mesh(mesh, 0, 1);
//! sample.add_values(VectorTable::from_column(&[1.0, 4.0])).unwrap();
//! sample.add_values(VectorTable::from_column(&[3.0, 0.0])).unwrap();
//!
//! let mean = sample.compute_mean().unwrap();
//! assert_eq!(mean.values().as_slice(), &[2.0, 2.0]);
//! ```

pub use ensemble_core as core;
pub use ensemble_process as process;
pub use ensemble_quantile as quantile;

pub use ensemble_core::{EngineConfig, Error, Field, Mesh, RegularGrid, Result, VectorTable};
pub use ensemble_process::{JsonCodec, MeanEngine, ProcessSample, SampleCodec};
pub use ensemble_quantile::QuantileEngine;

pub mod prelude {
    pub use ensemble_core::prelude::*;
    pub use ensemble_process::prelude::*;
    pub use ensemble_quantile::prelude::*;
}
