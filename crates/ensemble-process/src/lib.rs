//! Process samples and their ensemble statistics
//!
//! A [`ProcessSample`] is an ordered collection of realizations of a
//! vector-valued field, all defined on one shared mesh. On top of it this
//! crate provides:
//!
//! - **Means**: elementwise ensemble mean, per-realization spatial and
//!   temporal means ([`MeanEngine`])
//! - **Quantiles**: per vertex and component, for one or many probability
//!   levels, backed by `ensemble-quantile`
//! - **Marginals**: projection onto a subset of components, and graph data
//!   for one marginal over a time mesh
//! - **Persistence**: byte codecs behind the [`SampleCodec`] trait
//!
//! # Example
//!
//! ```rust
//! use ensemble_core::{RegularGrid, VectorTable};
//! use ensemble_process::ProcessSample;
//!
//! let mesh = RegularGrid::new(0.0, 1.0, 1).unwrap().to_mesh();
//! let mut sample = ProcessSample::with_mesh(mesh, 0, 1);
//! for x in [1.0, 2.0, 3.0] {
//!     sample.add_values(VectorTable::from_column(&[x])).unwrap();
//! }
//!
//! assert_eq!(sample.compute_mean().unwrap().values().as_slice(), &[2.0]);
//! let median = sample.compute_quantile_per_component(0.5).unwrap();
//! assert_eq!(median.values().as_slice(), &[2.0]);
//! ```

pub mod drawing;
pub mod mean;
pub mod persistence;
pub mod quantile;
pub mod sample;

pub use drawing::{Curve, MarginalGraph};
pub use mean::MeanEngine;
pub use persistence::{JsonCodec, SampleCodec};
pub use sample::{ProcessSample, DEFAULT_NAME};

pub use ensemble_core::{Error, Field, Mesh, RegularGrid, Result, VectorTable};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Error, Field, JsonCodec, MeanEngine, Mesh, ProcessSample, RegularGrid, Result,
        SampleCodec, VectorTable,
    };
}
