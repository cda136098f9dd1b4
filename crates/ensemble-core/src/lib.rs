//! Core types for ensemble statistics over mesh-valued fields
//!
//! This crate provides the building blocks shared by the ensemble crates:
//!
//! - [`VectorTable`]: row-major `rows × dimension` table holding one realization
//! - [`Mesh`] and [`RegularGrid`]: where a field is sampled
//! - [`Field`]: a mesh paired with one value row per vertex
//! - [`execution`]: sequential and Rayon-backed execution engines
//! - [`EngineConfig`]: serde configuration producing an engine
//!
//! # Example
//!
//! ```rust
//! use ensemble_core::{Field, RegularGrid, VectorTable};
//!
//! let mesh = RegularGrid::new(0.0, 0.5, 3).unwrap().to_mesh();
//! let values = VectorTable::from_column(&[1.0, 2.0, 3.0]);
//! let field = Field::new(mesh, values).unwrap();
//! assert_eq!(field.spatial_mean(), vec![2.0]);
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod field;
pub mod mesh;
pub mod table;

// Re-export core types
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use execution::{
    auto_engine, sequential, AnyEngine, ExecutionEngine, ExecutionStrategy, SequentialEngine,
};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};
pub use field::Field;
pub use mesh::{Mesh, RegularGrid};
pub use table::VectorTable;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EngineConfig, Error, ExecutionEngine, Field, Mesh, RegularGrid, Result, VectorTable,
    };
}
