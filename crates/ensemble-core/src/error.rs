//! Error types for ensemble statistics
//!
//! Provides a unified error type for all ensemble crates.

use thiserror::Error;

/// Core error type for ensemble operations
#[derive(Error, Debug)]
pub enum Error {
    /// A table, field or mesh disagrees with the shape it is combined with
    #[error("Incompatible shape: {0}")]
    IncompatibleShape(String),

    /// Index accessor outside of `[0, bound)`
    #[error("Index out of range: index {index} should be lower than {bound}")]
    IndexOutOfRange { index: usize, bound: usize },

    /// Quantile probability outside of `[0, 1]`
    #[error("Quantile probability {p} must be in [0, 1]")]
    InvalidProbability { p: f64 },

    /// Operation not defined on the mesh of the sample
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Operation not supported for meshes of this dimension
    #[error("Unsupported mesh dimension {dimension}: only dimension 1 is supported")]
    UnsupportedDimension { dimension: usize },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Check that a probability lies in `[0, 1]`
    ///
    /// NaN is rejected as well.
    pub fn check_probability(p: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidProbability { p });
        }
        Ok(())
    }

    /// Check that an index lies in `[0, bound)`
    pub fn check_index(index: usize, bound: usize) -> Result<()> {
        if index >= bound {
            return Err(Error::IndexOutOfRange { index, bound });
        }
        Ok(())
    }

    /// Create an error for a size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::IncompatibleShape(format!(
            "{context}: expected {expected}, got {actual}"
        ))
    }
}
