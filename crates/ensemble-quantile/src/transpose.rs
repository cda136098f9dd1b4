//! Realization-major to unit-major transpose
//!
//! Realizations are stored as `length × dimension` row-major tables. Selecting
//! order statistics needs, for one (vertex, component) unit, the values of all
//! realizations side by side. [`TransposedBuffer`] pays one
//! `O(size · dimension · length)` pass so that every unit reads a contiguous
//! slice afterwards.

use ensemble_core::{Error, Result, VectorTable};

/// Contiguous buffer where unit `u = vertex * dimension + component` owns
/// `data[u * size .. (u + 1) * size]`, one value per realization
#[derive(Clone, Debug)]
pub struct TransposedBuffer {
    data: Vec<f64>,
    size: usize,
    length: usize,
    dimension: usize,
}

impl TransposedBuffer {
    /// Transpose realizations sharing one shape
    pub fn from_realizations(realizations: &[VectorTable]) -> Result<Self> {
        let size = realizations.len();
        let (length, dimension) = realizations
            .first()
            .map_or((0, 0), |r| (r.rows(), r.dimension()));
        for (k, r) in realizations.iter().enumerate() {
            if r.rows() != length || r.dimension() != dimension {
                return Err(Error::IncompatibleShape(format!(
                    "realization {k} has shape {}x{}, expected {length}x{dimension}",
                    r.rows(),
                    r.dimension()
                )));
            }
        }

        let units = length * dimension;
        let mut data = vec![0.0; size * units];
        for (k, realization) in realizations.iter().enumerate() {
            for (unit, &value) in realization.as_slice().iter().enumerate() {
                data[unit * size + k] = value;
            }
        }
        Ok(Self {
            data,
            size,
            length,
            dimension,
        })
    }

    /// Number of realizations, the length of each unit slice
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of mesh vertices
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of (vertex, component) units
    pub fn units(&self) -> usize {
        self.length * self.dimension
    }

    /// Values of one unit across realizations
    ///
    /// The order inside a unit is unspecified once selections have run.
    pub fn unit(&self, unit: usize) -> Result<&[f64]> {
        Error::check_index(unit, self.units())?;
        Ok(&self.data[unit * self.size..(unit + 1) * self.size])
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
