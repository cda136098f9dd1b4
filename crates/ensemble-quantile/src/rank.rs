//! Target rank of an empirical quantile
//!
//! For a probability `p` over `size` observations the quantile sits at the
//! fractional position `p * size - 0.5` of the sorted sample. The integer part
//! selects an order statistic, the fractional part interpolates towards the
//! next one. Positions beyond the first or last observation are clamped to
//! that observation exactly.

use ensemble_core::{Error, Result};

/// Order statistic and interpolation weight for one probability level
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantileRank {
    /// Zero-based rank of the lower order statistic
    pub index: usize,
    /// Weight of the order statistic at `index + 1`
    pub beta: f64,
}

impl QuantileRank {
    /// Rank of probability `p` among `size` observations
    ///
    /// `size` must be positive.
    pub fn new(p: f64, size: usize) -> Result<Self> {
        Error::check_probability(p)?;
        if size == 0 {
            return Err(Error::InvalidParameter(
                "quantile rank needs at least one observation".to_string(),
            ));
        }
        let scalar_index = p * size as f64 - 0.5;
        if scalar_index >= (size - 1) as f64 {
            return Ok(Self {
                index: size - 1,
                beta: 0.0,
            });
        }
        if scalar_index <= 0.0 {
            return Ok(Self {
                index: 0,
                beta: 0.0,
            });
        }
        let floor = scalar_index.floor();
        Ok(Self {
            index: floor as usize,
            beta: scalar_index - floor,
        })
    }

    /// Weight of the order statistic at `index`
    pub fn alpha(&self) -> f64 {
        1.0 - self.beta
    }

    /// Whether the quantile is exactly one order statistic
    pub fn is_exact(&self) -> bool {
        self.beta == 0.0
    }
}
