//! Row-major numeric tables
//!
//! A [`VectorTable`] stores `rows` points of a fixed `dimension` in one
//! contiguous buffer. It is the container for a single realization of a
//! field as well as for vertex coordinates of a mesh.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered 2-D table of `f64` values (rows × dimension), stored row-major
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr")]
pub struct VectorTable {
    rows: usize,
    dimension: usize,
    #[serde(with = "scalars")]
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct TableRepr {
    rows: usize,
    dimension: usize,
    #[serde(with = "scalars")]
    data: Vec<f64>,
}

impl TryFrom<TableRepr> for VectorTable {
    type Error = Error;

    fn try_from(repr: TableRepr) -> Result<Self> {
        Self::from_flat(repr.rows, repr.dimension, repr.data)
    }
}

/// Serde form of a value buffer that keeps non-finite values
///
/// Finite values stay plain numbers. Infinities are written `"inf"` and
/// `"-inf"`, the canonical NaN `"NaN"` and any other NaN `"NaN:<hex bits>"`,
/// so decoding restores every value bit for bit.
mod scalars {
    use serde::ser::SerializeSeq;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Number(f64),
        Special(String),
    }

    fn to_tag(x: f64) -> String {
        if x.is_nan() {
            if x.to_bits() == f64::NAN.to_bits() {
                "NaN".to_string()
            } else {
                format!("NaN:{:016x}", x.to_bits())
            }
        } else if x > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    }

    fn from_tag(tag: &str) -> Option<f64> {
        match tag {
            "inf" => Some(f64::INFINITY),
            "-inf" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            _ => {
                let bits = u64::from_str_radix(tag.strip_prefix("NaN:")?, 16).ok()?;
                Some(f64::from_bits(bits)).filter(|x| x.is_nan())
            }
        }
    }

    pub fn serialize<S: Serializer>(data: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(data.len()))?;
        for &x in data {
            if x.is_finite() {
                seq.serialize_element(&x)?;
            } else {
                seq.serialize_element(&to_tag(x))?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Scalar>::deserialize(deserializer)?
            .into_iter()
            .map(|scalar| match scalar {
                Scalar::Number(x) => Ok(x),
                Scalar::Special(tag) => from_tag(&tag)
                    .ok_or_else(|| de::Error::custom(format!("unknown scalar tag {tag:?}"))),
            })
            .collect()
    }
}

impl VectorTable {
    /// Create a zero-filled table
    pub fn new(rows: usize, dimension: usize) -> Self {
        Self {
            rows,
            dimension,
            data: vec![0.0; rows * dimension],
        }
    }

    /// Create a table from a row-major buffer
    pub fn from_flat(rows: usize, dimension: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * dimension {
            return Err(Error::size_mismatch(
                rows * dimension,
                data.len(),
                "flat table buffer length",
            ));
        }
        Ok(Self {
            rows,
            dimension,
            data,
        })
    }

    /// Create a table from a list of rows
    ///
    /// All rows must share the same length. An empty list yields a 0×0 table.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dimension = rows.first().map_or(0, Vec::len);
        let count = rows.len();
        let mut data = Vec::with_capacity(count * dimension);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(Error::IncompatibleShape(format!(
                    "row {i} has dimension {}, expected {dimension}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: count,
            dimension,
            data,
        })
    }

    /// Create a one-dimensional table from a column of values
    pub fn from_column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            dimension: 1,
            data: values.to_vec(),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of components per row
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Row-major view of the whole table
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the table and return its row-major buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Borrow row `i`
    pub fn row(&self, i: usize) -> Result<&[f64]> {
        Error::check_index(i, self.rows)?;
        let start = i * self.dimension;
        Ok(&self.data[start..start + self.dimension])
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact panics on a zero chunk size
        let width = self.dimension.max(1);
        self.data.chunks_exact(width).take(self.rows)
    }

    /// Value at row `i`, component `j`
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        Error::check_index(i, self.rows)?;
        Error::check_index(j, self.dimension)?;
        Ok(self.data[i * self.dimension + j])
    }

    /// Overwrite the value at row `i`, component `j`
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        Error::check_index(i, self.rows)?;
        Error::check_index(j, self.dimension)?;
        self.data[i * self.dimension + j] = value;
        Ok(())
    }

    /// Project onto a single component
    pub fn marginal(&self, j: usize) -> Result<Self> {
        self.marginal_indices(&[j])
    }

    /// Project onto the given components, in the given order
    pub fn marginal_indices(&self, indices: &[usize]) -> Result<Self> {
        for &j in indices {
            Error::check_index(j, self.dimension)?;
        }
        let mut data = Vec::with_capacity(self.rows * indices.len());
        for row in self.iter_rows() {
            data.extend(indices.iter().map(|&j| row[j]));
        }
        Ok(Self {
            rows: self.rows,
            dimension: indices.len(),
            data,
        })
    }

    /// Per-component mean across rows
    ///
    /// Returns a zero vector when the table has no rows.
    pub fn compute_mean(&self) -> Vec<f64> {
        let mut mean = vec![0.0; self.dimension];
        if self.rows == 0 {
            return mean;
        }
        for row in self.iter_rows() {
            for (acc, &x) in mean.iter_mut().zip(row) {
                *acc += x;
            }
        }
        let scale = 1.0 / self.rows as f64;
        mean.iter_mut().for_each(|m| *m *= scale);
        mean
    }

    /// Add another table of identical shape elementwise
    pub fn add_assign(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// Multiply every value by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|x| *x *= factor);
    }

    fn check_same_shape(&self, other: &Self) -> Result<()> {
        if self.rows != other.rows || self.dimension != other.dimension {
            return Err(Error::IncompatibleShape(format!(
                "table of shape {}x{} cannot be combined with {}x{}",
                self.rows, self.dimension, other.rows, other.dimension
            )));
        }
        Ok(())
    }
}

impl fmt::Display for VectorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{row:?}")?;
        }
        write!(f, "]")
    }
}
