//! Meshes and regular grids
//!
//! A [`Mesh`] describes where a field is sampled: vertex coordinates plus
//! simplices joining them. Only the properties the ensemble statistics need
//! are modelled here (vertex count, dimension, regularity and exact equality).

use crate::error::{Error, Result};
use crate::table::VectorTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative tolerance on vertex spacing used by [`Mesh::is_regular`]
pub const REGULARITY_TOLERANCE: f64 = 1e-12;

/// Vertices and simplices of a discretized domain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshRepr")]
pub struct Mesh {
    vertices: VectorTable,
    simplices: Vec<Vec<usize>>,
}

#[derive(Deserialize)]
struct MeshRepr {
    vertices: VectorTable,
    simplices: Vec<Vec<usize>>,
}

impl TryFrom<MeshRepr> for Mesh {
    type Error = Error;

    fn try_from(repr: MeshRepr) -> Result<Self> {
        Self::new(repr.vertices, repr.simplices)
    }
}

impl Default for Mesh {
    /// One-dimensional mesh without vertices
    fn default() -> Self {
        Self {
            vertices: VectorTable::new(0, 1),
            simplices: Vec::new(),
        }
    }
}

impl Mesh {
    /// Create a mesh from vertex coordinates and simplices
    pub fn new(vertices: VectorTable, simplices: Vec<Vec<usize>>) -> Result<Self> {
        let count = vertices.rows();
        for (s, simplex) in simplices.iter().enumerate() {
            if let Some(&bad) = simplex.iter().find(|&&v| v >= count) {
                return Err(Error::IncompatibleShape(format!(
                    "simplex {s} references vertex {bad} but the mesh has {count} vertices"
                )));
            }
        }
        Ok(Self {
            vertices,
            simplices,
        })
    }

    /// Create a mesh without connectivity, e.g. a point cloud
    pub fn from_vertices(vertices: VectorTable) -> Self {
        Self {
            vertices,
            simplices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.rows()
    }

    /// Dimension of the vertex coordinates
    pub fn dimension(&self) -> usize {
        self.vertices.dimension()
    }

    pub fn vertices(&self) -> &VectorTable {
        &self.vertices
    }

    pub fn simplices(&self) -> &[Vec<usize>] {
        &self.simplices
    }

    /// Whether the mesh is one-dimensional with uniform vertex spacing
    ///
    /// Meshes with fewer than two vertices are regular.
    pub fn is_regular(&self) -> bool {
        if self.dimension() != 1 {
            return false;
        }
        let x = self.vertices.as_slice();
        if x.len() < 2 {
            return true;
        }
        let step = x[1] - x[0];
        let tolerance = REGULARITY_TOLERANCE * step.abs().max(f64::MIN_POSITIVE);
        x.windows(2)
            .all(|w| ((w[1] - w[0]) - step).abs() <= tolerance)
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mesh(dimension={}, vertices={}, simplices={})",
            self.dimension(),
            self.vertex_count(),
            self.simplices.len()
        )
    }
}

/// Uniformly spaced one-dimensional grid
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegularGrid {
    start: f64,
    step: f64,
    n: usize,
}

impl RegularGrid {
    /// Create a grid of `n` vertices `start + i * step`
    pub fn new(start: f64, step: f64, n: usize) -> Result<Self> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "grid step {step} must be positive and finite"
            )));
        }
        if !start.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "grid start {start} must be finite"
            )));
        }
        Ok(Self { start, step, n })
    }

    /// Discretize `[lower, upper]` into `intervals` equal cells
    pub fn over_interval(lower: f64, upper: f64, intervals: usize) -> Result<Self> {
        if intervals == 0 {
            return Err(Error::InvalidParameter(
                "interval discretization needs at least one cell".to_string(),
            ));
        }
        Self::new(lower, (upper - lower) / intervals as f64, intervals + 1)
    }

    /// Recover the grid of a regular one-dimensional mesh
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        if mesh.dimension() != 1 || !mesh.is_regular() {
            return Err(Error::InvalidDomain(
                "a time grid is only defined for regular meshes of dimension 1".to_string(),
            ));
        }
        let x = mesh.vertices().as_slice();
        match x {
            [] => Ok(Self {
                start: 0.0,
                step: 1.0,
                n: 0,
            }),
            [only] => Ok(Self {
                start: *only,
                step: 1.0,
                n: 1,
            }),
            [first, second, ..] if second > first => Self::new(*first, second - first, x.len()),
            _ => Err(Error::InvalidDomain(
                "a time grid needs increasing vertices".to_string(),
            )),
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Last vertex of the grid, `start` for an empty grid
    pub fn end(&self) -> f64 {
        self.value(self.n.saturating_sub(1))
    }

    pub fn value(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    pub fn values(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.value(i)).collect()
    }

    /// Build the 1-D mesh joining consecutive vertices
    pub fn to_mesh(&self) -> Mesh {
        let simplices = (1..self.n).map(|i| vec![i - 1, i]).collect();
        Mesh {
            vertices: VectorTable::from_column(&self.values()),
            simplices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mesh() {
        let mesh = Mesh::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.dimension(), 1);
        assert!(mesh.is_regular());
    }

    #[test]
    fn test_new_rejects_dangling_simplex() {
        let vertices = VectorTable::from_column(&[0.0, 1.0]);
        assert!(Mesh::new(vertices.clone(), vec![vec![0, 1]]).is_ok());
        assert!(matches!(
            Mesh::new(vertices, vec![vec![0, 2]]),
            Err(Error::IncompatibleShape(_))
        ));
    }

    #[test]
    fn test_regularity() {
        let grid = RegularGrid::new(0.0, 0.1, 11).unwrap();
        assert!(grid.to_mesh().is_regular());

        let irregular = Mesh::from_vertices(VectorTable::from_column(&[0.0, 1.0, 3.0]));
        assert!(!irregular.is_regular());

        let planar = Mesh::from_vertices(
            VectorTable::from_rows(vec![vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap(),
        );
        assert!(!planar.is_regular());
    }

    #[test]
    fn test_grid_round_trip_through_mesh() {
        let grid = RegularGrid::new(-1.0, 0.5, 5).unwrap();
        let mesh = grid.to_mesh();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.simplices().len(), 4);
        assert_eq!(RegularGrid::from_mesh(&mesh).unwrap(), grid);
        assert_eq!(grid.end(), 1.0);
    }

    #[test]
    fn test_over_interval() {
        let grid = RegularGrid::over_interval(0.0, 1.0, 4).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.values(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(RegularGrid::over_interval(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_grid_rejects_bad_step() {
        assert!(RegularGrid::new(0.0, 0.0, 3).is_err());
        assert!(RegularGrid::new(0.0, -1.0, 3).is_err());
        assert!(RegularGrid::new(0.0, f64::NAN, 3).is_err());
    }

    #[test]
    fn test_from_mesh_requires_regular() {
        let irregular = Mesh::from_vertices(VectorTable::from_column(&[0.0, 1.0, 3.0]));
        assert!(matches!(
            RegularGrid::from_mesh(&irregular),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_from_mesh_rejects_non_increasing() {
        let decreasing = Mesh::from_vertices(VectorTable::from_column(&[2.0, 1.0, 0.0]));
        assert!(decreasing.is_regular());
        assert!(matches!(
            RegularGrid::from_mesh(&decreasing),
            Err(Error::InvalidDomain(_))
        ));

        let collapsed = Mesh::from_vertices(VectorTable::from_column(&[1.0, 1.0]));
        assert!(matches!(
            RegularGrid::from_mesh(&collapsed),
            Err(Error::InvalidDomain(_))
        ));
    }
}
