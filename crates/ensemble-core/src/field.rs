//! Fields: values attached to the vertices of a mesh

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::table::VectorTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One [`VectorTable`] row per vertex of a shared [`Mesh`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    mesh: Arc<Mesh>,
    values: VectorTable,
}

impl Field {
    /// Pair a mesh with values, one row per vertex
    pub fn new(mesh: impl Into<Arc<Mesh>>, values: VectorTable) -> Result<Self> {
        let mesh = mesh.into();
        if values.rows() != mesh.vertex_count() {
            return Err(Error::size_mismatch(
                mesh.vertex_count(),
                values.rows(),
                "field values per mesh vertex",
            ));
        }
        Ok(Self { mesh, values })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Shared handle on the mesh
    pub fn shared_mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn values(&self) -> &VectorTable {
        &self.values
    }

    pub fn into_values(self) -> VectorTable {
        self.values
    }

    /// Output dimension of the field
    pub fn dimension(&self) -> usize {
        self.values.dimension()
    }

    /// Restrict the field to component `j`
    pub fn marginal(&self, j: usize) -> Result<Self> {
        Ok(Self {
            mesh: Arc::clone(&self.mesh),
            values: self.values.marginal(j)?,
        })
    }

    /// Restrict the field to the given components
    pub fn marginal_indices(&self, indices: &[usize]) -> Result<Self> {
        Ok(Self {
            mesh: Arc::clone(&self.mesh),
            values: self.values.marginal_indices(indices)?,
        })
    }

    /// Per-component mean over the vertices
    pub fn spatial_mean(&self) -> Vec<f64> {
        self.values.compute_mean()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} values={}", self.mesh, self.values)
    }
}
