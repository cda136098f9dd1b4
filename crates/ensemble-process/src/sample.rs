//! Process samples: ordered realizations of a field over one mesh
//!
//! A [`ProcessSample`] owns a shared mesh and a list of realizations. Every
//! mutation validates first and only then touches the realizations, so a
//! failed call leaves the sample exactly as it was.

use ensemble_core::{Error, Field, Mesh, RegularGrid, Result, VectorTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;
use tracing::debug;

/// Name given to samples that were never named
pub const DEFAULT_NAME: &str = "Unnamed";

/// Ensemble of realizations sharing one mesh
///
/// Invariants: every realization has `mesh.vertex_count()` rows and all
/// realizations share one dimension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProcessSampleRepr")]
pub struct ProcessSample {
    name: String,
    mesh: Arc<Mesh>,
    realizations: Vec<VectorTable>,
}

/// Unvalidated wire form of a [`ProcessSample`]
#[derive(Deserialize)]
pub(crate) struct ProcessSampleRepr {
    name: String,
    mesh: Arc<Mesh>,
    realizations: Vec<VectorTable>,
}

impl TryFrom<ProcessSampleRepr> for ProcessSample {
    type Error = Error;

    fn try_from(repr: ProcessSampleRepr) -> Result<Self> {
        let mut sample = Self {
            name: repr.name,
            mesh: repr.mesh,
            realizations: Vec::with_capacity(repr.realizations.len()),
        };
        for values in repr.realizations {
            sample.add_values(values)?;
        }
        Ok(sample)
    }
}

impl Default for ProcessSample {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSample {
    /// Empty sample over the default mesh
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            mesh: Arc::new(Mesh::default()),
            realizations: Vec::new(),
        }
    }

    /// `size` copies of the values of `field`
    pub fn from_field(size: usize, field: &Field) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            mesh: Arc::clone(field.shared_mesh()),
            realizations: vec![field.values().clone(); size],
        }
    }

    /// `size` zero-filled realizations of the given dimension
    pub fn with_mesh(mesh: impl Into<Arc<Mesh>>, size: usize, dimension: usize) -> Self {
        let mesh = mesh.into();
        let zeros = VectorTable::new(mesh.vertex_count(), dimension);
        Self {
            name: DEFAULT_NAME.to_string(),
            mesh,
            realizations: vec![zeros; size],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Shared handle on the mesh
    pub fn shared_mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// Dimension of the realizations, 0 when the sample is empty
    pub fn dimension(&self) -> usize {
        self.realizations.first().map_or(0, VectorTable::dimension)
    }

    /// Number of realizations
    pub fn size(&self) -> usize {
        self.realizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.realizations.is_empty()
    }

    pub fn realizations(&self) -> &[VectorTable] {
        &self.realizations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VectorTable> {
        self.realizations.iter()
    }

    /// Append a field
    ///
    /// An empty sample adopts the mesh of the field. Otherwise the field must
    /// have the sample's dimension and exactly the sample's mesh.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        if self.is_empty() {
            self.mesh = Arc::clone(field.shared_mesh());
            self.realizations.push(field.into_values());
            return Ok(());
        }
        if field.dimension() != self.dimension() {
            debug!(
                expected = self.dimension(),
                actual = field.dimension(),
                "rejected field of wrong dimension"
            );
            return Err(Error::size_mismatch(
                self.dimension(),
                field.dimension(),
                "field dimension",
            ));
        }
        if !Arc::ptr_eq(&self.mesh, field.shared_mesh()) && *self.mesh != *field.mesh() {
            debug!("rejected field over a different mesh");
            return Err(Error::IncompatibleShape(
                "the field mesh differs from the process sample mesh".to_string(),
            ));
        }
        self.realizations.push(field.into_values());
        Ok(())
    }

    /// Append raw values, one row per mesh vertex
    pub fn add_values(&mut self, values: VectorTable) -> Result<()> {
        self.check_values(&values)?;
        self.realizations.push(values);
        Ok(())
    }

    /// Realization `index` as a field over the sample mesh
    pub fn field(&self, index: usize) -> Result<Field> {
        let values = self.realization(index)?;
        Field::new(Arc::clone(&self.mesh), values.clone())
    }

    /// Borrow realization `index`
    pub fn realization(&self, index: usize) -> Result<&VectorTable> {
        Error::check_index(index, self.size())?;
        Ok(&self.realizations[index])
    }

    /// Replace realization `index` by the values of `field`
    ///
    /// The field's mesh is not compared; its values must fit the sample mesh.
    pub fn set_field(&mut self, field: Field, index: usize) -> Result<()> {
        self.set_values(field.into_values(), index)
    }

    /// Replace realization `index`
    pub fn set_values(&mut self, values: VectorTable, index: usize) -> Result<()> {
        Error::check_index(index, self.size())?;
        self.check_values(&values)?;
        self.realizations[index] = values;
        Ok(())
    }

    /// Overwrite one value of realization `index`
    pub fn set_value(
        &mut self,
        index: usize,
        vertex: usize,
        component: usize,
        value: f64,
    ) -> Result<()> {
        Error::check_index(index, self.size())?;
        self.realizations[index].set(vertex, component, value)
    }

    /// Project every realization onto component `component`
    pub fn marginal(&self, component: usize) -> Result<Self> {
        self.marginal_indices(&[component])
    }

    /// Project every realization onto the given components, in order
    ///
    /// An empty sample projects to an empty sample.
    pub fn marginal_indices(&self, components: &[usize]) -> Result<Self> {
        if !self.is_empty() {
            for &j in components {
                Error::check_index(j, self.dimension())?;
            }
        }
        let realizations = self
            .realizations
            .iter()
            .map(|r| r.marginal_indices(components))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: self.name.clone(),
            mesh: Arc::clone(&self.mesh),
            realizations,
        })
    }

    /// Regular time grid of the sample mesh
    pub fn time_grid(&self) -> Result<RegularGrid> {
        RegularGrid::from_mesh(&self.mesh)
    }

    fn check_values(&self, values: &VectorTable) -> Result<()> {
        if values.rows() != self.mesh.vertex_count() {
            return Err(Error::size_mismatch(
                self.mesh.vertex_count(),
                values.rows(),
                "value rows per mesh vertex",
            ));
        }
        if !self.is_empty() && values.dimension() != self.dimension() {
            return Err(Error::size_mismatch(
                self.dimension(),
                values.dimension(),
                "values dimension",
            ));
        }
        Ok(())
    }
}

impl Index<usize> for ProcessSample {
    type Output = VectorTable;

    /// Panics when `index >= size`, like slice indexing
    fn index(&self, index: usize) -> &VectorTable {
        &self.realizations[index]
    }
}

impl<'a> IntoIterator for &'a ProcessSample {
    type Item = &'a VectorTable;
    type IntoIter = std::slice::Iter<'a, VectorTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.realizations.iter()
    }
}

impl fmt::Display for ProcessSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, values) in self.realizations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "field {i}:")?;
            write!(f, "{values}")?;
        }
        write!(f, "]")
    }
}
