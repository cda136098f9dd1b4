//! Graph data for one marginal of a process sample
//!
//! Nothing is rendered here. A [`MarginalGraph`] holds the title, axis labels
//! and one polyline per realization, ready to hand to a plotting backend.

use crate::sample::ProcessSample;
use ensemble_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Polyline of `(time, value)` points
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarginalGraph {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<Curve>,
}

impl ProcessSample {
    /// Curves of component `component` against the vertex coordinates
    ///
    /// Only defined for meshes of dimension 1.
    pub fn draw_marginal(&self, component: usize) -> Result<MarginalGraph> {
        let mesh = self.mesh();
        if mesh.dimension() != 1 {
            return Err(Error::UnsupportedDimension {
                dimension: mesh.dimension(),
            });
        }
        Error::check_index(component, self.dimension())?;

        let times = mesh.vertices().as_slice();
        let curves = self
            .iter()
            .map(|values| Curve {
                points: times
                    .iter()
                    .zip(values.iter_rows())
                    .map(|(&t, row)| (t, row[component]))
                    .collect(),
            })
            .collect();

        Ok(MarginalGraph {
            title: format!("{} - {} marginal", self.name(), component),
            x_label: "Time".to_string(),
            y_label: "Values".to_string(),
            curves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_core::{Mesh, RegularGrid, VectorTable};

    #[test]
    fn test_marginal_curves() {
        let mesh = RegularGrid::new(0.5, 0.25, 3).unwrap().to_mesh();
        let mut sample = ProcessSample::with_mesh(mesh, 0, 2).with_name("flow");
        sample
            .add_values(
                VectorTable::from_rows(vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]])
                    .unwrap(),
            )
            .unwrap();
        sample.add_values(VectorTable::new(3, 2)).unwrap();

        let graph = sample.draw_marginal(1).unwrap();
        assert_eq!(graph.title, "flow - 1 marginal");
        assert_eq!(graph.x_label, "Time");
        assert_eq!(graph.y_label, "Values");
        assert_eq!(graph.curves.len(), 2);
        assert_eq!(
            graph.curves[0].points,
            vec![(0.5, 10.0), (0.75, 20.0), (1.0, 30.0)]
        );
        assert!(graph.curves[1].points.iter().all(|&(_, v)| v == 0.0));
    }

    #[test]
    fn test_draw_errors() {
        let sample = ProcessSample::with_mesh(RegularGrid::new(0.0, 1.0, 2).unwrap().to_mesh(), 1, 1);
        assert!(matches!(
            sample.draw_marginal(1),
            Err(Error::IndexOutOfRange { index: 1, bound: 1 })
        ));

        let planar = Mesh::from_vertices(
            VectorTable::from_rows(vec![vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap(),
        );
        let sample = ProcessSample::with_mesh(planar, 1, 1);
        assert!(matches!(
            sample.draw_marginal(0),
            Err(Error::UnsupportedDimension { dimension: 2 })
        ));
    }
}
