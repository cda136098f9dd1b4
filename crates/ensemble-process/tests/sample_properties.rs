//! Property-based tests for process samples
//!
//! Checks the algebraic relations between sample operations: sizes,
//! marginals commuting with aggregation, batched vs single quantiles.

use approx::assert_relative_eq;
use ensemble_core::{sequential, EngineConfig, Field, Mesh, RegularGrid, VectorTable};
use ensemble_process::{MeanEngine, ProcessSample};
use ensemble_quantile::QuantileEngine;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn grid(n: usize) -> Mesh {
    RegularGrid::new(0.0, 0.5, n).unwrap().to_mesh()
}

/// Seeded Gaussian sample of `size` realizations over an `n`-vertex grid
fn gaussian_sample(size: usize, n: usize, dimension: usize, seed: u64) -> ProcessSample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(10.0, 2.0).unwrap();
    let mut sample = ProcessSample::with_mesh(grid(n), 0, dimension);
    for _ in 0..size {
        let data = (0..n * dimension).map(|_| normal.sample(&mut rng)).collect();
        sample
            .add_values(VectorTable::from_flat(n, dimension, data).unwrap())
            .unwrap();
    }
    sample
}

fn sample_strategy() -> impl Strategy<Value = ProcessSample> {
    (1usize..12, 1usize..6, 1usize..4).prop_flat_map(|(size, n, dimension)| {
        prop::collection::vec(prop::collection::vec(-1e3f64..1e3, n * dimension), size)
            .prop_map(move |rows| {
                let mut sample = ProcessSample::with_mesh(grid(n), 0, dimension);
                for data in rows {
                    sample
                        .add_values(VectorTable::from_flat(n, dimension, data).unwrap())
                        .unwrap();
                }
                sample
            })
    })
}

#[test]
fn test_one_two_three() {
    let mut sample = ProcessSample::new();
    let mesh = grid(1);
    for x in [1.0, 2.0, 3.0] {
        sample
            .add_field(Field::new(mesh.clone(), VectorTable::from_column(&[x])).unwrap())
            .unwrap();
    }
    assert_eq!(sample.size(), 3);
    assert_eq!(sample.compute_mean().unwrap().values().as_slice(), &[2.0]);
    let q = sample.compute_quantiles_per_component(&[0.5, 1.0, 0.0]).unwrap();
    assert_eq!(q[0].as_slice(), &[2.0]);
    assert_eq!(q[1].as_slice(), &[3.0]);
    assert_eq!(q[2].as_slice(), &[1.0]);
}

#[test]
fn test_rejected_field_leaves_sample_unchanged() {
    let mut sample = gaussian_sample(4, 3, 2, 1);
    let before = sample.clone();

    let other_mesh = RegularGrid::new(1.0, 0.5, 3).unwrap().to_mesh();
    let foreign = Field::new(other_mesh, VectorTable::new(3, 2)).unwrap();
    assert!(sample.add_field(foreign).is_err());

    let wrong_dimension = Field::new(grid(3), VectorTable::new(3, 1)).unwrap();
    assert!(sample.add_field(wrong_dimension).is_err());
    assert!(sample.set_values(VectorTable::new(2, 2), 0).is_err());
    assert!(sample.marginal(2).is_err());

    assert_eq!(sample, before);
}

#[test]
fn test_parallel_engines_match_sequential() {
    let sample = gaussian_sample(37, 50, 3, 9);
    let levels = [0.05, 0.5, 0.95];
    let reference = sample
        .compute_quantiles_per_component_with(&QuantileEngine::new(sequential()), &levels)
        .unwrap();
    let mean_reference = MeanEngine::new(sequential()).compute_mean(&sample).unwrap();

    for threads in [2, 5] {
        let engine = EngineConfig::parallel()
            .with_num_threads(threads)
            .with_min_units_per_task(4)
            .build()
            .unwrap();
        let quantiles = sample
            .compute_quantiles_per_component_with(&QuantileEngine::new(engine.clone()), &levels)
            .unwrap();
        assert_eq!(quantiles, reference);
        assert_eq!(MeanEngine::new(engine).compute_mean(&sample).unwrap(), mean_reference);
    }
}

#[test]
fn test_spatial_mean_rows_match_realization_means() {
    let sample = gaussian_sample(6, 20, 2, 4);
    let spatial = sample.compute_spatial_mean().unwrap();
    assert_eq!(spatial.rows(), 6);
    for (i, values) in sample.iter().enumerate() {
        let expected = values.compute_mean();
        assert_relative_eq!(spatial.row(i).unwrap(), expected.as_slice(), epsilon = 1e-12);
    }
}

proptest! {
    // Property: every accepted add grows the sample by exactly one
    #[test]
    fn prop_size_counts_adds(sample in sample_strategy()) {
        let mut rebuilt = ProcessSample::new();
        for (i, values) in sample.iter().enumerate() {
            let field = Field::new(sample.shared_mesh().clone(), values.clone()).unwrap();
            rebuilt.add_field(field).unwrap();
            prop_assert_eq!(rebuilt.size(), i + 1);
        }
        prop_assert_eq!(rebuilt.realizations(), sample.realizations());
    }

    // Property: the mean equals the manual average of all realizations
    #[test]
    fn prop_mean_matches_manual_average(sample in sample_strategy()) {
        let mean = sample.compute_mean().unwrap();
        let size = sample.size() as f64;
        for (unit, &m) in mean.values().as_slice().iter().enumerate() {
            let expected: f64 = sample.iter().map(|r| r.as_slice()[unit]).sum::<f64>() / size;
            prop_assert!((m - expected).abs() <= 1e-12 * expected.abs().max(1.0),
                "unit {}: {} vs {}", unit, m, expected);
        }
    }

    // Property: marginalizing then aggregating equals aggregating then marginalizing
    #[test]
    fn prop_marginal_commutes(sample in sample_strategy(), pick in 0usize..3, p in 0.0f64..=1.0) {
        let j = pick % sample.dimension();
        let marginal = sample.marginal(j).unwrap();

        let mean_then_project = sample.compute_mean().unwrap().marginal(j).unwrap();
        let project_then_mean = marginal.compute_mean().unwrap();
        prop_assert_eq!(project_then_mean.values(), mean_then_project.values());

        let quantile_then_project = sample
            .compute_quantile_per_component(p)
            .unwrap()
            .marginal(j)
            .unwrap();
        let project_then_quantile = marginal.compute_quantile_per_component(p).unwrap();
        prop_assert_eq!(project_then_quantile.values(), quantile_then_project.values());
    }

    // Property: batched quantiles equal the single-level calls, in input order
    #[test]
    fn prop_batched_equals_single(
        sample in sample_strategy(),
        levels in prop::collection::vec(0.0f64..=1.0, 1..6)
    ) {
        prop_assume!(sample.size() > 1);
        let batched = sample.compute_quantiles_per_component(&levels).unwrap();
        prop_assert_eq!(batched.size(), levels.len());
        for (i, &p) in levels.iter().enumerate() {
            let single = sample.compute_quantile_per_component(p).unwrap();
            prop_assert_eq!(&batched[i], single.values());
        }
    }

    // Property: p = 0 and p = 1 are the unit-wise minimum and maximum
    #[test]
    fn prop_extreme_levels(sample in sample_strategy()) {
        let min = sample.compute_quantile_per_component(0.0).unwrap();
        let max = sample.compute_quantile_per_component(1.0).unwrap();
        for unit in 0..min.values().as_slice().len() {
            let column = sample.iter().map(|r| r.as_slice()[unit]);
            let lo = column.clone().fold(f64::INFINITY, f64::min);
            let hi = column.fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(min.values().as_slice()[unit], lo);
            prop_assert_eq!(max.values().as_slice()[unit], hi);
        }
    }

    // Property: a single realization is its own mean and every quantile
    #[test]
    fn prop_single_realization_identity(sample in sample_strategy(), p in 0.0f64..=1.0) {
        let mut single = ProcessSample::with_mesh(sample.shared_mesh().clone(), 0, sample.dimension());
        single.add_values(sample[0].clone()).unwrap();
        let mean = single.compute_mean().unwrap();
        prop_assert_eq!(mean.values(), &sample[0]);
        let quantile = single.compute_quantile_per_component(p).unwrap();
        prop_assert_eq!(quantile.values(), &sample[0]);
        prop_assert_eq!(single.compute_quantiles_per_component(&[p, 0.5]).unwrap(), single.clone());
    }
}
