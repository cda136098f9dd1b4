//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

pub const EPSILON: f64 = 1e-12;

/// Assert two slices are equal within tolerance
pub fn assert_slices_close(actual: &[f64], expected: &[f64], context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch for {}",
        context
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= EPSILON * e.abs().max(1.0),
            "{}: element {} differs: {} vs {}",
            context,
            i,
            a,
            e
        );
    }
}
