//! Property-based tests for Fourier features and their contraction.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated periodic indices and weight tensors.

use anofox_seasonality::core::NamedTensor;
use anofox_seasonality::seasonality::{
    combine, fourier_features, fourier_nodes, generate_fourier_modes, seasonality,
};
use proptest::prelude::*;

/// Strategy for periodic indices, including negative and multi-cycle values.
fn periods_strategy(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0..100.0_f64, 0..max_len)
}

/// Strategy for a `(hierarchy, fourier)` weight tensor of the given order.
fn weights_strategy(n_order: usize) -> impl Strategy<Value = NamedTensor> {
    (1usize..6).prop_flat_map(move |groups| {
        prop::collection::vec(-5.0..5.0_f64, groups * 2 * n_order).prop_map(move |values| {
            NamedTensor::from_shape_vec(["hierarchy", "fourier"], &[groups, 2 * n_order], values)
                .unwrap()
        })
    })
}

// =============================================================================
// Property: feature matrix shape and bounds
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn features_have_expected_shape(
        periods in periods_strategy(200),
        n_order in 1usize..30
    ) {
        let modes = generate_fourier_modes(&periods, n_order);
        prop_assert_eq!(modes.dim(), (periods.len(), 2 * n_order));
        prop_assert_eq!(fourier_nodes(n_order).len(), 2 * n_order);
    }

    #[test]
    fn features_are_bounded(
        periods in periods_strategy(200),
        n_order in 1usize..30
    ) {
        let modes = generate_fourier_modes(&periods, n_order);
        prop_assert!(modes.iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn pythagorean_identity(
        periods in periods_strategy(200),
        n_order in 1usize..30
    ) {
        let modes = generate_fourier_modes(&periods, n_order);
        for row in modes.rows() {
            for k in 0..n_order {
                let norm = row[k] * row[k] + row[n_order + k] * row[n_order + k];
                prop_assert!((norm - 1.0).abs() < 1e-10);
            }
        }
    }
}

// =============================================================================
// Property: harmonics average out over whole periods
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn columns_average_to_zero(
        n_order in 1usize..20,
        extra in 1usize..100,
        cycles in 1usize..4,
        offset in -5i32..5
    ) {
        // samples per cycle must exceed the highest harmonic
        let per_cycle = n_order + extra;
        let periods: Vec<f64> = (0..per_cycle * cycles)
            .map(|i| offset as f64 + i as f64 / per_cycle as f64)
            .collect();

        let modes = generate_fourier_modes(&periods, n_order);
        for column in modes.columns() {
            let mean = column.sum() / column.len() as f64;
            prop_assert!(mean.abs() < 1e-10, "mean {} for order {}", mean, n_order);
        }
    }
}

// =============================================================================
// Property: contraction keeps non-harmonic axes and equals the dot product
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn contraction_matches_dot_product(
        (n_order, weights) in (1usize..5).prop_flat_map(|n| (Just(n), weights_strategy(n))),
        periods in periods_strategy(60)
    ) {
        let features = fourier_features(&periods, n_order, "date", "fourier").unwrap();
        let out = combine(&features, &weights, "fourier").unwrap();

        let groups = weights.size_of("hierarchy").unwrap();
        prop_assert_eq!(out.shape(), &[periods.len(), groups][..]);

        for t in 0..periods.len() {
            for h in 0..groups {
                let expected: f64 = (0..2 * n_order)
                    .map(|j| features.get(&[t, j]).unwrap() * weights.get(&[h, j]).unwrap())
                    .sum();
                prop_assert!((out.get(&[t, h]).unwrap() - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn seasonality_is_deterministic(
        (n_order, weights) in (1usize..5).prop_flat_map(|n| (Just(n), weights_strategy(n))),
        days in prop::collection::vec(0.0..400.0_f64, 1..60)
    ) {
        let a = seasonality(&days, 365.25, n_order, &weights, "fourier").unwrap();
        let b = seasonality(&days, 365.25, n_order, &weights, "fourier").unwrap();
        prop_assert_eq!(a, b);
    }
}
