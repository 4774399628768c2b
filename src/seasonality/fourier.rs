//! Fourier basis generation.
//!
//! A periodic index `p` (fraction of a period elapsed) is expanded into
//! `2 * n_order` features: `sin(2πkp)` for `k = 1..=n_order`, followed by
//! `cos(2πkp)` for the same multiples.

use crate::core::NamedTensor;
use crate::error::{Result, SeasonalityError};
use ndarray::Array2;
use std::f64::consts::PI;

/// Sine/cosine features for each periodic index.
///
/// Returns a matrix of shape `(periods.len(), 2 * n_order)` with columns
/// ordered `[sin_1, .., sin_n, cos_1, .., cos_n]`. Indices outside `[0, 1]`
/// are valid; NaN and infinite inputs propagate.
///
/// `n_order` must be at least 1; callers validate it beforehand.
///
/// # Example
///
/// ```
/// use anofox_seasonality::seasonality::generate_fourier_modes;
///
/// let modes = generate_fourier_modes(&[0.0, 0.25], 2);
/// assert_eq!(modes.dim(), (2, 4));
/// // sin(2π · 0.25) = 1
/// assert!((modes[[1, 0]] - 1.0).abs() < 1e-12);
/// ```
pub fn generate_fourier_modes(periods: &[f64], n_order: usize) -> Array2<f64> {
    let mut modes = Array2::zeros((periods.len(), 2 * n_order));

    for (row, &period) in periods.iter().enumerate() {
        let x = 2.0 * PI * period;
        for k in 0..n_order {
            let value = x * (k + 1) as f64;
            modes[[row, k]] = value.sin();
            modes[[row, n_order + k]] = value.cos();
        }
    }

    modes
}

/// Labels of the harmonic axis, aligned with the columns of
/// [`generate_fourier_modes`].
///
/// ```
/// use anofox_seasonality::seasonality::fourier_nodes;
///
/// assert_eq!(fourier_nodes(2), vec!["sin_1", "sin_2", "cos_1", "cos_2"]);
/// ```
pub fn fourier_nodes(n_order: usize) -> Vec<String> {
    ["sin", "cos"]
        .iter()
        .flat_map(|func| (1..=n_order).map(move |i| format!("{}_{}", func, i)))
        .collect()
}

/// Fourier modes as a tensor over `[sample_dim, harmonic_dim]`.
pub fn fourier_features(
    periods: &[f64],
    n_order: usize,
    sample_dim: &str,
    harmonic_dim: &str,
) -> Result<NamedTensor> {
    if sample_dim == harmonic_dim {
        return Err(SeasonalityError::AxisCollision(sample_dim.to_string()));
    }
    NamedTensor::from_matrix(
        sample_dim,
        harmonic_dim,
        generate_fourier_modes(periods, n_order),
    )
}
