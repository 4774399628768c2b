//! Contraction of Fourier features against a weight tensor.
//!
//! Features live on `[sample, harmonic]`; weights carry the harmonic axis plus
//! any number of other axes (hierarchy levels, `chain`, `draw`, ...) in any
//! order. Both are aligned by axis name onto `[sample, *weight dims]`,
//! multiplied, and the harmonic axis is summed away.

use crate::core::{zip_with, NamedTensor};
use crate::error::{Result, SeasonalityError};
use tracing::trace;

/// Aligned product of `features` and `weights` before the harmonic reduction.
///
/// The output axes are the features' sample axis followed by the weights'
/// axes in their declared order.
///
/// # Errors
///
/// * [`SeasonalityError::InvalidShape`] if `features` is not two-dimensional.
/// * [`SeasonalityError::MissingAxis`] if either operand lacks `harmonic_dim`.
/// * [`SeasonalityError::AxisCollision`] if the weights already carry an axis
///   named like the sample axis. Callers must choose a sample axis name that
///   does not appear among the weight dims.
/// * [`SeasonalityError::DimensionMismatch`] if the harmonic sizes differ.
pub fn combine_components(
    features: &NamedTensor,
    weights: &NamedTensor,
    harmonic_dim: &str,
) -> Result<NamedTensor> {
    if features.ndim() != 2 {
        return Err(SeasonalityError::InvalidShape {
            expected: 2,
            got: features.ndim(),
        });
    }
    let feature_harmonic = features
        .size_of(harmonic_dim)
        .ok_or_else(|| missing_axis(harmonic_dim, features))?;
    let weight_harmonic = weights
        .size_of(harmonic_dim)
        .ok_or_else(|| missing_axis(harmonic_dim, weights))?;
    if feature_harmonic != weight_harmonic {
        return Err(SeasonalityError::DimensionMismatch {
            axis: harmonic_dim.to_string(),
            expected: feature_harmonic,
            got: weight_harmonic,
        });
    }

    let sample_dim = features
        .dims()
        .iter()
        .find(|d| d.as_str() != harmonic_dim)
        .cloned()
        .ok_or_else(|| SeasonalityError::DuplicateAxis(harmonic_dim.to_string()))?;
    if weights.has_dim(&sample_dim) {
        return Err(SeasonalityError::AxisCollision(sample_dim));
    }

    let mut dims = Vec::with_capacity(weights.ndim() + 1);
    dims.push(sample_dim);
    dims.extend(weights.dims().iter().cloned());

    trace!(
        dims = ?dims,
        features = ?features.shape(),
        weights = ?weights.shape(),
        "aligning fourier components"
    );

    zip_with(features, weights, &dims, |f, w| f * w)
}

/// Seasonality signal: features times weights, summed over `harmonic_dim`.
///
/// Output axes are `[sample, *weight dims without harmonic_dim]`.
///
/// # Example
///
/// ```
/// use anofox_seasonality::core::NamedTensor;
/// use anofox_seasonality::seasonality::{combine, fourier_features};
///
/// let features = fourier_features(&[0.0, 0.25, 0.5], 1, "date", "fourier").unwrap();
/// // beta over (hierarchy, fourier): rows are [sin_1, cos_1] weights
/// let weights = NamedTensor::from_shape_vec(
///     ["hierarchy", "fourier"],
///     &[2, 2],
///     vec![1.0, 0.0, 0.0, 2.0],
/// )
/// .unwrap();
///
/// let out = combine(&features, &weights, "fourier").unwrap();
/// assert_eq!(out.dims(), &["date".to_string(), "hierarchy".to_string()]);
/// assert_eq!(out.shape(), &[3, 2]);
/// // second group is 2·cos(2πp): at p = 0.5 this is -2
/// assert!((out.get(&[2, 1]).unwrap() + 2.0).abs() < 1e-12);
/// ```
pub fn combine(
    features: &NamedTensor,
    weights: &NamedTensor,
    harmonic_dim: &str,
) -> Result<NamedTensor> {
    combine_components(features, weights, harmonic_dim)?.sum_dim(harmonic_dim)
}

fn missing_axis(axis: &str, tensor: &NamedTensor) -> SeasonalityError {
    SeasonalityError::MissingAxis {
        axis: axis.to_string(),
        dims: tensor.dims().to_vec(),
    }
}
