//! Fourier seasonality terms.
//!
//! - [`generate_fourier_modes`]: sine/cosine features of periodic indices
//! - [`fourier_nodes`]: labels of the harmonic axis
//! - [`combine`]: name-aligned contraction of features with a weight tensor
//! - [`FourierSeasonality`]: validated yearly/monthly term with a weight prior

mod broadcast;
mod component;
mod fourier;

pub use broadcast::{combine, combine_components};
pub use component::{
    seasonality, FourierBuilder, FourierSeasonality, SeasonalityKind, DAY_DIM, DEFAULT_PREFIX,
};
pub use fourier::{fourier_features, fourier_nodes, generate_fourier_modes};
