//! # anofox-seasonality
//!
//! Fourier seasonality terms for marketing-mix models.
//!
//! Periodic effects (yearly, monthly) are modelled as weighted sums of
//! sine/cosine harmonics. Weights are tensors with named axes, so the same
//! term works for a single series, a hierarchy of groups, or a batch of
//! prior/posterior draws: features are aligned with the weights by axis name
//! and the harmonic axis is summed away.
//!
//! ```
//! use anofox_seasonality::prelude::*;
//!
//! let yearly = FourierSeasonality::yearly(3).unwrap();
//! let parameters = yearly
//!     .sample_prior(&Coords::new(), &SamplerConfig::new(50).with_seed(42))
//!     .unwrap();
//!
//! let curve = yearly.sample_curve(&parameters).unwrap();
//! assert_eq!(curve.shape(), &[1, 50, 367]);
//! ```

pub mod core;
pub mod error;
pub mod prior;
pub mod seasonality;
pub mod utils;

pub use error::{Result, SeasonalityError};

pub mod prelude {
    pub use crate::core::{Coords, NamedTensor};
    pub use crate::error::{Result, SeasonalityError};
    pub use crate::prior::{Dataset, Prior, PriorSampler, SamplerConfig, VariableFactory};
    pub use crate::seasonality::{
        combine, generate_fourier_modes, seasonality, FourierBuilder, FourierSeasonality,
        SeasonalityKind,
    };
}
