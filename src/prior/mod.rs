//! Prior distributions over named tensors.
//!
//! A [`Prior`] pairs a distribution with the axes its samples span. Any
//! distribution parameter may itself be a prior, which gives hierarchical
//! specifications:
//!
//! ```
//! use anofox_seasonality::core::Coords;
//! use anofox_seasonality::prior::Prior;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // per-harmonic location, shared across the hierarchy
//! let mu = Prior::normal(0.0, 1.0).with_dims(["fourier"]);
//! let prior = Prior::laplace(mu, 0.1).with_dims(["fourier", "hierarchy"]);
//!
//! let coords = Coords::new()
//!     .with("fourier", ["sin_1", "cos_1"])
//!     .with("hierarchy", ["A", "B", "C"]);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let samples = prior.sample(&coords, 1, 100, &mut rng).unwrap();
//! assert_eq!(samples.shape(), &[1, 100, 2, 3]);
//! ```

mod dataset;
mod sampler;

pub use dataset::Dataset;
pub use sampler::{ParameterReplay, PriorSampler, SamplerConfig, VariableFactory};

use crate::core::{Coords, NamedTensor};
use crate::error::{Result, SeasonalityError};
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::{Gamma, Laplace, Normal};
use std::fmt;

/// Axis enumerating independent sampling chains.
pub const CHAIN_DIM: &str = "chain";

/// Axis enumerating draws within a chain.
pub const DRAW_DIM: &str = "draw";

/// Value of a distribution parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// Fixed value, possibly varying along some of the prior's axes.
    Value(NamedTensor),
    /// Parameter drawn from its own prior.
    Prior(Box<Prior>),
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Value(NamedTensor::scalar(value))
    }
}

impl From<NamedTensor> for Parameter {
    fn from(value: NamedTensor) -> Self {
        Parameter::Value(value)
    }
}

impl From<Prior> for Parameter {
    fn from(prior: Prior) -> Self {
        Parameter::Prior(Box::new(prior))
    }
}

/// Supported distribution families.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorDistribution {
    /// Normal with mean `mu` and standard deviation `sigma`.
    Normal { mu: Parameter, sigma: Parameter },
    /// Laplace with location `mu` and scale `b`.
    Laplace { mu: Parameter, b: Parameter },
    /// Absolute value of a zero-mean normal with scale `sigma`.
    HalfNormal { sigma: Parameter },
    /// Gamma with shape `alpha` and rate `beta`.
    Gamma { alpha: Parameter, beta: Parameter },
}

impl PriorDistribution {
    pub fn name(&self) -> &'static str {
        match self {
            PriorDistribution::Normal { .. } => "Normal",
            PriorDistribution::Laplace { .. } => "Laplace",
            PriorDistribution::HalfNormal { .. } => "HalfNormal",
            PriorDistribution::Gamma { .. } => "Gamma",
        }
    }

    /// Parameters with their names, in the order [`Self::draw`] expects them.
    pub fn parameters(&self) -> Vec<(&'static str, &Parameter)> {
        match self {
            PriorDistribution::Normal { mu, sigma } => vec![("mu", mu), ("sigma", sigma)],
            PriorDistribution::Laplace { mu, b } => vec![("mu", mu), ("b", b)],
            PriorDistribution::HalfNormal { sigma } => vec![("sigma", sigma)],
            PriorDistribution::Gamma { alpha, beta } => vec![("alpha", alpha), ("beta", beta)],
        }
    }

    /// Draw one value given concrete parameter values.
    fn draw<R: Rng + ?Sized>(&self, values: &[f64], rng: &mut R) -> Result<f64> {
        let invalid = |err: &dyn fmt::Display| {
            SeasonalityError::InvalidParameter(format!("{}{:?}: {}", self.name(), values, err))
        };
        match self {
            PriorDistribution::Normal { .. } => Normal::new(values[0], values[1])
                .map(|d| d.sample(rng))
                .map_err(|e| invalid(&e)),
            PriorDistribution::Laplace { .. } => Laplace::new(values[0], values[1])
                .map(|d| d.sample(rng))
                .map_err(|e| invalid(&e)),
            PriorDistribution::HalfNormal { .. } => Normal::new(0.0, values[0])
                .map(|d| d.sample(rng).abs())
                .map_err(|e| invalid(&e)),
            PriorDistribution::Gamma { .. } => Gamma::new(values[0], values[1])
                .map(|d| d.sample(rng))
                .map_err(|e| invalid(&e)),
        }
    }
}

/// A distribution over a tensor with named axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Prior {
    distribution: PriorDistribution,
    dims: Vec<String>,
}

impl Prior {
    /// Scalar prior (no axes) for the given distribution.
    pub fn new(distribution: PriorDistribution) -> Self {
        Self {
            distribution,
            dims: Vec::new(),
        }
    }

    pub fn normal(mu: impl Into<Parameter>, sigma: impl Into<Parameter>) -> Self {
        Self::new(PriorDistribution::Normal {
            mu: mu.into(),
            sigma: sigma.into(),
        })
    }

    pub fn laplace(mu: impl Into<Parameter>, b: impl Into<Parameter>) -> Self {
        Self::new(PriorDistribution::Laplace {
            mu: mu.into(),
            b: b.into(),
        })
    }

    pub fn half_normal(sigma: impl Into<Parameter>) -> Self {
        Self::new(PriorDistribution::HalfNormal {
            sigma: sigma.into(),
        })
    }

    pub fn gamma(alpha: impl Into<Parameter>, beta: impl Into<Parameter>) -> Self {
        Self::new(PriorDistribution::Gamma {
            alpha: alpha.into(),
            beta: beta.into(),
        })
    }

    /// Set the axes the samples span.
    pub fn with_dims<I, S>(mut self, dims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dims = dims.into_iter().map(Into::into).collect();
        self
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn has_dim(&self, dim: &str) -> bool {
        self.dims.iter().any(|d| d == dim)
    }

    pub fn distribution(&self) -> &PriorDistribution {
        &self.distribution
    }

    /// Forward-sample the prior.
    ///
    /// The result spans `[chain, draw, *dims]`, with axis sizes taken from
    /// `coords`. Parameters are sampled (or taken as given) and broadcast by
    /// axis name onto that shape, so a parameter may only use axes of this
    /// prior.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        coords: &Coords,
        chains: usize,
        draws: usize,
        rng: &mut R,
    ) -> Result<NamedTensor> {
        let mut dims = vec![CHAIN_DIM.to_string(), DRAW_DIM.to_string()];
        for dim in &self.dims {
            if dims.contains(dim) {
                return Err(SeasonalityError::DuplicateAxis(dim.clone()));
            }
            dims.push(dim.clone());
        }
        let mut shape = vec![chains, draws];
        shape.extend(coords.shape_of(&self.dims)?);

        let mut columns = Vec::new();
        for (_, parameter) in self.distribution.parameters() {
            let resolved = match parameter {
                Parameter::Value(value) => value.broadcast_to(&dims, &shape)?,
                Parameter::Prior(prior) => prior
                    .sample(coords, chains, draws, &mut *rng)?
                    .broadcast_to(&dims, &shape)?,
            };
            columns.push(resolved.iter().copied().collect::<Vec<f64>>());
        }

        let n: usize = shape.iter().product();
        let mut values = Vec::with_capacity(n);
        let mut params = vec![0.0; columns.len()];
        for i in 0..n {
            for (slot, column) in params.iter_mut().zip(&columns) {
                *slot = column[i];
            }
            values.push(self.distribution.draw(&params, &mut *rng)?);
        }

        NamedTensor::from_shape_vec(dims, &shape, values)
    }
}

impl Default for Prior {
    /// `Laplace(mu = 0, b = 1)`.
    fn default() -> Self {
        Self::laplace(0.0, 1.0)
    }
}
