//! Factories that turn priors into tensors.
//!
//! Seasonality terms never sample on their own; they ask a
//! [`VariableFactory`] for their weight tensor. [`PriorSampler`] draws fresh
//! samples, [`ParameterReplay`] hands back variables from an existing
//! [`Dataset`] (for example prior or posterior draws produced elsewhere).

use super::{Dataset, Prior};
use crate::core::{Coords, NamedTensor};
use crate::error::{Result, SeasonalityError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Source of named random tensors.
pub trait VariableFactory {
    /// Register labels for an axis.
    fn add_coord(&mut self, name: &str, labels: Vec<String>);

    /// Tensor for the variable `name` distributed as `prior`.
    fn create_variable(&mut self, name: &str, prior: &Prior) -> Result<NamedTensor>;

    /// Record a tensor derived from other variables.
    fn register_derived(&mut self, name: &str, tensor: NamedTensor) -> Result<()>;
}

/// Configuration for forward sampling.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Number of chains.
    pub chains: usize,
    /// Number of draws per chain.
    pub draws: usize,
    /// Random seed for reproducibility (None for random).
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            chains: 1,
            draws: 500,
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Single-chain config with the given number of draws.
    pub fn new(draws: usize) -> Self {
        Self {
            draws,
            ..Default::default()
        }
    }

    pub fn with_chains(mut self, chains: usize) -> Self {
        self.chains = chains;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Draws every requested variable from its prior and records it.
///
/// # Example
///
/// ```
/// use anofox_seasonality::core::Coords;
/// use anofox_seasonality::prior::{Prior, PriorSampler, SamplerConfig, VariableFactory};
///
/// let coords = Coords::new().with("channel", ["tv", "radio"]);
/// let mut sampler = PriorSampler::new(coords, SamplerConfig::new(10).with_seed(1));
///
/// let prior = Prior::half_normal(1.0).with_dims(["channel"]);
/// let beta = sampler.create_variable("beta", &prior).unwrap();
/// assert_eq!(beta.shape(), &[1, 10, 2]);
///
/// let dataset = sampler.into_dataset();
/// assert!(dataset.contains("beta"));
/// ```
#[derive(Debug)]
pub struct PriorSampler {
    config: SamplerConfig,
    rng: StdRng,
    dataset: Dataset,
}

impl PriorSampler {
    pub fn new(coords: Coords, config: SamplerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            dataset: Dataset::with_coords(coords),
        }
    }

    pub fn coords(&self) -> &Coords {
        self.dataset.coords()
    }

    /// Variables sampled or registered so far.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

impl VariableFactory for PriorSampler {
    fn add_coord(&mut self, name: &str, labels: Vec<String>) {
        self.dataset.coords_mut().insert(name, labels);
    }

    fn create_variable(&mut self, name: &str, prior: &Prior) -> Result<NamedTensor> {
        if self.dataset.contains(name) {
            return Err(SeasonalityError::DuplicateVariable(name.to_string()));
        }
        debug!(
            variable = name,
            distribution = prior.distribution().name(),
            dims = ?prior.dims(),
            chains = self.config.chains,
            draws = self.config.draws,
            "sampling prior"
        );
        let tensor = prior.sample(
            self.dataset.coords(),
            self.config.chains,
            self.config.draws,
            &mut self.rng,
        )?;
        self.dataset.insert(name, tensor.clone())?;
        Ok(tensor)
    }

    fn register_derived(&mut self, name: &str, tensor: NamedTensor) -> Result<()> {
        self.dataset.insert(name, tensor)
    }
}

/// Serves variables from an existing dataset instead of sampling them.
///
/// Requested variables must carry every axis of their prior; any extra axes
/// (`chain`, `draw`, ...) are passed through.
#[derive(Debug)]
pub struct ParameterReplay<'a> {
    parameters: &'a Dataset,
    derived: Dataset,
}

impl<'a> ParameterReplay<'a> {
    pub fn new(parameters: &'a Dataset) -> Self {
        Self {
            parameters,
            derived: Dataset::with_coords(parameters.coords().clone()),
        }
    }

    /// Derived tensors and coordinates registered during replay.
    pub fn derived(&self) -> &Dataset {
        &self.derived
    }
}

impl VariableFactory for ParameterReplay<'_> {
    fn add_coord(&mut self, name: &str, labels: Vec<String>) {
        self.derived.coords_mut().insert(name, labels);
    }

    fn create_variable(&mut self, name: &str, prior: &Prior) -> Result<NamedTensor> {
        let tensor = self.parameters.require(name)?;
        if let Some(dim) = prior.dims().iter().find(|d| !tensor.has_dim(d)) {
            return Err(SeasonalityError::MissingAxis {
                axis: dim.clone(),
                dims: tensor.dims().to_vec(),
            });
        }
        Ok(tensor.clone())
    }

    fn register_derived(&mut self, name: &str, tensor: NamedTensor) -> Result<()> {
        self.derived.insert(name, tensor)
    }
}
