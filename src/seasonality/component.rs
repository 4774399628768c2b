//! Fourier seasonality components.
//!
//! A [`FourierSeasonality`] is a validated description of one periodic term:
//! which period it covers ([`SeasonalityKind`]), how many harmonics it uses,
//! the prefix naming its harmonic axis, and the prior over its weights.
//!
//! # Example
//!
//! ```
//! use anofox_seasonality::core::Coords;
//! use anofox_seasonality::prior::{Prior, SamplerConfig};
//! use anofox_seasonality::seasonality::{FourierBuilder, SeasonalityKind};
//!
//! let prior = Prior::laplace(0.0, 0.1).with_dims(["fourier", "hierarchy"]);
//! let yearly = FourierBuilder::new(SeasonalityKind::Yearly, 2)
//!     .prior(prior)
//!     .build()
//!     .unwrap();
//!
//! let coords = Coords::new().with("hierarchy", ["A", "B"]);
//! let parameters = yearly
//!     .sample_prior(&coords, &SamplerConfig::new(20).with_seed(1))
//!     .unwrap();
//! let curve = yearly.sample_curve(&parameters).unwrap();
//!
//! assert_eq!(curve.size_of("day"), Some(367));
//! assert_eq!(curve.size_of("hierarchy"), Some(2));
//! assert_eq!(curve.size_of("draw"), Some(20));
//! ```

use super::broadcast::{combine, combine_components};
use super::fourier::{fourier_features, fourier_nodes};
use crate::core::{Coords, NamedTensor};
use crate::error::{Result, SeasonalityError};
use crate::prior::{
    Dataset, ParameterReplay, Prior, PriorSampler, SamplerConfig, VariableFactory, CHAIN_DIM,
    DRAW_DIM,
};
use crate::utils::calendar::{day_of_year, DAYS_IN_MONTH, DAYS_IN_YEAR};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Axis of the day values a seasonality is evaluated at.
pub const DAY_DIM: &str = "day";

/// Default prefix naming the harmonic axis.
pub const DEFAULT_PREFIX: &str = "fourier";

/// Period covered by a seasonality term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonalityKind {
    /// One cycle per year ([`DAYS_IN_YEAR`] days).
    Yearly,
    /// One cycle per month ([`DAYS_IN_MONTH`] days).
    Monthly,
}

impl SeasonalityKind {
    /// Number of days in one period.
    pub fn days_in_period(&self) -> f64 {
        match self {
            SeasonalityKind::Yearly => DAYS_IN_YEAR,
            SeasonalityKind::Monthly => DAYS_IN_MONTH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonalityKind::Yearly => "yearly",
            SeasonalityKind::Monthly => "monthly",
        }
    }
}

impl fmt::Display for SeasonalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonalityKind {
    type Err = SeasonalityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yearly" => Ok(SeasonalityKind::Yearly),
            "monthly" => Ok(SeasonalityKind::Monthly),
            _ => Err(SeasonalityError::UnknownKind(s.to_string())),
        }
    }
}

/// Seasonality of one period from raw day values.
///
/// Divides `raw_index` by `days_in_period`, expands it into `2 * n_order`
/// Fourier features over a leading `"day"` axis and contracts them with
/// `weights` along `harmonic_dim`. The output spans `day` followed by the
/// non-harmonic axes of `weights`.
///
/// # Errors
///
/// [`SeasonalityError::InvalidOrder`] when `n_order == 0` and
/// [`SeasonalityError::MissingAxis`] when `weights` lacks `harmonic_dim`, both
/// reported before any computation. Contraction errors from
/// [`combine`](super::combine) are passed on.
///
/// # Example
///
/// ```
/// use anofox_seasonality::core::NamedTensor;
/// use anofox_seasonality::seasonality::seasonality;
///
/// let days: Vec<f64> = (0..52).map(|w| (7 * w) as f64).collect();
/// let weights = NamedTensor::full(["fourier", "hierarchy"], &[4, 3], 0.5).unwrap();
///
/// let out = seasonality(&days, 365.25, 2, &weights, "fourier").unwrap();
/// assert_eq!(out.shape(), &[52, 3]);
/// ```
pub fn seasonality(
    raw_index: &[f64],
    days_in_period: f64,
    n_order: usize,
    weights: &NamedTensor,
    harmonic_dim: &str,
) -> Result<NamedTensor> {
    if n_order == 0 {
        return Err(SeasonalityError::InvalidOrder { n_order });
    }
    if !weights.has_dim(harmonic_dim) {
        return Err(SeasonalityError::MissingAxis {
            axis: harmonic_dim.to_string(),
            dims: weights.dims().to_vec(),
        });
    }

    let periods: Vec<f64> = raw_index.iter().map(|d| d / days_in_period).collect();
    let features = fourier_features(&periods, n_order, DAY_DIM, harmonic_dim)?;
    combine(&features, weights, harmonic_dim)
}

/// A validated Fourier seasonality term.
#[derive(Debug, Clone, PartialEq)]
pub struct FourierSeasonality {
    kind: SeasonalityKind,
    n_order: usize,
    prefix: String,
    prior: Prior,
    variable_name: String,
}

/// Builder for [`FourierSeasonality`].
///
/// Defaults: prefix `"fourier"`, prior `Laplace(0, 1)` over the prefix axis,
/// variable name `"{prefix}_beta"`.
#[derive(Debug, Clone)]
pub struct FourierBuilder {
    kind: SeasonalityKind,
    n_order: usize,
    prefix: Option<String>,
    prior: Option<Prior>,
    name: Option<String>,
}

impl FourierBuilder {
    pub fn new(kind: SeasonalityKind, n_order: usize) -> Self {
        Self {
            kind,
            n_order,
            prefix: None,
            prior: None,
            name: None,
        }
    }

    /// Name of the harmonic axis; use distinct prefixes to combine terms.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Prior over the weights. Must span the prefix axis, or no axes at all.
    pub fn prior(mut self, prior: Prior) -> Self {
        self.prior = Some(prior);
        self
    }

    /// Name of the weight variable.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate and build the seasonality term.
    ///
    /// # Errors
    ///
    /// * [`SeasonalityError::InvalidOrder`] if `n_order` is zero.
    /// * [`SeasonalityError::NameCollision`] if the variable name equals the
    ///   prefix.
    /// * [`SeasonalityError::MissingAxis`] if the prior declares axes but not
    ///   the prefix.
    pub fn build(self) -> Result<FourierSeasonality> {
        if self.n_order == 0 {
            return Err(SeasonalityError::InvalidOrder {
                n_order: self.n_order,
            });
        }

        let prefix = self.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let variable_name = self.name.unwrap_or_else(|| format!("{}_beta", prefix));
        if variable_name == prefix {
            return Err(SeasonalityError::NameCollision(prefix));
        }

        let mut prior = self.prior.unwrap_or_default();
        if prior.dims().is_empty() {
            prior = prior.with_dims([prefix.clone()]);
        }
        if !prior.has_dim(&prefix) {
            return Err(SeasonalityError::MissingAxis {
                axis: prefix,
                dims: prior.dims().to_vec(),
            });
        }

        debug!(
            kind = %self.kind,
            n_order = self.n_order,
            prefix = %prefix,
            variable = %variable_name,
            dims = ?prior.dims(),
            "built fourier seasonality"
        );

        Ok(FourierSeasonality {
            kind: self.kind,
            n_order: self.n_order,
            prefix,
            prior,
            variable_name,
        })
    }
}

impl FourierSeasonality {
    /// Seasonality with default prefix, prior and variable name.
    pub fn new(kind: SeasonalityKind, n_order: usize) -> Result<Self> {
        FourierBuilder::new(kind, n_order).build()
    }

    pub fn yearly(n_order: usize) -> Result<Self> {
        Self::new(SeasonalityKind::Yearly, n_order)
    }

    pub fn monthly(n_order: usize) -> Result<Self> {
        Self::new(SeasonalityKind::Monthly, n_order)
    }

    pub fn builder(kind: SeasonalityKind, n_order: usize) -> FourierBuilder {
        FourierBuilder::new(kind, n_order)
    }

    pub fn kind(&self) -> SeasonalityKind {
        self.kind
    }

    pub fn n_order(&self) -> usize {
        self.n_order
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn prior(&self) -> &Prior {
        &self.prior
    }

    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    pub fn days_in_period(&self) -> f64 {
        self.kind.days_in_period()
    }

    /// Labels of the harmonic axis.
    pub fn nodes(&self) -> Vec<String> {
        fourier_nodes(self.n_order)
    }

    /// Seasonality at the given days of the year.
    ///
    /// Registers the harmonic axis labels with `factory`, obtains the weight
    /// tensor from it, and returns the signal over `day` and every
    /// non-harmonic weight axis.
    pub fn apply<F>(&self, factory: &mut F, day_of_year: &[f64]) -> Result<NamedTensor>
    where
        F: VariableFactory + ?Sized,
    {
        self.apply_with_callback(factory, day_of_year, |_| {})
    }

    /// Like [`Self::apply`]; `callback` sees the per-harmonic contributions
    /// (axes `[day, *prior dims]`) before they are summed.
    pub fn apply_with_callback<F, C>(
        &self,
        factory: &mut F,
        day_of_year: &[f64],
        callback: C,
    ) -> Result<NamedTensor>
    where
        F: VariableFactory + ?Sized,
        C: FnOnce(&NamedTensor),
    {
        let periods: Vec<f64> = day_of_year
            .iter()
            .map(|d| d / self.days_in_period())
            .collect();

        factory.add_coord(&self.prefix, self.nodes());
        let beta = factory.create_variable(&self.variable_name, &self.prior)?;

        let features = fourier_features(&periods, self.n_order, DAY_DIM, &self.prefix)?;
        let components = combine_components(&features, &beta, &self.prefix)?;
        callback(&components);

        components.sum_dim(&self.prefix)
    }

    /// [`Self::apply`] with days of the year taken from timestamps.
    pub fn apply_dates<F>(&self, factory: &mut F, dates: &[DateTime<Utc>]) -> Result<NamedTensor>
    where
        F: VariableFactory + ?Sized,
    {
        self.apply(factory, &day_of_year(dates))
    }

    /// Forward-sample the weight prior.
    ///
    /// `coords` supplies labels for any non-harmonic prior axes; the harmonic
    /// axis labels are added here. The returned dataset holds the weights
    /// under [`Self::variable_name`] with axes `[chain, draw, *prior dims]`.
    pub fn sample_prior(&self, coords: &Coords, config: &SamplerConfig) -> Result<Dataset> {
        let mut coords = coords.clone();
        coords.insert(self.prefix.clone(), self.nodes());

        let mut sampler = PriorSampler::new(coords, config.clone());
        sampler.create_variable(&self.variable_name, &self.prior)?;
        Ok(sampler.into_dataset())
    }

    /// Seasonality over one full period for every sample in `parameters`.
    ///
    /// Days `0, 1, ..` up to and including the period length are evaluated
    /// (367 days for yearly terms). The output spans `chain`, `draw`, `day`
    /// and then the remaining non-harmonic weight axes in declared order.
    /// Other variables in `parameters` are ignored.
    pub fn sample_curve(&self, parameters: &Dataset) -> Result<NamedTensor> {
        let n_days = (self.days_in_period() + 1.0).ceil() as usize;
        let full_period: Vec<f64> = (0..n_days).map(|d| d as f64).collect();

        let curve = self.apply(&mut ParameterReplay::new(parameters), &full_period)?;

        let mut order: Vec<&str> = [CHAIN_DIM, DRAW_DIM]
            .into_iter()
            .filter(|d| curve.has_dim(d))
            .collect();
        order.push(DAY_DIM);
        order.extend(
            curve
                .dims()
                .iter()
                .map(String::as_str)
                .filter(|d| ![CHAIN_DIM, DRAW_DIM, DAY_DIM].contains(d)),
        );
        curve.transpose(order.as_slice())
    }
}
