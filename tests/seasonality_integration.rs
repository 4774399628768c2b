//! Integration tests for Fourier seasonality terms.
//!
//! These tests exercise the public API end to end: building terms, sampling
//! their priors, evaluating them on calendar data and sampling full-period
//! curves.

use anofox_seasonality::core::{Coords, NamedTensor};
use anofox_seasonality::prior::{
    Dataset, ParameterReplay, Prior, PriorSampler, SamplerConfig, VariableFactory,
};
use anofox_seasonality::seasonality::{
    combine, fourier_features, generate_fourier_modes, seasonality, FourierBuilder,
    FourierSeasonality, SeasonalityKind,
};
use anofox_seasonality::utils::{day_of_year, DAYS_IN_YEAR};
use anofox_seasonality::SeasonalityError;
use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};

fn weekly_dates(n: usize) -> Vec<chrono::DateTime<Utc>> {
    let base = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    (0..n).map(|i| base + Duration::weeks(i as i64)).collect()
}

fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    let step = (stop - start) / (num - 1) as f64;
    (0..num).map(|i| start + step * i as f64).collect()
}

#[test]
fn fifty_points_tenth_order() {
    let modes = generate_fourier_modes(&linspace(0.0, 1.0, 50), 10);
    assert_eq!(modes.dim(), (50, 20));
    assert!(modes.iter().all(|&v| (-1.0..=1.0).contains(&v)));
}

#[test]
fn zero_order_component_is_rejected() {
    for kind in [SeasonalityKind::Yearly, SeasonalityKind::Monthly] {
        let err = FourierSeasonality::new(kind, 0).unwrap_err();
        assert_eq!(err, SeasonalityError::InvalidOrder { n_order: 0 });
    }
}

#[test]
fn hierarchy_weights_over_weekly_features() {
    let periods: Vec<f64> = day_of_year(&weekly_dates(52))
        .iter()
        .map(|d| d / DAYS_IN_YEAR)
        .collect();
    let features = fourier_features(&periods, 2, "date", "fourier").unwrap();
    assert_eq!(features.shape(), &[52, 4]);

    let weights = NamedTensor::full(["fourier", "hierarchy"], &[4, 3], 0.25).unwrap();
    let out = combine(&features, &weights, "fourier").unwrap();

    assert_eq!(out.dims(), &["date".to_string(), "hierarchy".to_string()]);
    assert_eq!(out.shape(), &[52, 3]);
}

#[test]
fn sample_axis_collision_is_reported() {
    let features = fourier_features(&[0.1, 0.2], 1, "hierarchy", "fourier").unwrap();
    let weights = NamedTensor::full(["fourier", "hierarchy"], &[2, 2], 1.0).unwrap();

    let err = combine(&features, &weights, "fourier").unwrap_err();
    assert_eq!(err, SeasonalityError::AxisCollision("hierarchy".to_string()));
}

#[test]
fn seasonality_twice_is_identical() {
    let days = day_of_year(&weekly_dates(104));
    let weights = NamedTensor::from_shape_vec(
        ["fourier", "hierarchy"],
        &[4, 2],
        vec![0.5, -0.5, 0.1, 0.2, -1.0, 0.0, 0.3, 0.7],
    )
    .unwrap();

    let a = seasonality(&days, DAYS_IN_YEAR, 2, &weights, "fourier").unwrap();
    let b = seasonality(&days, DAYS_IN_YEAR, 2, &weights, "fourier").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.shape(), &[104, 2]);
}

#[test]
fn yearly_and_monthly_share_a_sampler() {
    let yearly = FourierSeasonality::builder(SeasonalityKind::Yearly, 6)
        .prefix("yearly")
        .build()
        .unwrap();
    let monthly = FourierSeasonality::builder(SeasonalityKind::Monthly, 3)
        .prefix("monthly")
        .build()
        .unwrap();

    let dates = weekly_dates(52);
    let mut sampler = PriorSampler::new(
        Coords::new().with("date", 0..52),
        SamplerConfig::new(20).with_seed(2024),
    );

    let yearly_trend = yearly.apply_dates(&mut sampler, &dates).unwrap();
    let monthly_trend = monthly.apply_dates(&mut sampler, &dates).unwrap();
    let trend = yearly_trend.add(&monthly_trend).unwrap();
    sampler.register_derived("trend", trend.clone()).unwrap();

    assert_eq!(trend.shape(), &[52, 1, 20]);

    let dataset = sampler.into_dataset();
    assert_eq!(dataset.require("yearly_beta").unwrap().size_of("yearly"), Some(12));
    assert_eq!(dataset.require("monthly_beta").unwrap().size_of("monthly"), Some(6));
    assert!(dataset.contains("trend"));
    assert_eq!(dataset.coords().size("yearly"), Some(12));
    assert_eq!(dataset.coords().size("monthly"), Some(6));
}

#[test]
fn out_of_sample_reuses_fitted_weights() {
    let yearly = FourierSeasonality::yearly(3).unwrap();
    let parameters = yearly
        .sample_prior(&Coords::new(), &SamplerConfig::new(15).with_seed(9))
        .unwrap();

    let dates = weekly_dates(52 * 3);
    let (training, testing) = dates.split_at(52 * 2);

    let in_sample = yearly
        .apply_dates(&mut ParameterReplay::new(&parameters), training)
        .unwrap();
    let out_of_sample = yearly
        .apply_dates(&mut ParameterReplay::new(&parameters), testing)
        .unwrap();

    assert_eq!(in_sample.shape(), &[104, 1, 15]);
    assert_eq!(out_of_sample.shape(), &[52, 1, 15]);
}

#[test]
fn hierarchical_prior_curve() {
    let mu = NamedTensor::from_shape_vec(["fourier"], &[4], vec![0.0, 0.0, -1.0, 0.0]).unwrap();
    let sigma = Prior::gamma(1.0, 10.0).with_dims(["fourier"]);
    let prior = Prior::normal(mu, sigma).with_dims(["hierarchy", "fourier"]);

    let yearly = FourierBuilder::new(SeasonalityKind::Yearly, 2)
        .prior(prior)
        .build()
        .unwrap();

    let coords = Coords::new().with("hierarchy", ["A", "B"]);
    let parameters = yearly
        .sample_prior(&coords, &SamplerConfig::new(30).with_seed(17))
        .unwrap();
    let curve = yearly.sample_curve(&parameters).unwrap();

    assert_eq!(
        curve.dims(),
        &[
            "chain".to_string(),
            "draw".to_string(),
            "day".to_string(),
            "hierarchy".to_string()
        ]
    );
    assert_eq!(curve.shape(), &[1, 30, 367, 2]);
}

#[test]
fn curve_from_fixed_weights() {
    // weights [sin_1, cos_1] = [2, 0] -> curve is 2 sin(2πd/365.25)
    let mut parameters = Dataset::new();
    parameters
        .insert(
            "fourier_beta",
            NamedTensor::from_shape_vec(["chain", "draw", "fourier"], &[1, 1, 2], vec![2.0, 0.0])
                .unwrap(),
        )
        .unwrap();

    let yearly = FourierSeasonality::yearly(1).unwrap();
    let curve = yearly.sample_curve(&parameters).unwrap();

    assert_eq!(curve.shape(), &[1, 1, 367]);
    for day in [0usize, 50, 91, 200, 366] {
        let expected = 2.0 * (2.0 * std::f64::consts::PI * day as f64 / DAYS_IN_YEAR).sin();
        assert_relative_eq!(curve.get(&[0, 0, day]).unwrap(), expected, epsilon = 1e-12);
    }
}

#[test]
fn parse_kind_then_build() {
    let kind: SeasonalityKind = "monthly".parse().unwrap();
    let monthly = FourierSeasonality::new(kind, 2).unwrap();
    assert_relative_eq!(monthly.days_in_period(), 30.4375);

    let err = "weekly".parse::<SeasonalityKind>().unwrap_err();
    assert_eq!(err, SeasonalityError::UnknownKind("weekly".to_string()));
}
