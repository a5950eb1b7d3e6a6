//! Generation-time occurrence model.
//!
//! Turns rainfall, tide, and a neighborhood's static attributes into a
//! Poisson rate λ and draws an integer occurrence count from it. The
//! counts this produces are synthetic: they follow a known generative
//! process and are not field measurements, even when rainfall and tide
//! come from real gauges.

use flood_risk_neighborhood_models::{Neighborhood, NeighborhoodCategory};
use rand::Rng;
use rand_distr::{Distribution as _, Poisson};
use serde::Serialize;

/// Baseline rate before any rainfall, tide, or vulnerability contribution.
pub const BASE_RATE: f64 = 0.5;

/// Upper bound on λ.
pub const MAX_RATE: f64 = 15.0;

/// Rainfall (mm) that yields a rain sub-score of 1.0 before multipliers.
const RAIN_SCALE_MM: f64 = 50.0;

/// Tide height (m) below which the tide sub-score is zero.
const TIDE_NEUTRAL_M: f64 = 1.0;

/// Tide rise (m) above neutral that yields a tide sub-score of 1.0.
const TIDE_SCALE_M: f64 = 0.5;

const RAIN_WEIGHT: f64 = 0.4;
const TIDE_WEIGHT: f64 = 0.35;
const VULNERABILITY_WEIGHT: f64 = 0.25;

/// Reference density (people/km²) at which the density scale is 1.0.
const DENSITY_REFERENCE: f64 = 10_000.0;
const DENSITY_EXPONENT: f64 = 0.3;

/// Category-dependent multipliers applied to each sub-score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryFactors {
    /// Multiplier on the tide sub-score.
    pub tide: f64,
    /// Multiplier on the rain sub-score.
    pub rain: f64,
    /// Multiplier on the vulnerability sub-score.
    pub vulnerability: f64,
}

impl CategoryFactors {
    /// Returns the fixed multipliers for a neighborhood category.
    #[must_use]
    pub const fn for_category(category: NeighborhoodCategory) -> Self {
        match category {
            NeighborhoodCategory::Coastal => Self {
                tide: 2.5,
                rain: 1.2,
                vulnerability: 1.8,
            },
            NeighborhoodCategory::Riverside => Self {
                tide: 1.8,
                rain: 2.2,
                vulnerability: 2.0,
            },
            NeighborhoodCategory::Highland => Self {
                tide: 0.1,
                rain: 1.5,
                vulnerability: 0.8,
            },
            NeighborhoodCategory::DenseUrban | NeighborhoodCategory::MediumUrban => Self {
                tide: 0.8,
                rain: 1.8,
                vulnerability: 1.5,
            },
        }
    }
}

/// Intermediate terms of the λ computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBreakdown {
    /// Normalized rainfall sub-score.
    pub rain_score: f64,
    /// Normalized tide sub-score (zero at or below neutral tide).
    pub tide_score: f64,
    /// Vulnerability sub-score.
    pub vulnerability_score: f64,
    /// `(density / 10000)^0.3`.
    pub density_scale: f64,
    /// Final clamped rate.
    pub rate: f64,
}

/// Computes every term of the occurrence rate for one observation.
#[must_use]
pub fn rate_breakdown(
    rainfall_mm: f64,
    tide_m: f64,
    neighborhood: &Neighborhood,
) -> RateBreakdown {
    let factors = CategoryFactors::for_category(neighborhood.category);

    let rain_score =
        (rainfall_mm / RAIN_SCALE_MM) * neighborhood.rainfall_sensitivity * factors.rain;
    let tide_score = if tide_m > TIDE_NEUTRAL_M {
        ((tide_m - TIDE_NEUTRAL_M) / TIDE_SCALE_M) * neighborhood.tide_sensitivity * factors.tide
    } else {
        0.0
    };
    let vulnerability_score = neighborhood.vulnerability * factors.vulnerability;

    #[allow(clippy::cast_precision_loss)]
    let density_scale = (neighborhood.population_density as f64 / DENSITY_REFERENCE)
        .powf(DENSITY_EXPONENT);

    let raw = VULNERABILITY_WEIGHT.mul_add(
        vulnerability_score,
        TIDE_WEIGHT.mul_add(tide_score, RAIN_WEIGHT.mul_add(rain_score, BASE_RATE)),
    );
    let rate = (raw * density_scale).clamp(0.0, MAX_RATE);

    RateBreakdown {
        rain_score,
        tide_score,
        vulnerability_score,
        density_scale,
        rate,
    }
}

/// Returns the Poisson rate λ for one (date, neighborhood) observation.
#[must_use]
pub fn occurrence_rate(rainfall_mm: f64, tide_m: f64, neighborhood: &Neighborhood) -> f64 {
    rate_breakdown(rainfall_mm, tide_m, neighborhood).rate
}

/// Draws one Poisson-distributed occurrence count with rate `rate`.
///
/// A non-positive or non-finite rate yields zero without consuming
/// randomness.
pub fn draw_occurrences<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> u32 {
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    let Ok(poisson) = Poisson::new(rate) else {
        return 0;
    };
    let count: f64 = poisson.sample(rng);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as u32;
    count
}
