//! Seasonal rainfall and astronomical tide models.

use std::f64::consts::TAU;

use chrono::{Datelike as _, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution as _, Gamma, Normal};

use crate::GenerateError;

/// Probability that a day's rainfall is an extreme event.
pub const EXTREME_RAIN_PROBABILITY: f64 = 0.05;

/// Range of the multiplier applied to extreme-event rainfall.
pub const EXTREME_RAIN_FACTOR: std::ops::Range<f64> = 2.0..4.0;

/// Lowest tide height the model emits, in meters.
pub const MIN_TIDE_M: f64 = 0.5;

const TIDE_MEAN_M: f64 = 1.2;
const TIDE_ANNUAL_AMPLITUDE_M: f64 = 0.4;
const TIDE_LUNAR_AMPLITUDE_M: f64 = 0.3;
const TIDE_NOISE_STD_M: f64 = 0.08;
const DAYS_PER_YEAR: f64 = 365.25;
const LUNAR_CYCLE_DAYS: f64 = 29.5;

/// Rainfall regime. March through August is the wet season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    /// March-August.
    Wet,
    /// September-February.
    Dry,
}

impl Season {
    /// Classifies a calendar month (1-12).
    #[must_use]
    pub const fn for_month(month: u32) -> Self {
        if month >= 3 && month <= 8 {
            Self::Wet
        } else {
            Self::Dry
        }
    }

    /// Gamma shape parameter.
    #[must_use]
    pub const fn shape(self) -> f64 {
        match self {
            Self::Wet => 3.5,
            Self::Dry => 2.0,
        }
    }

    /// Mean daily rainfall in mm.
    #[must_use]
    pub const fn mean_mm(self) -> f64 {
        match self {
            Self::Wet => 25.0,
            Self::Dry => 8.0,
        }
    }
}

/// Pre-built distributions for the rainfall and tide draws.
#[derive(Debug, Clone)]
pub struct EnvironmentModel {
    wet: Gamma<f64>,
    dry: Gamma<f64>,
    tide_noise: Normal<f64>,
}

impl EnvironmentModel {
    /// Builds the seasonal Gamma distributions and the tide noise.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Distribution`] if a parameter is invalid.
    pub fn new() -> Result<Self, GenerateError> {
        Ok(Self {
            wet: season_gamma(Season::Wet)?,
            dry: season_gamma(Season::Dry)?,
            tide_noise: Normal::new(0.0, TIDE_NOISE_STD_M)
                .map_err(|e| GenerateError::distribution("tide noise", &e))?,
        })
    }

    /// Draws one day's rainfall in mm.
    ///
    /// Consumes one Gamma draw and one uniform draw, plus one more
    /// uniform draw on extreme-event days.
    pub fn draw_rainfall<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> f64 {
        let gamma = match Season::for_month(date.month()) {
            Season::Wet => &self.wet,
            Season::Dry => &self.dry,
        };
        let mut rainfall = gamma.sample(rng).max(0.0);
        if rng.r#gen::<f64>() < EXTREME_RAIN_PROBABILITY {
            rainfall *= rng.gen_range(EXTREME_RAIN_FACTOR);
        }
        rainfall
    }

    /// Draws one day's tide height in meters.
    pub fn draw_tide<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> f64 {
        let noise = self.tide_noise.sample(rng);
        tide_with_noise(date.ordinal(), noise)
    }
}

fn season_gamma(season: Season) -> Result<Gamma<f64>, GenerateError> {
    Gamma::new(season.shape(), season.mean_mm() / season.shape())
        .map_err(|e| GenerateError::distribution("seasonal rainfall", &e))
}

/// Deterministic tide component for a day of the year (1-based).
#[must_use]
pub fn tide_baseline(day_of_year: u32) -> f64 {
    let doy = f64::from(day_of_year);
    let annual = TIDE_ANNUAL_AMPLITUDE_M * (TAU * doy / DAYS_PER_YEAR).sin();
    let lunar = TIDE_LUNAR_AMPLITUDE_M * (TAU * (doy % LUNAR_CYCLE_DAYS) / LUNAR_CYCLE_DAYS).sin();
    TIDE_MEAN_M + annual + lunar
}

/// Baseline plus noise, clamped to [`MIN_TIDE_M`].
#[must_use]
pub fn tide_with_noise(day_of_year: u32, noise: f64) -> f64 {
    (tide_baseline(day_of_year) + noise).max(MIN_TIDE_M)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_risk_risk::FloodRng;

    #[test]
    fn classifies_seasons() {
        assert_eq!(Season::for_month(2), Season::Dry);
        assert_eq!(Season::for_month(3), Season::Wet);
        assert_eq!(Season::for_month(8), Season::Wet);
        assert_eq!(Season::for_month(9), Season::Dry);
        assert_eq!(Season::for_month(12), Season::Dry);
    }

    #[test]
    fn baseline_matches_formula() {
        let doy = 100_u32;
        let d = f64::from(doy);
        let expected = 1.2
            + 0.4 * (2.0 * std::f64::consts::PI * d / 365.25).sin()
            + 0.3 * (2.0 * std::f64::consts::PI * (d % 29.5) / 29.5).sin();
        assert!((tide_baseline(doy) - expected).abs() < 1e-12);
    }

    #[test]
    fn tide_never_drops_below_floor() {
        assert_eq!(tide_with_noise(1, -10.0), MIN_TIDE_M);
        let model = EnvironmentModel::new().unwrap();
        let mut rng = FloodRng::from_seed_u64(3);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for day in start.iter_days().take(366) {
            assert!(model.draw_tide(day, &mut rng) >= MIN_TIDE_M);
        }
    }

    #[test]
    fn rainfall_is_non_negative_and_seasonal() {
        let model = EnvironmentModel::new().unwrap();
        let mut rng = FloodRng::from_seed_u64(11);
        let wet_day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let dry_day = NaiveDate::from_ymd_opt(2024, 11, 10).unwrap();

        let n = 5_000;
        let wet: Vec<f64> = (0..n).map(|_| model.draw_rainfall(wet_day, &mut rng)).collect();
        let dry: Vec<f64> = (0..n).map(|_| model.draw_rainfall(dry_day, &mut rng)).collect();

        assert!(wet.iter().chain(&dry).all(|v| *v >= 0.0));
        let wet_mean = wet.iter().sum::<f64>() / f64::from(n);
        let dry_mean = dry.iter().sum::<f64>() / f64::from(n);
        // Gamma mean plus the 5% extreme-event uplift (factor averages 3).
        assert!((wet_mean - 27.5).abs() < 1.5, "wet mean {wet_mean}");
        assert!((dry_mean - 8.8).abs() < 0.6, "dry mean {dry_mean}");
    }
}
