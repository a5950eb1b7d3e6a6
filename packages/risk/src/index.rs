//! Post-hoc categorical flood-risk index.
//!
//! Scores an observation on a 0-1 scale and buckets it into
//! low/moderate/high. This is a reporting index, calibrated separately
//! from the generation-time rate in [`crate::occurrence`], and the two
//! are intentionally not interchangeable.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::input::{InputError, finite};

/// Rainfall at or above which the rain term saturates.
pub const RAIN_CAP_MM: f64 = 100.0;

/// Tide height where the tide term starts rising.
pub const TIDE_FLOOR_M: f64 = 1.0;

/// Width of the band over which the tide term rises from 0 to 1.
pub const TIDE_BAND_M: f64 = 0.8;

/// Density at or above which the density term saturates.
pub const DENSITY_CAP: f64 = 20_000.0;

/// Scores below this are [`RiskLevel::Low`].
pub const MODERATE_THRESHOLD: f64 = 0.3;

/// Scores at or above this are [`RiskLevel::High`].
pub const HIGH_THRESHOLD: f64 = 0.6;

const RAIN_WEIGHT: f64 = 0.35;
const TIDE_WEIGHT: f64 = 0.25;
const VULNERABILITY_WEIGHT: f64 = 0.30;
const DENSITY_WEIGHT: f64 = 0.10;

/// Bucketed risk level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    /// Score below 0.3.
    Low,
    /// Score in [0.3, 0.6).
    Moderate,
    /// Score of 0.6 or more.
    High,
}

impl RiskLevel {
    /// Buckets a 0-1 score. NaN has no bucket.
    #[must_use]
    pub fn from_score(score: f64) -> Option<Self> {
        if score.is_nan() {
            None
        } else if score >= HIGH_THRESHOLD {
            Some(Self::High)
        } else if score >= MODERATE_THRESHOLD {
            Some(Self::Moderate)
        } else {
            Some(Self::Low)
        }
    }
}

/// Composite 0-1 score and its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskIndex {
    /// Weighted composite in [0, 1].
    pub score: f64,
    /// Bucket for `score`.
    pub level: RiskLevel,
}

/// Computes the categorical risk index for one observation.
///
/// # Errors
///
/// Returns [`InputError::NotFinite`] if rainfall, tide, or vulnerability
/// is NaN or infinite.
pub fn risk_index(
    rainfall_mm: f64,
    tide_m: f64,
    vulnerability: f64,
    population_density: i64,
) -> Result<RiskIndex, InputError> {
    let rain = (finite("rainfall_mm", rainfall_mm)?.max(0.0) / RAIN_CAP_MM).min(1.0);
    let tide = ((finite("tide_m", tide_m)? - TIDE_FLOOR_M) / TIDE_BAND_M).clamp(0.0, 1.0);
    let vulnerability = finite("vulnerability", vulnerability)?.clamp(0.0, 1.0);
    #[allow(clippy::cast_precision_loss)]
    let density = (population_density.max(0) as f64 / DENSITY_CAP).min(1.0);

    let weighted = VULNERABILITY_WEIGHT.mul_add(
        vulnerability,
        TIDE_WEIGHT.mul_add(tide, RAIN_WEIGHT * rain),
    );
    let score = DENSITY_WEIGHT.mul_add(density, weighted).clamp(0.0, 1.0);
    let level = RiskLevel::from_score(score).ok_or(InputError::NotFinite {
        field: "score",
        value: score,
    })?;

    Ok(RiskIndex { score, level })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calm_day_is_low() {
        let index = risk_index(0.0, 0.9, 0.0, 0).unwrap();
        assert_eq!(index.score, 0.0);
        assert_eq!(index.level, RiskLevel::Low);
    }

    #[test]
    fn saturated_inputs_reach_one() {
        let index = risk_index(250.0, 2.5, 1.0, 45_000).unwrap();
        assert!((index.score - 1.0).abs() < 1e-12);
        assert_eq!(index.level, RiskLevel::High);
    }

    #[test]
    fn cut_points_are_inclusive_on_the_upper_bucket() {
        assert_eq!(RiskLevel::from_score(0.299_999), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::from_score(0.3), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::from_score(0.599_999), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::from_score(0.6), Some(RiskLevel::High));
    }

    #[test]
    fn nan_score_has_no_level() {
        assert_eq!(RiskLevel::from_score(f64::NAN), None);
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(matches!(
            risk_index(f64::NAN, f64::NAN, 0.42, 7_600),
            Err(InputError::NotFinite { field: "rainfall_mm", .. })
        ));
        assert!(matches!(
            risk_index(10.0, f64::INFINITY, 0.42, 7_600),
            Err(InputError::NotFinite { field: "tide_m", .. })
        ));
        assert!(matches!(
            risk_index(10.0, 1.2, f64::NAN, 7_600),
            Err(InputError::NotFinite { field: "vulnerability", .. })
        ));
    }

    #[test]
    fn tide_rises_over_the_band() {
        let half = risk_index(0.0, 1.4, 0.0, 0).unwrap();
        assert!((half.score - 0.125).abs() < 1e-12);
    }

    #[test]
    fn weighs_each_term() {
        // rain 0.5, tide 0.0, vuln 0.5, density 0.5
        let index = risk_index(50.0, 1.0, 0.5, 10_000).unwrap();
        let expected = 0.35 * 0.5 + 0.30 * 0.5 + 0.10 * 0.5;
        assert!((index.score - expected).abs() < 1e-12);
        assert_eq!(index.level, RiskLevel::Moderate);
    }

    #[test]
    fn level_names_are_snake_case() {
        assert_eq!(RiskLevel::Moderate.to_string(), "moderate");
    }
}
