#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for dataset summaries and neighborhood rankings.
//!
//! Serialized in camelCase so the CLI's `--json` output is stable.

use chrono::NaiveDate;
use flood_risk_neighborhood_models::NeighborhoodCategory;
use serde::{Deserialize, Serialize};

/// Mean, sample standard deviation, and extremes of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; zero for a single value.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Whole-dataset summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Row count.
    pub rows: usize,
    /// Distinct neighborhoods.
    pub neighborhoods: usize,
    /// Distinct dates.
    pub days: usize,
    /// First date.
    pub first_date: NaiveDate,
    /// Last date.
    pub last_date: NaiveDate,
    /// Sum of occurrences over all rows.
    pub total_occurrences: u64,
    /// Mean occurrences per row.
    pub mean_occurrences: f64,
    /// Rainfall in mm.
    pub rainfall_mm: ColumnStats,
    /// Tide height in meters.
    pub tide_m: ColumnStats,
    /// Mean of the per-row vulnerability index.
    pub mean_vulnerability: f64,
}

/// Weights of the neighborhood ranking score.
///
/// Vulnerability is scaled by 100 and tide by 10 before weighting so
/// each term is of comparable magnitude to occurrence counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingWeights {
    /// Weight of total occurrences.
    pub occurrences: f64,
    /// Weight of vulnerability × 100.
    pub vulnerability: f64,
    /// Weight of mean rainfall.
    pub rainfall: f64,
    /// Weight of mean tide × 10.
    pub tide: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            occurrences: 0.4,
            vulnerability: 0.3,
            rainfall: 0.2,
            tide: 0.1,
        }
    }
}

/// One neighborhood's position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodRank {
    /// 1-based position, highest score first.
    pub rank: usize,
    /// Neighborhood name.
    pub neighborhood: String,
    /// Neighborhood category.
    pub category: NeighborhoodCategory,
    /// Sum of occurrences.
    pub total_occurrences: u64,
    /// Vulnerability index.
    pub vulnerability: f64,
    /// Mean rainfall in mm.
    pub mean_rainfall_mm: f64,
    /// Mean tide height in meters.
    pub mean_tide_m: f64,
    /// Weighted score.
    pub score: f64,
}

/// Row counts per categorical risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskLevelCounts {
    /// Rows scored low.
    pub low: usize,
    /// Rows scored moderate.
    pub moderate: usize,
    /// Rows scored high.
    pub high: usize,
}

impl RiskLevelCounts {
    /// Total rows counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.low + self.moderate + self.high
    }
}
