//! Neighborhood ranking and risk-level distribution.

use std::collections::BTreeMap;

use flood_risk_analytics_models::{NeighborhoodRank, RankingWeights, RiskLevelCounts};
use flood_risk_dataset_models::DailyObservation;
use flood_risk_neighborhood_models::NeighborhoodCategory;
use flood_risk_risk::{RiskLevel, risk_index};

use crate::AnalyticsError;

const VULNERABILITY_SCALE: f64 = 100.0;
const TIDE_SCALE: f64 = 10.0;

struct Accumulator {
    category: NeighborhoodCategory,
    vulnerability: f64,
    occurrences: u64,
    rainfall_sum: f64,
    tide_sum: f64,
    rows: u32,
}

/// Ranks neighborhoods by weighted score, highest first.
///
/// Vulnerability and category are taken from each neighborhood's first
/// row. Ties keep alphabetical order.
#[must_use]
pub fn rank_neighborhoods(
    rows: &[DailyObservation],
    weights: RankingWeights,
) -> Vec<NeighborhoodRank> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.neighborhood.as_str()).or_insert(Accumulator {
            category: row.category,
            vulnerability: row.vulnerability,
            occurrences: 0,
            rainfall_sum: 0.0,
            tide_sum: 0.0,
            rows: 0,
        });
        entry.occurrences += u64::from(row.occurrences);
        entry.rainfall_sum += row.rainfall_mm;
        entry.tide_sum += row.tide_m;
        entry.rows += 1;
    }

    let mut ranked: Vec<NeighborhoodRank> = groups
        .into_iter()
        .map(|(name, acc)| {
            let mean_rainfall_mm = acc.rainfall_sum / f64::from(acc.rows);
            let mean_tide_m = acc.tide_sum / f64::from(acc.rows);
            #[allow(clippy::cast_precision_loss)]
            let occurrences = acc.occurrences as f64;
            let score = weights.tide.mul_add(
                mean_tide_m * TIDE_SCALE,
                weights.rainfall.mul_add(
                    mean_rainfall_mm,
                    weights.vulnerability.mul_add(
                        acc.vulnerability * VULNERABILITY_SCALE,
                        weights.occurrences * occurrences,
                    ),
                ),
            );
            NeighborhoodRank {
                rank: 0,
                neighborhood: name.to_string(),
                category: acc.category,
                total_occurrences: acc.occurrences,
                vulnerability: acc.vulnerability,
                mean_rainfall_mm,
                mean_tide_m,
                score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (i, entry) in ranked.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    log::debug!("Ranked {} neighborhoods", ranked.len());
    ranked
}

/// Counts rows per categorical risk level.
///
/// # Errors
///
/// Returns [`AnalyticsError::Input`] if a row holds a non-finite value.
pub fn risk_level_distribution(
    rows: &[DailyObservation],
) -> Result<RiskLevelCounts, AnalyticsError> {
    let mut counts = RiskLevelCounts::default();
    for row in rows {
        let index = risk_index(
            row.rainfall_mm,
            row.tide_m,
            row.vulnerability,
            row.population_density,
        )?;
        match index.level {
            RiskLevel::Low => counts.low += 1,
            RiskLevel::Moderate => counts.moderate += 1,
            RiskLevel::High => counts.high += 1,
        }
    }
    Ok(counts)
}
