//! Whole-dataset summary statistics.

use std::collections::BTreeSet;

use flood_risk_analytics_models::{ColumnStats, DatasetSummary};
use flood_risk_dataset_models::DailyObservation;

use crate::AnalyticsError;

/// Computes summary statistics over every row.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] if `rows` is empty.
pub fn summarize(rows: &[DailyObservation]) -> Result<DatasetSummary, AnalyticsError> {
    let (Some(first), Some(last)) = (
        rows.iter().map(|r| r.date).min(),
        rows.iter().map(|r| r.date).max(),
    ) else {
        return Err(AnalyticsError::EmptyDataset);
    };

    let neighborhoods = rows
        .iter()
        .map(|r| r.neighborhood.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let days = rows.iter().map(|r| r.date).collect::<BTreeSet<_>>().len();
    let total_occurrences: u64 = rows.iter().map(|r| u64::from(r.occurrences)).sum();

    #[allow(clippy::cast_precision_loss)]
    let count = rows.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let mean_occurrences = total_occurrences as f64 / count;

    let rainfall: Vec<f64> = rows.iter().map(|r| r.rainfall_mm).collect();
    let tide: Vec<f64> = rows.iter().map(|r| r.tide_m).collect();

    Ok(DatasetSummary {
        rows: rows.len(),
        neighborhoods,
        days,
        first_date: first,
        last_date: last,
        total_occurrences,
        mean_occurrences,
        rainfall_mm: column_stats(&rainfall),
        tide_m: column_stats(&tide),
        mean_vulnerability: rows.iter().map(|r| r.vulnerability).sum::<f64>() / count,
    })
}

/// Mean, sample standard deviation, min, and max of a non-empty slice.
#[must_use]
pub fn column_stats(values: &[f64]) -> ColumnStats {
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = if values.len() > 1 {
        let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (squares / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    ColumnStats {
        mean,
        std_dev,
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flood_risk_neighborhood::find_neighborhood;

    fn row(day: u32, name: &str, rain: f64, tide: f64, occurrences: u32) -> DailyObservation {
        let n = find_neighborhood(name).unwrap();
        DailyObservation::new(
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            &n,
            (n.lat, n.lon),
            rain,
            tide,
            occurrences,
        )
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(matches!(summarize(&[]), Err(AnalyticsError::EmptyDataset)));
    }

    #[test]
    fn summarizes_rows() {
        let rows = vec![
            row(1, "Torre", 10.0, 1.0, 2),
            row(1, "Pina", 20.0, 1.5, 0),
            row(3, "Torre", 30.0, 2.0, 4),
        ];
        let summary = summarize(&rows).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.neighborhoods, 2);
        assert_eq!(summary.days, 2);
        assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
        assert_eq!(summary.total_occurrences, 6);
        assert!((summary.mean_occurrences - 2.0).abs() < 1e-12);
        assert!((summary.rainfall_mm.mean - 20.0).abs() < 1e-12);
        assert!((summary.rainfall_mm.std_dev - 10.0).abs() < 1e-12);
        assert_eq!(summary.rainfall_mm.max, 30.0);
        assert_eq!(summary.tide_m.min, 1.0);
        assert!((summary.mean_vulnerability - (0.42 + 0.68 + 0.42) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_zero_spread() {
        let stats = column_stats(&[4.2]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 4.2);
        assert_eq!(stats.max, 4.2);
    }
}
