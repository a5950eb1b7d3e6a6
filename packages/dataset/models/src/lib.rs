#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Daily per-neighborhood observation row and output column schema.
//!
//! Both the synthetic generator and the real-data converter emit
//! [`DailyObservation`] rows. The serialized column names and their
//! order are the contract the dashboard and model-fitting code read, so
//! they must not change.

use chrono::NaiveDate;
use flood_risk_neighborhood_models::{Neighborhood, NeighborhoodCategory};
use serde::{Deserialize, Serialize};

/// `date` column: UTC calendar day.
pub const COL_DATE: &str = "date";
/// `bairro` column: neighborhood name.
pub const COL_NEIGHBORHOOD: &str = "bairro";
/// `lat` column: jittered latitude.
pub const COL_LAT: &str = "lat";
/// `lon` column: jittered longitude.
pub const COL_LON: &str = "lon";
/// `altitude` column: meters.
pub const COL_ALTITUDE: &str = "altitude";
/// `vulnerabilidade` column: 0-1 index.
pub const COL_VULNERABILITY: &str = "vulnerabilidade";
/// `densidade_pop` column: people/km².
pub const COL_DENSITY: &str = "densidade_pop";
/// `chuva_mm` column: daily rainfall.
pub const COL_RAINFALL: &str = "chuva_mm";
/// `mare_m` column: daily tide height.
pub const COL_TIDE: &str = "mare_m";
/// `ocorrencias` column: synthetic occurrence count.
pub const COL_OCCURRENCES: &str = "ocorrencias";
/// `tipo_bairro` column: neighborhood category.
pub const COL_CATEGORY: &str = "tipo_bairro";

/// Every output column, in file order.
pub const COLUMNS: [&str; 11] = [
    COL_DATE,
    COL_NEIGHBORHOOD,
    COL_LAT,
    COL_LON,
    COL_ALTITUDE,
    COL_VULNERABILITY,
    COL_DENSITY,
    COL_RAINFALL,
    COL_TIDE,
    COL_OCCURRENCES,
    COL_CATEGORY,
];

/// Decimal places written for `lat` and `lon`.
pub const COORDINATE_DECIMALS: i32 = 6;
/// Decimal places written for `vulnerabilidade`.
pub const VULNERABILITY_DECIMALS: i32 = 3;
/// Decimal places written for `chuva_mm`.
pub const RAINFALL_DECIMALS: i32 = 2;
/// Decimal places written for `mare_m`.
pub const TIDE_DECIMALS: i32 = 3;

/// One row of the dataset: a single neighborhood on a single day.
///
/// `occurrences` is always synthetic. It is drawn from a Poisson model
/// and never observed, even when rainfall and tide are real readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Calendar day (UTC).
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    /// Neighborhood name.
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    /// Reference latitude plus GPS-style jitter.
    pub lat: f64,
    /// Reference longitude plus GPS-style jitter.
    pub lon: f64,
    /// Altitude in meters.
    pub altitude: i64,
    /// Vulnerability index, 0-1.
    #[serde(rename = "vulnerabilidade")]
    pub vulnerability: f64,
    /// Population density in people/km².
    #[serde(rename = "densidade_pop")]
    pub population_density: i64,
    /// Daily rainfall in mm.
    #[serde(rename = "chuva_mm")]
    pub rainfall_mm: f64,
    /// Daily tide height in meters.
    #[serde(rename = "mare_m")]
    pub tide_m: f64,
    /// Synthetic occurrence count.
    #[serde(rename = "ocorrencias")]
    pub occurrences: u32,
    /// Neighborhood category.
    #[serde(rename = "tipo_bairro")]
    pub category: NeighborhoodCategory,
}

impl DailyObservation {
    /// Builds a row from a neighborhood's static attributes plus the
    /// per-day values, rounding every float to its output precision.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        neighborhood: &Neighborhood,
        coordinates: (f64, f64),
        rainfall_mm: f64,
        tide_m: f64,
        occurrences: u32,
    ) -> Self {
        Self {
            date,
            neighborhood: neighborhood.name.clone(),
            lat: round_decimals(coordinates.0, COORDINATE_DECIMALS),
            lon: round_decimals(coordinates.1, COORDINATE_DECIMALS),
            altitude: neighborhood.altitude,
            vulnerability: round_decimals(neighborhood.vulnerability, VULNERABILITY_DECIMALS),
            population_density: neighborhood.population_density,
            rainfall_mm: round_decimals(rainfall_mm, RAINFALL_DECIMALS),
            tide_m: round_decimals(tide_m, TIDE_DECIMALS),
            occurrences,
            category: neighborhood.category,
        }
    }
}

/// Rounds `value` to `places` decimal places.
#[must_use]
pub fn round_decimals(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Sorts rows by date, then neighborhood name.
pub fn sort_observations(rows: &mut [DailyObservation]) {
    rows.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.neighborhood.cmp(&b.neighborhood))
    });
}

/// Serde adapter for the `date` column.
///
/// Writes `YYYY-MM-DD`. Reads that form plus the timestamped forms older
/// exports used (`YYYY-MM-DD HH:MM:SS` with or without a `+00:00`
/// offset).
pub mod calendar_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize as _, Deserializer, Serializer};

    /// Output format.
    pub const FORMAT: &str = "%Y-%m-%d";

    /// Parses any accepted `date` cell.
    #[must_use]
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(naive.date());
        }
        None
    }

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    /// Deserializes a date from any accepted form.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is not a recognizable calendar date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date: {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torre() -> Neighborhood {
        Neighborhood {
            name: "Torre".to_string(),
            lat: -8.0456,
            lon: -34.9025,
            altitude: 15,
            category: NeighborhoodCategory::MediumUrban,
            vulnerability: 0.42,
            population_density: 7600,
            tide_sensitivity: 0.28,
            rainfall_sensitivity: 0.52,
        }
    }

    #[test]
    fn rounds_to_output_precision() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let row = DailyObservation::new(
            date,
            &torre(),
            (-8.045_612_345, -34.902_487_654),
            25.456,
            1.234_56,
            3,
        );
        assert_eq!(row.lat, -8.045_612);
        assert_eq!(row.lon, -34.902_488);
        assert_eq!(row.rainfall_mm, 25.46);
        assert_eq!(row.tide_m, 1.235);
        assert_eq!(row.vulnerability, 0.42);
        assert_eq!(row.altitude, 15);
        assert_eq!(row.category, NeighborhoodCategory::MediumUrban);
    }

    #[test]
    fn sorts_by_date_then_name() {
        let n = torre();
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut rows = vec![
            DailyObservation::new(d2, &n, (n.lat, n.lon), 0.0, 1.0, 0),
            DailyObservation {
                neighborhood: "Afogados".to_string(),
                ..DailyObservation::new(d2, &n, (n.lat, n.lon), 0.0, 1.0, 0)
            },
            DailyObservation::new(d1, &n, (n.lat, n.lon), 0.0, 1.0, 0),
        ];
        sort_observations(&mut rows);
        assert_eq!(rows[0].date, d1);
        assert_eq!(rows[1].neighborhood, "Afogados");
        assert_eq!(rows[2].neighborhood, "Torre");
    }

    #[test]
    fn parses_plain_and_timestamped_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 2);
        assert_eq!(calendar_date::parse("2024-05-02"), expected);
        assert_eq!(calendar_date::parse("2024-05-02 00:00:00+00:00"), expected);
        assert_eq!(calendar_date::parse("2024-05-02 00:00:00"), expected);
        assert_eq!(calendar_date::parse("02/05/2024"), None);
        assert_eq!(calendar_date::parse("2024-02-30"), None);
    }

    #[test]
    fn columns_follow_field_order() {
        assert_eq!(COLUMNS[0], "date");
        assert_eq!(COLUMNS[1], "bairro");
        assert_eq!(COLUMNS[10], "tipo_bairro");
    }
}
