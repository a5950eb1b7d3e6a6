//! APAC rain-gauge reader.
//!
//! Source rows are one station-month with a column per day of month.
//! Rows are reshaped to (date, neighborhood) values through the station
//! mapping; stations sharing a neighborhood are averaged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use flood_risk_dataset::Table;

use crate::ConvertError;
use crate::parsing::{cell, parse_decimal_br, parse_month_year, require_columns};

/// Station name column.
pub const COL_STATION: &str = "Posto";
/// `jan./2024`-style month column.
pub const COL_MONTH_YEAR: &str = "Mês/Ano";

/// Daily rainfall per (date, neighborhood).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RainfallSeries {
    /// Mean rainfall in mm across the stations mapped to a neighborhood.
    pub daily: BTreeMap<(NaiveDate, String), f64>,
    /// Station names without a mapping, sorted.
    pub unmapped_stations: Vec<String>,
    /// Day cells that were missing or unparseable and read as 0.0 mm.
    pub filled_cells: usize,
    /// Station-month rows whose `Mês/Ano` could not be parsed.
    pub skipped_rows: usize,
}

impl RainfallSeries {
    /// Rainfall for a (date, neighborhood), 0.0 when not reported.
    #[must_use]
    pub fn rainfall_or_zero(&self, date: NaiveDate, neighborhood: &str) -> f64 {
        self.daily
            .get(&(date, neighborhood.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Every date with at least one reading.
    #[must_use]
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.daily.keys().map(|(date, _)| *date).collect()
    }
}

/// Parses a rain-gauge table using `lookup` to map station names to
/// neighborhoods.
///
/// # Errors
///
/// Returns [`ConvertError::Schema`] if a required column is missing, or
/// [`ConvertError::NoMappedStations`] if no row belongs to a mapped
/// station.
pub fn parse_rainfall(
    table: &Table,
    source_name: &str,
    lookup: &BTreeMap<String, String>,
) -> Result<RainfallSeries, ConvertError> {
    let [station_index, month_year_index] =
        require_columns(table, source_name, [COL_STATION, COL_MONTH_YEAR])?;

    let day_indices: Vec<(u32, usize)> = (1..=31)
        .filter_map(|day: u32| table.column_index(&day.to_string()).map(|i| (day, i)))
        .collect();

    let mut unmapped: BTreeSet<String> = BTreeSet::new();
    let mut mapped_rows = 0;
    let mut filled_cells = 0;
    let mut skipped_rows = 0;
    let mut sums: BTreeMap<(NaiveDate, String), (f64, u32)> = BTreeMap::new();

    for row in table.rows() {
        let station = cell(row, station_index).trim();
        let Some(neighborhood) = lookup.get(station) else {
            if unmapped.insert(station.to_string()) {
                log::warn!(
                    "{source_name}: station '{station}' has no neighborhood mapping, dropping"
                );
            }
            continue;
        };
        mapped_rows += 1;

        let raw_month = cell(row, month_year_index);
        let Some((year, month)) = parse_month_year(raw_month) else {
            log::warn!(
                "{source_name}: station '{station}' has unreadable month '{}', dropping row",
                raw_month.trim()
            );
            skipped_rows += 1;
            continue;
        };

        for (day, index) in &day_indices {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, *day) else {
                continue;
            };
            let value = parse_decimal_br(cell(row, *index)).unwrap_or_else(|| {
                filled_cells += 1;
                0.0
            });
            let entry = sums.entry((date, neighborhood.clone())).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    if mapped_rows == 0 {
        return Err(ConvertError::NoMappedStations {
            source_name: source_name.to_string(),
        });
    }

    if filled_cells > 0 {
        log::warn!("{source_name}: {filled_cells} missing rainfall value(s) read as 0.0 mm");
    }

    let daily: BTreeMap<(NaiveDate, String), f64> = sums
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / f64::from(count)))
        .collect();

    log::info!(
        "{source_name}: parsed {} rainfall value(s) for {} neighborhood(s)",
        daily.len(),
        daily.keys().map(|(_, n)| n.as_str()).collect::<BTreeSet<_>>().len()
    );

    Ok(RainfallSeries {
        daily,
        unmapped_stations: unmapped.into_iter().collect(),
        filled_cells,
        skipped_rows,
    })
}
