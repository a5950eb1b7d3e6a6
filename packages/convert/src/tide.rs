//! Tide-table reader.
//!
//! Each row is one calendar day with up to four predicted high/low
//! heights. Heights are averaged per day; days with no usable reading
//! are backfilled with the mean of every parsed daily mean.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use flood_risk_dataset::Table;

use crate::ConvertError;
use crate::parsing::{cell, parse_decimal_br, parse_whole_number, require_columns};

/// Day-of-month column.
pub const COL_DAY: &str = "Dia";
/// Month column.
pub const COL_MONTH: &str = "Mês";
/// Year column.
pub const COL_YEAR: &str = "Ano";

/// Number of tide readings a row may carry.
pub const MAX_READINGS: u8 = 4;

/// Name of the height column for reading `n` (1-based).
#[must_use]
pub fn height_column(n: u8) -> String {
    format!("Maré {n} - Altura (m)")
}

/// Daily mean tide heights parsed from one file.
#[derive(Debug, Clone, PartialEq)]
pub struct TideSeries {
    /// Mean height per day, backfilled days included.
    pub daily: BTreeMap<NaiveDate, f64>,
    /// Mean of the parsed (not backfilled) daily means.
    pub mean: f64,
    /// Days that had no usable reading.
    pub backfilled: usize,
    /// Rows dropped for an invalid calendar date.
    pub skipped_rows: usize,
}

impl TideSeries {
    /// Height for `date`, or the series mean if the date is absent.
    #[must_use]
    pub fn height_or_mean(&self, date: NaiveDate) -> f64 {
        self.daily.get(&date).copied().unwrap_or(self.mean)
    }
}

/// Parses a tide table.
///
/// # Errors
///
/// Returns [`ConvertError::Schema`] if a date column or every height
/// column is missing, or [`ConvertError::NoTideReadings`] if no row has
/// a usable height.
pub fn parse_tide(table: &Table, source_name: &str) -> Result<TideSeries, ConvertError> {
    let [day_index, month_index, year_index] =
        require_columns(table, source_name, [COL_DAY, COL_MONTH, COL_YEAR])?;

    let height_indices: Vec<usize> = (1..=MAX_READINGS)
        .filter_map(|n| table.column_index(&height_column(n)))
        .collect();
    if height_indices.is_empty() {
        return Err(ConvertError::Schema {
            source_name: source_name.to_string(),
            column: height_column(1),
        });
    }

    // (sum, count) of valid readings per day.
    let mut readings: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    let mut skipped_rows = 0;

    for (line, row) in table.rows().iter().enumerate() {
        let Some(date) = row_date(row, day_index, month_index, year_index) else {
            log::warn!(
                "{source_name}: skipping row {} with invalid date {}/{}/{}",
                line + 2,
                cell(row, day_index).trim(),
                cell(row, month_index).trim(),
                cell(row, year_index).trim()
            );
            skipped_rows += 1;
            continue;
        };

        let entry = readings.entry(date).or_insert((0.0, 0));
        for index in &height_indices {
            if let Some(height) = parse_decimal_br(cell(row, *index)) {
                entry.0 += height;
                entry.1 += 1;
            }
        }
    }

    let means: Vec<f64> = readings
        .values()
        .filter(|(_, count)| *count > 0)
        .map(|(sum, count)| sum / f64::from(*count))
        .collect();
    if means.is_empty() {
        return Err(ConvertError::NoTideReadings {
            source_name: source_name.to_string(),
        });
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = means.iter().sum::<f64>() / means.len() as f64;

    let mut backfilled = 0;
    let daily = readings
        .into_iter()
        .map(|(date, (sum, count))| {
            if count == 0 {
                log::debug!("{source_name}: no tide reading on {date}, using mean {mean:.3} m");
                backfilled += 1;
                (date, mean)
            } else {
                (date, sum / f64::from(count))
            }
        })
        .collect();

    if backfilled > 0 {
        log::warn!(
            "{source_name}: {backfilled} day(s) without tide readings filled with mean {mean:.2} m"
        );
    }
    log::info!(
        "{source_name}: parsed tide for {} day(s), mean {mean:.2} m",
        means.len() + backfilled
    );

    Ok(TideSeries {
        daily,
        mean,
        backfilled,
        skipped_rows,
    })
}

fn row_date(row: &[String], day: usize, month: usize, year: usize) -> Option<NaiveDate> {
    let day = parse_whole_number(cell(row, day))?;
    let month = parse_whole_number(cell(row, month))?;
    let year = i32::try_from(parse_whole_number(cell(row, year))?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
