//! Fail-closed dataset validation.
//!
//! Every check runs and every violation is collected; nothing is
//! corrected. A table with any violation must not be persisted.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::str::FromStr as _;

use flood_risk_dataset_models::{
    COL_ALTITUDE, COL_CATEGORY, COL_DATE, COL_DENSITY, COL_LAT, COL_LON, COL_NEIGHBORHOOD,
    COL_OCCURRENCES, COL_RAINFALL, COL_TIDE, COL_VULNERABILITY, COLUMNS, calendar_date,
};
use flood_risk_neighborhood_models::NeighborhoodCategory;

use crate::table::Table;

/// Columns that must hold finite numbers.
const NUMERIC_COLUMNS: [&str; 5] = [COL_LAT, COL_LON, COL_VULNERABILITY, COL_RAINFALL, COL_TIDE];

/// Columns that must hold integers.
const INTEGER_COLUMNS: [&str; 3] = [COL_ALTITUDE, COL_DENSITY, COL_OCCURRENCES];

/// Inclusive value bounds checked on parseable cells.
const RANGES: [(&str, f64, f64); 3] = [
    (COL_VULNERABILITY, 0.0, 1.0),
    (COL_LAT, -8.2, -7.9),
    (COL_LON, -35.0, -34.8),
];

/// A single failed dataset invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    /// One or more required columns are absent.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// Absent column names, in schema order.
        columns: Vec<String>,
    },

    /// The table has a header but no data rows.
    #[error("table has no data rows")]
    EmptyTable,

    /// Cells of the date column that are not calendar dates.
    #[error("column '{column}' must be a date ({count} invalid values)")]
    NotDate {
        /// Column name.
        column: String,
        /// Number of offending cells.
        count: usize,
    },

    /// Cells of a numeric column that are not finite numbers.
    #[error("column '{column}' must be numeric ({count} invalid values)")]
    NotNumeric {
        /// Column name.
        column: String,
        /// Number of offending cells.
        count: usize,
    },

    /// Cells of an integer column that are not integers.
    #[error("column '{column}' must be integer ({count} invalid values)")]
    NotInteger {
        /// Column name.
        column: String,
        /// Number of offending cells.
        count: usize,
    },

    /// Values outside an inclusive range.
    #[error("{count} values of '{column}' outside [{min}, {max}]")]
    OutOfRange {
        /// Column name.
        column: String,
        /// Number of offending cells.
        count: usize,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Negative occurrence counts.
    #[error("{count} negative values of '{column}'")]
    Negative {
        /// Column name.
        column: String,
        /// Number of offending cells.
        count: usize,
    },

    /// Category cells that are not a known neighborhood category.
    #[error("{count} unknown values of '{column}'")]
    UnknownCategory {
        /// Column name.
        column: String,
        /// Number of offending cells.
        count: usize,
    },

    /// Rows repeating an earlier (date, neighborhood) pair.
    #[error("{count} duplicate (date, bairro) rows")]
    DuplicateKeys {
        /// Number of repeated rows.
        count: usize,
    },

    /// Empty cells, per column.
    #[error("null values: {}", format_counts(.counts))]
    NullValues {
        /// Column name → empty-cell count, in header order.
        counts: Vec<(String, usize)>,
    },
}

fn format_counts(counts: &[(String, usize)]) -> String {
    let mut out = String::new();
    for (i, (column, count)) in counts.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{column} ({count})");
    }
    out
}

/// Runs every check and returns all violations found.
///
/// An empty result means the table may be persisted.
#[must_use]
pub fn validate_table(table: &Table) -> Vec<Violation> {
    let mut violations = Vec::new();

    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|c| table.column_index(c).is_none())
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        violations.push(Violation::MissingColumns { columns: missing });
    }

    if table.is_empty() {
        violations.push(Violation::EmptyTable);
    }

    if let Some(index) = table.column_index(COL_DATE) {
        let count = table
            .column(index)
            .filter(|cell| !is_null(cell) && calendar_date::parse(cell).is_none())
            .count();
        if count > 0 {
            violations.push(Violation::NotDate {
                column: COL_DATE.to_string(),
                count,
            });
        }
    }

    for column in NUMERIC_COLUMNS {
        let Some(index) = table.column_index(column) else {
            continue;
        };
        let count = table
            .column(index)
            .filter(|cell| !is_null(cell) && parse_number(cell).is_none())
            .count();
        if count > 0 {
            violations.push(Violation::NotNumeric {
                column: column.to_string(),
                count,
            });
        }
    }

    for column in INTEGER_COLUMNS {
        let Some(index) = table.column_index(column) else {
            continue;
        };
        let count = table
            .column(index)
            .filter(|cell| !is_null(cell) && cell.trim().parse::<i64>().is_err())
            .count();
        if count > 0 {
            violations.push(Violation::NotInteger {
                column: column.to_string(),
                count,
            });
        }
    }

    for (column, min, max) in RANGES {
        let Some(index) = table.column_index(column) else {
            continue;
        };
        let count = table
            .column(index)
            .filter_map(parse_number)
            .filter(|v| *v < min || *v > max)
            .count();
        if count > 0 {
            violations.push(Violation::OutOfRange {
                column: column.to_string(),
                count,
                min,
                max,
            });
        }
    }

    if let Some(index) = table.column_index(COL_OCCURRENCES) {
        let count = table
            .column(index)
            .filter_map(|cell| cell.trim().parse::<i64>().ok())
            .filter(|v| *v < 0)
            .count();
        if count > 0 {
            violations.push(Violation::Negative {
                column: COL_OCCURRENCES.to_string(),
                count,
            });
        }
    }

    if let Some(index) = table.column_index(COL_CATEGORY) {
        let count = table
            .column(index)
            .filter(|cell| !is_null(cell) && NeighborhoodCategory::from_str(cell.trim()).is_err())
            .count();
        if count > 0 {
            violations.push(Violation::UnknownCategory {
                column: COL_CATEGORY.to_string(),
                count,
            });
        }
    }

    if let (Some(date_index), Some(name_index)) = (
        table.column_index(COL_DATE),
        table.column_index(COL_NEIGHBORHOOD),
    ) {
        let count = count_duplicate_keys(table, date_index, name_index);
        if count > 0 {
            violations.push(Violation::DuplicateKeys { count });
        }
    }

    let counts = null_counts(table);
    if !counts.is_empty() {
        violations.push(Violation::NullValues { counts });
    }

    violations
}

fn is_null(cell: &str) -> bool {
    cell.trim().is_empty()
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_duplicate_keys(table: &Table, date_index: usize, name_index: usize) -> usize {
    let mut seen = BTreeSet::new();
    let mut duplicates = 0;
    for row in table.rows() {
        let raw_date = row.get(date_index).map_or("", String::as_str);
        let date = calendar_date::parse(raw_date)
            .map_or_else(|| raw_date.trim().to_string(), |d| d.to_string());
        let name = row.get(name_index).map_or("", |s| s.trim());
        if !seen.insert((date, name.to_string())) {
            duplicates += 1;
        }
    }
    duplicates
}

fn null_counts(table: &Table) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for row in table.rows() {
        for index in 0..table.headers().len() {
            if row.get(index).is_none_or(|cell| is_null(cell)) {
                *counts.entry(index).or_default() += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(index, count)| (table.headers()[index].clone(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flood_risk_dataset_models::DailyObservation;

    fn observation(day: u32, neighborhood: &str) -> DailyObservation {
        DailyObservation {
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            neighborhood: neighborhood.to_string(),
            lat: -8.0456,
            lon: -34.9025,
            altitude: 15,
            vulnerability: 0.42,
            population_density: 7600,
            rainfall_mm: 31.2,
            tide_m: 1.52,
            occurrences: 1,
            category: NeighborhoodCategory::MediumUrban,
        }
    }

    fn table(rows: &[DailyObservation]) -> Table {
        Table::from_observations(rows).unwrap()
    }

    #[test]
    fn accepts_well_formed_table() {
        let t = table(&[observation(1, "Torre"), observation(1, "Pina"), observation(2, "Torre")]);
        assert_eq!(validate_table(&t), vec![]);
    }

    #[test]
    fn missing_altitude_is_named_exactly() {
        let t = table(&[observation(1, "Torre")]).without_column("altitude");
        let violations = validate_table(&t);
        assert_eq!(
            violations,
            vec![Violation::MissingColumns {
                columns: vec!["altitude".to_string()]
            }]
        );
        assert_eq!(violations[0].to_string(), "missing required columns: altitude");
    }

    #[test]
    fn duplicate_keys_are_counted() {
        let t = table(&[observation(1, "Torre"), observation(1, "Torre"), observation(1, "Torre")]);
        assert_eq!(validate_table(&t), vec![Violation::DuplicateKeys { count: 2 }]);
    }

    #[test]
    fn out_of_range_coordinates_and_vulnerability() {
        let mut far = observation(1, "Torre");
        far.lat = -9.5;
        far.lon = -34.5;
        far.vulnerability = 1.3;
        let violations = validate_table(&table(&[far]));
        assert_eq!(violations.len(), 3);
        assert!(violations.iter().all(|v| matches!(v, Violation::OutOfRange { count: 1, .. })));
    }

    #[test]
    fn collects_type_and_null_violations_together() {
        let header = COLUMNS.map(String::from).to_vec();
        let rows: Vec<Vec<String>> = vec![
            vec![
                "2024-04-01", "Torre", "-8.04", "-34.90", "15.5", "0.42", "7600", "abc", "1.2",
                "1", "urbano_medio",
            ],
            vec![
                "01/04/2024", "", "-8.04", "-34.90", "15", "0.42", "7600", "3.0", "1.2", "-2",
                "vila",
            ],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect::<Vec<String>>())
        .collect();
        let violations = validate_table(&Table::new(header, rows));

        assert!(violations.contains(&Violation::NotDate {
            column: "date".to_string(),
            count: 1
        }));
        assert!(violations.contains(&Violation::NotNumeric {
            column: "chuva_mm".to_string(),
            count: 1
        }));
        assert!(violations.contains(&Violation::NotInteger {
            column: "altitude".to_string(),
            count: 1
        }));
        assert!(violations.contains(&Violation::Negative {
            column: "ocorrencias".to_string(),
            count: 1
        }));
        assert!(violations.contains(&Violation::UnknownCategory {
            column: "tipo_bairro".to_string(),
            count: 1
        }));
        assert!(violations.contains(&Violation::NullValues {
            counts: vec![("bairro".to_string(), 1)]
        }));
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(validate_table(&table(&[])), vec![Violation::EmptyTable]);
    }

    #[test]
    fn accepts_timestamped_dates() {
        let mut t = table(&[observation(3, "Torre")]);
        let bytes = String::from_utf8(t.to_csv_bytes().unwrap())
            .unwrap()
            .replace("2024-04-03", "2024-04-03 00:00:00+00:00");
        t = Table::from_reader(bytes.as_bytes()).unwrap();
        assert_eq!(validate_table(&t), vec![]);
    }
}
