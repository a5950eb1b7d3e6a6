//! Cell parsing for Brazilian-formatted source files.

use flood_risk_dataset::Table;

use crate::ConvertError;

/// Portuguese month abbreviations as written in APAC `Mês/Ano` cells.
const MONTHS: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// Parses a decimal written with a comma separator (`"1,8"`).
///
/// Empty cells and the `-` placeholder are missing values.
#[must_use]
pub fn parse_decimal_br(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a whole-number cell, accepting a zero fractional part (`"3.0"`).
#[must_use]
pub fn parse_whole_number(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return Some(value);
    }
    let value = parse_decimal_br(trimmed)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = value as u32;
    Some(value)
}

/// Parses a `Mês/Ano` cell such as `jan./2024` into `(year, month)`.
#[must_use]
pub fn parse_month_year(raw: &str) -> Option<(i32, u32)> {
    let (month, year) = raw.trim().split_once('/')?;
    let month = month.trim().to_lowercase();
    let index = MONTHS.iter().position(|m| *m == month)?;
    let year = year.trim().parse::<i32>().ok()?;
    #[allow(clippy::cast_possible_truncation)]
    let month = index as u32 + 1;
    Some((year, month))
}

/// Looks up required columns, failing on the first one absent.
///
/// # Errors
///
/// Returns [`ConvertError::Schema`] naming the missing column.
pub fn require_columns<const N: usize>(
    table: &Table,
    source_name: &str,
    columns: [&str; N],
) -> Result<[usize; N], ConvertError> {
    let mut indices = [0; N];
    for (slot, column) in indices.iter_mut().zip(columns) {
        *slot = table.column_index(column).ok_or_else(|| ConvertError::Schema {
            source_name: source_name.to_string(),
            column: column.to_string(),
        })?;
    }
    Ok(indices)
}

/// Returns the cell at `index`, or `""` for a short row.
pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_decimals() {
        assert_eq!(parse_decimal_br("1,8"), Some(1.8));
        assert_eq!(parse_decimal_br(" 25,4 "), Some(25.4));
        assert_eq!(parse_decimal_br("0.75"), Some(0.75));
        assert_eq!(parse_decimal_br("12"), Some(12.0));
    }

    #[test]
    fn missing_markers_are_none() {
        assert_eq!(parse_decimal_br(""), None);
        assert_eq!(parse_decimal_br("   "), None);
        assert_eq!(parse_decimal_br("-"), None);
        assert_eq!(parse_decimal_br("n/d"), None);
        assert_eq!(parse_decimal_br("NaN"), None);
    }

    #[test]
    fn parses_whole_numbers() {
        assert_eq!(parse_whole_number("7"), Some(7));
        assert_eq!(parse_whole_number("7.0"), Some(7));
        assert_eq!(parse_whole_number("7,5"), None);
        assert_eq!(parse_whole_number("-1"), None);
        assert_eq!(parse_whole_number(""), None);
    }

    #[test]
    fn parses_portuguese_month_year() {
        assert_eq!(parse_month_year("jan./2024"), Some((2024, 1)));
        assert_eq!(parse_month_year("Dez./2023"), Some((2023, 12)));
        assert_eq!(parse_month_year("set./2024"), Some((2024, 9)));
        assert_eq!(parse_month_year("sep./2024"), None);
        assert_eq!(parse_month_year("jan.2024"), None);
    }

    #[test]
    fn reports_first_missing_column() {
        let table = Table::new(vec!["Dia".to_string(), "Ano".to_string()], vec![]);
        let err = require_columns(&table, "tide", ["Dia", "Mês", "Ano"]).unwrap_err();
        assert!(matches!(err, ConvertError::Schema { ref column, .. } if column == "Mês"));
        let [dia, ano] = require_columns(&table, "tide", ["Dia", "Ano"]).unwrap();
        assert_eq!((dia, ano), (0, 1));
    }
}
