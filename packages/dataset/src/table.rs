//! In-memory header + string-cell table.
//!
//! Validation runs on the exact cells that will be written to disk, not
//! on typed rows, so type and null checks see what a downstream CSV
//! reader would see.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use flood_risk_dataset_models::DailyObservation;
use serde::de::DeserializeOwned;

use crate::DatasetError;

/// A delimited table held as raw string cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from headers and rows.
    #[must_use]
    pub const fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a comma-delimited table with a header row.
    ///
    /// A leading UTF-8 byte-order mark on the first header is stripped.
    /// Ragged rows are accepted; missing trailing cells read as empty.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Csv`] if the input is not valid CSV.
    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.trim().to_string()
            })
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(ToString::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Reads a table from a file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingInput`] if the file does not exist,
    /// or an I/O or CSV error if it cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::MissingInput {
                path: path.display().to_string(),
            });
        }
        let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file)
    }

    /// Encodes observation rows and reads them back as a table.
    ///
    /// # Errors
    ///
    /// Returns a CSV error if serialization fails.
    pub fn from_observations(rows: &[DailyObservation]) -> Result<Self, DatasetError> {
        let bytes = encode_observations(rows)?;
        Self::from_reader(bytes.as_slice())
    }

    /// Column names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterates over one column's cells. Missing cells yield `""`.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map_or("", String::as_str))
    }

    /// Returns a copy of the table with a column removed.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn without_column(&self, name: &str) -> Self {
        let Some(index) = self.column_index(name) else {
            return self.clone();
        };
        let mut headers = self.headers.clone();
        headers.remove(index);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if index < row.len() {
                    row.remove(index);
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Writes the table as comma-delimited text with a header row.
    ///
    /// # Errors
    ///
    /// Returns a CSV error if writing fails.
    #[cfg(test)]
    pub(crate) fn to_csv_bytes(&self) -> Result<Vec<u8>, DatasetError> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        into_bytes(writer)
    }

    /// Deserializes every row into `T` using the header row for field
    /// names.
    ///
    /// # Errors
    ///
    /// Returns a CSV error for the first row that does not deserialize.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Vec<T>, DatasetError> {
        let headers = StringRecord::from(self.headers.clone());
        self.rows
            .iter()
            .map(|row| {
                StringRecord::from(row.clone())
                    .deserialize(Some(&headers))
                    .map_err(DatasetError::from)
            })
            .collect()
    }
}

/// Serializes observations as comma-delimited text with a header row.
///
/// # Errors
///
/// Returns a CSV error if serialization fails.
pub fn encode_observations(rows: &[DailyObservation]) -> Result<Vec<u8>, DatasetError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record(flood_risk_dataset_models::COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    into_bytes(writer)
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, DatasetError> {
    writer
        .into_inner()
        .map_err(|e| DatasetError::Csv(csv::Error::from(e.into_error())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flood_risk_dataset_models::COLUMNS;
    use flood_risk_neighborhood_models::NeighborhoodCategory;

    fn row() -> DailyObservation {
        DailyObservation {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            neighborhood: "Pina".to_string(),
            lat: -8.085_6,
            lon: -34.883_1,
            altitude: 3,
            vulnerability: 0.68,
            population_density: 12_200,
            rainfall_mm: 12.5,
            tide_m: 1.4,
            occurrences: 2,
            category: NeighborhoodCategory::Coastal,
        }
    }

    #[test]
    fn encodes_header_in_schema_order() {
        let bytes = encode_observations(&[row()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "2024-06-01,Pina,-8.0856,-34.8831,3,0.68,12200,12.5,1.4,2,litoraneo"
        );
    }

    #[test]
    fn empty_input_still_has_header() {
        let table = Table::from_observations(&[]).unwrap();
        assert_eq!(table.headers(), COLUMNS.map(String::from).as_slice());
        assert!(table.is_empty());
    }

    #[test]
    fn strips_byte_order_mark() {
        let table = Table::from_reader("\u{feff}Dia,Mês\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.headers(), ["Dia".to_string(), "Mês".to_string()]);
        assert_eq!(table.column_index("Dia"), Some(0));
    }

    #[test]
    fn ragged_rows_read_as_empty_cells() {
        let table = Table::from_reader("a,b,c\n1,2\n".as_bytes()).unwrap();
        let cells: Vec<&str> = table.column(2).collect();
        assert_eq!(cells, vec![""]);
    }

    #[test]
    fn drops_a_column() {
        let table = Table::from_observations(&[row()]).unwrap();
        let trimmed = table.without_column("altitude");
        assert!(trimmed.column_index("altitude").is_none());
        assert_eq!(trimmed.headers().len(), COLUMNS.len() - 1);
        assert_eq!(trimmed.rows()[0].len(), COLUMNS.len() - 1);
    }

    #[test]
    fn deserializes_back_into_observations() {
        let table = Table::from_observations(&[row()]).unwrap();
        let rows: Vec<DailyObservation> = table.deserialize().unwrap();
        assert_eq!(rows, vec![row()]);
    }
}
