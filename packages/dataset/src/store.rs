//! Validated persistence of the dataset snapshot.
//!
//! The snapshot is encoded once, validated on those exact bytes, and only
//! then written. Writes go to a sibling temporary file that is renamed
//! into place, so a reader never sees a partial table.

use std::path::{Path, PathBuf};

use flood_risk_dataset_models::DailyObservation;

use crate::DatasetError;
use crate::table::{Table, encode_observations};
use crate::validate::validate_table;

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Data rows written.
    pub rows: usize,
    /// Bytes written.
    pub bytes: usize,
    /// Final file path.
    pub path: PathBuf,
}

/// Fails with every violation if the table is not valid.
///
/// # Errors
///
/// Returns [`DatasetError::Validation`] listing all violations.
pub fn ensure_valid(table: &Table) -> Result<(), DatasetError> {
    let violations = validate_table(table);
    if violations.is_empty() {
        Ok(())
    } else {
        for violation in &violations {
            log::error!("Validation failed: {violation}");
        }
        Err(DatasetError::Validation(violations))
    }
}

/// Encodes, validates, and writes observations to `path`.
///
/// Rows are written in the order given. On any violation nothing is
/// written.
///
/// # Errors
///
/// Returns [`DatasetError::Validation`] if the encoded table is invalid,
/// or an I/O or CSV error if encoding or writing fails.
pub fn write_validated(
    rows: &[DailyObservation],
    path: &Path,
) -> Result<WriteSummary, DatasetError> {
    let bytes = encode_observations(rows)?;
    let table = Table::from_reader(bytes.as_slice())?;
    ensure_valid(&table)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DatasetError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let tmp_path = temporary_path(path);
    std::fs::write(&tmp_path, &bytes).map_err(|e| DatasetError::Io {
        path: tmp_path.display().to_string(),
        source: e,
    })?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            log::warn!("Failed to remove {}: {cleanup}", tmp_path.display());
        }
        return Err(DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        });
    }

    log::info!("Wrote {} rows ({} bytes) to {}", table.len(), bytes.len(), path.display());

    Ok(WriteSummary {
        rows: table.len(),
        bytes: bytes.len(),
        path: path.to_path_buf(),
    })
}

/// Reads and validates a persisted dataset.
///
/// # Errors
///
/// Returns [`DatasetError::MissingInput`] if the file does not exist,
/// [`DatasetError::Validation`] if it fails validation, or a CSV error
/// if a row cannot be decoded.
pub fn read_dataset(path: &Path) -> Result<Vec<DailyObservation>, DatasetError> {
    let table = Table::from_path(path)?;
    ensure_valid(&table)?;
    let rows = table.deserialize()?;
    log::debug!("Read {} rows from {}", table.len(), path.display());
    Ok(rows)
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flood_risk_neighborhood_models::NeighborhoodCategory;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("flood_risk_store_{}_{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("dataset.csv")
    }

    fn observation(day: u32) -> DailyObservation {
        DailyObservation {
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            neighborhood: "Coelhos".to_string(),
            lat: -8.0636,
            lon: -34.8717,
            altitude: 3,
            vulnerability: 0.72,
            population_density: 14_300,
            rainfall_mm: 40.25,
            tide_m: 1.812,
            occurrences: 4,
            category: NeighborhoodCategory::Riverside,
        }
    }

    #[test]
    fn writes_and_reads_back() {
        let path = scratch_path("roundtrip");
        let rows = vec![observation(1), observation(2)];
        let summary = write_validated(&rows, &path).unwrap();
        assert_eq!(summary.rows, 2);
        assert!(!temporary_path(&path).exists());
        assert_eq!(read_dataset(&path).unwrap(), rows);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalid_rows_are_not_persisted() {
        let path = scratch_path("invalid");
        let _ = std::fs::remove_file(&path);
        let rows = vec![observation(1), observation(1)];
        let err = write_validated(&rows, &path).unwrap_err();
        assert!(matches!(err, DatasetError::Validation(ref v) if v.len() == 1));
        assert!(!path.exists());
    }

    #[test]
    fn reading_a_missing_file_fails() {
        let err = read_dataset(Path::new("/nonexistent/flood_risk/dataset.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingInput { .. }));
    }

    #[test]
    fn failed_rename_leaves_no_temporary_file() {
        let path = scratch_path("rename");
        let _ = std::fs::remove_file(&path);
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let err = write_validated(&[observation(1)], &path).unwrap_err();

        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(!temporary_path(&path).exists());
        assert!(path.is_dir());
        std::fs::remove_dir_all(&path).unwrap();
    }
}
