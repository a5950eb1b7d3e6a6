#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Real-data conversion.
//!
//! Reads a tide table and an APAC rain-gauge export, joins them onto the
//! neighborhood registry, and writes the result in the same schema the
//! generator produces. Occurrence counts and coordinate jitter are drawn
//! exactly as in generation.

pub mod assemble;
pub mod parsing;
pub mod rainfall;
pub mod tide;

use std::path::Path;

use flood_risk_dataset::{DatasetError, Table, WriteSummary, write_validated};
use flood_risk_generate::Jitter;
use flood_risk_neighborhood::{all_neighborhoods, station_lookup};
use flood_risk_risk::{DEFAULT_SEED, FloodRng};

pub use assemble::assemble;
pub use parsing::parse_decimal_br;
pub use rainfall::{RainfallSeries, parse_rainfall};
pub use tide::{TideSeries, parse_tide};

/// Default output file name for converted datasets.
pub const DEFAULT_OUTPUT_FILE: &str = "real_data_converted.csv";

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// An input file does not exist.
    #[error("Missing input file: {path}")]
    MissingInput {
        /// Path that was looked up.
        path: String,
    },

    /// A source file lacks a required column.
    #[error("{source_name}: missing required column '{column}'")]
    Schema {
        /// Source file the column was expected in.
        source_name: String,
        /// Missing column name.
        column: String,
    },

    /// The tide file has no usable height at all.
    #[error("{source_name}: no valid tide readings")]
    NoTideReadings {
        /// Source file.
        source_name: String,
    },

    /// No rain-gauge station maps to a registry neighborhood.
    #[error("{source_name}: no rain-gauge station maps to a Recife neighborhood")]
    NoMappedStations {
        /// Source file.
        source_name: String,
    },

    /// Reading, validating, or writing a table failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Options for a conversion run.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Seed for occurrence and jitter draws.
    pub seed: u64,
    /// Coordinate jitter.
    pub jitter: Jitter,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            jitter: Jitter::default(),
        }
    }
}

/// Outcome of [`convert_files`].
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Rows written.
    pub rows: usize,
    /// Neighborhoods covered.
    pub neighborhoods: usize,
    /// Distinct dates covered.
    pub dates: usize,
    /// Tide days filled with the series mean.
    pub tide_days_backfilled: usize,
    /// Rainfall day cells read as 0.0 mm.
    pub rainfall_cells_filled: usize,
    /// Stations dropped for lack of a mapping.
    pub unmapped_stations: Vec<String>,
    /// Write outcome.
    pub written: WriteSummary,
}

/// Converts a tide table and a rain-gauge export into a validated
/// dataset at `output`.
///
/// Both inputs are checked for existence before either is parsed. The
/// output is written only after the assembled table passes validation.
///
/// # Errors
///
/// Returns [`ConvertError::MissingInput`] if an input is absent, a
/// schema or content error from either source, or
/// [`ConvertError::Dataset`] if validation or writing fails.
pub fn convert_files(
    tide_path: &Path,
    rainfall_path: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    for path in [tide_path, rainfall_path] {
        if !path.exists() {
            return Err(ConvertError::MissingInput {
                path: path.display().to_string(),
            });
        }
    }

    let tide_name = source_name(tide_path);
    let rainfall_name = source_name(rainfall_path);

    log::info!("Reading tide table {}", tide_path.display());
    let tide = parse_tide(&Table::from_path(tide_path)?, &tide_name)?;

    log::info!("Reading rain-gauge export {}", rainfall_path.display());
    let rainfall = parse_rainfall(
        &Table::from_path(rainfall_path)?,
        &rainfall_name,
        &station_lookup(),
    )?;

    let neighborhoods = all_neighborhoods();
    let mut rng = FloodRng::from_seed_u64(options.seed);
    let rows = assemble(&tide, &rainfall, &neighborhoods, &options.jitter, &mut rng);
    let dates = assemble::union_dates(&tide, &rainfall).len();

    let written = write_validated(&rows, output)?;

    Ok(ConversionReport {
        rows: rows.len(),
        neighborhoods: neighborhoods.len(),
        dates,
        tide_days_backfilled: tide.backfilled,
        rainfall_cells_filled: rainfall.filled_cells,
        unmapped_stations: rainfall.unmapped_stations,
        written,
    })
}

fn source_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
