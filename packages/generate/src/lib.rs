#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic daily flood dataset generation.
//!
//! Produces one row per (date, neighborhood) for a window of consecutive
//! days ending at a configurable date. Rainfall follows a seasonal Gamma
//! model, tide a two-harmonic astronomical model, and occurrence counts
//! are Poisson draws from [`flood_risk_risk::occurrence_rate`].
//!
//! Every random draw comes from a single [`FloodRng`] seeded once per
//! run, consumed neighborhood-major then date-minor, so the same
//! configuration always produces byte-identical output.

pub mod enrich;
pub mod environment;

use std::path::Path;
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use flood_risk_dataset::progress::ProgressCallback;
use flood_risk_dataset::{DatasetError, WriteSummary, write_validated};
use flood_risk_dataset_models::{DailyObservation, sort_observations};
use flood_risk_neighborhood::all_neighborhoods;
use flood_risk_neighborhood_models::Neighborhood;
use flood_risk_risk::{DEFAULT_SEED, FloodRng};

pub use enrich::{DEFAULT_JITTER_STD_DEG, Jitter, enrich_observation};
pub use environment::{EnvironmentModel, Season};

/// Default number of days generated.
pub const DEFAULT_DAYS: u32 = 365;

/// Default output file name for generated datasets.
pub const DEFAULT_OUTPUT_FILE: &str = "simulated_daily.csv";

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A probability distribution rejected its parameters.
    #[error("Invalid {name} distribution: {message}")]
    Distribution {
        /// Which distribution failed.
        name: String,
        /// Error reported by the distribution.
        message: String,
    },

    /// The run configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Encoding, validation, or writing failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl GenerateError {
    pub(crate) fn distribution(name: &str, error: &impl std::fmt::Display) -> Self {
        Self::Distribution {
            name: name.to_string(),
            message: error.to_string(),
        }
    }
}

/// Parameters of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Number of consecutive days per neighborhood.
    pub n_days: u32,
    /// Last day of the window, inclusive.
    pub end_date: NaiveDate,
    /// Seed for the run's random stream.
    pub seed: u64,
    /// Coordinate jitter.
    pub jitter: Jitter,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            n_days: DEFAULT_DAYS,
            end_date: Utc::now().date_naive(),
            seed: DEFAULT_SEED,
            jitter: Jitter::default(),
        }
    }
}

impl GenerateConfig {
    /// Returns the first and last dates of the window.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidConfig`] if `n_days` is zero or the
    /// window would start before the earliest representable date.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), GenerateError> {
        if self.n_days == 0 {
            return Err(GenerateError::InvalidConfig(
                "n_days must be at least 1".to_string(),
            ));
        }
        let start = self
            .end_date
            .checked_sub_days(Days::new(u64::from(self.n_days - 1)))
            .ok_or_else(|| {
                GenerateError::InvalidConfig(format!(
                    "{} days before {} is out of range",
                    self.n_days, self.end_date
                ))
            })?;
        Ok((start, self.end_date))
    }
}

/// Result of [`generate_to_file`].
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    /// Rows in file order.
    pub rows: Vec<DailyObservation>,
    /// Write outcome.
    pub written: WriteSummary,
}

/// Generates rows for every neighborhood and day in the window.
///
/// Rows are returned sorted by date, then neighborhood name.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidConfig`] for an unusable window, or
/// [`GenerateError::Distribution`] if a model distribution cannot be
/// built.
pub fn generate_observations(
    config: &GenerateConfig,
    neighborhoods: &[Neighborhood],
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<DailyObservation>, GenerateError> {
    let (start, end) = config.date_range()?;
    let model = EnvironmentModel::new()?;
    let mut rng = FloodRng::from_seed_u64(config.seed);

    let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();

    log::info!(
        "Generating {} days ({start} to {end}) for {} neighborhoods with seed {}",
        dates.len(),
        neighborhoods.len(),
        config.seed
    );

    progress.set_total(neighborhoods.len() as u64);
    let mut rows = Vec::with_capacity(dates.len() * neighborhoods.len());

    for neighborhood in neighborhoods {
        progress.set_message(neighborhood.name.clone());
        for date in &dates {
            let rainfall = model.draw_rainfall(*date, &mut rng);
            let tide = model.draw_tide(*date, &mut rng);
            rows.push(enrich_observation(
                *date,
                neighborhood,
                rainfall,
                tide,
                &config.jitter,
                &mut rng,
            ));
        }
        log::debug!("Generated {} days for {}", dates.len(), neighborhood.name);
        progress.inc(1);
    }

    sort_observations(&mut rows);
    progress.finish(format!("{} rows generated", rows.len()));

    Ok(rows)
}

/// Generates the full registry dataset and writes it to `path`.
///
/// The file is written only if the encoded table passes validation.
///
/// # Errors
///
/// Returns any [`generate_observations`] error, or
/// [`GenerateError::Dataset`] if validation or writing fails.
pub fn generate_to_file(
    config: &GenerateConfig,
    path: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<GeneratedDataset, GenerateError> {
    let neighborhoods = all_neighborhoods();
    let rows = generate_observations(config, &neighborhoods, progress)?;
    let written = write_validated(&rows, path)?;
    Ok(GeneratedDataset { rows, written })
}
