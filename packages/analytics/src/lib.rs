#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Post-hoc analysis of persisted flood datasets.
//!
//! Loads a validated dataset and computes summary statistics, a weighted
//! neighborhood ranking, and the distribution of rows across
//! categorical risk levels.

pub mod ranking;
pub mod summary;

use std::path::Path;

use flood_risk_dataset::DatasetError;
use flood_risk_dataset_models::DailyObservation;
use flood_risk_risk::InputError;
use thiserror::Error;

pub use ranking::{rank_neighborhoods, risk_level_distribution};
pub use summary::summarize;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Reading or validating the dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A row cannot be scored by the risk index.
    #[error("Cannot score row: {0}")]
    Input(#[from] InputError),

    /// The dataset has no rows.
    #[error("Dataset has no rows")]
    EmptyDataset,
}

/// Loads a persisted dataset, validating it first.
///
/// # Errors
///
/// Returns [`AnalyticsError::Dataset`] if the file is missing, invalid,
/// or cannot be decoded.
pub fn read_dataset(path: &Path) -> Result<Vec<DailyObservation>, AnalyticsError> {
    let rows = flood_risk_dataset::read_dataset(path)?;
    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
