#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset table encoding, fail-closed validation, and persistence.
//!
//! Generated and converted rows are encoded to CSV in memory, validated
//! on the encoded cells, and written only when every check passes.

pub mod progress;
pub mod store;
pub mod table;
pub mod validate;

pub use store::{WriteSummary, ensure_valid, read_dataset, write_validated};
pub use table::{Table, encode_observations};
pub use validate::{Violation, validate_table};

/// Errors that can occur while encoding, validating, or persisting a
/// dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// An input file does not exist.
    #[error("Missing input file: {path}")]
    MissingInput {
        /// Path that was looked up.
        path: String,
    },

    /// File system operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table failed one or more invariants and was not persisted.
    #[error("Dataset failed validation with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),
}
