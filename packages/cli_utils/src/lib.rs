#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the flood-risk toolchain.
//!
//! Provides `indicatif`-backed progress bars behind the [`ProgressCallback`]
//! trait, [`init_logger`] which sets up `indicatif-log-bridge` so that
//! `log::info!` and friends are suspended while progress bars redraw, and
//! environment-variable fallbacks for flags.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use flood_risk_dataset::progress::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

/// Seed fallback when `--seed` is not given.
pub const ENV_SEED: &str = "FLOOD_RISK_SEED";

/// Output directory fallback when no output path is given.
pub const ENV_OUTPUT_DIR: &str = "FLOOD_RISK_OUTPUT_DIR";

/// Directory used when neither a flag nor [`ENV_OUTPUT_DIR`] is set.
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";

/// An environment variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value '{value}' for {name}: expected {expected}")]
pub struct EnvError {
    /// Variable name.
    pub name: String,
    /// Raw value.
    pub value: String,
    /// Human-readable expected type.
    pub expected: &'static str,
}

/// An `indicatif` [`ProgressBar`] that implements [`ProgressCallback`].
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Style to switch to once `set_total()` provides a known length.
    bar_style: ProgressStyle,
}

impl IndicatifProgress {
    /// Creates a progress bar that starts as a spinner and transitions to
    /// a full bar once [`ProgressCallback::set_total()`] is called.
    #[must_use]
    pub fn batch_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.yellow} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let bar_style = ProgressStyle::with_template(
            "  {msg} {wide_bar:.yellow/dim} {pos}/{len} {percent}% [{elapsed_precise}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Arc::new(Self { bar, bar_style })
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        // Switch from spinner to bar style now that we know the total.
        self.bar.set_style(self.bar_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while progress bars redraw.
///
/// Returns the [`MultiProgress`] that all progress bars must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Ignore error if logger was already set (e.g., in tests)

    log::set_max_level(level);

    multi
}

/// Resolves the run seed: flag, then [`ENV_SEED`], then `default`.
///
/// # Errors
///
/// Returns [`EnvError`] if [`ENV_SEED`] is set but not a `u64`.
pub fn resolve_seed(flag: Option<u64>, default: u64) -> Result<u64, EnvError> {
    resolve_seed_from(flag, std::env::var(ENV_SEED).ok().as_deref(), default)
}

fn resolve_seed_from(flag: Option<u64>, env: Option<&str>, default: u64) -> Result<u64, EnvError> {
    if let Some(seed) = flag {
        return Ok(seed);
    }
    match env.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| EnvError {
            name: ENV_SEED.to_string(),
            value: raw.to_string(),
            expected: "an unsigned integer",
        }),
        None => Ok(default),
    }
}

/// Resolves an output file: flag, then `file_name` inside
/// [`ENV_OUTPUT_DIR`], then `file_name` inside [`DEFAULT_OUTPUT_DIR`].
#[must_use]
pub fn resolve_output(flag: Option<PathBuf>, file_name: &str) -> PathBuf {
    resolve_output_from(flag, std::env::var(ENV_OUTPUT_DIR).ok().as_deref(), file_name)
}

fn resolve_output_from(flag: Option<PathBuf>, env: Option<&str>, file_name: &str) -> PathBuf {
    flag.unwrap_or_else(|| {
        let dir = env
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_OUTPUT_DIR);
        PathBuf::from(dir).join(file_name)
    })
}
