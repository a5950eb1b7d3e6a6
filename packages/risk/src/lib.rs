#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Flood-risk scoring.
//!
//! Two independent formulas live here and are kept apart on purpose:
//!
//! * [`occurrence`] computes the Poisson rate λ used when fabricating
//!   occurrence counts, and draws counts from it.
//! * [`index`] computes a 0-1 categorical index used for reporting.
//!
//! [`rng`] provides the single seeded stream every draw is taken from.
//! [`input`] bounds-checks calculator input before it is scored.

pub mod index;
pub mod input;
pub mod occurrence;
pub mod rng;

pub use index::{RiskIndex, RiskLevel, risk_index};
pub use input::{InputError, MAX_RAINFALL_MM, MAX_TIDE_M, checked_rainfall, checked_tide};
pub use occurrence::{
    CategoryFactors, RateBreakdown, draw_occurrences, occurrence_rate, rate_breakdown,
};
pub use rng::{DEFAULT_SEED, FloodRng};
