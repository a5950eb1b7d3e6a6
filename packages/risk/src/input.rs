//! Bounds checks for values entered into the one-shot risk calculator.
//!
//! Dataset rows have already passed the dataset validator; these checks
//! apply to free-form user input. Negative and non-finite values are
//! rejected, and values above the physical ceiling are capped.

/// Largest daily rainfall accepted by the calculator, in mm.
pub const MAX_RAINFALL_MM: f64 = 200.0;

/// Largest tide height accepted by the calculator, in meters.
pub const MAX_TIDE_M: f64 = 3.0;

/// A calculator input that cannot be scored.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InputError {
    /// NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite {
        /// Input name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Below zero.
    #[error("{field} cannot be negative, got {value}")]
    Negative {
        /// Input name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Checks a rainfall input, capping it at [`MAX_RAINFALL_MM`].
///
/// # Errors
///
/// Returns [`InputError`] if the value is non-finite or negative.
pub fn checked_rainfall(rainfall_mm: f64) -> Result<f64, InputError> {
    checked("rainfall_mm", rainfall_mm, MAX_RAINFALL_MM)
}

/// Checks a tide input, capping it at [`MAX_TIDE_M`].
///
/// # Errors
///
/// Returns [`InputError`] if the value is non-finite or negative.
pub fn checked_tide(tide_m: f64) -> Result<f64, InputError> {
    checked("tide_m", tide_m, MAX_TIDE_M)
}

/// Rejects a non-finite value.
///
/// # Errors
///
/// Returns [`InputError::NotFinite`] for NaN or an infinity.
pub fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

fn checked(field: &'static str, value: f64, max: f64) -> Result<f64, InputError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    if value > max {
        log::warn!("{field} {value} above maximum, capped at {max}");
        return Ok(max);
    }
    Ok(value)
}
