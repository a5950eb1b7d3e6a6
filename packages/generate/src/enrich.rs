//! Turns a (date, neighborhood, rainfall, tide) tuple into a dataset row.
//!
//! Shared by the synthetic generator and the real-data converter so both
//! apply the same occurrence model and coordinate jitter.

use chrono::NaiveDate;
use flood_risk_dataset_models::DailyObservation;
use flood_risk_neighborhood_models::Neighborhood;
use flood_risk_risk::{draw_occurrences, occurrence_rate};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::GenerateError;

/// Default standard deviation of the coordinate jitter, in degrees.
pub const DEFAULT_JITTER_STD_DEG: f64 = 0.0005;

/// Gaussian noise added to a neighborhood's reference coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    std_deg: f64,
}

impl Jitter {
    /// Builds a jitter with the given standard deviation in degrees.
    ///
    /// Zero is allowed and leaves coordinates unchanged while still
    /// consuming the same number of draws.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidConfig`] if `std_deg` is negative
    /// or not finite.
    pub fn new(std_deg: f64) -> Result<Self, GenerateError> {
        if !std_deg.is_finite() || std_deg < 0.0 {
            return Err(GenerateError::InvalidConfig(format!(
                "jitter standard deviation must be a non-negative number, got {std_deg}"
            )));
        }
        Ok(Self { std_deg })
    }

    /// Standard deviation in degrees.
    #[must_use]
    pub const fn std_deg(&self) -> f64 {
        self.std_deg
    }

    /// Returns `(lat, lon)` with independent noise added, latitude first.
    pub fn apply<R: Rng + ?Sized>(&self, lat: f64, lon: f64, rng: &mut R) -> (f64, f64) {
        let lat_noise: f64 = rng.sample(StandardNormal);
        let lon_noise: f64 = rng.sample(StandardNormal);
        (
            self.std_deg.mul_add(lat_noise, lat),
            self.std_deg.mul_add(lon_noise, lon),
        )
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self {
            std_deg: DEFAULT_JITTER_STD_DEG,
        }
    }
}

/// Draws the occurrence count and jittered coordinates for one row.
///
/// Draw order is fixed: Poisson count, latitude noise, longitude noise.
pub fn enrich_observation<R: Rng + ?Sized>(
    date: NaiveDate,
    neighborhood: &Neighborhood,
    rainfall_mm: f64,
    tide_m: f64,
    jitter: &Jitter,
    rng: &mut R,
) -> DailyObservation {
    let rate = occurrence_rate(rainfall_mm, tide_m, neighborhood);
    let occurrences = draw_occurrences(rate, rng);
    let coordinates = jitter.apply(neighborhood.lat, neighborhood.lon, rng);
    DailyObservation::new(date, neighborhood, coordinates, rainfall_mm, tide_m, occurrences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_risk_neighborhood::find_neighborhood;
    use flood_risk_risk::FloodRng;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn rejects_negative_jitter() {
        assert!(matches!(Jitter::new(-0.1), Err(GenerateError::InvalidConfig(_))));
        assert!(matches!(Jitter::new(f64::NAN), Err(GenerateError::InvalidConfig(_))));
    }

    #[test]
    fn zero_jitter_keeps_reference_coordinates() {
        let torre = find_neighborhood("Torre").unwrap();
        let jitter = Jitter::new(0.0).unwrap();
        let mut rng = FloodRng::from_seed_u64(5);
        let row = enrich_observation(date(), &torre, 12.0, 1.4, &jitter, &mut rng);
        assert_eq!(row.lat, torre.lat);
        assert_eq!(row.lon, torre.lon);
        assert_eq!(row.neighborhood, "Torre");
        assert_eq!(row.category, torre.category);
    }

    #[test]
    fn default_jitter_stays_close() {
        let pina = find_neighborhood("Pina").unwrap();
        let mut rng = FloodRng::from_seed_u64(9);
        for _ in 0..200 {
            let row = enrich_observation(date(), &pina, 0.0, 1.0, &Jitter::default(), &mut rng);
            assert!((row.lat - pina.lat).abs() < 0.005);
            assert!((row.lon - pina.lon).abs() < 0.005);
        }
    }

    #[test]
    fn same_seed_same_row() {
        let coelhos = find_neighborhood("Coelhos").unwrap();
        let jitter = Jitter::default();
        let draw = || {
            let mut rng = FloodRng::from_seed_u64(1);
            enrich_observation(date(), &coelhos, 80.0, 2.1, &jitter, &mut rng)
        };
        let a = draw();
        let b = draw();
        assert_eq!(a, b);
    }

    #[test]
    fn values_are_rounded_to_output_precision() {
        let torre = find_neighborhood("Torre").unwrap();
        let row = enrich_observation(
            date(),
            &torre,
            12.345_678,
            1.234_567,
            &Jitter::new(0.0).unwrap(),
            &mut FloodRng::from_seed_u64(2),
        );
        assert_eq!(row.rainfall_mm, 12.35);
        assert_eq!(row.tide_m, 1.235);
    }
}
