#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static Recife neighborhood registry and station lookup.
//!
//! The registry feeds both the synthetic generator and the real-data
//! converter with per-neighborhood constants. It follows the same
//! embedded-TOML pattern as the other compiled-in source tables.

pub mod registry;

use std::collections::BTreeMap;

use flood_risk_neighborhood_models::Neighborhood;

pub use registry::{all_neighborhoods, station_mappings};

/// Looks up a neighborhood by its exact name.
#[must_use]
pub fn find_neighborhood(name: &str) -> Option<Neighborhood> {
    all_neighborhoods().into_iter().find(|n| n.name == name)
}

/// Builds a station name → neighborhood name lookup table.
///
/// Stations absent from the table have no mapping and are dropped by the
/// rainfall reader.
#[must_use]
pub fn station_lookup() -> BTreeMap<String, String> {
    station_mappings()
        .into_iter()
        .map(|m| (m.station, m.neighborhood))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flood_risk_neighborhood_models::NeighborhoodCategory;

    #[test]
    fn finds_registered_neighborhood() {
        let pina = find_neighborhood("Pina").unwrap();
        assert_eq!(pina.category, NeighborhoodCategory::Coastal);
        assert_eq!(pina.population_density, 12_200);
    }

    #[test]
    fn unknown_neighborhood_is_none() {
        assert!(find_neighborhood("Atlantis").is_none());
    }

    #[test]
    fn maps_alto_da_brasileira_to_torre() {
        let lookup = station_lookup();
        assert_eq!(
            lookup.get("Recife (Alto da Brasileira)").map(String::as_str),
            Some("Torre")
        );
        assert!(!lookup.contains_key("Petrolina"));
    }

    #[test]
    fn lookup_contains_every_station() {
        let lookup = station_lookup();
        assert_eq!(lookup.len(), station_mappings().len());
        assert_eq!(lookup.get("Moreno").map(String::as_str), Some("Ibura"));
    }
}
