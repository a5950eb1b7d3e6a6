//! Compile-time registry of neighborhoods and rain-gauge stations.
//!
//! Both tables are TOML files embedded via `include_str!`. Adding a
//! neighborhood or remapping a station only requires editing the files
//! under `registry/`.

use flood_risk_neighborhood_models::{
    Neighborhood, NeighborhoodTable, StationMapping, StationTable,
};

/// Number of registered neighborhoods. Enforced by a test.
#[cfg(test)]
const EXPECTED_NEIGHBORHOOD_COUNT: usize = 15;

/// Number of mapped rain-gauge stations. Enforced by a test.
#[cfg(test)]
const EXPECTED_STATION_COUNT: usize = 28;

const NEIGHBORHOODS_TOML: &str = include_str!("../registry/recife.toml");

const STATIONS_TOML: &str = include_str!("../registry/apac_stations.toml");

/// Returns all registered neighborhoods in registry order.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. The file is a compile-time
/// constant, so a parse failure is a development error caught by tests.
#[must_use]
pub fn all_neighborhoods() -> Vec<Neighborhood> {
    let table: NeighborhoodTable = toml::de::from_str(NEIGHBORHOODS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse neighborhood registry: {e}"));
    table.neighborhoods
}

/// Returns every station→neighborhood mapping.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse.
#[must_use]
pub fn station_mappings() -> Vec<StationMapping> {
    let table: StationTable = toml::de::from_str(STATIONS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse station mapping: {e}"));
    table.stations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_neighborhoods() {
        let neighborhoods = all_neighborhoods();
        assert_eq!(
            neighborhoods.len(),
            EXPECTED_NEIGHBORHOOD_COUNT,
            "Expected {EXPECTED_NEIGHBORHOOD_COUNT} neighborhoods, found {}. \
             Update EXPECTED_NEIGHBORHOOD_COUNT after adding/removing entries.",
            neighborhoods.len()
        );
    }

    #[test]
    fn neighborhood_names_are_unique() {
        let mut seen = BTreeSet::new();
        for neighborhood in &all_neighborhoods() {
            assert!(
                seen.insert(neighborhood.name.clone()),
                "Duplicate neighborhood: {}",
                neighborhood.name
            );
        }
    }

    #[test]
    fn attributes_are_within_calibrated_ranges() {
        for n in &all_neighborhoods() {
            assert!(
                (0.0..=1.0).contains(&n.vulnerability),
                "{} has vulnerability {}",
                n.name,
                n.vulnerability
            );
            assert!((0.0..=1.0).contains(&n.tide_sensitivity), "{}", n.name);
            assert!((0.0..=1.0).contains(&n.rainfall_sensitivity), "{}", n.name);
            assert!(n.population_density > 0, "{}", n.name);
            assert!(n.altitude >= 0, "{}", n.name);
            assert!((-8.2..=-7.9).contains(&n.lat), "{} lat {}", n.name, n.lat);
            assert!((-35.0..=-34.8).contains(&n.lon), "{} lon {}", n.name, n.lon);
        }
    }

    #[test]
    fn loads_all_stations() {
        assert_eq!(station_mappings().len(), EXPECTED_STATION_COUNT);
    }

    #[test]
    fn every_station_maps_to_a_registered_neighborhood() {
        let names: BTreeSet<String> = all_neighborhoods().into_iter().map(|n| n.name).collect();
        for mapping in &station_mappings() {
            assert!(
                names.contains(&mapping.neighborhood),
                "Station {} maps to unknown neighborhood {}",
                mapping.station,
                mapping.neighborhood
            );
        }
    }

    #[test]
    fn station_names_are_unique() {
        let mut seen = BTreeSet::new();
        for mapping in &station_mappings() {
            assert!(
                seen.insert(mapping.station.clone()),
                "Duplicate station: {}",
                mapping.station
            );
        }
    }
}
