#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood attribute and rain-gauge station mapping types.
//!
//! Defines the TOML schema for the static neighborhood registry and the
//! station→neighborhood lookup used when converting rainfall tables.
//! Every value here is compiled-in configuration, immutable for the
//! lifetime of a run.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Terrain/urban category of a neighborhood.
///
/// The serialized names match the `tipo_bairro` column of the dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum NeighborhoodCategory {
    /// Seafront areas, most exposed to high tides.
    #[serde(rename = "litoraneo")]
    #[strum(serialize = "litoraneo")]
    Coastal,
    /// Areas along the Capibaribe/Beberibe river banks.
    #[serde(rename = "ribeirinho")]
    #[strum(serialize = "ribeirinho")]
    Riverside,
    /// Hillside areas, landslide-prone but tide-insensitive.
    #[serde(rename = "altitude")]
    #[strum(serialize = "altitude")]
    Highland,
    /// Densely built central areas.
    #[serde(rename = "urbano_denso")]
    #[strum(serialize = "urbano_denso")]
    DenseUrban,
    /// Medium-density residential areas.
    #[serde(rename = "urbano_medio")]
    #[strum(serialize = "urbano_medio")]
    MediumUrban,
}

/// Static attributes of one neighborhood (bairro).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Unique neighborhood name, as written to the `bairro` column.
    pub name: String,
    /// Reference latitude (degrees).
    pub lat: f64,
    /// Reference longitude (degrees).
    pub lon: f64,
    /// Altitude in meters.
    pub altitude: i64,
    /// Terrain/urban category.
    pub category: NeighborhoodCategory,
    /// Socioeconomic vulnerability index, 0.0-1.0.
    pub vulnerability: f64,
    /// Population density in people/km².
    pub population_density: i64,
    /// Dimensionless 0-1 multiplier applied to the tide sub-score.
    pub tide_sensitivity: f64,
    /// Dimensionless 0-1 multiplier applied to the rainfall sub-score.
    pub rainfall_sensitivity: f64,
}

/// Maps one APAC rain-gauge station to the neighborhood it represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationMapping {
    /// Station name exactly as it appears in the `Posto` column.
    pub station: String,
    /// Target neighborhood name.
    pub neighborhood: String,
}

/// Root of the embedded neighborhood TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborhoodTable {
    /// Neighborhoods in registry order.
    #[serde(rename = "neighborhood")]
    pub neighborhoods: Vec<Neighborhood>,
}

/// Root of the embedded station mapping TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTable {
    /// Station mappings in file order.
    #[serde(rename = "station")]
    pub stations: Vec<StationMapping>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn category_round_trips_through_dataset_names() {
        assert_eq!(NeighborhoodCategory::Coastal.as_ref(), "litoraneo");
        assert_eq!(NeighborhoodCategory::DenseUrban.to_string(), "urbano_denso");
        assert_eq!(
            NeighborhoodCategory::from_str("ribeirinho").unwrap(),
            NeighborhoodCategory::Riverside
        );
        assert!(NeighborhoodCategory::from_str("suburbano").is_err());
    }

    #[test]
    fn deserializes_neighborhood_from_toml() {
        let table: NeighborhoodTable = toml::from_str(
            r#"
            [[neighborhood]]
            name = "Torre"
            lat = -8.0456
            lon = -34.9025
            altitude = 15
            category = "urbano_medio"
            vulnerability = 0.42
            population_density = 7600
            tide_sensitivity = 0.28
            rainfall_sensitivity = 0.52
            "#,
        )
        .unwrap();

        let torre = &table.neighborhoods[0];
        assert_eq!(torre.name, "Torre");
        assert_eq!(torre.category, NeighborhoodCategory::MediumUrban);
        assert_eq!(torre.population_density, 7600);
    }
}
