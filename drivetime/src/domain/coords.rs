//! Named locations and the origin-destination pairs surveyed between them.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

/// Errors loading a coordinate table.
#[derive(Debug, thiserror::Error)]
pub enum CoordsError {
    #[error("failed to read coordinates file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid coordinates JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown location: {0}")]
    UnknownLocation(String),
}

/// A latitude/longitude pair in decimal degrees.
///
/// Deserializes from a two-element array `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for LatLon {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Location name → coordinates, iterated in the order the file lists them.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    locations: Vec<(String, LatLon)>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a JSON object of the form `{"name": [lat, lon]}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoordsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, CoordsError> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (name, value) in object {
            table.insert(name, serde_json::from_value(value)?);
        }
        Ok(table)
    }

    /// Add a location, or move an existing one to new coordinates in place.
    pub fn insert(&mut self, name: impl Into<String>, coords: LatLon) {
        let name = name.into();
        match self.locations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = coords,
            None => self.locations.push((name, coords)),
        }
    }

    pub fn get(&self, name: &str) -> Result<LatLon, CoordsError> {
        self.locations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, coords)| *coords)
            .ok_or_else(|| CoordsError::UnknownLocation(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// A single pair between two named locations.
    pub fn pair(&self, origin: &str, destination: &str) -> Result<RoutePair, CoordsError> {
        Ok(RoutePair {
            origin: origin.to_string(),
            destination: destination.to_string(),
            origin_coords: self.get(origin)?,
            destination_coords: self.get(destination)?,
        })
    }

    /// Every ordered pair of distinct locations.
    ///
    /// Origins are taken in table order, and for each origin the
    /// destinations follow in table order.
    pub fn all_pairs(&self) -> Vec<RoutePair> {
        self.locations
            .iter()
            .flat_map(|(origin, origin_coords)| {
                self.locations
                    .iter()
                    .filter(move |(destination, _)| destination != origin)
                    .map(move |(destination, destination_coords)| RoutePair {
                        origin: origin.clone(),
                        destination: destination.clone(),
                        origin_coords: *origin_coords,
                        destination_coords: *destination_coords,
                    })
            })
            .collect()
    }
}

/// One origin-destination query.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePair {
    pub origin: String,
    pub destination: String,
    pub origin_coords: LatLon,
    pub destination_coords: LatLon,
}

impl RoutePair {
    /// Label recorded in the `route` column, e.g. `Palo Alto_to_San Jose`.
    pub fn label(&self) -> String {
        format!("{}_to_{}", self.origin, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "Palo Alto": [37.4419, -122.143],
        "49er Stadium": [37.403, -121.97],
        "San Jose": [37.3382, -121.8863]
    }"#;

    #[test]
    fn parses_lat_lon_arrays() {
        let table = CoordinateTable::from_json(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.get("Palo Alto").unwrap(),
            LatLon::new(37.4419, -122.143)
        );
    }

    #[test]
    fn unknown_location_is_an_error() {
        let table = CoordinateTable::from_json(SAMPLE).unwrap();
        let err = table.get("Oakland").unwrap_err();
        assert_eq!(err.to_string(), "unknown location: Oakland");
    }

    #[test]
    fn all_pairs_excludes_self_pairs() {
        let table = CoordinateTable::from_json(SAMPLE).unwrap();
        let labels: Vec<_> = table.all_pairs().iter().map(RoutePair::label).collect();

        assert_eq!(
            labels,
            vec![
                "Palo Alto_to_49er Stadium",
                "Palo Alto_to_San Jose",
                "49er Stadium_to_Palo Alto",
                "49er Stadium_to_San Jose",
                "San Jose_to_Palo Alto",
                "San Jose_to_49er Stadium",
            ]
        );
    }

    #[test]
    fn pairs_follow_file_order_not_name_order() {
        let table = CoordinateTable::from_json(
            r#"{"Zephyr Cove": [39.0, -119.9], "Alameda": [37.7, -122.2]}"#,
        )
        .unwrap();
        let labels: Vec<_> = table.all_pairs().iter().map(RoutePair::label).collect();

        assert_eq!(labels, vec!["Zephyr Cove_to_Alameda", "Alameda_to_Zephyr Cove"]);
    }

    #[test]
    fn reinserting_keeps_position() {
        let mut table = CoordinateTable::new();
        table.insert("B", LatLon::new(1.0, 1.0));
        table.insert("A", LatLon::new(2.0, 2.0));
        table.insert("B", LatLon::new(3.0, 3.0));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("B").unwrap(), LatLon::new(3.0, 3.0));
        assert_eq!(table.all_pairs()[0].label(), "B_to_A");
    }

    #[test]
    fn single_location_has_no_pairs() {
        let mut table = CoordinateTable::new();
        table.insert("Solo", LatLon::new(1.0, 2.0));
        assert!(table.all_pairs().is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = CoordinateTable::load(&path).unwrap();
        let pair = table.pair("49er Stadium", "Palo Alto").unwrap();
        assert_eq!(pair.label(), "49er Stadium_to_Palo Alto");
        assert_eq!(pair.origin_coords.to_string(), "37.403,-121.97");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = CoordinateTable::from_json(r#"{"A": [1.0]}"#).unwrap_err();
        assert!(matches!(err, CoordsError::Json(_)));
    }
}
