//! Core data types for location verification

use crate::core::constants::DEFAULT_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Rejected coordinate or accuracy value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} outside [-90, 90] degrees")]
    Latitude(f64),
    #[error("longitude {0} outside [-180, 180] degrees")]
    Longitude(f64),
    #[error("accuracy {0} must be a non-negative number of meters")]
    Accuracy(f64),
}

/// Single location reading in geodetic coordinates
///
/// Values are checked on construction, so a `GeoPosition` is always inside
/// the latitude/longitude domain and carries a non-negative accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(CoordinateError::Longitude(longitude));
        }
        if !accuracy.is_finite() || accuracy < 0.0 {
            return Err(CoordinateError::Accuracy(accuracy));
        }

        Ok(Self {
            latitude,
            longitude,
            accuracy,
        })
    }

    /// Latitude in decimal degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// 68% confidence radius in meters
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}

#[derive(Deserialize)]
struct UncheckedPosition {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    accuracy: f64,
}

impl<'de> Deserialize<'de> for GeoPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = UncheckedPosition::deserialize(deserializer)?;
        GeoPosition::new(raw.latitude, raw.longitude, raw.accuracy).map_err(serde::de::Error::custom)
    }
}

/// Outcome of comparing two positions against a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeResult {
    /// Great-circle distance rounded to centimeters
    pub distance_meters: f64,
    /// Whether the rounded distance is within the threshold
    pub within_range: bool,
}

/// Parameters handed to the platform with each position request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    /// Prefer the most precise sensor chain available
    pub enable_high_accuracy: bool,
    /// Maximum time to wait for the platform (milliseconds)
    pub timeout_ms: u64,
    /// Maximum age of a cached reading the platform may return (milliseconds)
    pub maximum_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            maximum_age_ms: 0,
        }
    }
}

impl PositionOptions {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_never_accept_cached_fix() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout_ms, 10_000);
        assert_eq!(options.maximum_age_ms, 0);
        assert_eq!(options.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_options_partial_json() {
        let options: PositionOptions = serde_json::from_str(r#"{"timeout_ms": 2500}"#).unwrap();
        assert_eq!(options.timeout_ms, 2500);
        assert!(options.enable_high_accuracy);
        assert_eq!(options.maximum_age_ms, 0);
    }

    #[test]
    fn test_valid_position() {
        let pos = GeoPosition::new(4.74493, -74.04478, 12.5).unwrap();
        assert_eq!(pos.latitude(), 4.74493);
        assert_eq!(pos.longitude(), -74.04478);
        assert_eq!(pos.accuracy(), 12.5);
    }

    #[test]
    fn test_domain_edges_accepted() {
        assert!(GeoPosition::new(90.0, 180.0, 0.0).is_ok());
        assert!(GeoPosition::new(-90.0, -180.0, 0.0).is_ok());
    }

    #[test]
    fn test_out_of_domain_rejected() {
        assert_eq!(
            GeoPosition::new(90.5, 0.0, 1.0),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            GeoPosition::new(0.0, -180.1, 1.0),
            Err(CoordinateError::Longitude(-180.1))
        );
        assert_eq!(
            GeoPosition::new(0.0, 0.0, -1.0),
            Err(CoordinateError::Accuracy(-1.0))
        );
        assert!(GeoPosition::new(f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_position_json_shape() {
        let pos = GeoPosition::new(1.5, -2.25, 3.0).unwrap();
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"latitude":1.5,"longitude":-2.25,"accuracy":3.0}"#);

        let back: GeoPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }

    #[test]
    fn test_position_deserialize_validates() {
        let result: Result<GeoPosition, _> =
            serde_json::from_str(r#"{"latitude":91.0,"longitude":0.0,"accuracy":1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_range_result_json_shape() {
        let result = RangeResult {
            distance_meters: 4.99,
            within_range: true,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"distanceMeters":4.99,"withinRange":true}"#);
    }
}
