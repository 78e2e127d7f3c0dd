//! Local tangent plane offsets around a reference position
//!
//! Flat-earth approximation, accurate to well under a centimeter over the
//! few-meter radii this crate verifies. Not meant for long baselines.

use crate::core::{GeoPosition, EARTH_RADIUS_M};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Displacement of a position from a reference, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalOffset {
    pub east_m: f64,
    pub north_m: f64,
}

impl LocalOffset {
    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self {
            east_m: v.x,
            north_m: v.y,
        }
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.east_m, self.north_m)
    }

    /// Planar length of the offset
    pub fn magnitude(&self) -> f64 {
        self.to_vector().norm()
    }

    /// Compass bearing from the reference, degrees clockwise from north in [0, 360)
    pub fn bearing_deg(&self) -> f64 {
        let bearing = self.east_m.atan2(self.north_m).to_degrees();
        if bearing < 0.0 {
            bearing + 360.0
        } else {
            bearing
        }
    }
}

/// Offset of `position` relative to `reference`
pub fn local_offset(reference: &GeoPosition, position: &GeoPosition) -> LocalOffset {
    let lat_diff = (position.latitude() - reference.latitude()).to_radians();
    let lon_diff = (position.longitude() - reference.longitude()).to_radians();
    let ref_lat_rad = reference.latitude().to_radians();

    let enu = Vector2::new(
        EARTH_RADIUS_M * lon_diff * ref_lat_rad.cos(),
        EARTH_RADIUS_M * lat_diff,
    );
    LocalOffset::from_vector(enu)
}

/// Latitude/longitude reached by moving `offset` away from `reference`
pub fn offset_position(reference: &GeoPosition, offset: &LocalOffset) -> (f64, f64) {
    let ref_lat_rad = reference.latitude().to_radians();

    let lat_diff = offset.north_m / EARTH_RADIUS_M;
    let lon_diff = offset.east_m / (EARTH_RADIUS_M * ref_lat_rad.cos());

    (
        reference.latitude() + lat_diff.to_degrees(),
        reference.longitude() + lon_diff.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::haversine::distance_meters;

    fn bogota() -> GeoPosition {
        GeoPosition::new(4.74493, -74.04478, 5.0).unwrap()
    }

    #[test]
    fn test_zero_offset() {
        let offset = local_offset(&bogota(), &bogota());
        assert_eq!(offset.east_m, 0.0);
        assert_eq!(offset.north_m, 0.0);
        assert_eq!(offset.magnitude(), 0.0);
    }

    #[test]
    fn test_due_north_offset() {
        let north = GeoPosition::new(4.74497, -74.04478, 5.0).unwrap();
        let offset = local_offset(&bogota(), &north);

        assert!(offset.east_m.abs() < 1e-9);
        assert!((offset.north_m - 4.4478).abs() < 1e-3);
        assert!(offset.bearing_deg().abs() < 1e-6);
    }

    #[test]
    fn test_bearings() {
        let west = LocalOffset { east_m: -3.0, north_m: 0.0 };
        let south = LocalOffset { east_m: 0.0, north_m: -3.0 };
        let east = LocalOffset { east_m: 3.0, north_m: 0.0 };
        assert!((west.bearing_deg() - 270.0).abs() < 1e-9);
        assert!((south.bearing_deg() - 180.0).abs() < 1e-9);
        assert!((east.bearing_deg() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_agrees_with_haversine_at_short_range() {
        let reference = bogota();
        let (lat, lon) = offset_position(&reference, &LocalOffset { east_m: 3.0, north_m: 4.0 });
        let moved = GeoPosition::new(lat, lon, 5.0).unwrap();

        let planar = local_offset(&reference, &moved).magnitude();
        let great_circle = distance_meters(reference.latitude(), reference.longitude(), lat, lon);

        assert!((planar - 5.0).abs() < 1e-6);
        assert!((great_circle - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let offset = LocalOffset { east_m: 1.5, north_m: -2.0 };
        let json = serde_json::to_string(&offset).unwrap();
        assert_eq!(json, r#"{"eastM":1.5,"northM":-2.0}"#);

        let back: LocalOffset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, offset);
    }
}
