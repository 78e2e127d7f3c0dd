//! Great-circle distance and proximity classification
//!
//! Distances use the haversine formula on a spherical Earth of mean radius
//! [`EARTH_RADIUS_M`]. Classification compares the distance *after* rounding
//! to centimeters, so what is displayed and what is decided always agree:
//! a raw 5.004 m shows as 5.00 m and counts as within a 5 m threshold.

use crate::core::{GeoPosition, RangeResult, DEFAULT_THRESHOLD_M, EARTH_RADIUS_M};
use std::f64::consts::PI;
use tracing::trace;

/// Great-circle distance in meters between two latitude/longitude pairs
///
/// Inputs are decimal degrees and are not range-checked; use
/// [`GeoPosition`] when validated input is needed.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1 * PI / 180.0;
    let phi2 = lat2 * PI / 180.0;
    let delta_phi = (lat2 - lat1) * PI / 180.0;
    let delta_lambda = (lon2 - lon1) * PI / 180.0;

    let a = (delta_phi / 2.0).sin() * (delta_phi / 2.0).sin()
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin() * (delta_lambda / 2.0).sin();
    // rounding can push a a hair past 1 near antipodes
    let a = a.clamp(0.0, 1.0);

    // atan2 stays well conditioned near antipodes where asin(sqrt(a)) does not
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Round a distance to two decimals, halves away from zero
pub fn round_to_centimeters(meters: f64) -> f64 {
    (meters * 100.0).round() / 100.0
}

/// Distance between two points and whether it lies within `threshold_m`
pub fn evaluate_range(lat1: f64, lon1: f64, lat2: f64, lon2: f64, threshold_m: f64) -> RangeResult {
    let raw = distance_meters(lat1, lon1, lat2, lon2);
    let distance = round_to_centimeters(raw);
    let within_range = distance <= threshold_m;

    trace!(raw, distance, threshold_m, within_range, "range evaluated");

    RangeResult {
        distance_meters: distance,
        within_range,
    }
}

/// [`evaluate_range`] with the default 5 m threshold
pub fn evaluate_default_range(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> RangeResult {
    evaluate_range(lat1, lon1, lat2, lon2, DEFAULT_THRESHOLD_M)
}

/// [`evaluate_range`] over two validated positions
pub fn evaluate_positions(reference: &GeoPosition, current: &GeoPosition, threshold_m: f64) -> RangeResult {
    evaluate_range(
        reference.latitude(),
        reference.longitude(),
        current.latitude(),
        current.longitude(),
        threshold_m,
    )
}
