//! Physical constants and system parameters

/// Mean Earth radius used by the spherical model (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default proximity radius around the reference position (m)
pub const DEFAULT_THRESHOLD_M: f64 = 5.0;

/// Default time the platform gets to answer a position request (ms)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
