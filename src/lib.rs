//! Location Verification
//!
//! Capture a device position, keep one as a reference, and check whether a
//! later position lies within a fixed radius (5 m by default) of it.

pub mod core;
pub mod algorithms;
pub mod platform;
pub mod api;
pub mod session;
pub mod utils;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{GeoPosition, RangeResult, PositionOptions, CoordinateError, EARTH_RADIUS_M, DEFAULT_THRESHOLD_M};
pub use crate::algorithms::{distance_meters, evaluate_range, evaluate_default_range, evaluate_positions, LocalOffset};
pub use crate::platform::{PositionProvider, MockProvider, ReplayProvider, RawFix, PlatformError, PlatformErrorCode};
pub use crate::api::{
    PositionSource, LocateError, LocateResult, RetryHint, OutputFormat,
    TextFormatter, JsonFormatter, VerificationReport,
};
pub use crate::session::{VerificationSession, SessionState, SessionError};
pub use crate::utils::{ConfigurationManager, VerifierConfig, ConfigError};
