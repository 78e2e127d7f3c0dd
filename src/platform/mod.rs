//! Platform abstraction for position acquisition
//!
//! A [`PositionProvider`] stands for whatever "get current position" facility
//! the host exposes. The crate ships a scripted mock for tests and a replay
//! provider that serves recorded fixes from a JSON file.

pub mod provider;
pub mod replay;
pub mod mock;
pub mod error;

pub use provider::PositionProvider;
pub use replay::{ReplayError, ReplayProvider};
pub use mock::MockProvider;
pub use error::{PlatformError, PlatformErrorCode, PlatformResult};

use serde::{Deserialize, Serialize};

/// Unvalidated reading as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawFix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: f64,
}

impl RawFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: 0.0,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }
}
