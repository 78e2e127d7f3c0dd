//! Single-shot position acquisition
//!
//! [`PositionSource`] wraps an optional platform provider and turns one
//! request into either a validated [`GeoPosition`] or a [`LocateError`].
//! It holds no state between calls and never retries.

use crate::api::types::{LocateError, LocateResult};
use crate::core::{GeoPosition, PositionOptions};
use crate::platform::PositionProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Acquires the current device position through the host platform
#[derive(Clone)]
pub struct PositionSource {
    provider: Option<Arc<dyn PositionProvider>>,
}

impl PositionSource {
    pub fn new(provider: Arc<dyn PositionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Source for a host without any positioning facility
    pub fn unsupported() -> Self {
        Self { provider: None }
    }

    pub fn is_supported(&self) -> bool {
        self.provider.is_some()
    }

    /// Request one position reading
    ///
    /// Suspends until the platform answers, fails, or `options.timeout_ms`
    /// elapses. The wait includes any permission prompt the platform shows.
    pub async fn acquire_current_position(&self, options: &PositionOptions) -> LocateResult<GeoPosition> {
        let provider = self.provider.as_ref().ok_or(LocateError::CapabilityUnavailable)?;

        debug!(
            provider = provider.name(),
            high_accuracy = options.enable_high_accuracy,
            timeout_ms = options.timeout_ms,
            maximum_age_ms = options.maximum_age_ms,
            "requesting position"
        );

        let fix = match tokio::time::timeout(options.timeout(), provider.current_position(options)).await {
            Ok(Ok(fix)) => fix,
            Ok(Err(e)) => {
                warn!(provider = provider.name(), "position request failed: {}", e);
                return Err(LocateError::from_platform(e, options.timeout_ms));
            }
            Err(_) => {
                warn!(provider = provider.name(), timeout_ms = options.timeout_ms, "position request timed out");
                return Err(LocateError::Timeout {
                    timeout_ms: options.timeout_ms,
                });
            }
        };

        let position = GeoPosition::new(fix.latitude, fix.longitude, fix.accuracy).map_err(|e| {
            warn!(provider = provider.name(), "platform returned a bad fix: {}", e);
            LocateError::UnknownError(format!("platform returned {}", e))
        })?;

        debug!(
            latitude = position.latitude(),
            longitude = position.longitude(),
            accuracy = position.accuracy(),
            "position acquired"
        );
        Ok(position)
    }
}

impl std::fmt::Debug for PositionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionSource")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}
