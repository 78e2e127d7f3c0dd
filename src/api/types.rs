//! Common API types and data structures

use crate::platform::{PlatformError, PlatformErrorCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for position acquisition
pub type LocateResult<T> = Result<T, LocateError>;

/// Why a position could not be acquired
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    /// The host has no positioning facility
    #[error("geolocation is not supported on this host")]
    CapabilityUnavailable,
    /// The user or platform refused access
    #[error("location permission denied")]
    PermissionDenied,
    /// The platform could not determine a position
    #[error("location information unavailable")]
    PositionUnavailable,
    /// No answer within the requested budget
    #[error("location request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    /// Any other failure
    #[error("unknown location error: {0}")]
    UnknownError(String),
}

/// What a caller can reasonably do after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryHint {
    /// Retrying on this host cannot succeed
    Never,
    /// Only worth retrying once permission has been granted elsewhere
    AfterPermissionChange,
    /// Transient, retry now or after a short delay
    Immediately,
    /// Retry, possibly with a longer timeout
    WithLongerTimeout,
    /// Up to the caller
    CallerDiscretion,
}

impl LocateError {
    pub fn retry_hint(&self) -> RetryHint {
        match self {
            LocateError::CapabilityUnavailable => RetryHint::Never,
            LocateError::PermissionDenied => RetryHint::AfterPermissionChange,
            LocateError::PositionUnavailable => RetryHint::Immediately,
            LocateError::Timeout { .. } => RetryHint::WithLongerTimeout,
            LocateError::UnknownError(_) => RetryHint::CallerDiscretion,
        }
    }

    pub fn is_retryable(&self) -> bool {
        !matches!(self.retry_hint(), RetryHint::Never)
    }

    /// Translate a provider failure; `timeout_ms` is the budget of the request
    pub fn from_platform(error: PlatformError, timeout_ms: u64) -> Self {
        match error.code {
            PlatformErrorCode::PermissionDenied => LocateError::PermissionDenied,
            PlatformErrorCode::PositionUnavailable => LocateError::PositionUnavailable,
            PlatformErrorCode::Timeout => LocateError::Timeout { timeout_ms },
            PlatformErrorCode::Other(_) => LocateError::UnknownError(error.message),
        }
    }
}

/// Output format for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON objects
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PlatformError::permission_denied(), LocateError::PermissionDenied)]
    #[case(PlatformError::position_unavailable(), LocateError::PositionUnavailable)]
    #[case(PlatformError::timeout(), LocateError::Timeout { timeout_ms: 750 })]
    #[case(
        PlatformError::new(PlatformErrorCode::Other(9), "driver crashed"),
        LocateError::UnknownError("driver crashed".to_string())
    )]
    fn test_from_platform(#[case] platform: PlatformError, #[case] expected: LocateError) {
        assert_eq!(LocateError::from_platform(platform, 750), expected);
    }

    #[test]
    fn test_retry_hints() {
        assert_eq!(LocateError::CapabilityUnavailable.retry_hint(), RetryHint::Never);
        assert!(!LocateError::CapabilityUnavailable.is_retryable());
        assert_eq!(
            LocateError::PermissionDenied.retry_hint(),
            RetryHint::AfterPermissionChange
        );
        assert_eq!(LocateError::PositionUnavailable.retry_hint(), RetryHint::Immediately);
        assert_eq!(
            LocateError::Timeout { timeout_ms: 10 }.retry_hint(),
            RetryHint::WithLongerTimeout
        );
        assert!(LocateError::UnknownError(String::new()).is_retryable());
    }

    #[test]
    fn test_messages_are_distinct() {
        let messages = [
            LocateError::CapabilityUnavailable.to_string(),
            LocateError::PermissionDenied.to_string(),
            LocateError::PositionUnavailable.to_string(),
            LocateError::Timeout { timeout_ms: 10_000 }.to_string(),
            LocateError::UnknownError("x".into()).to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(messages[3], "location request timed out after 10000 ms");
    }
}
