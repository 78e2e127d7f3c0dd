//! Platform-level failure reports

use std::fmt;
use thiserror::Error;

/// Failure code as reported by the host positioning facility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorCode {
    /// The user or platform refused access
    PermissionDenied,
    /// No position could be determined
    PositionUnavailable,
    /// The platform gave up waiting for a fix
    Timeout,
    /// Anything else, with the raw code
    Other(u16),
}

impl fmt::Display for PlatformErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformErrorCode::PermissionDenied => write!(f, "permission denied"),
            PlatformErrorCode::PositionUnavailable => write!(f, "position unavailable"),
            PlatformErrorCode::Timeout => write!(f, "timeout"),
            PlatformErrorCode::Other(code) => write!(f, "error code {}", code),
        }
    }
}

/// Failure reported by a [`PositionProvider`](crate::platform::PositionProvider)
#[derive(Debug, Clone, PartialEq, Error)]
#[error("platform {code}: {message}")]
pub struct PlatformError {
    pub code: PlatformErrorCode,
    pub message: String,
}

impl PlatformError {
    pub fn new(code: PlatformErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn permission_denied() -> Self {
        Self::new(PlatformErrorCode::PermissionDenied, "user denied geolocation")
    }

    pub fn position_unavailable() -> Self {
        Self::new(PlatformErrorCode::PositionUnavailable, "no position fix")
    }

    pub fn timeout() -> Self {
        Self::new(PlatformErrorCode::Timeout, "position request expired")
    }
}

/// Result type for provider operations
pub type PlatformResult<T> = Result<T, PlatformError>;
