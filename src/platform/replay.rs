//! Replay provider serving recorded readings from a JSON file
//!
//! The file holds an array; each entry is either a reading
//! `{"latitude": 4.74493, "longitude": -74.04478, "accuracy": 6.0}` or a
//! failure `{"error": "permission_denied", "message": "optional"}`.
//! Known failure names are `permission_denied`, `position_unavailable` and
//! `timeout`; anything else is reported as an unknown platform error.

use crate::core::PositionOptions;
use crate::platform::{PlatformError, PlatformErrorCode, PlatformResult, PositionProvider, RawFix};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("cannot read replay file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid replay data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ReplayEntry {
    Fix(RawFix),
    Failure {
        error: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl ReplayEntry {
    fn into_outcome(self) -> PlatformResult<RawFix> {
        match self {
            ReplayEntry::Fix(fix) => Ok(fix),
            ReplayEntry::Failure { error, message } => {
                let code = match error.as_str() {
                    "permission_denied" => PlatformErrorCode::PermissionDenied,
                    "position_unavailable" => PlatformErrorCode::PositionUnavailable,
                    "timeout" => PlatformErrorCode::Timeout,
                    _ => PlatformErrorCode::Other(0),
                };
                Err(PlatformError::new(code, message.unwrap_or(error)))
            }
        }
    }
}

/// Provider that hands out recorded entries in file order
#[derive(Debug)]
pub struct ReplayProvider {
    entries: Mutex<VecDeque<ReplayEntry>>,
}

impl ReplayProvider {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let entries: Vec<ReplayEntry> = serde_json::from_str(json)?;
        Ok(Self {
            entries: Mutex::new(entries.into()),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let content = fs::read_to_string(&path).map_err(|source| ReplayError::Io {
            path: path.as_ref().to_string_lossy().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Entries not yet replayed
    pub fn remaining(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl PositionProvider for ReplayProvider {
    async fn current_position(&self, _options: &PositionOptions) -> PlatformResult<RawFix> {
        let next = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match next {
            Some(entry) => entry.into_outcome(),
            None => {
                debug!("replay exhausted");
                Err(PlatformError::new(
                    PlatformErrorCode::PositionUnavailable,
                    "no more recorded readings",
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "replay"
    }
}
