//! Mock provider implementation for testing and development

use crate::core::PositionOptions;
use crate::platform::{PlatformError, PlatformResult, PositionProvider, RawFix};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Scripted {
    Respond {
        outcome: PlatformResult<RawFix>,
        delay: Option<Duration>,
    },
    Hang,
}

/// Provider answering from a script of queued outcomes
///
/// Once the script is exhausted every request fails with
/// `PositionUnavailable`. Every request's options are recorded so tests can
/// check what was asked of the platform.
#[derive(Debug, Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<PositionOptions>>,
}

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reading
    pub fn push_fix(&self, latitude: f64, longitude: f64, accuracy: f64) -> &Self {
        self.push_outcome(Ok(RawFix::new(latitude, longitude).with_accuracy(accuracy)), None)
    }

    /// Queue a failure
    pub fn push_error(&self, error: PlatformError) -> &Self {
        self.push_outcome(Err(error), None)
    }

    /// Queue an outcome delivered after `delay`
    pub fn push_delayed(&self, outcome: PlatformResult<RawFix>, delay: Duration) -> &Self {
        self.push_outcome(outcome, Some(delay))
    }

    /// Queue a request that never answers
    pub fn push_hang(&self) -> &Self {
        locked(&self.script).push_back(Scripted::Hang);
        self
    }

    fn push_outcome(&self, outcome: PlatformResult<RawFix>, delay: Option<Duration>) -> &Self {
        locked(&self.script).push_back(Scripted::Respond { outcome, delay });
        self
    }

    /// Options of every request received so far
    pub fn requests(&self) -> Vec<PositionOptions> {
        locked(&self.requests).clone()
    }

    /// Number of outcomes still queued
    pub fn remaining(&self) -> usize {
        locked(&self.script).len()
    }
}

#[async_trait]
impl PositionProvider for MockProvider {
    async fn current_position(&self, options: &PositionOptions) -> PlatformResult<RawFix> {
        locked(&self.requests).push(options.clone());

        let next = locked(&self.script).pop_front();
        match next {
            Some(Scripted::Respond { outcome, delay }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                outcome
            }
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(PlatformError::position_unavailable()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
