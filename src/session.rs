//! Calling-layer verification session
//!
//! The position source and range evaluator hold no state. This session is
//! the layer that does: it remembers the last fix, the saved reference and
//! the last comparison, and walks
//! idle → position-acquired → reference-saved → comparison-evaluated,
//! looping back to position-acquired or resetting to idle.
//!
//! Every method takes `&mut self`, so a session can never have two
//! acquisitions in flight.

use crate::algorithms::{evaluate_positions, local_offset};
use crate::api::{LocateError, PositionSource, VerificationReport};
use crate::core::{GeoPosition, PositionOptions, RangeResult, DEFAULT_THRESHOLD_M};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no current position, acquire one first")]
    NoCurrentPosition,
    #[error("no reference position saved yet")]
    NoReference,
    #[error(transparent)]
    Locate(#[from] LocateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PositionAcquired,
    ReferenceSaved,
    ComparisonEvaluated,
}

#[derive(Debug)]
pub struct VerificationSession {
    source: PositionSource,
    options: PositionOptions,
    threshold_m: f64,
    state: SessionState,
    current: Option<GeoPosition>,
    reference: Option<GeoPosition>,
    last_result: Option<RangeResult>,
    last_error: Option<LocateError>,
}

impl VerificationSession {
    pub fn new(source: PositionSource) -> Self {
        Self::with_settings(source, PositionOptions::default(), DEFAULT_THRESHOLD_M)
    }

    pub fn with_settings(source: PositionSource, options: PositionOptions, threshold_m: f64) -> Self {
        Self {
            source,
            options,
            threshold_m,
            state: SessionState::Idle,
            current: None,
            reference: None,
            last_result: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current(&self) -> Option<&GeoPosition> {
        self.current.as_ref()
    }

    pub fn reference(&self) -> Option<&GeoPosition> {
        self.reference.as_ref()
    }

    pub fn last_result(&self) -> Option<&RangeResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&LocateError> {
        self.last_error.as_ref()
    }

    pub fn threshold_m(&self) -> f64 {
        self.threshold_m
    }

    /// Capture the current position
    ///
    /// Clears any previous comparison. On failure the error is kept for
    /// display and the session stays where it was.
    pub async fn acquire(&mut self) -> Result<GeoPosition, SessionError> {
        self.last_error = None;
        self.last_result = None;

        let position = self.fetch().await?;
        self.current = Some(position);
        self.state = SessionState::PositionAcquired;
        Ok(position)
    }

    /// Keep a copy of the current position as the reference
    pub fn save_reference(&mut self) -> Result<GeoPosition, SessionError> {
        let current = self.current.ok_or(SessionError::NoCurrentPosition)?;

        info!(
            latitude = current.latitude(),
            longitude = current.longitude(),
            "reference saved"
        );
        self.reference = Some(current);
        self.last_result = None;
        self.state = SessionState::ReferenceSaved;
        Ok(current)
    }

    /// Capture a fresh position and compare it with the reference
    pub async fn compare(&mut self) -> Result<RangeResult, SessionError> {
        let reference = self.reference.ok_or(SessionError::NoReference)?;
        self.last_error = None;

        let fresh = self.fetch().await?;
        self.current = Some(fresh);

        let result = evaluate_positions(&reference, &fresh, self.threshold_m);
        info!(
            distance_m = result.distance_meters,
            within_range = result.within_range,
            threshold_m = self.threshold_m,
            "comparison evaluated"
        );
        self.last_result = Some(result);
        self.state = SessionState::ComparisonEvaluated;
        Ok(result)
    }

    /// Forget everything and return to idle
    pub fn clear(&mut self) {
        debug!("session cleared");
        self.current = None;
        self.reference = None;
        self.last_result = None;
        self.last_error = None;
        self.state = SessionState::Idle;
    }

    /// Snapshot for display
    pub fn report(&self) -> VerificationReport {
        let offset = match (&self.reference, &self.current) {
            (Some(reference), Some(current)) => Some(local_offset(reference, current)),
            _ => None,
        };

        VerificationReport {
            current: self.current,
            reference: self.reference,
            result: self.last_result,
            offset,
            threshold_meters: self.threshold_m,
            error: self.last_error.as_ref().map(|e| e.to_string()),
        }
    }

    async fn fetch(&mut self) -> Result<GeoPosition, SessionError> {
        match self.source.acquire_current_position(&self.options).await {
            Ok(position) => Ok(position),
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e.into())
            }
        }
    }
}
