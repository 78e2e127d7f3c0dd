//! Output formatting for positions and comparison results
//!
//! Formatters render what the calling layer holds (current fix, reference,
//! last result, last error) for a display collaborator. Text output follows
//! the conventions users see on screen: six decimals for coordinates,
//! centimeters for distances.

use crate::algorithms::LocalOffset;
use crate::api::types::OutputFormat;
use crate::core::{GeoPosition, RangeResult};
use serde::{Deserialize, Serialize};

/// Everything a display needs after one step of a verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub current: Option<GeoPosition>,
    pub reference: Option<GeoPosition>,
    pub result: Option<RangeResult>,
    /// Offset of `current` from `reference`, when both exist
    pub offset: Option<LocalOffset>,
    pub threshold_meters: f64,
    pub error: Option<String>,
}

impl VerificationReport {
    pub fn empty(threshold_meters: f64) -> Self {
        Self {
            current: None,
            reference: None,
            result: None,
            offset: None,
            threshold_meters,
            error: None,
        }
    }
}

/// Picks a formatter from an [`OutputFormat`]
pub fn render(report: &VerificationReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => TextFormatter::new().format_report(report),
        OutputFormat::Json => JsonFormatter::new().format_report(report),
    }
}

/// Human-readable formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_position(&self, label: &str, position: &GeoPosition) -> String {
        if self.compact {
            format!(
                "{}: {:.6}, {:.6} (±{:.2} m)",
                label,
                position.latitude(),
                position.longitude(),
                position.accuracy()
            )
        } else {
            format!(
                "{}:\n  Latitude:  {:.6}\n  Longitude: {:.6}\n  Accuracy:  ±{:.2} m\n",
                label,
                position.latitude(),
                position.longitude(),
                position.accuracy()
            )
        }
    }

    pub fn format_result(&self, result: &RangeResult, threshold_m: f64) -> String {
        let verdict = if result.within_range {
            format!("IN RANGE, within {} m of the reference", threshold_m)
        } else {
            format!("OUT OF RANGE, more than {} m from the reference", threshold_m)
        };

        if self.compact {
            format!("Distance: {:.2} m, {}", result.distance_meters, verdict)
        } else {
            format!("Distance: {:.2} m\nStatus:   {}\n", result.distance_meters, verdict)
        }
    }

    pub fn format_offset(&self, offset: &LocalOffset) -> String {
        format!(
            "Offset: {:.2} m east, {:.2} m north (bearing {:.0}°)",
            offset.east_m,
            offset.north_m,
            offset.bearing_deg()
        )
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("Error: {}", message)
    }

    pub fn format_report(&self, report: &VerificationReport) -> String {
        let mut parts = Vec::new();

        if let Some(current) = &report.current {
            parts.push(self.format_position("Current position", current));
        }
        if let Some(reference) = &report.reference {
            parts.push(self.format_position("Reference position", reference));
        }
        if let Some(result) = &report.result {
            parts.push(self.format_result(result, report.threshold_meters));
        }
        if let Some(offset) = &report.offset {
            parts.push(self.format_offset(offset));
        }
        if let Some(error) = &report.error {
            parts.push(self.format_error(error));
        }

        let separator = if self.compact { " | " } else { "\n" };
        let mut output = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                output.push_str(separator);
            }
            output.push_str(part.trim_end());
        }
        output
    }
}

/// JSON formatter, one report per line
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_report(&self, report: &VerificationReport) -> String {
        serde_json::to_string(report)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
    }
}
