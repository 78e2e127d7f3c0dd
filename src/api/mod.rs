//! Position acquisition API and result rendering
//!
//! This module exposes the stateless position source together with the
//! error taxonomy and formatters used by calling layers.

pub mod locator;
pub mod types;
pub mod formatting;

pub use types::{LocateError, LocateResult, OutputFormat, RetryHint};
pub use locator::PositionSource;
pub use formatting::{render, JsonFormatter, TextFormatter, VerificationReport};
