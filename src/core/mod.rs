//! Core types and constants for location verification

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
