//! Distance and offset computations

pub mod haversine;
pub mod local;

pub use haversine::{
    distance_meters, evaluate_default_range, evaluate_positions, evaluate_range, round_to_centimeters,
};
pub use local::{local_offset, offset_position, LocalOffset};
