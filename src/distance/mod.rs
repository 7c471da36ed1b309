//! Distance model.
//!
//! Haversine great-circle distance and the traffic-scaled integer cost
//! matrix built from it.

mod haversine;
mod matrix;

pub use haversine::{haversine_km, EARTH_RADIUS_KM};
pub use matrix::{meters_to_km, CostMatrix, METERS_PER_KM};
