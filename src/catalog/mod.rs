//! Immutable lookup tables for destinations and seasonal weather

pub mod destinations;
pub mod weather;
