//! Spatium - frustum culling demo built on `spatium_math` and `spatium_geom`
//!
//! The library half exposes the configuration layer and the culling pass so
//! that integration tests can drive them without the binary.

pub mod config;
pub mod culling;
