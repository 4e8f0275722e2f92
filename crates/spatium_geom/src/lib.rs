//! Visibility geometry
//!
//! Oriented planes and view frustums for culling, built on `spatium_math`.
//!
//! - [`Plane`] - plane with signed distance to points
//! - [`Frustum`] - eight-corner frustum with point, sphere and box tests

pub mod frustum;
pub mod plane;

pub use frustum::{Containment, Frustum, FrustumSide};
pub use plane::Plane;
