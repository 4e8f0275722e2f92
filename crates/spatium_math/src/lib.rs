//! Fixed-size linear algebra
//!
//! Generic, allocation-free value types for 3D positions, orientations and
//! transforms.
//!
//! ## Core Types
//!
//! - [`Vector`] - N-dimensional vector with size-gated `x`/`y`/`z`/`w` accessors
//! - [`Matrix`] - N x N column-major matrix
//! - [`Quaternion`] - rotation quaternion with Euler, axis-angle and matrix conversions
//! - [`Complex`] / [`Polar`] - complex numbers in rectangular and polar form
//! - [`Interval`] - closed scalar range that keeps `min <= max`
//!
//! ## Functions
//!
//! - [`functions`] - power, rounding, wrapping and integer helpers
//! - [`special`] - associated Legendre and Laguerre polynomials

mod serde_array;

pub mod complex;
pub mod functions;
pub mod interval;
pub mod matrix;
pub mod quaternion;
pub mod special;
pub mod vector;

pub use complex::{Complex, Complexd, Complexf, Polar, Polard, Polarf};
pub use interval::Interval;
pub use matrix::{determinant, invert, Mat2, Mat2d, Mat2f, Mat3, Mat3d, Mat3f, Mat4, Mat4d, Mat4f, Matrix};
pub use quaternion::{Quatd, Quatf, Quaternion};
pub use vector::{
    angle, centroid3, concat, cross, dot, normal, Vec2, Vec2d, Vec2f, Vec3, Vec3d, Vec3f, Vec4,
    Vec4d, Vec4f, Vec5, Vector,
};
