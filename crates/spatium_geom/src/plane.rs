//! Oriented planes in 3D
//!
//! A plane is stored as a normal `n` and offset `d`. Its equation is
//! `n · p + d = 0` and the positive half-space `n · p + d >= 0` is the
//! "inside" used by frustum tests.

use approx::{AbsDiffEq, RelativeEq};
use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use spatium_math::{Vec3, Vector};

/// A 3D plane defined by normal and signed offset
///
/// [`Plane::distance`] is a true Euclidean distance only when the normal has
/// unit length. [`Plane::from_points`] always produces a unit normal, the
/// other constructors keep whatever normal they are given.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Plane<T> {
    normal: Vec3<T>,
    d: T,
}

impl<T: Float> Plane<T> {
    /// Create a plane from a normal and offset
    #[inline]
    pub fn new(normal: Vec3<T>, d: T) -> Self {
        Self { normal, d }
    }

    /// Create the plane through `point` with the given normal
    ///
    /// The normal is used as-is, not normalized.
    #[inline]
    pub fn from_normal_and_point(normal: Vec3<T>, point: Vec3<T>) -> Self {
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Create the plane through three points
    ///
    /// The unit normal is `normalize((v3 - v2) x (v1 - v2))`, so the winding
    /// of the points decides which side is positive. Collinear points have no
    /// defined normal; the result then has a zero normal and classifies every
    /// point as lying on the plane.
    pub fn from_points(v1: Vec3<T>, v2: Vec3<T>, v3: Vec3<T>) -> Self {
        let normal = match (v3 - v2).cross(v1 - v2).try_normalized() {
            Some(n) => n,
            None => {
                debug!("Plane through collinear points has no normal, using zero");
                Vector::zero()
            }
        };
        Self::from_normal_and_point(normal, v2)
    }

    /// Signed distance from `point` to the plane (positive on the normal side)
    #[inline]
    pub fn distance(&self, point: Vec3<T>) -> T {
        self.normal.dot(point) + self.d
    }

    #[inline]
    pub fn normal(&self) -> Vec3<T> {
        self.normal
    }

    /// Offset term `d` of `n · p + d = 0`
    #[inline]
    pub fn offset(&self) -> T {
        self.d
    }

    /// Closest point on the plane to `point`, assuming a unit normal
    #[inline]
    pub fn project_point(&self, point: Vec3<T>) -> Vec3<T> {
        point - self.normal * self.distance(point)
    }

    /// Same plane with the positive side flipped
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            d: -self.d,
        }
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Plane<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.normal.abs_diff_eq(&other.normal, epsilon) && self.d.abs_diff_eq(&other.d, epsilon)
    }
}

impl<T: RelativeEq> RelativeEq for Plane<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.normal.relative_eq(&other.normal, epsilon, max_relative)
            && self.d.relative_eq(&other.d, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use spatium_math::Vec3d;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_distance_sign() {
        let floor = Plane::new(Vec3d::new(0.0, 1.0, 0.0), 0.0);
        assert_eq!(floor.distance(Vec3d::new(3.0, 2.0, -1.0)), 2.0);
        assert_eq!(floor.distance(Vec3d::new(3.0, -2.0, -1.0)), -2.0);
        assert_eq!(floor.distance(Vec3d::new(5.0, 0.0, 5.0)), 0.0);
    }

    #[test]
    fn test_from_normal_and_point() {
        let p = Plane::from_normal_and_point(Vec3d::new(0.0, 0.0, 1.0), Vec3d::new(1.0, 2.0, 3.0));
        assert_eq!(p.offset(), -3.0);
        assert_eq!(p.distance(Vec3d::new(0.0, 0.0, 5.0)), 2.0);

        // The normal is not normalized
        let scaled = Plane::from_normal_and_point(Vec3d::new(0.0, 0.0, 2.0), Vec3d::zero());
        assert_eq!(scaled.normal(), Vec3d::new(0.0, 0.0, 2.0));
        assert_eq!(scaled.distance(Vec3d::new(0.0, 0.0, 1.0)), 2.0);
    }

    #[test]
    fn test_from_points_winding() {
        let a = Vec3d::new(1.0, 0.0, 0.0);
        let b = Vec3d::new(0.0, 0.0, 0.0);
        let c = Vec3d::new(0.0, 1.0, 0.0);

        let p = Plane::from_points(a, b, c);
        assert_abs_diff_eq!(p.normal(), Vec3d::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_abs_diff_eq!(p.offset(), 0.0, epsilon = EPSILON);

        // Reversing the winding flips the normal
        let q = Plane::from_points(c, b, a);
        assert_abs_diff_eq!(q, p.flipped(), epsilon = EPSILON);
    }

    #[test]
    fn test_from_points_unit_normal() {
        let p = Plane::from_points(
            Vec3d::new(0.0, 3.0, 0.0),
            Vec3d::new(5.0, 3.0, 0.0),
            Vec3d::new(5.0, 3.0, 7.0),
        );
        assert_abs_diff_eq!(p.normal().mag(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(p.distance(Vec3d::new(0.0, 4.0, 0.0)).abs(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_collinear_points() {
        let p = Plane::from_points(
            Vec3d::new(0.0, 0.0, 0.0),
            Vec3d::new(1.0, 1.0, 1.0),
            Vec3d::new(2.0, 2.0, 2.0),
        );
        assert_eq!(p.normal(), Vec3d::zero());
        assert_eq!(p.distance(Vec3d::new(9.0, -4.0, 1.0)), 0.0);
    }

    #[test]
    fn test_project_point() {
        let p = Plane::from_normal_and_point(Vec3d::new(0.0, 1.0, 0.0), Vec3d::new(0.0, 2.0, 0.0));
        let projected = p.project_point(Vec3d::new(4.0, 7.0, -1.0));
        assert_abs_diff_eq!(projected, Vec3d::new(4.0, 2.0, -1.0), epsilon = EPSILON);
        assert_abs_diff_eq!(p.distance(projected), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = Plane::new(Vec3d::new(0.0, 1.0, 0.0), -2.5);
        let json = serde_json::to_string(&p).unwrap();
        let back: Plane<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
