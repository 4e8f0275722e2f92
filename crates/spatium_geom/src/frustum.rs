//! View frustums
//!
//! A [`Frustum`] is described by its eight corner points. The six bounding
//! planes are derived from the corners by [`Frustum::compute_planes`] and face
//! inward, so a point is inside when its distance to every plane is
//! non-negative.
//!
//! The planes are a cache: editing the public corner fields does not update
//! them until `compute_planes` is called again.

use log::trace;
use num_traits::Float;
use spatium_math::{Quaternion, Vec3};

use crate::plane::Plane;

/// Result of a containment test against a frustum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    /// Entirely outside at least one plane
    Outside,
    /// Straddles at least one plane
    Intersect,
    /// Inside all planes
    Inside,
}

/// The six bounding planes of a frustum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrustumSide {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Near = 4,
    Far = 5,
}

impl FrustumSide {
    pub const ALL: [FrustumSide; 6] = [
        FrustumSide::Top,
        FrustumSide::Bottom,
        FrustumSide::Left,
        FrustumSide::Right,
        FrustumSide::Near,
        FrustumSide::Far,
    ];
}

/// A truncated pyramid given by its corners
///
/// Corner names read as (near|far)(top|bottom)(left|right), as seen from the
/// apex looking through the frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum<T> {
    pub ntl: Vec3<T>,
    pub ntr: Vec3<T>,
    pub nbl: Vec3<T>,
    pub nbr: Vec3<T>,
    pub ftl: Vec3<T>,
    pub ftr: Vec3<T>,
    pub fbl: Vec3<T>,
    pub fbr: Vec3<T>,
    planes: [Plane<T>; 6],
}

impl<T: Float> Frustum<T> {
    /// Create a frustum from its corners and compute its planes
    #[allow(clippy::too_many_arguments)]
    pub fn from_corners(
        ntl: Vec3<T>,
        ntr: Vec3<T>,
        nbl: Vec3<T>,
        nbr: Vec3<T>,
        ftl: Vec3<T>,
        ftr: Vec3<T>,
        fbl: Vec3<T>,
        fbr: Vec3<T>,
    ) -> Self {
        let empty = Plane::new(Vec3::zero(), T::zero());
        let mut frustum = Self {
            ntl,
            ntr,
            nbl,
            nbr,
            ftl,
            ftr,
            fbl,
            fbr,
            planes: [empty; 6],
        };
        frustum.compute_planes();
        frustum
    }

    /// Perspective view frustum for a camera at `eye`
    ///
    /// The camera looks down its local -Z axis with +Y up and +X right, and
    /// `orientation` rotates that local frame into world space. `fovy` is the
    /// full vertical field of view in radians and `aspect` is width / height.
    pub fn from_perspective(
        eye: Vec3<T>,
        orientation: &Quaternion<T>,
        fovy: T,
        aspect: T,
        near: T,
        far: T,
    ) -> Self {
        let right = orientation.to_vector_x();
        let up = orientation.to_vector_y();
        let forward = -orientation.to_vector_z();

        let half = T::one() / (T::one() + T::one());
        let tan = (fovy * half).tan();
        let (near_h, far_h) = (near * tan, far * tan);
        let (near_w, far_w) = (near_h * aspect, far_h * aspect);

        let nc = eye + forward * near;
        let fc = eye + forward * far;

        Self::from_corners(
            nc + up * near_h - right * near_w,
            nc + up * near_h + right * near_w,
            nc - up * near_h - right * near_w,
            nc - up * near_h + right * near_w,
            fc + up * far_h - right * far_w,
            fc + up * far_h + right * far_w,
            fc - up * far_h - right * far_w,
            fc - up * far_h + right * far_w,
        )
    }

    /// Recompute the six planes from the current corners
    pub fn compute_planes(&mut self) {
        self.planes[FrustumSide::Top as usize] = Plane::from_points(self.ntr, self.ntl, self.ftl);
        self.planes[FrustumSide::Bottom as usize] = Plane::from_points(self.nbl, self.nbr, self.fbr);
        self.planes[FrustumSide::Left as usize] = Plane::from_points(self.ntl, self.nbl, self.fbl);
        self.planes[FrustumSide::Right as usize] = Plane::from_points(self.nbr, self.ntr, self.fbr);
        self.planes[FrustumSide::Near as usize] = Plane::from_points(self.ntl, self.ntr, self.nbr);
        self.planes[FrustumSide::Far as usize] = Plane::from_points(self.ftr, self.ftl, self.fbl);
        trace!("Recomputed frustum planes");
    }

    #[inline]
    pub fn plane(&self, side: FrustumSide) -> &Plane<T> {
        &self.planes[side as usize]
    }

    #[inline]
    pub fn planes(&self) -> &[Plane<T>; 6] {
        &self.planes
    }

    pub fn corners(&self) -> [Vec3<T>; 8] {
        [
            self.ntl, self.ntr, self.nbl, self.nbr, self.ftl, self.ftr, self.fbl, self.fbr,
        ]
    }

    /// Classify a point as [`Containment::Inside`] or [`Containment::Outside`]
    ///
    /// Points exactly on a plane count as inside.
    pub fn test_point(&self, p: Vec3<T>) -> Containment {
        if self.planes.iter().any(|plane| plane.distance(p) < T::zero()) {
            Containment::Outside
        } else {
            Containment::Inside
        }
    }

    /// Classify a sphere against the frustum
    ///
    /// Outside if the sphere lies entirely behind some plane
    /// (`distance <= -radius`), inside if it lies at least `radius` in front
    /// of every plane, otherwise intersecting.
    pub fn test_sphere(&self, center: Vec3<T>, radius: T) -> Containment {
        let mut result = Containment::Inside;
        for plane in &self.planes {
            let distance = plane.distance(center);
            if distance <= -radius {
                return Containment::Outside;
            } else if distance < radius {
                result = Containment::Intersect;
            }
        }
        result
    }

    /// Classify an axis-aligned box given by its minimum and maximum corners
    ///
    /// Uses the box corners furthest along and against each plane normal.
    /// Like any plane-by-plane test this is conservative: a box near a
    /// frustum edge can report `Intersect` while lying fully outside.
    pub fn test_box(&self, min: Vec3<T>, max: Vec3<T>) -> Containment {
        let mut result = Containment::Inside;
        for plane in &self.planes {
            let n = plane.normal();
            let positive = Vec3::new(
                if n.x() >= T::zero() { max.x() } else { min.x() },
                if n.y() >= T::zero() { max.y() } else { min.y() },
                if n.z() >= T::zero() { max.z() } else { min.z() },
            );
            let negative = Vec3::new(
                if n.x() >= T::zero() { min.x() } else { max.x() },
                if n.y() >= T::zero() { min.y() } else { max.y() },
                if n.z() >= T::zero() { min.z() } else { max.z() },
            );
            if plane.distance(positive) < T::zero() {
                return Containment::Outside;
            }
            if plane.distance(negative) < T::zero() {
                result = Containment::Intersect;
            }
        }
        result
    }

    /// Average of the eight corners
    pub fn center(&self) -> Vec3<T> {
        let eight = T::one() + T::one() + T::one() + T::one();
        let eight = eight + eight;
        self.corners()
            .iter()
            .fold(Vec3::zero(), |acc, &c| acc + c)
            / eight
    }

    /// Axis-aligned bounds of the corners as `(min, max)`
    pub fn bounding_box(&self) -> (Vec3<T>, Vec3<T>) {
        let corners = self.corners();
        corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(lo, hi), &c| {
                (lo.min_components(c), hi.max_components(c))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use spatium_math::{Quatd, Vec3d};
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-6;

    /// Axis-aligned cube [-1, 1]^3 with the near face at z = +1
    fn unit_cube() -> Frustum<f64> {
        Frustum::from_corners(
            Vec3d::new(-1.0, 1.0, 1.0),
            Vec3d::new(1.0, 1.0, 1.0),
            Vec3d::new(-1.0, -1.0, 1.0),
            Vec3d::new(1.0, -1.0, 1.0),
            Vec3d::new(-1.0, 1.0, -1.0),
            Vec3d::new(1.0, 1.0, -1.0),
            Vec3d::new(-1.0, -1.0, -1.0),
            Vec3d::new(1.0, -1.0, -1.0),
        )
    }

    #[test]
    fn test_planes_face_inward() {
        let f = unit_cube();
        let expected = [
            (FrustumSide::Top, Vec3d::new(0.0, -1.0, 0.0)),
            (FrustumSide::Bottom, Vec3d::new(0.0, 1.0, 0.0)),
            (FrustumSide::Left, Vec3d::new(1.0, 0.0, 0.0)),
            (FrustumSide::Right, Vec3d::new(-1.0, 0.0, 0.0)),
            (FrustumSide::Near, Vec3d::new(0.0, 0.0, -1.0)),
            (FrustumSide::Far, Vec3d::new(0.0, 0.0, 1.0)),
        ];
        for (side, normal) in expected {
            let plane = f.plane(side);
            assert_abs_diff_eq!(plane.normal(), normal, epsilon = EPSILON);
            assert_abs_diff_eq!(plane.offset(), 1.0, epsilon = EPSILON);
            assert!(plane.distance(Vec3d::zero()) > 0.0, "{:?} faces outward", side);
        }
    }

    #[test]
    fn test_point() {
        let f = unit_cube();
        assert_eq!(f.test_point(Vec3d::zero()), Containment::Inside);
        assert_eq!(f.test_point(Vec3d::new(0.9, -0.9, 0.9)), Containment::Inside);
        assert_eq!(f.test_point(Vec3d::new(1.0, 0.0, 0.0)), Containment::Inside);
        assert_eq!(f.test_point(Vec3d::new(1.1, 0.0, 0.0)), Containment::Outside);
        assert_eq!(f.test_point(Vec3d::new(0.0, 0.0, -3.0)), Containment::Outside);
        assert_eq!(f.test_point(Vec3d::new(2.0, 1.0, 1.0)), Containment::Outside);
    }

    #[test]
    fn test_sphere() {
        let f = unit_cube();
        assert_eq!(f.test_sphere(Vec3d::zero(), 0.5), Containment::Inside);
        assert_eq!(f.test_sphere(Vec3d::zero(), 0.9), Containment::Inside);
        assert_eq!(f.test_sphere(Vec3d::zero(), 1.0), Containment::Inside);
        assert_eq!(f.test_sphere(Vec3d::zero(), 1.1), Containment::Intersect);
        assert_eq!(f.test_sphere(Vec3d::splat(2.0), 0.5), Containment::Outside);
        assert_eq!(f.test_sphere(Vec3d::new(1.0, 0.0, 0.0), 0.5), Containment::Intersect);
        assert_eq!(f.test_sphere(Vec3d::new(3.0, 0.0, 0.0), 0.5), Containment::Outside);
        // Touching from outside counts as outside
        assert_eq!(f.test_sphere(Vec3d::new(2.0, 0.0, 0.0), 1.0), Containment::Outside);
    }

    #[test]
    fn test_box() {
        let f = unit_cube();
        assert_eq!(
            f.test_box(Vec3d::splat(-0.5), Vec3d::splat(0.5)),
            Containment::Inside
        );
        assert_eq!(
            f.test_box(Vec3d::new(0.5, -0.5, -0.5), Vec3d::new(1.5, 0.5, 0.5)),
            Containment::Intersect
        );
        assert_eq!(
            f.test_box(Vec3d::splat(2.0), Vec3d::splat(3.0)),
            Containment::Outside
        );
    }

    #[test]
    fn test_planes_are_not_recomputed_automatically() {
        let mut f = unit_cube();
        let far = Vec3d::new(0.0, 0.0, -2.0);
        assert_eq!(f.test_point(far), Containment::Outside);

        for corner in [&mut f.ftl, &mut f.ftr, &mut f.fbl, &mut f.fbr] {
            *corner.z_mut() = -3.0;
        }
        assert_eq!(f.test_point(far), Containment::Outside);

        f.compute_planes();
        assert_eq!(f.test_point(far), Containment::Inside);
    }

    #[test]
    fn test_center_and_bounds() {
        let f = unit_cube();
        assert_abs_diff_eq!(f.center(), Vec3d::zero(), epsilon = EPSILON);
        let (lo, hi) = f.bounding_box();
        assert_eq!(lo, Vec3d::splat(-1.0));
        assert_eq!(hi, Vec3d::splat(1.0));
    }

    #[test]
    fn test_perspective_default_orientation() {
        let f = Frustum::from_perspective(
            Vec3d::zero(),
            &Quatd::identity(),
            FRAC_PI_2,
            1.0,
            1.0,
            10.0,
        );
        assert_abs_diff_eq!(f.ntl, Vec3d::new(-1.0, 1.0, -1.0), epsilon = EPSILON);
        assert_abs_diff_eq!(f.fbr, Vec3d::new(10.0, -10.0, -10.0), epsilon = EPSILON);

        assert_eq!(f.test_point(Vec3d::new(0.0, 0.0, -5.0)), Containment::Inside);
        assert_eq!(f.test_point(Vec3d::new(0.0, 0.0, 5.0)), Containment::Outside);
        assert_eq!(f.test_point(Vec3d::new(0.0, 0.0, -0.5)), Containment::Outside);
        assert_eq!(f.test_point(Vec3d::new(0.0, 0.0, -11.0)), Containment::Outside);
        assert_eq!(f.test_point(Vec3d::new(4.0, 0.0, -5.0)), Containment::Inside);
        assert_eq!(f.test_point(Vec3d::new(6.0, 0.0, -5.0)), Containment::Outside);
    }

    #[test]
    fn test_perspective_follows_orientation() {
        // Turning a quarter turn about +Y makes the camera look down -X
        let q = Quatd::from_axis_y(FRAC_PI_2);
        let f = Frustum::from_perspective(Vec3d::zero(), &q, 1.0, 1.5, 0.1, 100.0);
        assert_eq!(f.test_point(Vec3d::new(-10.0, 0.0, 0.0)), Containment::Inside);
        assert_eq!(f.test_point(Vec3d::new(0.0, 0.0, -10.0)), Containment::Outside);
        assert_eq!(f.test_point(Vec3d::new(10.0, 0.0, 0.0)), Containment::Outside);
    }
}
