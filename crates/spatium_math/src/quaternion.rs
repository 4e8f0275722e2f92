//! Quaternions for 3D orientation
//!
//! A unit quaternion `q` and its negation `-q` describe the same rotation.
//! Conversions (Euler angles, axis-angle, matrices) may return either sign, so
//! callers comparing orientations should compare up to sign.
//!
//! Euler angles follow the azimuth / elevation / bank convention:
//! `from_euler(az, el, ba)` equals `Ry(az) * Rx(el) * Rz(ba)`.

use std::ops::{Add, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;
use crate::vector::Vec3;

/// Quaternion `w + xi + yj + zk`
///
/// Rotation methods assume unit length; nothing enforces it.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion<T> {
    pub w: T,
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type Quatf = Quaternion<f32>;
pub type Quatd = Quaternion<f64>;

// SAFETY: `repr(C)` with four fields of the same type has no padding.
unsafe impl<T: Zeroable> Zeroable for Quaternion<T> {}
unsafe impl<T: Pod> Pod for Quaternion<T> {}

impl<T: Float> Quaternion<T> {
    #[inline]
    pub const fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// The no-rotation quaternion `(1, 0, 0, 0)`
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    #[inline]
    pub fn set(&mut self, w: T, x: T, y: T, z: T) -> &mut Self {
        *self = Self::new(w, x, y, z);
        self
    }

    #[inline]
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    /// Conjugate `(w, -x, -y, -z)`
    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn mag_sqr(&self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn mag(&self) -> T {
        self.mag_sqr().sqrt()
    }

    /// Unit-length copy
    #[inline]
    pub fn sgn(&self) -> Self {
        *self / self.mag()
    }

    /// Scale to unit length in place
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        *self = self.sgn();
        self
    }

    /// Multiplicative inverse, `conj / mag_sqr`
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conj() / self.mag_sqr()
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// The axis is normalized first, so it may have any non-zero length.
    pub fn from_axis_angle(angle: T, axis: Vec3<T>) -> Self {
        let (s, c) = (angle * half::<T>()).sin_cos();
        let axis = axis.normalized();
        Self::new(c, axis.x() * s, axis.y() * s, axis.z() * s)
    }

    /// Rotation about +X; identical to `from_axis_angle(angle, (1, 0, 0))`
    #[inline]
    pub fn from_axis_x(angle: T) -> Self {
        let (s, c) = (angle * half::<T>()).sin_cos();
        Self::new(c, s, T::zero(), T::zero())
    }

    #[inline]
    pub fn from_axis_y(angle: T) -> Self {
        let (s, c) = (angle * half::<T>()).sin_cos();
        Self::new(c, T::zero(), s, T::zero())
    }

    #[inline]
    pub fn from_axis_z(angle: T) -> Self {
        let (s, c) = (angle * half::<T>()).sin_cos();
        Self::new(c, T::zero(), T::zero(), s)
    }

    /// Decompose into `(angle, unit axis)`
    ///
    /// A rotation too small to carry a meaningful axis reports +Z.
    pub fn to_axis_angle(&self) -> (T, Vec3<T>) {
        let w = self.w.max(-T::one()).min(T::one());
        let angle = two::<T>() * w.acos();
        let sin_half = (T::one() - w * w).sqrt();
        if sin_half < T::epsilon() {
            return (angle, Vec3::new(T::zero(), T::zero(), T::one()));
        }
        let inv = sin_half.recip();
        (angle, Vec3::new(self.x * inv, self.y * inv, self.z * inv))
    }

    /// Orientation from azimuth (about Y), elevation (about X) and bank
    /// (about Z), applied as `Ry(az) * Rx(el) * Rz(ba)`
    pub fn from_euler(az: T, el: T, ba: T) -> Self {
        let (s1, c1) = (az * half::<T>()).sin_cos();
        let (s2, c2) = (el * half::<T>()).sin_cos();
        let (s3, c3) = (ba * half::<T>()).sin_cos();

        // Ry * Rx first, then compose with Rz
        let tw = c1 * c2;
        let tx = c1 * s2;
        let ty = s1 * c2;
        let tz = -s1 * s2;

        Self::new(
            tw * c3 - tz * s3,
            tx * c3 + ty * s3,
            ty * c3 - tx * s3,
            tw * s3 + tz * c3,
        )
    }

    /// Inverse of [`Quaternion::from_euler`], returns `(az, el, ba)`
    ///
    /// Elevation lands in `[-pi/2, pi/2]`.
    pub fn to_euler(&self) -> (T, T, T) {
        let Self { w, x, y, z } = *self;
        let two = two::<T>();
        let sqw = w * w;
        let sqx = x * x;
        let sqy = y * y;
        let sqz = z * z;

        let az = (two * (x * z + w * y)).atan2(sqw - sqx - sqy + sqz);
        let el = (-two * (y * z - w * x)).max(-T::one()).min(T::one()).asin();
        let ba = (two * (x * y + w * z)).atan2(sqw - sqx + sqy - sqz);
        (az, el, ba)
    }

    /// Rotate a vector by this (unit) quaternion
    pub fn rotate(&self, v: Vec3<T>) -> Vec3<T> {
        let u = Vec3::new(self.x, self.y, self.z);
        let s = self.w;
        let two = two::<T>();
        u * (two * u.dot(v)) + v * (s * s - u.dot(u)) + u.cross(v) * (two * s)
    }

    /// Spherical linear interpolation along the shorter arc
    pub fn slerp(&self, other: &Self, t: T) -> Self {
        let mut cos_theta = self.dot(other);
        let mut end = *other;
        if cos_theta < T::zero() {
            end = -end;
            cos_theta = -cos_theta;
        }

        // Nearly parallel: fall back to normalized lerp
        if cos_theta > T::one() - T::epsilon() {
            return (*self * (T::one() - t) + end * t).sgn();
        }

        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        let a = ((T::one() - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        *self * a + end * b
    }

    /// Local X axis after rotation, first column of the rotation matrix
    pub fn to_vector_x(&self) -> Vec3<T> {
        let Self { w, x, y, z } = *self;
        let two = two::<T>();
        Vec3::new(
            T::one() - two * (y * y + z * z),
            two * (x * y + z * w),
            two * (x * z - y * w),
        )
    }

    /// Local Y axis after rotation
    pub fn to_vector_y(&self) -> Vec3<T> {
        let Self { w, x, y, z } = *self;
        let two = two::<T>();
        Vec3::new(
            two * (x * y - z * w),
            T::one() - two * (x * x + z * z),
            two * (y * z + x * w),
        )
    }

    /// Local Z axis after rotation
    pub fn to_vector_z(&self) -> Vec3<T> {
        let Self { w, x, y, z } = *self;
        let two = two::<T>();
        Vec3::new(
            two * (x * z + y * w),
            two * (y * z - x * w),
            T::one() - two * (x * x + y * y),
        )
    }

    /// 3x3 rotation block as rows
    fn rotation_rows(&self) -> [[T; 3]; 3] {
        let Self { w, x, y, z } = *self;
        let two = two::<T>();
        let (xx, yy, zz) = (two * x * x, two * y * y, two * z * z);
        let (xy, xz, yz) = (two * x * y, two * x * z, two * y * z);
        let (wx, wy, wz) = (two * w * x, two * w * y, two * w * z);
        [
            [T::one() - yy - zz, xy - wz, xz + wy],
            [xy + wz, T::one() - xx - zz, yz - wx],
            [xz - wy, yz + wx, T::one() - xx - yy],
        ]
    }

    /// Build from a 3x3 rotation block given as rows
    ///
    /// Picks the numerically largest of `w`, `x`, `y`, `z` to divide by, then
    /// renormalizes to absorb round-off.
    fn from_rotation_rows(m: [[T; 3]; 3]) -> Self {
        let one = T::one();
        let two = two::<T>();
        let quarter = half::<T>() * half::<T>();
        let trace = m[0][0] + m[1][1] + m[2][2];

        let mut q = if trace > T::zero() {
            let s = half::<T>() / (trace + one).sqrt();
            Self::new(
                quarter / s,
                (m[2][1] - m[1][2]) * s,
                (m[0][2] - m[2][0]) * s,
                (m[1][0] - m[0][1]) * s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = two * (one + m[0][0] - m[1][1] - m[2][2]).sqrt();
            Self::new(
                (m[2][1] - m[1][2]) / s,
                quarter * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = two * (one + m[1][1] - m[0][0] - m[2][2]).sqrt();
            Self::new(
                (m[0][2] - m[2][0]) / s,
                (m[0][1] + m[1][0]) / s,
                quarter * s,
                (m[1][2] + m[2][1]) / s,
            )
        } else {
            let s = two * (one + m[2][2] - m[0][0] - m[1][1]).sqrt();
            Self::new(
                (m[1][0] - m[0][1]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                quarter * s,
            )
        };
        q.normalize();
        q
    }

    /// Row-major 4x4 homogeneous rotation matrix
    ///
    /// Only the upper-left 3x3 block is non-trivial; the last row and column
    /// are `(0, 0, 0, 1)`.
    #[rustfmt::skip]
    pub fn to_matrix(&self) -> [T; 16] {
        let r = self.rotation_rows();
        let (o, l) = (T::zero(), T::one());
        [
            r[0][0], r[0][1], r[0][2], o,
            r[1][0], r[1][1], r[1][2], o,
            r[2][0], r[2][1], r[2][2], o,
            o, o, o, l,
        ]
    }

    /// Column-major 4x4 homogeneous rotation matrix, the transpose of
    /// [`Quaternion::to_matrix`]
    #[rustfmt::skip]
    pub fn to_matrix_transposed(&self) -> [T; 16] {
        let r = self.rotation_rows();
        let (o, l) = (T::zero(), T::one());
        [
            r[0][0], r[1][0], r[2][0], o,
            r[0][1], r[1][1], r[2][1], o,
            r[0][2], r[1][2], r[2][2], o,
            o, o, o, l,
        ]
    }

    /// Read the rotation from a row-major 4x4 matrix
    pub fn from_matrix(m: &[T; 16]) -> Self {
        Self::from_rotation_rows([
            [m[0], m[1], m[2]],
            [m[4], m[5], m[6]],
            [m[8], m[9], m[10]],
        ])
    }

    /// Read the rotation from a column-major 4x4 matrix
    pub fn from_matrix_transposed(m: &[T; 16]) -> Self {
        Self::from_rotation_rows([
            [m[0], m[4], m[8]],
            [m[1], m[5], m[9]],
            [m[2], m[6], m[10]],
        ])
    }

    pub fn to_matrix3(&self) -> Matrix<T, 3> {
        Matrix::from_rows(self.rotation_rows())
    }

    pub fn from_matrix3(m: &Matrix<T, 3>) -> Self {
        Self::from_rotation_rows(std::array::from_fn(|r| std::array::from_fn(|c| m.get(r, c))))
    }

    /// Homogeneous 4x4 rotation usable with the other `Matrix` transforms
    pub fn to_matrix4(&self) -> Matrix<T, 4> {
        let r = self.rotation_rows();
        Matrix::from_fn(|row, col| {
            if row < 3 && col < 3 {
                r[row][col]
            } else if row == col {
                T::one()
            } else {
                T::zero()
            }
        })
    }
}

#[inline]
fn half<T: Float>() -> T {
    T::one() / two::<T>()
}

#[inline]
fn two<T: Float>() -> T {
    T::one() + T::one()
}

impl<T: Float> Default for Quaternion<T> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

/// Hamilton product; `a * b` applies `b` first, then `a`
impl<T: Float> Mul for Quaternion<T> {
    type Output = Self;
    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
        )
    }
}

impl<T: Float> MulAssign for Quaternion<T> {
    #[inline]
    fn mul_assign(&mut self, q: Self) {
        *self = *self * q;
    }
}

impl<T: Float> Mul<T> for Quaternion<T> {
    type Output = Self;
    #[inline]
    fn mul(self, s: T) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }
}

impl<T: Float> Div<T> for Quaternion<T> {
    type Output = Self;
    #[inline]
    fn div(self, s: T) -> Self {
        Self::new(self.w / s, self.x / s, self.y / s, self.z / s)
    }
}

impl<T: Float> Add for Quaternion<T> {
    type Output = Self;
    #[inline]
    fn add(self, q: Self) -> Self {
        Self::new(self.w + q.w, self.x + q.x, self.y + q.y, self.z + q.z)
    }
}

impl<T: Float> Sub for Quaternion<T> {
    type Output = Self;
    #[inline]
    fn sub(self, q: Self) -> Self {
        Self::new(self.w - q.w, self.x - q.x, self.y - q.y, self.z - q.z)
    }
}

impl<T: Float> Neg for Quaternion<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

/// Components in `w, x, y, z` order
impl<T> Index<usize> for Quaternion<T> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.w,
            1 => &self.x,
            2 => &self.y,
            3 => &self.z,
            _ => panic!("quaternion index out of range: {}", i),
        }
    }
}

impl<T> IndexMut<usize> for Quaternion<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.w,
            1 => &mut self.x,
            2 => &mut self.y,
            3 => &mut self.z,
            _ => panic!("quaternion index out of range: {}", i),
        }
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Quaternion<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: RelativeEq> RelativeEq for Quaternion<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
