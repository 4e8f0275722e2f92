//! Complex numbers in rectangular and polar form
//!
//! [`Complex`] stores real and imaginary parts. [`Polar`] stores magnitude and
//! phase and exists mainly as a construction and conversion helper.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Complex number `r + i·i`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex<T> {
    pub r: T,
    pub i: T,
}

/// Complex number as magnitude `m` and phase `p` (radians)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polar<T> {
    pub m: T,
    pub p: T,
}

pub type Complexf = Complex<f32>;
pub type Complexd = Complex<f64>;
pub type Polarf = Polar<f32>;
pub type Polard = Polar<f64>;

// SAFETY: `repr(C)` with two fields of the same type has no padding.
unsafe impl<T: Zeroable> Zeroable for Complex<T> {}
unsafe impl<T: Pod> Pod for Complex<T> {}
unsafe impl<T: Zeroable> Zeroable for Polar<T> {}
unsafe impl<T: Pod> Pod for Polar<T> {}

impl<T: Float> Polar<T> {
    #[inline]
    pub const fn new(m: T, p: T) -> Self {
        Self { m, p }
    }

    /// Unit magnitude at phase `p`
    #[inline]
    pub fn unit(p: T) -> Self {
        Self::new(T::one(), p)
    }
}

impl<T: Float> Complex<T> {
    #[inline]
    pub const fn new(r: T, i: T) -> Self {
        Self { r, i }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// `m·e^(i·phase)`
    #[inline]
    pub fn from_polar(m: T, phase: T) -> Self {
        let (s, c) = phase.sin_cos();
        Self::new(m * c, m * s)
    }

    /// Point on the unit circle at `phase`
    #[inline]
    pub fn from_phase(phase: T) -> Self {
        Self::from_polar(T::one(), phase)
    }

    #[inline]
    pub fn set(&mut self, r: T, i: T) -> &mut Self {
        *self = Self::new(r, i);
        self
    }

    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.r, -self.i)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.r * other.r + self.i * other.i
    }

    /// Squared magnitude
    #[inline]
    pub fn norm_sqr(&self) -> T {
        self.dot(self)
    }

    /// Magnitude
    #[inline]
    pub fn norm(&self) -> T {
        self.r.hypot(self.i)
    }

    /// Phase in `(-pi, pi]`
    #[inline]
    pub fn arg(&self) -> T {
        self.i.atan2(self.r)
    }

    #[inline]
    pub fn to_polar(&self) -> Polar<T> {
        Polar::new(self.norm(), self.arg())
    }

    /// Scale to unit magnitude; zero maps to non-finite values
    #[inline]
    pub fn sgn(&self) -> Self {
        *self / self.norm()
    }

    /// Multiplicative inverse, `None` for zero
    #[inline]
    pub fn recip(&self) -> Option<Self> {
        let n = self.norm_sqr();
        if n == T::zero() {
            None
        } else {
            Some(self.conj() / n)
        }
    }
}

impl<T: Float> From<Polar<T>> for Complex<T> {
    #[inline]
    fn from(p: Polar<T>) -> Self {
        Self::from_polar(p.m, p.p)
    }
}

impl<T: Float> From<Complex<T>> for Polar<T> {
    #[inline]
    fn from(c: Complex<T>) -> Self {
        c.to_polar()
    }
}

impl<T: Float> PartialEq<Polar<T>> for Complex<T> {
    #[inline]
    fn eq(&self, other: &Polar<T>) -> bool {
        *self == Self::from(*other)
    }
}

impl<T: Float> Mul for Complex<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.r * rhs.r - self.i * rhs.i,
            self.r * rhs.i + self.i * rhs.r,
        )
    }
}

impl<T: Float> MulAssign for Complex<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Division by a complex number; dividing by zero gives non-finite parts
impl<T: Float> Div for Complex<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self * rhs.conj() / rhs.norm_sqr()
    }
}

impl<T: Float> Mul<T> for Complex<T> {
    type Output = Self;
    #[inline]
    fn mul(self, s: T) -> Self {
        Self::new(self.r * s, self.i * s)
    }
}

impl<T: Float> Div<T> for Complex<T> {
    type Output = Self;
    #[inline]
    fn div(self, s: T) -> Self {
        Self::new(self.r / s, self.i / s)
    }
}

impl<T: Float> Add for Complex<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.i + rhs.i)
    }
}

impl<T: Float> AddAssign for Complex<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Float> Sub for Complex<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.i - rhs.i)
    }
}

impl<T: Float> SubAssign for Complex<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Float> Neg for Complex<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.r, -self.i)
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Complex<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.r.abs_diff_eq(&other.r, epsilon) && self.i.abs_diff_eq(&other.i, epsilon)
    }
}

impl<T: RelativeEq> RelativeEq for Complex<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.r.relative_eq(&other.r, epsilon, max_relative)
            && self.i.relative_eq(&other.i, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_polar_construction() {
        let mut c = Complexd::new(0.0, 0.0);
        assert_eq!(c, Complexd::zero());

        c = Complexd::from_polar(1.0, 0.2);
        assert_eq!(c, Polard::unit(0.2));

        c = Complexd::from_phase(2.3);
        assert_eq!(c, Polard::unit(2.3));
        assert_ne!(c, Complexd::zero());

        assert_eq!(c.conj(), Complexd::new(c.r, -c.i));
    }

    #[test]
    fn test_norm_and_arg() {
        let c = Complexd::new(3.0, -4.0);
        assert_eq!(c.norm(), 5.0);
        assert_eq!(c.norm_sqr(), 25.0);
        assert_abs_diff_eq!(Complexd::new(0.0, 2.0).arg(), FRAC_PI_2, epsilon = EPSILON);
        assert_abs_diff_eq!(Complexd::new(-1.0, 0.0).arg(), PI, epsilon = EPSILON);

        let p = Polard::from(c);
        assert_abs_diff_eq!(Complexd::from(p), c, epsilon = EPSILON);
        assert_abs_diff_eq!(c.sgn().norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_product_adds_phases() {
        let a = Complexd::from_polar(2.0, 0.3);
        let b = Complexd::from_polar(1.5, 0.9);
        let ab = a * b;
        assert_abs_diff_eq!(ab.norm(), 3.0, epsilon = EPSILON);
        assert_abs_diff_eq!(ab.arg(), 1.2, epsilon = EPSILON);

        // i * i = -1
        let i = Complexd::new(0.0, 1.0);
        assert_eq!(i * i, Complexd::new(-1.0, 0.0));

        let mut m = a;
        m *= b;
        assert_eq!(m, ab);
        assert_abs_diff_eq!(ab / b, a, epsilon = EPSILON);
    }

    #[test]
    fn test_recip() {
        let c = Complexd::new(1.0, 1.0);
        let r = c.recip().unwrap();
        assert_abs_diff_eq!(c * r, Complexd::new(1.0, 0.0), epsilon = EPSILON);
        assert!(Complexd::zero().recip().is_none());
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Complexd::new(1.0, 2.0);
        let b = Complexd::new(-3.0, 0.5);
        assert_eq!(a + b, Complexd::new(-2.0, 2.5));
        assert_eq!(a - b, Complexd::new(4.0, 1.5));
        assert_eq!(-a, Complexd::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Complexd::new(2.0, 4.0));
        assert_eq!(a / 2.0, Complexd::new(0.5, 1.0));
        a += b;
        a -= b;
        assert_eq!(a, Complexd::new(1.0, 2.0));
    }

    #[test]
    fn test_vector_of_complex() {
        let v = Vector::<Complexf, 4>::splat(Complexf::new(1.0, -1.0));
        assert_eq!(v[3].conj(), Complexf::new(1.0, 1.0));
        let flat: &[f32] = bytemuck::cast_slice(&v.elems()[..]);
        assert_eq!(flat, &[1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Complexd::new(1.0, -2.0)).unwrap();
        assert_eq!(json, r#"{"r":1.0,"i":-2.0}"#);
    }
}
