//! Closed scalar intervals
//!
//! [`Interval`] keeps `min <= max` at all times. Setters assign first and then
//! reorder, so moving one endpoint past the other swaps them instead of
//! producing an inverted range.

use std::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "RawInterval<T>",
    bound(deserialize = "T: Deserialize<'de> + Num + PartialOrd + Copy")
)]
pub struct Interval<T> {
    min: T,
    max: T,
}

/// Endpoints as written on the wire, possibly out of order
#[derive(Deserialize)]
struct RawInterval<T> {
    min: T,
    max: T,
}

impl<T: Num + PartialOrd + Copy> From<RawInterval<T>> for Interval<T> {
    fn from(raw: RawInterval<T>) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl<T: Num + PartialOrd + Copy> Interval<T> {
    /// Create an interval from two endpoints in either order
    #[inline]
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// Interval from a center and a full width
    #[inline]
    pub fn from_center_diameter(center: T, diameter: T) -> Self {
        let mut i = Self::new(center, center);
        i.center_diameter(center, diameter);
        i
    }

    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    /// Move the lower endpoint; swaps endpoints if it passes `max`
    #[inline]
    pub fn set_min(&mut self, v: T) -> &mut Self {
        self.min = v;
        self.reorder()
    }

    /// Move the upper endpoint; swaps endpoints if it passes `min`
    #[inline]
    pub fn set_max(&mut self, v: T) -> &mut Self {
        self.max = v;
        self.reorder()
    }

    /// Set both endpoints, in either order
    #[inline]
    pub fn endpoints(&mut self, a: T, b: T) -> &mut Self {
        *self = Self::new(a, b);
        self
    }

    #[inline]
    pub fn center(&self) -> T {
        (self.min + self.max) / two()
    }

    #[inline]
    pub fn diameter(&self) -> T {
        self.max - self.min
    }

    #[inline]
    pub fn radius(&self) -> T {
        self.diameter() / two()
    }

    /// Move the center, keeping the diameter
    #[inline]
    pub fn set_center(&mut self, c: T) -> &mut Self {
        let r = self.radius();
        self.endpoints(c - r, c + r)
    }

    /// Change the diameter, keeping the center
    #[inline]
    pub fn set_diameter(&mut self, d: T) -> &mut Self {
        let c = self.center();
        self.center_diameter(c, d)
    }

    /// Change the radius, keeping the center
    #[inline]
    pub fn set_radius(&mut self, r: T) -> &mut Self {
        let c = self.center();
        self.endpoints(c - r, c + r)
    }

    #[inline]
    pub fn center_diameter(&mut self, c: T, d: T) -> &mut Self {
        let r = d / two();
        self.endpoints(c - r, c + r)
    }

    /// Whether the interval is a single point
    #[inline]
    pub fn degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Whether the interval has non-zero width
    #[inline]
    pub fn proper(&self) -> bool {
        self.min != self.max
    }

    #[inline]
    pub fn contains(&self, x: T) -> bool {
        self.min <= x && x <= self.max
    }

    #[inline]
    fn reorder(&mut self) -> &mut Self {
        if self.max < self.min {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        self
    }
}

impl<T: Float> Interval<T> {
    /// Map `x` linearly so that `min -> 0` and `max -> 1`
    ///
    /// A degenerate interval yields a non-finite result.
    #[inline]
    pub fn to_unit(&self, x: T) -> T {
        (x - self.min) / self.diameter()
    }
}

#[inline]
fn two<T: Num>() -> T {
    T::one() + T::one()
}

/// Interval sum `[a, b] + [c, d] = [a + c, b + d]`
impl<T: Num + PartialOrd + Copy> Add for Interval<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.min + rhs.min, self.max + rhs.max)
    }
}

/// Interval difference `[a, b] - [c, d] = [a - d, b - c]`
impl<T: Num + PartialOrd + Copy> Sub for Interval<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.min - rhs.max, self.max - rhs.min)
    }
}

impl<T: Num + PartialOrd + Copy> AddAssign for Interval<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Num + PartialOrd + Copy> SubAssign for Interval<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_keep_order() {
        let mut i = Interval::new(0.0, 1.0);
        assert_eq!(i.min(), 0.0);
        assert_eq!(i.max(), 1.0);

        i.set_min(2.0);
        assert_eq!(i.min(), 1.0);
        assert_eq!(i.max(), 2.0);

        i.set_max(0.0);
        assert_eq!(i.min(), 0.0);
        assert_eq!(i.max(), 1.0);

        assert_eq!(Interval::new(3, -3), Interval::new(-3, 3));
    }

    #[test]
    fn test_measures() {
        let mut i = Interval::new(0.0, 1.0);
        i.endpoints(-1.0, 1.0);
        assert_eq!(i.min(), -1.0);
        assert_eq!(i.max(), 1.0);
        assert_eq!(i.center(), 0.0);
        assert_eq!(i.diameter(), 2.0);
        assert_eq!(i.radius(), 1.0);
        assert!(i.proper());
        assert!(!i.degenerate());

        i.endpoints(0.0, 0.0);
        assert!(i.degenerate());
        assert!(!i.proper());
    }

    #[test]
    fn test_center_and_diameter() {
        let mut i = Interval::new(0.0, 0.0);
        i.center_diameter(1.0, 4.0);
        assert_eq!(i.center(), 1.0);
        assert_eq!(i.diameter(), 4.0);
        assert_eq!(i.min(), -1.0);
        assert_eq!(i.max(), 3.0);

        i.set_center(2.0);
        assert_eq!(i.min(), 0.0);
        assert_eq!(i.max(), 4.0);

        i.set_diameter(6.0);
        assert_eq!(i.min(), -1.0);
        assert_eq!(i.max(), 5.0);

        i.set_radius(1.0);
        assert_eq!(i, Interval::new(1.0, 3.0));

        assert_eq!(Interval::from_center_diameter(1.0, 4.0), Interval::new(-1.0, 3.0));
    }

    #[test]
    fn test_to_unit() {
        let i = Interval::new(-1.0, 1.0);
        assert_eq!(i.to_unit(0.0), 0.5);
        assert_eq!(i.to_unit(-1.0), 0.0);
        assert_eq!(i.to_unit(1.0), 1.0);
        assert!(i.contains(0.25));
        assert!(!i.contains(1.5));
    }

    #[test]
    fn test_to_unit_degenerate() {
        let i = Interval::new(3.0, 3.0);
        assert!(!i.to_unit(3.0).is_finite());
        assert_eq!(i.to_unit(4.0), f64::INFINITY);
    }

    #[test]
    fn test_deserialize_reorders_endpoints() {
        let i: Interval<f64> = serde_json::from_str(r#"{"min":2.0,"max":1.0}"#).unwrap();
        assert!(i.min() <= i.max());
        assert_eq!(i, Interval::new(1.0, 2.0));
        assert_eq!(i.diameter(), 1.0);
        assert!(i.proper());

        let j: Interval<i32> = serde_json::from_str(r#"{"min":2,"max":1}"#).unwrap();
        assert_eq!((j.min(), j.max()), (1, 2));

        let json = serde_json::to_string(&Interval::new(5, -5)).unwrap();
        assert_eq!(json, r#"{"min":-5,"max":5}"#);
    }

    #[test]
    fn test_equality_and_arithmetic() {
        assert_eq!(Interval::new(0, 1), Interval::new(0, 1));
        assert_ne!(Interval::new(0, 2), Interval::new(0, 1));

        let mut a = Interval::new(0, 2);
        a += Interval::new(-1, 2);
        assert_eq!(a, Interval::new(-1, 4));

        let mut b = Interval::new(0, 2);
        b -= Interval::new(-1, 2);
        assert_eq!(b, Interval::new(-2, 3));
    }
}
