//! Fixed-size N-dimensional vector type
//!
//! [`Vector<T, N>`] is a thin wrapper around `[T; N]`. Arithmetic operators
//! work component-wise and return new values, while the chaining mutators
//! (`set`, `fill`, `negate`, `normalize`, ...) modify the receiver and hand
//! back `&mut Self`.
//!
//! Named accessors (`x`, `y`, `z`, `w`) are only available on the sizes that
//! have those components, so `Vector<f32, 3>::w()` does not exist.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use num_traits::{AsPrimitive, Float, Num, Signed, Zero};
use serde::{Deserialize, Serialize};

/// Fixed-length vector of `N` scalars of type `T`
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
)]
pub struct Vector<T, const N: usize> {
    #[serde(with = "crate::serde_array")]
    elems: [T; N],
}

pub type Vec2<T> = Vector<T, 2>;
pub type Vec3<T> = Vector<T, 3>;
pub type Vec4<T> = Vector<T, 4>;
pub type Vec5<T> = Vector<T, 5>;

pub type Vec2f = Vec2<f32>;
pub type Vec3f = Vec3<f32>;
pub type Vec4f = Vec4<f32>;
pub type Vec2d = Vec2<f64>;
pub type Vec3d = Vec3<f64>;
pub type Vec4d = Vec4<f64>;

// SAFETY: `Vector` is `repr(transparent)` over `[T; N]`, and an array of
// zeroable / plain-old-data elements is itself zeroable / plain-old-data.
unsafe impl<T: Zeroable, const N: usize> Zeroable for Vector<T, N> {}
unsafe impl<T: Pod, const N: usize> Pod for Vector<T, N> {}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Create a vector from an array of components
    #[inline]
    pub const fn from_array(elems: [T; N]) -> Self {
        Self { elems }
    }

    /// Create a vector with every component set to `value`
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self { elems: [value; N] }
    }

    /// Number of components
    #[inline]
    pub const fn size() -> usize {
        N
    }

    /// Create a vector by converting the first `N` elements of `src`
    ///
    /// # Panics
    /// Panics if `src` holds fewer than `N` elements.
    pub fn from_slice<U>(src: &[U]) -> Self
    where
        T: 'static,
        U: AsPrimitive<T>,
    {
        Self::from_array(std::array::from_fn(|i| src[i].as_()))
    }

    #[inline]
    pub fn elems(&self) -> &[T; N] {
        &self.elems
    }

    #[inline]
    pub fn elems_mut(&mut self) -> &mut [T; N] {
        &mut self.elems
    }

    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.elems
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elems.iter()
    }

    /// Apply `f` to every component
    #[inline]
    pub fn map<U: Copy>(self, f: impl FnMut(T) -> U) -> Vector<U, N> {
        Vector::from_array(self.elems.map(f))
    }

    /// Combine two vectors component by component
    #[inline]
    pub fn zip_map<U: Copy, R: Copy>(
        self,
        other: Vector<U, N>,
        mut f: impl FnMut(T, U) -> R,
    ) -> Vector<R, N> {
        Vector::from_array(std::array::from_fn(|i| f(self.elems[i], other.elems[i])))
    }

    /// Set every component to `value`
    #[inline]
    pub fn fill(&mut self, value: T) -> &mut Self {
        self.elems = [value; N];
        self
    }

    /// Copy all components from another vector
    #[inline]
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.elems = other.elems;
        self
    }

    /// Load components from a slice of any primitive numeric type
    ///
    /// # Panics
    /// Panics if `src` holds fewer than `N` elements.
    pub fn set_slice<U>(&mut self, src: &[U]) -> &mut Self
    where
        T: 'static,
        U: AsPrimitive<T>,
    {
        self.set_strided(src, 1)
    }

    /// Load components from every `stride`-th element of `src`
    ///
    /// # Panics
    /// Panics if `src` is too short for `N` strided reads.
    pub fn set_strided<U>(&mut self, src: &[U], stride: usize) -> &mut Self
    where
        T: 'static,
        U: AsPrimitive<T>,
    {
        for (i, elem) in self.elems.iter_mut().enumerate() {
            *elem = src[i * stride].as_();
        }
        self
    }

    /// Extract the contiguous `M`-length sub-vector starting at `offset`
    ///
    /// # Panics
    /// Panics if `offset + M > N`.
    #[inline]
    pub fn sub_vec<const M: usize>(&self, offset: usize) -> Vector<T, M> {
        const { assert!(M <= N, "sub-vector is longer than its source") }
        let src = &self.elems[offset..offset + M];
        Vector::from_array(std::array::from_fn(|i| src[i]))
    }

    /// Gather components by index, e.g. `v.get([2, 1, 0])` reverses a 3-vector
    ///
    /// # Panics
    /// Panics if any index is out of range.
    #[inline]
    pub fn get<const M: usize>(&self, indices: [usize; M]) -> Vector<T, M> {
        Vector::from_array(indices.map(|i| self.elems[i]))
    }

    /// Append one component, raising the dimension by one
    #[inline]
    pub fn extend<const K: usize>(self, last: T) -> Vector<T, K> {
        concat(self, Vector::<T, 1>::from_array([last]))
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self
    where
        T: PartialOrd,
    {
        self.zip_map(other, |a, b| if b < a { b } else { a })
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self
    where
        T: PartialOrd,
    {
        self.zip_map(other, |a, b| if b > a { b } else { a })
    }
}

impl<T: Num + Copy, const N: usize> Vector<T, N> {
    /// The zero vector
    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    #[inline]
    pub fn set_zero(&mut self) -> &mut Self {
        self.fill(T::zero())
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.elems
            .iter()
            .zip(other.elems.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Squared Euclidean length
    #[inline]
    pub fn mag_sqr(self) -> T {
        self.dot(self)
    }

    /// Sum of all components
    #[inline]
    pub fn sum(self) -> T {
        self.elems.iter().fold(T::zero(), |acc, &e| acc + e)
    }

    /// Product of all components
    #[inline]
    pub fn product(self) -> T {
        self.elems.iter().fold(T::one(), |acc, &e| acc * e)
    }

    /// Whether every component equals `value` exactly
    #[inline]
    pub fn all_eq(&self, value: T) -> bool {
        self.elems.iter().all(|&e| e == value)
    }
}

impl<T: Num + Signed + Copy, const N: usize> Vector<T, N> {
    /// Sum of absolute values of the components
    #[inline]
    pub fn sum_abs(self) -> T {
        self.elems.iter().fold(T::zero(), |acc, e| acc + e.abs())
    }

    /// Taxicab (L1) norm
    #[inline]
    pub fn norm1(self) -> T {
        self.sum_abs()
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        self.map(|e| e.abs())
    }

    /// Flip the sign of every component in place
    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        for e in self.elems.iter_mut() {
            *e = -*e;
        }
        self
    }
}

impl<T: Float, const N: usize> Vector<T, N> {
    /// Euclidean length
    #[inline]
    pub fn mag(self) -> T {
        self.mag_sqr().sqrt()
    }

    /// Euclidean (L2) norm, same as [`Vector::mag`]
    #[inline]
    pub fn norm2(self) -> T {
        self.mag()
    }

    /// Scale to unit length in place
    ///
    /// A zero vector has no direction: its components become NaN. Use
    /// [`Vector::try_normalized`] when the input may be degenerate.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let mag = self.mag();
        for e in self.elems.iter_mut() {
            *e = *e / mag;
        }
        self
    }

    /// Unit-length copy; NaN components for a zero vector
    #[inline]
    pub fn normalized(self) -> Self {
        let mut v = self;
        v.normalize();
        v
    }

    /// Unit-length copy, or `None` if the length is zero or not finite
    #[inline]
    pub fn try_normalized(self) -> Option<Self> {
        let mag = self.mag();
        if mag > T::zero() && mag.is_finite() {
            Some(self / mag)
        } else {
            None
        }
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }
}

impl<T: Num + Copy> Vector<T, 3> {
    /// Right-handed cross product, `X.cross(Y) == Z`
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        let [ax, ay, az] = self.elems;
        let [bx, by, bz] = other.elems;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

macro_rules! impl_named_components {
    ($n:literal => $($name:ident, $name_mut:ident, $setter:ident = $idx:literal);+ $(;)?) => {
        impl<T: Copy> Vector<T, $n> {
            $(
                #[inline]
                pub fn $name(&self) -> T {
                    self.elems[$idx]
                }

                #[inline]
                pub fn $name_mut(&mut self) -> &mut T {
                    &mut self.elems[$idx]
                }

                #[inline]
                pub fn $setter(&mut self, value: T) -> &mut Self {
                    self.elems[$idx] = value;
                    self
                }
            )+
        }
    };
}

impl_named_components!(1 => x, x_mut, set_x = 0);
impl_named_components!(2 => x, x_mut, set_x = 0; y, y_mut, set_y = 1);
impl_named_components!(3 => x, x_mut, set_x = 0; y, y_mut, set_y = 1; z, z_mut, set_z = 2);
impl_named_components!(4 =>
    x, x_mut, set_x = 0; y, y_mut, set_y = 1; z, z_mut, set_z = 2; w, w_mut, set_w = 3);
impl_named_components!(5 =>
    x, x_mut, set_x = 0; y, y_mut, set_y = 1; z, z_mut, set_z = 2; w, w_mut, set_w = 3);

impl<T> Vector<T, 1> {
    #[inline]
    pub const fn new(x: T) -> Self {
        Self { elems: [x] }
    }
}

impl<T> Vector<T, 2> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { elems: [x, y] }
    }
}

impl<T> Vector<T, 3> {
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { elems: [x, y, z] }
    }
}

impl<T> Vector<T, 4> {
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { elems: [x, y, z, w] }
    }
}

impl<T> Vector<T, 5> {
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T, v: T) -> Self {
        Self { elems: [x, y, z, w, v] }
    }
}

// Free functions

/// Join two vectors into one of length `K == N + M`
#[inline]
pub fn concat<T: Copy, const N: usize, const M: usize, const K: usize>(
    a: Vector<T, N>,
    b: Vector<T, M>,
) -> Vector<T, K> {
    const { assert!(N + M == K, "concatenated length must equal the sum of both lengths") }
    Vector::from_array(std::array::from_fn(|i| {
        if i < N {
            a.elems[i]
        } else {
            b.elems[i - N]
        }
    }))
}

#[inline]
pub fn dot<T: Num + Copy, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> T {
    a.dot(b)
}

#[inline]
pub fn cross<T: Num + Copy>(a: Vec3<T>, b: Vec3<T>) -> Vec3<T> {
    a.cross(b)
}

/// Unsigned angle between two vectors, in radians
///
/// The cosine is clamped to [-1, 1] so nearly parallel inputs do not produce
/// NaN from round-off.
#[inline]
pub fn angle<T: Float, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> T {
    let cos = a.dot(b) / (a.mag() * b.mag());
    cos.max(-T::one()).min(T::one()).acos()
}

/// Average of three points
#[inline]
pub fn centroid3<T: Float, const N: usize>(
    a: Vector<T, N>,
    b: Vector<T, N>,
    c: Vector<T, N>,
) -> Vector<T, N> {
    let three = T::one() + T::one() + T::one();
    (a + b + c) * (T::one() / three)
}

/// Unit normal of the triangle `(a, b, c)` with counter-clockwise winding
#[inline]
pub fn normal<T: Float>(a: Vec3<T>, b: Vec3<T>, c: Vec3<T>) -> Vec3<T> {
    (b - a).cross(c - a).normalized()
}

// Conversions

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(elems: [T; N]) -> Self {
        Self { elems }
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(v: Vector<T, N>) -> Self {
        v.elems
    }
}

impl<T: Zero + Copy, const N: usize> Default for Vector<T, N> {
    #[inline]
    fn default() -> Self {
        Self::splat(T::zero())
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.elems[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.elems[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Vector<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}

// Operator overloads

macro_rules! impl_componentwise_op {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident) => {
        impl<T: Copy + $op<Output = T>, const N: usize> $op for Vector<T, N> {
            type Output = Self;
            #[inline]
            fn $op_fn(self, rhs: Self) -> Self {
                self.zip_map(rhs, |a, b| a.$op_fn(b))
            }
        }

        impl<T: Copy + $op<Output = T>, const N: usize> $op<T> for Vector<T, N> {
            type Output = Self;
            #[inline]
            fn $op_fn(self, rhs: T) -> Self {
                self.map(|a| a.$op_fn(rhs))
            }
        }

        impl<T: Copy + $op<Output = T>, const N: usize> $assign for Vector<T, N> {
            #[inline]
            fn $assign_fn(&mut self, rhs: Self) {
                *self = <Self as $op<Self>>::$op_fn(*self, rhs);
            }
        }

        impl<T: Copy + $op<Output = T>, const N: usize> $assign<T> for Vector<T, N> {
            #[inline]
            fn $assign_fn(&mut self, rhs: T) {
                *self = <Self as $op<T>>::$op_fn(*self, rhs);
            }
        }
    };
}

impl_componentwise_op!(Add, add, AddAssign, add_assign);
impl_componentwise_op!(Sub, sub, SubAssign, sub_assign);
impl_componentwise_op!(Mul, mul, MulAssign, mul_assign);
impl_componentwise_op!(Div, div, DivAssign, div_assign);

impl<T: Copy + Neg<Output = T>, const N: usize> Neg for Vector<T, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|e| -e)
    }
}

// Scalar on the left: `2.0 * v`, `6.0 - v`, ...
macro_rules! impl_scalar_lhs_ops {
    ($($t:ty),*) => {$(
        impl<const N: usize> Add<Vector<$t, N>> for $t {
            type Output = Vector<$t, N>;
            #[inline]
            fn add(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.map(|e| self + e)
            }
        }

        impl<const N: usize> Sub<Vector<$t, N>> for $t {
            type Output = Vector<$t, N>;
            #[inline]
            fn sub(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.map(|e| self - e)
            }
        }

        impl<const N: usize> Mul<Vector<$t, N>> for $t {
            type Output = Vector<$t, N>;
            #[inline]
            fn mul(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.map(|e| self * e)
            }
        }

        impl<const N: usize> Div<Vector<$t, N>> for $t {
            type Output = Vector<$t, N>;
            #[inline]
            fn div(self, rhs: Vector<$t, N>) -> Vector<$t, N> {
                rhs.map(|e| self / e)
            }
        }
    )*};
}

impl_scalar_lhs_ops!(f32, f64, i8, i16, i32, i64);

// Tolerant comparison

impl<T: AbsDiffEq, const N: usize> AbsDiffEq for Vector<T, N>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.elems
            .iter()
            .zip(other.elems.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: RelativeEq, const N: usize> RelativeEq for Vector<T, N>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.elems
            .iter()
            .zip(other.elems.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
