//! Fixed-size square matrices
//!
//! [`Matrix<T, N>`] stores its elements column-major: `cols[c][r]` is the
//! element at row `r`, column `c`. Matrix-vector products treat vectors as
//! columns, so transforms compose right to left: `(A * B) * v == A * (B * v)`.
//!
//! Row-major literals are written with [`Matrix::from_rows`], which reads the
//! same way the matrix is printed on paper.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// N x N matrix stored as `N` column vectors
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
)]
pub struct Matrix<T, const N: usize> {
    #[serde(with = "crate::serde_array")]
    cols: [Vector<T, N>; N],
}

pub type Mat2<T> = Matrix<T, 2>;
pub type Mat3<T> = Matrix<T, 3>;
pub type Mat4<T> = Matrix<T, 4>;

pub type Mat2f = Mat2<f32>;
pub type Mat3f = Mat3<f32>;
pub type Mat4f = Mat4<f32>;
pub type Mat2d = Mat2<f64>;
pub type Mat3d = Mat3<f64>;
pub type Mat4d = Mat4<f64>;

// SAFETY: `Matrix` is `repr(transparent)` over an array of `repr(transparent)`
// vectors, so its layout is exactly `N * N` contiguous `T` values.
unsafe impl<T: Zeroable, const N: usize> Zeroable for Matrix<T, N> {}
unsafe impl<T: Pod, const N: usize> Pod for Matrix<T, N> {}

impl<T: Copy, const N: usize> Matrix<T, N> {
    /// Build from column vectors
    #[inline]
    pub const fn from_cols(cols: [Vector<T, N>; N]) -> Self {
        Self { cols }
    }

    /// Build from row-major nested arrays, `rows[r][c]`
    #[inline]
    pub fn from_rows(rows: [[T; N]; N]) -> Self {
        Self::from_fn(|r, c| rows[r][c])
    }

    /// Build by evaluating `f(row, col)` for every element
    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self {
            cols: std::array::from_fn(|c| Vector::from_array(std::array::from_fn(|r| f(r, c)))),
        }
    }

    /// Every element set to `value`
    #[inline]
    pub fn splat(value: T) -> Self {
        Self {
            cols: [Vector::splat(value); N],
        }
    }

    /// Number of rows (and columns)
    #[inline]
    pub const fn size() -> usize {
        N
    }

    /// Element at row `r`, column `c`
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> T {
        self.cols[c][r]
    }

    #[inline]
    pub fn set_elem(&mut self, r: usize, c: usize, value: T) -> &mut Self {
        self.cols[c][r] = value;
        self
    }

    #[inline]
    pub fn col(&self, c: usize) -> Vector<T, N> {
        self.cols[c]
    }

    #[inline]
    pub fn col_mut(&mut self, c: usize) -> &mut Vector<T, N> {
        &mut self.cols[c]
    }

    #[inline]
    pub fn row(&self, r: usize) -> Vector<T, N> {
        Vector::from_array(std::array::from_fn(|c| self.cols[c][r]))
    }

    #[inline]
    pub fn cols(&self) -> &[Vector<T, N>; N] {
        &self.cols
    }

    /// Swap rows and columns in place
    pub fn transpose(&mut self) -> &mut Self {
        for c in 0..N {
            for r in (c + 1)..N {
                let upper = self.cols[c][r];
                self.cols[c][r] = self.cols[r][c];
                self.cols[r][c] = upper;
            }
        }
        self
    }

    #[inline]
    pub fn transposed(&self) -> Self {
        Self::from_fn(|r, c| self.get(c, r))
    }

    /// Apply `f` to every element
    #[inline]
    pub fn map<U: Copy>(self, mut f: impl FnMut(T) -> U) -> Matrix<U, N> {
        Matrix::from_cols(self.cols.map(|col| col.map(&mut f)))
    }

    #[inline]
    fn zip_map(self, other: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        Self::from_fn(|r, c| f(self.get(r, c), other.get(r, c)))
    }

    /// Flat column-major view of all `N * N` elements
    #[inline]
    pub fn as_slice(&self) -> &[T]
    where
        T: Pod,
    {
        bytemuck::cast_slice(&self.cols)
    }
}

impl<T: Num + Copy, const N: usize> Matrix<T, N> {
    /// The identity matrix
    #[inline]
    pub fn identity() -> Self {
        Self::from_fn(|r, c| if r == c { T::one() } else { T::zero() })
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_fn(|_, _| T::zero())
    }

    #[inline]
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    /// Homogeneous uniform scale: the first `N - 1` diagonal entries are `s`
    pub fn uniform_scaling(s: T) -> Self {
        let mut m = Self::identity();
        for i in 0..N.saturating_sub(1) {
            m.cols[i][i] = s;
        }
        m
    }

    /// Homogeneous scale along the first `M` axes
    pub fn scaling<const M: usize>(factors: Vector<T, M>) -> Self {
        const { assert!(M < N, "scaling needs fewer factors than the matrix size") }
        let mut m = Self::identity();
        for (i, &s) in factors.iter().enumerate() {
            m.cols[i][i] = s;
        }
        m
    }

    /// Homogeneous translation: the offset lands in the last column
    pub fn translation<const M: usize>(offset: Vector<T, M>) -> Self {
        const { assert!(M < N, "translation needs fewer components than the matrix size") }
        let mut m = Self::identity();
        for (i, &t) in offset.iter().enumerate() {
            m.cols[N - 1][i] = t;
        }
        m
    }

    /// Sum of the diagonal
    #[inline]
    pub fn trace(&self) -> T {
        (0..N).fold(T::zero(), |acc, i| acc + self.cols[i][i])
    }

    #[inline]
    pub fn determinant(&self) -> T {
        determinant(self)
    }
}

impl<T: Float, const N: usize> Matrix<T, N> {
    /// Rotation by `angle` radians in the plane spanned by axes `d0` and `d1`
    ///
    /// Positive angles turn axis `d0` toward axis `d1`, so `rotation(a, 0, 1)`
    /// is the usual counter-clockwise rotation about Z.
    ///
    /// # Panics
    /// Panics if either axis index is `>= N`.
    pub fn rotation(angle: T, d0: usize, d1: usize) -> Self {
        let (sn, cs) = angle.sin_cos();
        let mut m = Self::identity();
        m.cols[d0][d0] = cs;
        m.cols[d1][d0] = -sn;
        m.cols[d0][d1] = sn;
        m.cols[d1][d1] = cs;
        m
    }

    /// Inverse matrix, or `None` if the matrix is singular
    pub fn inverse(&self) -> Option<Self> {
        let mut m = *self;
        invert(&mut m).then_some(m)
    }
}

/// Determinant of a square matrix
///
/// Sizes 1 to 3 use closed forms. Larger sizes expand by cofactors along the
/// rows, tracking the consumed columns with a stack mask instead of building
/// minor matrices.
pub fn determinant<T: Num + Copy, const N: usize>(m: &Matrix<T, N>) -> T {
    match N {
        0 => T::one(),
        1 => m.get(0, 0),
        2 => m.get(0, 0) * m.get(1, 1) - m.get(0, 1) * m.get(1, 0),
        3 => {
            m.get(0, 0) * (m.get(1, 1) * m.get(2, 2) - m.get(1, 2) * m.get(2, 1))
                - m.get(0, 1) * (m.get(1, 0) * m.get(2, 2) - m.get(1, 2) * m.get(2, 0))
                + m.get(0, 2) * (m.get(1, 0) * m.get(2, 1) - m.get(1, 1) * m.get(2, 0))
        }
        _ => {
            let mut used = [false; N];
            cofactor_expansion(m, 0, &mut used)
        }
    }
}

fn cofactor_expansion<T: Num + Copy, const N: usize>(
    m: &Matrix<T, N>,
    row: usize,
    used: &mut [bool; N],
) -> T {
    if row == N {
        return T::one();
    }

    let mut sum = T::zero();
    let mut positive = true;
    for col in 0..N {
        if used[col] {
            continue;
        }
        let elem = m.get(row, col);
        if elem != T::zero() {
            used[col] = true;
            let term = elem * cofactor_expansion(m, row + 1, used);
            used[col] = false;
            sum = if positive { sum + term } else { sum - term };
        }
        positive = !positive;
    }
    sum
}

/// Invert `m` in place
///
/// Returns `false` and leaves `m` untouched when the determinant is exactly
/// zero.
pub fn invert<T: Float, const N: usize>(m: &mut Matrix<T, N>) -> bool {
    let det = determinant(m);
    if det == T::zero() {
        return false;
    }

    if N == 2 {
        let inv_det = det.recip();
        let (a, b, c, d) = (m.get(0, 0), m.get(0, 1), m.get(1, 0), m.get(1, 1));
        m.set_elem(0, 0, d * inv_det)
            .set_elem(0, 1, -b * inv_det)
            .set_elem(1, 0, -c * inv_det)
            .set_elem(1, 1, a * inv_det);
        return true;
    }

    // Gauss-Jordan on row-major scratch copies
    let mut a: [[T; N]; N] = std::array::from_fn(|r| std::array::from_fn(|c| m.get(r, c)));
    let mut inv: [[T; N]; N] =
        std::array::from_fn(|r| std::array::from_fn(|c| if r == c { T::one() } else { T::zero() }));

    for col in 0..N {
        let mut pivot = col;
        for r in (col + 1)..N {
            if a[r][col].abs() > a[pivot][col].abs() {
                pivot = r;
            }
        }
        if a[pivot][col] == T::zero() {
            return false;
        }
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let scale = a[col][col].recip();
        for c in 0..N {
            a[col][c] = a[col][c] * scale;
            inv[col][c] = inv[col][c] * scale;
        }

        for r in 0..N {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == T::zero() {
                continue;
            }
            for c in 0..N {
                a[r][c] = a[r][c] - factor * a[col][c];
                inv[r][c] = inv[r][c] - factor * inv[col][c];
            }
        }
    }

    *m = Matrix::from_rows(inv);
    true
}

impl<T: Num + Copy, const N: usize> Default for Matrix<T, N> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T, const N: usize> From<[Vector<T, N>; N]> for Matrix<T, N> {
    #[inline]
    fn from(cols: [Vector<T, N>; N]) -> Self {
        Self { cols }
    }
}

/// `m[(row, col)]`
impl<T, const N: usize> Index<(usize, usize)> for Matrix<T, N> {
    type Output = T;
    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.cols[c][r]
    }
}

impl<T, const N: usize> IndexMut<(usize, usize)> for Matrix<T, N> {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        &mut self.cols[c][r]
    }
}

/// Flat column-major index
impl<T, const N: usize> Index<usize> for Matrix<T, N> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.cols[i / N][i % N]
    }
}

impl<T, const N: usize> IndexMut<usize> for Matrix<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.cols[i / N][i % N]
    }
}

// Element-wise operators. `*` between matrices is the matrix product and is
// implemented separately below.

macro_rules! impl_elementwise_op {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, with_matrix) => {
        impl<T: Copy + $op<Output = T>, const N: usize> $op for Matrix<T, N> {
            type Output = Self;
            #[inline]
            fn $op_fn(self, rhs: Self) -> Self {
                self.zip_map(rhs, |a, b| a.$op_fn(b))
            }
        }

        impl<T: Copy + $op<Output = T>, const N: usize> $assign for Matrix<T, N> {
            #[inline]
            fn $assign_fn(&mut self, rhs: Self) {
                *self = <Self as $op<Self>>::$op_fn(*self, rhs);
            }
        }

        impl_elementwise_op!($op, $op_fn, $assign, $assign_fn);
    };
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident) => {
        impl<T: Copy + $op<Output = T>, const N: usize> $op<T> for Matrix<T, N> {
            type Output = Self;
            #[inline]
            fn $op_fn(self, rhs: T) -> Self {
                self.map(|a| a.$op_fn(rhs))
            }
        }

        impl<T: Copy + $op<Output = T>, const N: usize> $assign<T> for Matrix<T, N> {
            #[inline]
            fn $assign_fn(&mut self, rhs: T) {
                *self = <Self as $op<T>>::$op_fn(*self, rhs);
            }
        }
    };
}

impl_elementwise_op!(Add, add, AddAssign, add_assign, with_matrix);
impl_elementwise_op!(Sub, sub, SubAssign, sub_assign, with_matrix);
impl_elementwise_op!(Mul, mul, MulAssign, mul_assign);
impl_elementwise_op!(Div, div, DivAssign, div_assign);

impl<T: Copy + Neg<Output = T>, const N: usize> Neg for Matrix<T, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|e| -e)
    }
}

/// Matrix product
impl<T: Num + Copy, const N: usize> Mul for Matrix<T, N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(rhs.cols.map(|col| self * col))
    }
}

impl<T: Num + Copy, const N: usize> MulAssign for Matrix<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = <Self as Mul<Self>>::mul(*self, rhs);
    }
}

/// Transform a column vector
impl<T: Num + Copy, const N: usize> Mul<Vector<T, N>> for Matrix<T, N> {
    type Output = Vector<T, N>;
    fn mul(self, v: Vector<T, N>) -> Vector<T, N> {
        self.cols
            .iter()
            .zip(v.iter())
            .fold(Vector::zero(), |acc, (&col, &s)| acc + col * s)
    }
}

macro_rules! impl_scalar_lhs_ops {
    ($($t:ty),*) => {$(
        impl<const N: usize> Add<Matrix<$t, N>> for $t {
            type Output = Matrix<$t, N>;
            #[inline]
            fn add(self, rhs: Matrix<$t, N>) -> Matrix<$t, N> {
                rhs.map(|e| self + e)
            }
        }

        impl<const N: usize> Sub<Matrix<$t, N>> for $t {
            type Output = Matrix<$t, N>;
            #[inline]
            fn sub(self, rhs: Matrix<$t, N>) -> Matrix<$t, N> {
                rhs.map(|e| self - e)
            }
        }

        impl<const N: usize> Mul<Matrix<$t, N>> for $t {
            type Output = Matrix<$t, N>;
            #[inline]
            fn mul(self, rhs: Matrix<$t, N>) -> Matrix<$t, N> {
                rhs.map(|e| self * e)
            }
        }
    )*};
}

impl_scalar_lhs_ops!(f32, f64, i32, i64);

impl<T: AbsDiffEq, const N: usize> AbsDiffEq for Matrix<T, N>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: RelativeEq, const N: usize> RelativeEq for Matrix<T, N>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
