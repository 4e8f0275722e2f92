//! Special functions
//!
//! Associated Legendre functions (with the Condon-Shortley phase) and
//! generalized Laguerre polynomials, both evaluated by their standard
//! three-term recurrences.

use num_traits::Float;

/// Associated Legendre function `P_l^m(cos theta)`
///
/// Includes the Condon-Shortley phase `(-1)^m`. Negative orders use
/// `P_l^-m = (-1)^m (l-m)!/(l+m)! P_l^m`, and `|m| > l` yields zero.
pub fn legendre_p<T: Float>(l: u32, m: i32, theta: T) -> T {
    let (s, c) = theta.sin_cos();
    legendre_p_cs(l, m, c, s)
}

/// [`legendre_p`] from a precomputed `cos theta` and `sin theta`
///
/// Useful when evaluating many degrees and orders at the same angle.
pub fn legendre_p_cs<T: Float>(l: u32, m: i32, cos_theta: T, sin_theta: T) -> T {
    let order = m.unsigned_abs();
    if order > l {
        return T::zero();
    }

    let p = legendre_p_nonneg(l, order, cos_theta, sin_theta);
    if m >= 0 {
        return p;
    }

    // (l-m)!/(l+m)! as the reciprocal of the product (l-m+1) ... (l+m)
    let ratio = ((l - order + 1)..=(l + order))
        .fold(T::one(), |acc, k| acc * scalar::<T>(k))
        .recip();
    if order % 2 == 1 {
        -ratio * p
    } else {
        ratio * p
    }
}

fn legendre_p_nonneg<T: Float>(l: u32, m: u32, c: T, s: T) -> T {
    // P_m^m = (-1)^m (2m-1)!! sin^m
    let mut pmm = T::one();
    let mut odd = T::one();
    for _ in 0..m {
        pmm = -pmm * odd * s;
        odd = odd + scalar::<T>(2);
    }
    if l == m {
        return pmm;
    }

    // P_{m+1}^m = (2m+1) cos P_m^m
    let mut pmmp1 = c * scalar::<T>(2 * m + 1) * pmm;
    if l == m + 1 {
        return pmmp1;
    }

    for ll in (m + 2)..=l {
        let pll = (c * scalar::<T>(2 * ll - 1) * pmmp1 - scalar::<T>(ll + m - 1) * pmm)
            / scalar::<T>(ll - m);
        pmm = pmmp1;
        pmmp1 = pll;
    }
    pmmp1
}

/// Generalized Laguerre polynomial `L_n^(k)(x)`
pub fn laguerre_l<T: Float>(n: u32, k: T, x: T) -> T {
    let mut prev = T::one();
    if n == 0 {
        return prev;
    }
    let mut curr = T::one() + k - x;

    // (i+1) L_{i+1} = (2i+1+k-x) L_i - (i+k) L_{i-1}
    for i in 1..n {
        let fi = scalar::<T>(i);
        let next = ((fi + fi + T::one() + k - x) * curr - (fi + k) * prev) / (fi + T::one());
        prev = curr;
        curr = next;
    }
    curr
}

#[inline]
fn scalar<T: Float>(n: u32) -> T {
    T::from(n).unwrap_or_else(T::nan)
}
