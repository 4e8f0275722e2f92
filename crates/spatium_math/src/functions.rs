//! Scalar helper functions
//!
//! Small power, rounding, wrapping and integer utilities. The boundary cases
//! are part of each function's contract: `ceil_pow2(0) == 0`,
//! `floor_pow2(0) == 1`, `trailing_zeroes(0) == 0`, and `wrap` always lands in
//! `[lo, hi)`.

use num_traits::{Float, FloatConst, PrimInt, Signed};

/// `v` pushed away from zero to a magnitude of at least `eps`
///
/// Zero counts as positive.
#[inline]
pub fn at_least<T: Float>(v: T, eps: T) -> T {
    if v >= T::zero() {
        if v < eps {
            eps
        } else {
            v
        }
    } else if v > -eps {
        -eps
    } else {
        v
    }
}

/// Smallest even integer `>= v`
#[inline]
pub fn ceil_even<T: PrimInt>(v: T) -> T {
    v + (v & T::one())
}

/// Smallest power of two `>= v`; zero maps to zero
///
/// Values above `2^31` have no representable result and also map to zero.
#[inline]
pub fn ceil_pow2(v: u32) -> u32 {
    if v == 0 {
        return 0;
    }
    v.checked_next_power_of_two().unwrap_or(0)
}

/// Largest power of two `<= v`; zero maps to one
#[inline]
pub fn floor_pow2(v: u32) -> u32 {
    if v == 0 {
        return 1;
    }
    1 << (u32::BITS - 1 - v.leading_zeros())
}

/// Number of trailing zero bits; zero maps to zero
#[inline]
pub fn trailing_zeroes(v: u32) -> u32 {
    if v == 0 {
        0
    } else {
        v.trailing_zeros()
    }
}

/// Clamp into `[0, 1]`
#[inline]
pub fn clip<T: Float>(v: T) -> T {
    v.max(T::zero()).min(T::one())
}

/// Clamp into `[-1, 1]`
#[inline]
pub fn clip_s<T: Float>(v: T) -> T {
    v.max(-T::one()).min(T::one())
}

/// Reflect into `[0, 1]`, mirroring at every integer boundary
#[inline]
pub fn fold<T: Float>(v: T) -> T {
    let two = T::one() + T::one();
    let r = rem_euclid(v, two);
    if r > T::one() {
        two - r
    } else {
        r
    }
}

/// Wrap `v` into `[lo, hi)` with period `hi - lo`
#[inline]
pub fn wrap<T: Float>(v: T, hi: T, lo: T) -> T {
    let d = hi - lo;
    let r = rem_euclid(v - lo, d);
    // Tiny negative offsets can round up to exactly `d`
    if r >= d {
        lo
    } else {
        lo + r
    }
}

/// Wrap an angle into `[-pi, pi)`
#[inline]
pub fn wrap_phase<T: Float + FloatConst>(v: T) -> T {
    wrap(v, T::PI(), -T::PI())
}

#[inline]
fn rem_euclid<T: Float>(v: T, d: T) -> T {
    let r = v % d;
    if r < T::zero() {
        r + d.abs()
    } else {
        r
    }
}

#[inline]
pub fn even<T: PrimInt>(v: T) -> bool {
    v & T::one() == T::zero()
}

#[inline]
pub fn odd<T: PrimInt>(v: T) -> bool {
    !even(v)
}

/// Greatest common divisor, never negative; `gcd(0, 0) == 0`
pub fn gcd<T: PrimInt>(a: T, b: T) -> T {
    let (mut a, mut b) = (a, b);
    while b != T::zero() {
        let t = b;
        b = a % b;
        a = t;
    }
    non_negative(a)
}

/// Least common multiple, never negative; zero if either input is zero
pub fn lcm<T: PrimInt>(a: T, b: T) -> T {
    if a == T::zero() || b == T::zero() {
        return T::zero();
    }
    non_negative(a / gcd(a, b) * b)
}

#[inline]
fn non_negative<T: PrimInt>(v: T) -> T {
    if v < T::zero() {
        T::zero() - v
    } else {
        v
    }
}

/// `n!` for `n <= 20`
///
/// # Panics
/// Overflows (and panics in debug builds) above 20.
pub fn factorial(n: u32) -> u64 {
    (1..=u64::from(n)).product()
}

/// `sqrt(n!)`, computed without forming `n!`
pub fn factorial_sqrt(n: u32) -> f64 {
    (2..=n).map(|i| f64::from(i).sqrt()).product()
}

/// Whether `|v| < bound`
#[inline]
pub fn less_abs<T: Float>(v: T, bound: T) -> bool {
    v.abs() < bound
}

#[inline]
pub fn pow2<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    v * v
}

/// `v * |v|`, the square with the sign of `v`
#[inline]
pub fn pow2_s<T: Signed + Copy>(v: T) -> T {
    v * v.abs()
}

#[inline]
pub fn pow3<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    v * v * v
}

#[inline]
pub fn pow3_abs<T: Signed + Copy>(v: T) -> T {
    pow3(v).abs()
}

#[inline]
pub fn pow4<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    pow2(pow2(v))
}

#[inline]
pub fn pow5<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    v * pow4(v)
}

#[inline]
pub fn pow6<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    pow2(pow3(v))
}

#[inline]
pub fn pow8<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    pow2(pow4(v))
}

#[inline]
pub fn pow16<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    pow2(pow8(v))
}

#[inline]
pub fn pow64<T: Copy + std::ops::Mul<Output = T>>(v: T) -> T {
    pow4(pow16(v))
}

/// Round to the nearest multiple of `step`, ties away from zero
#[inline]
pub fn round_to<T: Float>(v: T, step: T) -> T {
    (v / step).round() * step
}

/// Round away from zero to a multiple of `step`
#[inline]
pub fn round_away<T: Float>(v: T, step: T) -> T {
    let q = v / step;
    let q = if q < T::zero() { q.floor() } else { q.ceil() };
    q * step
}

/// Sign of `v` as -1, 0 or 1
#[inline]
pub fn sgn<T: Signed + PartialOrd + Copy>(v: T) -> T {
    if v > T::zero() {
        T::one()
    } else if v < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Slope of the line through `(x1, y1)` and `(x2, y2)`
#[inline]
pub fn slope<T: Float>(x1: T, y1: T, x2: T, y2: T) -> T {
    (y2 - y1) / (x2 - x1)
}

/// Order two values so that `a <= b`
#[inline]
pub fn sort2<T: PartialOrd>(a: &mut T, b: &mut T) {
    if *b < *a {
        std::mem::swap(a, b);
    }
}

/// `1^2 + 2^2 + ... + n^2`
#[inline]
pub fn sum_of_squares<T: Float>(n: T) -> T {
    let one = T::one();
    let two = one + one;
    let six = two * (two + one);
    n * (n + one) * (two * n + one) / six
}

/// Whether `lo <= v <= hi`
#[inline]
pub fn within<T: PartialOrd>(v: T, lo: T, hi: T) -> bool {
    lo <= v && v <= hi
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn eq_val(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_at_least() {
        assert_eq!(at_least(0.0, 1.0), 1.0);
        assert_eq!(at_least(0.1, 1.0), 1.0);
        assert_eq!(at_least(-0.1, 1.0), -1.0);
        assert_eq!(at_least(3.0, 1.0), 3.0);
    }

    #[test]
    fn test_ceil_even() {
        for (x, y) in [(0, 0), (1, 2), (2, 2), (3, 4), (1001, 1002)] {
            assert_eq!(ceil_even(x), y);
        }
    }

    #[test]
    fn test_pow2_bounds() {
        for (x, y) in [(0, 0), (1, 1), (2, 2), (3, 4), (500, 512), (999, 1024)] {
            assert_eq!(ceil_pow2(x), y, "ceil_pow2({})", x);
        }
        for (x, y) in [(0, 1), (1, 1), (2, 2), (3, 2), (513, 512), (1090, 1024)] {
            assert_eq!(floor_pow2(x), y, "floor_pow2({})", x);
        }
        assert_eq!(ceil_pow2(u32::MAX), 0);
        assert_eq!(floor_pow2(u32::MAX), 1 << 31);
    }

    #[test]
    fn test_clip() {
        let cases = [
            (0.0, 0.0),
            (0.5, 0.5),
            (1.0, 1.0),
            (1.2, 1.0),
            (-0.5, 0.0),
            (f64::INFINITY, 1.0),
            (f64::NEG_INFINITY, 0.0),
        ];
        for (x, y) in cases {
            assert_eq!(clip(x), y);
        }

        let cases = [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (1.2, 1.0), (-0.5, -0.5), (-1.0, -1.0), (-1.2, -1.0)];
        for (x, y) in cases {
            assert_eq!(clip_s(x), y);
        }
    }

    #[test]
    fn test_parity() {
        assert!(even(0));
        assert!(!even(1));
        assert!(even(-2));
        assert!(!odd(0));
        assert!(odd(1));
        assert!(!odd(-2));
    }

    #[test]
    fn test_factorial() {
        let mut expected = 1u64;
        assert_eq!(factorial(0), 1);
        for n in 1..=12u32 {
            expected *= u64::from(n);
            assert_eq!(factorial(n), expected);
        }
        for n in 0..=12 {
            let a = factorial_sqrt(n);
            let b = (factorial(n) as f64).sqrt();
            assert!((a - b).abs() <= b * 1e-12, "factorial_sqrt({})", n);
        }
    }

    #[test]
    fn test_fold() {
        let cases = [
            (0.0, 0.0),
            (0.5, 0.5),
            (1.0, 1.0),
            (1.2, 0.8),
            (-0.2, 0.2),
            (2.2, 0.2),
            (3.2, 0.8),
            (4.2, 0.2),
            (5.2, 0.8),
        ];
        for (x, y) in cases {
            assert!(eq_val(fold(x), y), "fold({}) = {}", x, fold(x));
        }
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(7, 7), 7);
        assert_eq!(gcd(7, 4), 1);
        assert_eq!(gcd(8, 4), 4);
        assert_eq!(lcm(7, 3), 21);
        assert_eq!(lcm(8, 4), 8);
        assert_eq!(lcm(3, 1), 3);
    }

    #[test]
    fn test_gcd_lcm_zero_and_sign() {
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(lcm(0, 0), 0);
        assert_eq!(lcm(0, 5), 0);
        assert_eq!(lcm(5u32, 0), 0);

        assert_eq!(gcd(-4, 6), 2);
        assert_eq!(gcd(4, -6), 2);
        assert_eq!(lcm(-4, 6), 12);
        assert_eq!(lcm(4, -6), 12);
        assert_eq!(lcm(-4, -6), 12);
    }

    #[test]
    fn test_less_abs() {
        assert!(less_abs(0.1, 1.0));
        assert!(less_abs(-0.1, 1.0));
        assert!(!less_abs(1.0, 1.0));
        assert!(!less_abs(-1.0, 1.0));
    }

    #[test]
    fn test_powers() {
        for x in [0i64, 1, 2, 3, -1, -2, -3] {
            assert_eq!(pow2(x), x * x);
            assert_eq!(pow2_s(x), x * x.abs());
            assert_eq!(pow3(x), x * x * x);
            assert_eq!(pow3_abs(x), (x * x * x).abs());
            assert_eq!(pow4(x), x * x * x * x);
            assert_eq!(pow5(x), x * x * x * x * x);
            assert_eq!(pow6(x), x.pow(6));
            assert_eq!(pow8(x), x.pow(8));
            assert_eq!(pow16(x), x.pow(16));
        }
        for x in [0.0f64, 1.0, 1.01, 1.02, -1.0, -1.01, -1.02] {
            let expected = x.powi(64);
            assert!((pow64(x) - expected).abs() <= expected.abs() * 1e-12);
        }
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(0.0, 0.1), 0.0);
        assert_eq!(round_to(0.1, 0.1), 0.1);
        assert_eq!(round_to(0.15, 0.1), 0.1);
        assert_eq!(round_to(-0.15, 0.1), -0.1);

        assert_eq!(round_away(0.0, 0.1), 0.0);
        assert_eq!(round_away(0.1, 0.1), 0.1);
        assert_eq!(round_away(0.15, 0.1), 0.2);
        assert_eq!(round_away(-0.15, 0.1), -0.2);
    }

    #[test]
    fn test_sgn_slope_sort() {
        assert_eq!(sgn(-0.1), -1.0);
        assert_eq!(sgn(0.1), 1.0);
        assert_eq!(sgn(0.0), 0.0);

        assert_eq!(slope(3.0, 3.0, 4.0, 4.0), 1.0);
        assert_eq!(slope(3.0, -3.0, 4.0, -4.0), -1.0);

        let (mut x, mut y) = (1.0, 0.0);
        sort2(&mut x, &mut y);
        assert_eq!((x, y), (0.0, 1.0));
        sort2(&mut x, &mut y);
        assert_eq!((x, y), (0.0, 1.0));
    }

    #[test]
    fn test_sum_of_squares() {
        assert_eq!(sum_of_squares(1.0), 1.0);
        assert_eq!(sum_of_squares(2.0), 5.0);
        assert_eq!(sum_of_squares(3.0), 14.0);
        assert_eq!(sum_of_squares(4.0), 30.0);
        assert_eq!(sum_of_squares(5.0), 55.0);
    }

    #[test]
    fn test_trailing_zeroes_and_within() {
        for (x, r) in [(0, 0), (1, 0), (2, 1), (3, 0), (4, 2), (8, 3), (9, 0)] {
            assert_eq!(trailing_zeroes(x), r);
        }
        assert!(within(0, 0, 1));
        assert!(within(1, 0, 1));
        assert!(!within(2, 0, 1));
    }

    #[test]
    fn test_wrap() {
        let cases = [
            (0.0, 0.0),
            (0.5, 0.5),
            (1.0, -1.0),
            (1.2, -0.8),
            (2.2, 0.2),
            (-0.5, -0.5),
            (-1.0, -1.0),
            (-1.2, 0.8),
            (-2.2, -0.2),
        ];
        for (x, y) in cases {
            assert!(eq_val(wrap(x, 1.0, -1.0), y), "wrap({}) = {}", x, wrap(x, 1.0, -1.0));
        }

        let r = wrap(-1e-16, 32.0, 0.0);
        assert!((0.0..32.0).contains(&r));
    }

    #[test]
    fn test_wrap_phase() {
        let cases = [
            (0.0, 0.0),
            (1.0, 1.0),
            (PI, -PI),
            (PI + 1.0, -PI + 1.0),
            (7.0 * PI + 1.0, -PI + 1.0),
            (-1.0, -1.0),
            (-PI, -PI),
            (-PI - 1.0, PI - 1.0),
            (-7.0 * PI + 1.0, -PI + 1.0),
        ];
        for (x, y) in cases {
            assert!(eq_val(wrap_phase(x), y), "wrap_phase({}) = {}", x, wrap_phase(x));
        }
    }
}
