// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Integer emulation of binary32 `+ - * / %` and `sqrt`.
//!
//! Every operation reduces to "exact integer significand × power of two",
//! then funnels through [`round_pack`], the single place where rounding to
//! nearest, ties to even happens. Keeping one rounding site is what makes the
//! engine easy to audit: special values are peeled off first, the integer core
//! only ever sees finite nonzero operands.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use super::DFloat;
use crate::bits::{ABS_MASK, EXPONENT_MASK, MANTISSA_MASK, QUIET_BIT, SIGN_BIT};

const IMPLICIT_BIT: u64 = 0x0080_0000;
const DEFAULT_NAN: u32 = 0xFFC0_0000;
/// Extra low-order bits carried through addition so the sticky bit can stand
/// in for everything shifted out of the smaller operand.
const ADD_GUARD_BITS: u32 = 38;
/// Quotient bits produced beyond the dividend's significand.
const DIV_EXTRA_BITS: u32 = 40;
/// Radicand scaling for square root (must be even).
const SQRT_EXTRA_BITS: u32 = 48;

#[inline]
const fn is_nan_bits(a: u32) -> bool {
    a & ABS_MASK > EXPONENT_MASK
}

#[inline]
const fn is_inf_bits(a: u32) -> bool {
    a & ABS_MASK == EXPONENT_MASK
}

#[inline]
const fn is_zero_bits(a: u32) -> bool {
    a & ABS_MASK == 0
}

#[inline]
const fn quiet(a: u32) -> u32 {
    a | QUIET_BIT
}

/// Splits a finite encoding into `(biased exponent, significand)` such that
/// `|value| = significand × 2^(exponent - 150)`.
///
/// The implicit bit is restored for normals; subnormals report exponent 1.
#[inline]
pub(super) const fn unpack(a: u32) -> (i32, u64) {
    let exp = ((a >> 23) & 0xFF) as i32;
    let man = (a & MANTISSA_MASK) as u64;
    if exp == 0 {
        (1, man)
    } else {
        (exp, man | IMPLICIT_BIT)
    }
}

/// [`unpack`] with subnormal significands shifted up so bit 23 is set.
/// Callers guarantee a nonzero finite operand.
#[inline]
const fn unpack_normalized(a: u32) -> (i32, u64) {
    let (exp, sig) = unpack(a);
    if sig & IMPLICIT_BIT != 0 {
        return (exp, sig);
    }
    let shift = sig.leading_zeros() as i32 - 40;
    (exp - shift, sig << shift)
}

/// Shifts `value` right by `shift` bits, rounding to nearest, ties to even.
pub(super) fn shift_right_round(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        return value;
    }
    if shift > 64 {
        return 0;
    }

    let wide = u128::from(value);
    let q = wide >> shift;
    let r = wide & ((1_u128 << shift) - 1);
    let half = 1_u128 << (shift - 1);

    let rounded = if r > half || (r == half && (q & 1) == 1) {
        q + 1
    } else {
        q
    };
    rounded as u64
}

/// Rounds `sig × 2^(exp - 150)` to binary32 and attaches the sign.
///
/// `sig` must be nonzero. Handles normalization in both directions, gradual
/// underflow into subnormals, and overflow to infinity. A rounding carry out
/// of the significand propagates into the exponent field by plain addition.
pub(super) fn round_pack(negative: bool, exp: i32, sig: u64) -> u32 {
    let sign = if negative { SIGN_BIT } else { 0 };
    let msb = 63 - sig.leading_zeros() as i32;
    let shift = msb - 23;
    let biased = exp + shift;

    if biased >= 1 {
        let m = if shift >= 0 {
            shift_right_round(sig, shift.unsigned_abs())
        } else {
            sig << shift.unsigned_abs()
        };
        if biased >= 0xFF {
            return sign | EXPONENT_MASK;
        }
        // `m` carries the implicit bit, so adding it bumps the exponent by one.
        let bits = ((biased - 1) as u64).wrapping_shl(23) + m;
        if bits >= u64::from(EXPONENT_MASK) {
            return sign | EXPONENT_MASK;
        }
        return sign | bits as u32;
    }

    // Subnormal (or underflow to zero): fixed exponent 1, no implicit bit.
    let rshift = 1 - exp;
    let m = if rshift >= 0 {
        shift_right_round(sig, rshift.unsigned_abs())
    } else {
        sig << rshift.unsigned_abs()
    };
    sign | m as u32
}

pub(super) fn add_bits(a: u32, b: u32) -> u32 {
    if is_nan_bits(a) {
        return quiet(a);
    }
    if is_nan_bits(b) {
        return quiet(b);
    }
    let sign_a = a & SIGN_BIT;
    let sign_b = b & SIGN_BIT;
    if is_inf_bits(a) {
        if is_inf_bits(b) && sign_a != sign_b {
            return DEFAULT_NAN;
        }
        return a;
    }
    if is_inf_bits(b) {
        return b;
    }
    if is_zero_bits(a) {
        if is_zero_bits(b) {
            // -0 only when both are -0.
            return sign_a & sign_b;
        }
        return b;
    }
    if is_zero_bits(b) {
        return a;
    }

    let (big, small) = if a & ABS_MASK < b & ABS_MASK {
        (b, a)
    } else {
        (a, b)
    };
    let (exp_big, sig_big) = unpack(big);
    let (exp_small, sig_small) = unpack(small);
    let distance = (exp_big - exp_small).unsigned_abs();

    let wide_big = sig_big << ADD_GUARD_BITS;
    let mut wide_small = sig_small << ADD_GUARD_BITS;
    if distance >= 63 {
        wide_small = 1;
    } else if distance > 0 {
        let lost = wide_small & ((1_u64 << distance) - 1);
        wide_small = (wide_small >> distance) | u64::from(lost != 0);
    }

    let sum = if (big ^ small) & SIGN_BIT == 0 {
        wide_big + wide_small
    } else {
        let diff = wide_big - wide_small;
        if diff == 0 {
            // Exact cancellation rounds to +0 under ties-to-even.
            return 0;
        }
        diff
    };
    round_pack(big & SIGN_BIT != 0, exp_big - ADD_GUARD_BITS as i32, sum)
}

pub(super) fn sub_bits(a: u32, b: u32) -> u32 {
    if is_nan_bits(a) {
        return quiet(a);
    }
    if is_nan_bits(b) {
        return quiet(b);
    }
    add_bits(a, b ^ SIGN_BIT)
}

pub(super) fn mul_bits(a: u32, b: u32) -> u32 {
    if is_nan_bits(a) {
        return quiet(a);
    }
    if is_nan_bits(b) {
        return quiet(b);
    }
    let sign = (a ^ b) & SIGN_BIT;
    if is_inf_bits(a) {
        return if is_zero_bits(b) {
            DEFAULT_NAN
        } else {
            sign | EXPONENT_MASK
        };
    }
    if is_inf_bits(b) {
        return if is_zero_bits(a) {
            DEFAULT_NAN
        } else {
            sign | EXPONENT_MASK
        };
    }
    if is_zero_bits(a) || is_zero_bits(b) {
        return sign;
    }

    let (exp_a, sig_a) = unpack(a);
    let (exp_b, sig_b) = unpack(b);
    // (sa·2^(ea-150))·(sb·2^(eb-150)) = (sa·sb)·2^((ea+eb-150) - 150)
    round_pack(sign != 0, exp_a + exp_b - 150, sig_a * sig_b)
}

pub(super) fn div_bits(a: u32, b: u32) -> u32 {
    if is_nan_bits(a) {
        return quiet(a);
    }
    if is_nan_bits(b) {
        return quiet(b);
    }
    let sign = (a ^ b) & SIGN_BIT;
    if is_inf_bits(a) {
        return if is_inf_bits(b) {
            DEFAULT_NAN
        } else {
            sign | EXPONENT_MASK
        };
    }
    if is_inf_bits(b) {
        return sign;
    }
    if is_zero_bits(b) {
        return if is_zero_bits(a) {
            DEFAULT_NAN
        } else {
            sign | EXPONENT_MASK
        };
    }
    if is_zero_bits(a) {
        return sign;
    }

    let (exp_a, sig_a) = unpack_normalized(a);
    let (exp_b, sig_b) = unpack_normalized(b);
    let dividend = sig_a << DIV_EXTRA_BITS;
    let mut quotient = dividend / sig_b;
    if !dividend.is_multiple_of(sig_b) {
        // Sticky: the quotient has ≥ 15 bits below the rounding point.
        quotient |= 1;
    }
    round_pack(
        sign != 0,
        exp_a - exp_b + 150 - DIV_EXTRA_BITS as i32,
        quotient,
    )
}

/// Truncated remainder (`fmod`): exact, carries the dividend's sign.
pub(super) fn rem_bits(a: u32, b: u32) -> u32 {
    if is_nan_bits(a) {
        return quiet(a);
    }
    if is_nan_bits(b) {
        return quiet(b);
    }
    if is_inf_bits(a) || is_zero_bits(b) {
        return DEFAULT_NAN;
    }
    if is_inf_bits(b) || is_zero_bits(a) {
        return a;
    }
    if a & ABS_MASK < b & ABS_MASK {
        return a;
    }

    let sign = a & SIGN_BIT;
    let (exp_a, sig_a) = unpack(a);
    let (exp_b, sig_b) = unpack(b);
    // (sig_a · 2^d) mod sig_b, folded 32 bits at a time.
    let mut remaining = exp_a - exp_b;
    let mut r = sig_a % sig_b;
    while remaining > 0 {
        let step = remaining.min(32);
        r = (r << step) % sig_b;
        remaining -= step;
    }
    if r == 0 {
        return sign;
    }
    round_pack(sign != 0, exp_b, r)
}

/// Bitwise integer square root (floor) of a `u128`.
fn isqrt_u128(mut n: u128) -> u128 {
    let mut root = 0_u128;
    let mut bit = 1_u128 << 126;
    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if n >= root + bit {
            n -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    root
}

pub(super) fn sqrt_bits(a: u32) -> u32 {
    if is_nan_bits(a) {
        return quiet(a);
    }
    if is_zero_bits(a) {
        // sqrt(-0) = -0
        return a;
    }
    if a & SIGN_BIT != 0 {
        return DEFAULT_NAN;
    }
    if is_inf_bits(a) {
        return a;
    }

    let (exp, sig) = unpack_normalized(a);
    let mut scale = exp - 150;
    let mut sig = sig;
    if scale & 1 != 0 {
        sig <<= 1;
        scale -= 1;
    }
    let radicand = u128::from(sig) << SQRT_EXTRA_BITS;
    let mut root = isqrt_u128(radicand);
    if root * root != radicand {
        root |= 1;
    }
    let half_scale = (scale - SQRT_EXTRA_BITS as i32) / 2;
    round_pack(false, half_scale + 150, root as u64)
}

impl DFloat {
    /// Correctly rounded square root. `sqrt(-0) = -0`; negative inputs give NaN.
    #[inline]
    pub fn sqrt(self) -> Self {
        Self(sqrt_bits(self.0))
    }
}

impl Add for DFloat {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(add_bits(self.0, rhs.0))
    }
}

impl Sub for DFloat {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(sub_bits(self.0, rhs.0))
    }
}

impl Mul for DFloat {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(mul_bits(self.0, rhs.0))
    }
}

impl Div for DFloat {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self(div_bits(self.0, rhs.0))
    }
}

impl Rem for DFloat {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: Self) -> Self {
        Self(rem_bits(self.0, rhs.0))
    }
}

impl Neg for DFloat {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0 ^ SIGN_BIT)
    }
}

impl AddAssign for DFloat {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for DFloat {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for DFloat {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for DFloat {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl RemAssign for DFloat {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_right_round_ties_to_even() {
        assert_eq!(shift_right_round(0b1010, 2), 0b10); // 2.5 -> 2
        assert_eq!(shift_right_round(0b1110, 2), 0b100); // 3.5 -> 4
        assert_eq!(shift_right_round(0b1011, 2), 0b11); // 2.75 -> 3
        assert_eq!(shift_right_round(u64::MAX, 64), 1);
        assert_eq!(shift_right_round(1 << 62, 64), 0);
        assert_eq!(shift_right_round(u64::MAX, 65), 0);
    }

    #[test]
    fn round_pack_normal_and_carry() {
        // 1.0 = 2^23 · 2^(127-150)
        assert_eq!(round_pack(false, 127, 1 << 23), 0x3F80_0000);
        // all-ones significand plus a half ulp carries into the exponent: 2.0
        assert_eq!(round_pack(false, 126, (1 << 25) - 1), 0x4000_0000);
        // overflow
        assert_eq!(round_pack(true, 300, 1), 0xFF80_0000);
    }

    #[test]
    fn round_pack_subnormal_boundary() {
        // smallest subnormal
        assert_eq!(round_pack(false, 1, 1), 0x0000_0001);
        // half of the smallest subnormal ties to even (zero)
        assert_eq!(round_pack(false, 0, 1), 0);
        // rounding a subnormal up into the smallest normal
        assert_eq!(round_pack(false, 0, (1 << 24) - 1), 0x0080_0000);
    }

    #[test]
    fn isqrt_exact_and_floor() {
        assert_eq!(isqrt_u128(1 << 100), 1 << 50);
        assert_eq!(isqrt_u128((1 << 100) - 1), (1 << 50) - 1);
        assert_eq!(isqrt_u128(99), 9);
    }
}
