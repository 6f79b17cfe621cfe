// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Integer conversions and integral rounding.
//!
//! `to_i32`/`to_u32` truncate toward zero and follow the x86 "integer
//! indefinite" convention for NaN and out-of-range inputs (`i32::MIN` and
//! `u32::MAX`), so the result never depends on which host performs the
//! conversion.

use super::arith::{round_pack, shift_right_round, unpack};
use super::DFloat;
use crate::bits::{ABS_MASK, SIGN_BIT};

/// Exponent at which every representable value is an integer (2^23).
const INTEGRAL_EXP: i32 = 150;
/// Exponent of 1.0.
const ONE_EXP: i32 = 127;

/// `|trunc(value)|` as an integer, or `None` when it cannot fit in 40 bits
/// (also for ∞). NaN must be filtered by the caller.
fn truncated_magnitude(bits: u32) -> Option<u64> {
    let (exp, sig) = unpack(bits & ABS_MASK);
    if exp > 0xFE {
        return None;
    }
    let shift = exp - INTEGRAL_EXP;
    if shift >= 40 {
        return None;
    }
    if shift >= 0 {
        Some(sig << shift)
    } else if shift > -64 {
        Some(sig >> shift.unsigned_abs())
    } else {
        Some(0)
    }
}

impl DFloat {
    /// Nearest scalar to `value`, ties to even.
    pub fn from_i32(value: i32) -> Self {
        if value == 0 {
            return Self::ZERO;
        }
        Self(round_pack(
            value < 0,
            INTEGRAL_EXP,
            u64::from(value.unsigned_abs()),
        ))
    }

    /// Nearest scalar to `value`, ties to even.
    pub fn from_u32(value: u32) -> Self {
        if value == 0 {
            return Self::ZERO;
        }
        Self(round_pack(false, INTEGRAL_EXP, u64::from(value)))
    }

    /// Truncates toward zero. NaN and values outside `i32` give `i32::MIN`.
    pub fn to_i32(self) -> i32 {
        if self.is_nan() {
            return i32::MIN;
        }
        let Some(magnitude) = truncated_magnitude(self.0) else {
            return i32::MIN;
        };
        if self.is_sign_negative() {
            if magnitude > 1 << 31 {
                i32::MIN
            } else {
                (magnitude as i64).wrapping_neg() as i32
            }
        } else if magnitude > i32::MAX as u64 {
            i32::MIN
        } else {
            magnitude as i32
        }
    }

    /// Truncates toward zero. NaN and values outside `u32` give `u32::MAX`;
    /// negative values in `(-1, 0]` truncate to 0.
    pub fn to_u32(self) -> u32 {
        if self.is_nan() {
            return u32::MAX;
        }
        let Some(magnitude) = truncated_magnitude(self.0) else {
            return u32::MAX;
        };
        if self.is_sign_negative() {
            if magnitude == 0 {
                0
            } else {
                u32::MAX
            }
        } else if magnitude > u64::from(u32::MAX) {
            u32::MAX
        } else {
            magnitude as u32
        }
    }

    /// Rounds toward zero.
    #[must_use]
    pub fn trunc(self) -> Self {
        let exp = ((self.0 >> 23) & 0xFF) as i32;
        if exp >= INTEGRAL_EXP {
            // Already integral, or ∞/NaN.
            return self;
        }
        if exp < ONE_EXP {
            return Self(self.0 & SIGN_BIT);
        }
        let fraction_bits = (INTEGRAL_EXP - exp) as u32;
        Self(self.0 & !((1_u32 << fraction_bits) - 1))
    }

    /// Rounds toward −∞.
    #[must_use]
    pub fn floor(self) -> Self {
        let t = self.trunc();
        if self.is_sign_negative() && t.ne(self) {
            t - Self::ONE
        } else {
            t
        }
    }

    /// Rounds toward +∞.
    #[must_use]
    pub fn ceil(self) -> Self {
        let t = self.trunc();
        if self.is_sign_positive() && t.ne(self) {
            t + Self::ONE
        } else {
            t
        }
    }

    /// Rounds to the nearest integer, ties to even.
    #[must_use]
    pub fn round_ties_even(self) -> Self {
        let (exp, sig) = unpack(self.0 & ABS_MASK);
        if exp >= INTEGRAL_EXP || self.is_zero() {
            return self;
        }
        let shift = (INTEGRAL_EXP - exp).unsigned_abs();
        let integral = shift_right_round(sig, shift);
        if integral == 0 {
            return Self(self.0 & SIGN_BIT);
        }
        Self(round_pack(self.is_sign_negative(), INTEGRAL_EXP, integral))
    }

    /// `self - floor(self)`, in `[0, 1)` for finite input.
    #[must_use]
    pub fn fract(self) -> Self {
        self - self.floor()
    }

    /// Two low bits of an integral value, i.e. `self mod 4` in `0..4` using
    /// floored semantics. Non-integral input is truncated first.
    pub(super) fn quadrant(self) -> u32 {
        let Some(magnitude) = truncated_magnitude(self.0) else {
            return 0;
        };
        let low = (magnitude & 3) as u32;
        if self.is_sign_negative() {
            low.wrapping_neg() & 3
        } else {
            low
        }
    }
}

impl From<i32> for DFloat {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl From<u32> for DFloat {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_magnitude_limits() {
        assert_eq!(truncated_magnitude(0x3F80_0000), Some(1));
        assert_eq!(truncated_magnitude(0x3F7F_FFFF), Some(0));
        assert_eq!(truncated_magnitude(0x7F80_0000), None);
        assert_eq!(truncated_magnitude(0x7F7F_FFFF), None);
        // 2^31
        assert_eq!(truncated_magnitude(0x4F00_0000), Some(1 << 31));
    }

    #[test]
    fn quadrant_wraps_negative_values() {
        assert_eq!(DFloat::from_i32(5).quadrant(), 1);
        assert_eq!(DFloat::from_i32(-1).quadrant(), 3);
        assert_eq!(DFloat::from_i32(-4).quadrant(), 0);
        assert_eq!(DFloat::from_i32(-6).quadrant(), 2);
        assert_eq!(DFloat::NEG_ZERO.quadrant(), 0);
    }
}
