// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Relational operators on raw encodings.
//!
//! Ordering is decided on a signed integer key derived from the bits, so no
//! comparison ever reaches the host FPU. NaN is unordered and unequal to
//! everything including itself; `+0` and `-0` compare equal.

use core::cmp::Ordering;

use super::DFloat;
use crate::bits::ABS_MASK;

impl DFloat {
    /// Monotone integer key for non-NaN values (`±0` share key 0).
    #[inline]
    const fn order_key(self) -> i32 {
        let magnitude = (self.0 & ABS_MASK) as i32;
        if self.is_sign_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// `self == rhs` under binary32 rules.
    #[inline]
    pub const fn eq(self, rhs: Self) -> bool {
        !self.is_nan() && !rhs.is_nan() && self.order_key() == rhs.order_key()
    }

    /// `self != rhs`; `true` whenever either side is NaN.
    #[inline]
    pub const fn ne(self, rhs: Self) -> bool {
        !self.eq(rhs)
    }

    /// `self < rhs`; `false` whenever either side is NaN.
    #[inline]
    pub const fn lt(self, rhs: Self) -> bool {
        !self.is_nan() && !rhs.is_nan() && self.order_key() < rhs.order_key()
    }

    /// `self <= rhs`; `false` whenever either side is NaN.
    #[inline]
    pub const fn le(self, rhs: Self) -> bool {
        !self.is_nan() && !rhs.is_nan() && self.order_key() <= rhs.order_key()
    }

    /// `self > rhs`; `false` whenever either side is NaN.
    #[inline]
    pub const fn gt(self, rhs: Self) -> bool {
        rhs.lt(self)
    }

    /// `self >= rhs`; `false` whenever either side is NaN.
    #[inline]
    pub const fn ge(self, rhs: Self) -> bool {
        rhs.le(self)
    }

    /// Smaller operand. A NaN operand loses to a number; equal operands
    /// (including `±0`) return `self`.
    #[inline]
    #[must_use]
    pub const fn min(self, rhs: Self) -> Self {
        if self.is_nan() || rhs.lt(self) {
            rhs
        } else {
            self
        }
    }

    /// Larger operand. A NaN operand loses to a number; equal operands
    /// (including `±0`) return `self`.
    #[inline]
    #[must_use]
    pub const fn max(self, rhs: Self) -> Self {
        if self.is_nan() || rhs.gt(self) {
            rhs
        } else {
            self
        }
    }

    /// `max(min(self, hi), lo)` ordering: `self.max(lo).min(hi)`.
    ///
    /// Does not panic when `lo > hi`; the upper bound wins.
    #[inline]
    #[must_use]
    pub const fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Total order over encodings (IEEE `totalOrder`): `-NaN < -∞ < … < -0 <
    /// +0 < … < +∞ < +NaN`. Useful for sorting with deterministic NaN
    /// placement.
    #[inline]
    pub const fn total_cmp(self, rhs: Self) -> Ordering {
        let mut a = self.0 as i32;
        let mut b = rhs.0 as i32;
        a ^= (((a >> 31) as u32) >> 1) as i32;
        b ^= (((b >> 31) as u32) >> 1) as i32;
        if a < b {
            Ordering::Less
        } else if a > b {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl PartialEq for DFloat {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Self::eq(*self, *other)
    }
}

impl PartialOrd for DFloat {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        Some(self.order_key().cmp(&other.order_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_key_is_monotone_across_zero() {
        let seq = [
            DFloat::NEG_INFINITY,
            DFloat::MIN,
            DFloat::NEG_ONE,
            DFloat::from_bits(0x8000_0001),
            DFloat::ZERO,
            DFloat::from_bits(0x0000_0001),
            DFloat::ONE,
            DFloat::MAX,
            DFloat::INFINITY,
        ];
        for pair in seq.windows(2) {
            assert!(pair[0].order_key() < pair[1].order_key(), "{pair:?}");
        }
        assert_eq!(DFloat::NEG_ZERO.order_key(), DFloat::ZERO.order_key());
    }

    #[test]
    fn total_cmp_places_nans_at_the_ends() {
        let neg_nan = DFloat::NAN;
        let pos_nan = DFloat::from_bits(0x7FC0_0000);
        assert_eq!(neg_nan.total_cmp(DFloat::NEG_INFINITY), Ordering::Less);
        assert_eq!(pos_nan.total_cmp(DFloat::INFINITY), Ordering::Greater);
        assert_eq!(DFloat::NEG_ZERO.total_cmp(DFloat::ZERO), Ordering::Less);
    }
}
