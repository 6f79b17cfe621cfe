// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Deterministic binary32 scalar.
//!
//! [`DFloat`] shares the IEEE-754 binary32 layout (1 sign, 8 exponent,
//! 23 mantissa bits) but never hands a value to the host FPU. Addition,
//! subtraction, multiplication, division, remainder, square root, and the
//! integer conversions are computed with integer operations and round to
//! nearest, ties to even. Given the same operand bits, every platform
//! produces the same result bits.
//!
//! Determinism contract:
//! - Results are bit-identical to a reference binary32 implementation in
//!   round-to-nearest-even mode, including subnormals and signed zeros.
//! - A NaN operand propagates (quieted, first NaN operand wins).
//! - Invalid operations (`0/0`, `∞-∞`, `0·∞`, `∞/∞`, `sqrt(-x)`, `fmod(∞, y)`,
//!   `fmod(x, 0)`) produce [`DFloat::NAN`] (`0xFFC0_0000`).
//! - No operation panics; errors are encoded as NaN/∞ bit patterns.
//!
//! Constants are written as exact bit patterns rather than decimal literals so
//! they never depend on the host's decimal-to-binary parsing.

use core::fmt;

use bytemuck::{Pod, Zeroable};

use crate::bits::{ABS_MASK, EXPONENT_MASK, MANTISSA_MASK, SIGN_BIT};

mod arith;
mod cmp;
mod convert;
mod trig;

/// Deterministic 32-bit float-equivalent value.
///
/// # Invariant
/// The field is the raw binary32 encoding. It is never produced by host float
/// arithmetic; every non-trivial result comes from the integer engine.
#[derive(Copy, Clone, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct DFloat(u32);

impl DFloat {
    /// `+0.0`
    pub const ZERO: Self = Self(0x0000_0000);
    /// `-0.0`
    pub const NEG_ZERO: Self = Self(0x8000_0000);
    /// `1.0`
    pub const ONE: Self = Self(0x3F80_0000);
    /// `-1.0`
    pub const NEG_ONE: Self = Self(0xBF80_0000);
    /// `2.0`
    pub const TWO: Self = Self(0x4000_0000);
    /// `0.5`
    pub const HALF: Self = Self(0x3F00_0000);
    /// `+∞`
    pub const INFINITY: Self = Self(0x7F80_0000);
    /// `-∞`
    pub const NEG_INFINITY: Self = Self(0xFF80_0000);
    /// Default NaN produced by invalid operations.
    pub const NAN: Self = Self(0xFFC0_0000);
    /// Smallest positive normal value, `2^-126`.
    pub const MIN_POSITIVE: Self = Self(0x0080_0000);
    /// Largest finite value.
    pub const MAX: Self = Self(0x7F7F_FFFF);
    /// Most negative finite value.
    pub const MIN: Self = Self(0xFF7F_FFFF);
    /// Machine epsilon, `2^-23`.
    pub const EPSILON: Self = Self(0x3400_0000);
    /// π rounded to binary32.
    pub const PI: Self = Self(0x4049_0FDB);
    /// 2π rounded to binary32.
    pub const TAU: Self = Self(0x40C9_0FDB);
    /// π/2 rounded to binary32.
    pub const FRAC_PI_2: Self = Self(0x3FC9_0FDB);
    /// π/4 rounded to binary32.
    pub const FRAC_PI_4: Self = Self(0x3F49_0FDB);
    /// 2/π rounded to binary32.
    pub const FRAC_2_PI: Self = Self(0x3F22_F983);

    const DEG_TO_RAD: Self = Self(0x3C8E_FA35);
    const RAD_TO_DEG: Self = Self(0x4265_2EE1);

    /// Builds a scalar directly from its binary32 encoding (no conversion).
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the binary32 encoding (no conversion).
    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Takes the bits of a host `f32` verbatim.
    ///
    /// Intended for boundary crossings and test scaffolding. No host
    /// arithmetic is involved, so the result is exact.
    #[inline]
    pub const fn from_f32(value: f32) -> Self {
        Self(value.to_bits())
    }

    /// Hands the bits to the host as an `f32` (diagnostics and interop).
    #[inline]
    pub const fn to_f32(self) -> f32 {
        f32::from_bits(self.0)
    }

    /// `true` for any NaN encoding.
    #[inline]
    pub const fn is_nan(self) -> bool {
        self.0 & ABS_MASK > EXPONENT_MASK
    }

    /// `true` for `±∞`.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 & ABS_MASK == EXPONENT_MASK
    }

    /// `true` when the value is neither NaN nor `±∞`.
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 & ABS_MASK < EXPONENT_MASK
    }

    /// `true` for `±0`.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 & ABS_MASK == 0
    }

    /// `true` for nonzero values with a zero exponent field.
    #[inline]
    pub const fn is_subnormal(self) -> bool {
        self.0 & EXPONENT_MASK == 0 && self.0 & MANTISSA_MASK != 0
    }

    /// `true` when the sign bit is set (including `-0` and negative NaNs).
    #[inline]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_BIT != 0
    }

    /// `true` when the sign bit is clear.
    #[inline]
    pub const fn is_sign_positive(self) -> bool {
        !self.is_sign_negative()
    }

    /// Absolute value (clears the sign bit).
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0 & ABS_MASK)
    }

    /// Magnitude of `self` with the sign of `sign`.
    #[inline]
    pub const fn copysign(self, sign: Self) -> Self {
        Self((self.0 & ABS_MASK) | (sign.0 & SIGN_BIT))
    }

    /// `±1` by sign; zeros and NaN are returned unchanged.
    pub const fn signum(self) -> Self {
        if self.is_nan() || self.is_zero() {
            self
        } else {
            Self::ONE.copysign(self)
        }
    }

    /// `1 / self`.
    #[inline]
    pub fn recip(self) -> Self {
        Self::ONE / self
    }

    /// `1 / sqrt(self)`, two correctly rounded steps.
    #[inline]
    pub fn rsqrt(self) -> Self {
        Self::ONE / self.sqrt()
    }

    /// Linear interpolation `self + (rhs - self) * t`.
    #[inline]
    pub fn lerp(self, rhs: Self, t: Self) -> Self {
        self + (rhs - self) * t
    }

    /// Converts degrees to radians.
    #[inline]
    pub fn to_radians(self) -> Self {
        self * Self::DEG_TO_RAD
    }

    /// Converts radians to degrees.
    #[inline]
    pub fn to_degrees(self) -> Self {
        self * Self::RAD_TO_DEG
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DFloat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DFloat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Self)
    }
}

impl fmt::Debug for DFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:#010x})", self.to_f32(), self.0)
    }
}

impl fmt::Display for DFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}
