// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sine and cosine built only from engine operations.
//!
//! Range reduction is three-part Cody-Waite against π/2, followed by fixed
//! minimax polynomials on `[-π/4, π/4]`. Every step is an engine `+ - *`, so
//! the results inherit the engine's bit-for-bit determinism. Absolute error is
//! below `1e-7` for `|x| ≤ 8192`. Larger arguments are first folded with an
//! exact `x % 2π`; that fold uses the binary32 value of 2π, so accuracy
//! degrades with magnitude while determinism does not.

use super::DFloat;

/// π/2 split into three parts whose leading terms multiply an integer `k`
/// exactly.
const PIO2_HI: DFloat = DFloat::from_bits(0x3FC9_0000);
const PIO2_MID: DFloat = DFloat::from_bits(0x39FD_A000);
const PIO2_LO: DFloat = DFloat::from_bits(0x33A2_2169);

const SIN_C1: DFloat = DFloat::from_bits(0xBE2A_AAA3);
const SIN_C2: DFloat = DFloat::from_bits(0x3C08_839E);
const SIN_C3: DFloat = DFloat::from_bits(0xB94C_A1F9);

const COS_C1: DFloat = DFloat::from_bits(0x3D2A_AAA5);
const COS_C2: DFloat = DFloat::from_bits(0xBAB6_061A);
const COS_C3: DFloat = DFloat::from_bits(0x37CC_F5CE);

/// `|x|` above which the argument is folded by `x % 2π` (8192.0).
const FOLD_THRESHOLD: u32 = 0x4600_0000;

/// Kernel polynomials on the reduced argument `r`.
fn kernel(r: DFloat) -> (DFloat, DFloat) {
    let z = r * r;
    let sin = ((SIN_C3 * z + SIN_C2) * z + SIN_C1) * z * r + r;
    let cos = (((COS_C3 * z + COS_C2) * z + COS_C1) * z) * z - DFloat::HALF * z + DFloat::ONE;
    (sin, cos)
}

impl DFloat {
    /// `(sin(self), cos(self))`, sharing one range reduction.
    ///
    /// Non-finite input gives `(NaN, NaN)`; `±0` gives `(±0, 1)`.
    pub fn sin_cos(self) -> (Self, Self) {
        if !self.is_finite() {
            return (Self::NAN, Self::NAN);
        }
        if self.is_zero() {
            return (self, Self::ONE);
        }
        let x = if self.0 & crate::bits::ABS_MASK > FOLD_THRESHOLD {
            self % Self::TAU
        } else {
            self
        };

        let k = (x * Self::FRAC_2_PI).round_ties_even();
        let r = x - k * PIO2_HI - k * PIO2_MID - k * PIO2_LO;
        let (s, c) = kernel(r);
        match k.quadrant() {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        }
    }

    /// Sine of an angle in radians.
    #[inline]
    pub fn sin(self) -> Self {
        self.sin_cos().0
    }

    /// Cosine of an angle in radians.
    #[inline]
    pub fn cos(self) -> Self {
        self.sin_cos().1
    }

    /// Tangent as `sin / cos`.
    #[inline]
    pub fn tan(self) -> Self {
        let (s, c) = self.sin_cos();
        s / c
    }
}
