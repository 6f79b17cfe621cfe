// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bit reinterpretation ("bit pun") between [`DFloat`] and `u32`.
//!
//! A pun never converts a value: the same 32 bits are viewed once as a
//! binary32 encoding and once as an unsigned integer. The rotation formulas
//! use the sign masks below to flip signs by XOR instead of multiplying by
//! `-1`, and the hash layer mixes the unsigned view.

use crate::scalar::DFloat;
use crate::vector::{UVec3, UVec4};

/// Sign bit of a binary32 encoding.
pub const SIGN_BIT: u32 = 0x8000_0000;
/// Everything except the sign bit.
pub const ABS_MASK: u32 = 0x7FFF_FFFF;
/// Biased exponent field.
pub const EXPONENT_MASK: u32 = 0x7F80_0000;
/// Stored (fraction) mantissa field.
pub const MANTISSA_MASK: u32 = 0x007F_FFFF;
/// Most significant mantissa bit; set on quiet NaNs.
pub const QUIET_BIT: u32 = 0x0040_0000;

// Per-lane sign masks: `N` flips the lane, `P` keeps it.
pub(crate) const NPN: UVec3 = UVec3::new(SIGN_BIT, 0, SIGN_BIT);
pub(crate) const NNP: UVec3 = UVec3::new(SIGN_BIT, SIGN_BIT, 0);
pub(crate) const PNN: UVec3 = UVec3::new(0, SIGN_BIT, SIGN_BIT);
pub(crate) const PPN: UVec3 = UVec3::new(0, 0, SIGN_BIT);
pub(crate) const NPP: UVec3 = UVec3::new(SIGN_BIT, 0, 0);
pub(crate) const PNP: UVec3 = UVec3::new(0, SIGN_BIT, 0);
pub(crate) const PNPN: UVec4 = UVec4::new(0, SIGN_BIT, 0, SIGN_BIT);
pub(crate) const NPNP: UVec4 = UVec4::new(SIGN_BIT, 0, SIGN_BIT, 0);

/// Reinterprets a scalar's bits as `u32`.
#[inline]
pub const fn as_uint(value: DFloat) -> u32 {
    value.to_bits()
}

/// Reinterprets `u32` bits as a scalar.
#[inline]
pub const fn as_float(bits: u32) -> DFloat {
    DFloat::from_bits(bits)
}

/// XORs `mask` into the scalar's encoding. With [`SIGN_BIT`] this is an exact
/// negation that never touches the arithmetic path.
#[inline]
pub const fn xor_bits(value: DFloat, mask: u32) -> DFloat {
    DFloat::from_bits(value.to_bits() ^ mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pun_round_trips_every_class() {
        for bits in [0, SIGN_BIT, 0x3F80_0000, 0x0000_0001, 0x7F80_0000, 0xFFC0_0000, 0x7FBF_FFFF] {
            assert_eq!(as_uint(as_float(bits)), bits);
        }
    }

    #[test]
    fn sign_mask_negates_exactly() {
        let v = DFloat::from_bits(0x3FC0_0000);
        assert_eq!(xor_bits(v, SIGN_BIT).to_bits(), 0xBFC0_0000);
        assert_eq!(xor_bits(xor_bits(v, SIGN_BIT), SIGN_BIT), v);
    }
}
