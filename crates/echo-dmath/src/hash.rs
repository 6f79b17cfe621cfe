// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic component hashing.
//!
//! A *wide* hash mixes each component's raw encoding into its own lane:
//! `lane = bits × K + A` with wrapping `u32` arithmetic and fixed odd `K`.
//! The *narrow* hash is the wrapping sum of the wide lanes. No scalar
//! arithmetic is involved, so `+0` and `-0` (equal under `==`) hash
//! differently, and NaN payloads are hashed as stored. A sign flip adds
//! exactly `2^31` to its lane (the multipliers are odd), so flipping the sign
//! of an even number of lanes cancels in the narrow hash; compare wide hashes
//! when that matters.
//!
//! Matrices produce one lane per row: lane `i` accumulates
//! `bits(cⱼ[i]) × Kⱼ[i]` over the columns `j`, then adds `A[i]`.
//!
//! Families that share a width share the lane constants; integer, unsigned,
//! and boolean vectors XOR a per-family salt into each lane's bits first so a
//! `UVec3` and the `Vec3` with the same bits do not collide.
//!
//! These values are stable across platforms and releases of this crate; they
//! are meant for lockstep checksums, not for `HashMap` keys.

use crate::matrix::{Mat2, Mat3, Mat4};
use crate::vector::{BVec2, BVec3, BVec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};
use crate::{DFloat, Quat};

/// Stable, platform-independent hash of a value's raw encoding.
pub trait DetHash {
    /// One mixed `u32` per component (or per matrix row).
    type Wide;

    /// Per-lane hash.
    fn hash_wide(&self) -> Self::Wide;

    /// Single 32-bit hash: the wrapping sum of [`Self::hash_wide`].
    fn hash(&self) -> u32;
}

/// `bits × k + a`, wrapping.
#[inline]
pub const fn mix(bits: u32, k: u32, a: u32) -> u32 {
    bits.wrapping_mul(k).wrapping_add(a)
}

const SCALAR_K: u32 = 0x13AE_2F7F;
const SCALAR_A: u32 = 0x7F34_E811;

const LANES2_K: [u32; 2] = [0x92A6_B963, 0xB365_F807];
const LANES2_A: [u32; 2] = [0x9C3A_161B, 0x722E_3015];
const LANES3_K: [u32; 3] = [0x358E_F591, 0x0034_CB87, 0x2E01_E07B];
const LANES3_A: [u32; 3] = [0xA942_998B, 0x4036_C7EF, 0xA1D4_57D1];
const LANES4_K: [u32; 4] = [0x13F4_01AB, 0xE0BC_8375, 0xFB09_8E4D, 0x77B0_D151];
const LANES4_A: [u32; 4] = [0xD221_D38D, 0x46D5_0C83, 0x3754_9C71, 0xF6EE_6A3F];

const QUAT_K: [u32; 4] = [0xFD21_84AB, 0x6AC6_A751, 0x5AA8_A8F7, 0xA2B6_CC7D];
const QUAT_A: [u32; 4] = [0xC651_2CFB, 0xE2C0_1551, 0x33F2_1AEB, 0x2BA7_9CD9];

// Column-major: `MATn_K[col][row]`.
const MAT2_K: [[u32; 2]; 2] = [[0xDD52_1D3B, 0xBA79_62D3], [0xF3FF_3AC9, 0xAC80_6EA7]];
const MAT2_A: [u32; 2] = [0x6700_BB27, 0x6A52_04C7];
const MAT3_K: [[u32; 3]; 3] = [
    [0xDB18_2ADD, 0x74A7_1969, 0xDE06_1C01],
    [0xA701_01B5, 0x5122_C6D5, 0xE145_D7F7],
    [0x39DA_E831, 0x8608_A905, 0x038F_666F],
];
const MAT3_A: [u32; 3] = [0x462E_13B9, 0xE691_F0A5, 0x5F40_9165];
const MAT4_K: [[u32; 4]; 4] = [
    [0x1F24_4D05, 0x2CC5_2EDB, 0xA478_75C9, 0x031C_7359],
    [0x9289_F27F, 0xCE56_A7BD, 0x23C4_9821, 0x20BF_1C79],
    [0x10A5_121B, 0x4990_2F4D, 0x5AA7_5AAD, 0x71A3_BCDD],
    [0x1210_7DC7, 0xF8FF_3B03, 0x3DA8_E4A1, 0xE7D2_5923],
];
const MAT4_A: [u32; 4] = [0xE512_D287, 0xB9F7_CE6D, 0xDEC8_B25D, 0x997E_9E71];

const FLOAT_SALT: u32 = 0;
const INT_SALT: u32 = 0xE21D_1913;
const UINT_SALT: u32 = 0x0CF1_C171;
const BOOL_SALT: u32 = 0x0EF5_9659;

#[inline]
fn mix_lanes<const N: usize>(bits: [u32; N], salt: u32, k: &[u32; N], a: &[u32; N]) -> [u32; N] {
    let mut out = [0_u32; N];
    for (lane, slot) in out.iter_mut().enumerate() {
        *slot = mix(bits[lane] ^ salt, k[lane], a[lane]);
    }
    out
}

#[inline]
fn mix_columns<const N: usize>(cols: [[u32; N]; N], k: &[[u32; N]; N], a: &[u32; N]) -> [u32; N] {
    let mut out = *a;
    for (col, col_k) in cols.iter().zip(k) {
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = slot.wrapping_add(col[row].wrapping_mul(col_k[row]));
        }
    }
    out
}

#[inline]
fn narrow<const N: usize>(lanes: [u32; N]) -> u32 {
    lanes.into_iter().fold(0, u32::wrapping_add)
}

impl DetHash for DFloat {
    type Wide = u32;

    #[inline]
    fn hash_wide(&self) -> u32 {
        mix(self.to_bits(), SCALAR_K, SCALAR_A)
    }

    #[inline]
    fn hash(&self) -> u32 {
        self.hash_wide()
    }
}

macro_rules! impl_vector_hash {
    ($name:ident, $wide:ident, $k:ident, $a:ident, $salt:ident, |$v:ident| $bits:expr) => {
        impl DetHash for $name {
            type Wide = $wide;

            #[inline]
            fn hash_wide(&self) -> $wide {
                let $v = *self;
                $wide::from_array(mix_lanes($bits, $salt, &$k, &$a))
            }

            #[inline]
            fn hash(&self) -> u32 {
                narrow(self.hash_wide().to_array())
            }
        }
    };
}

impl_vector_hash!(Vec2, UVec2, LANES2_K, LANES2_A, FLOAT_SALT, |v| v.to_bits().to_array());
impl_vector_hash!(Vec3, UVec3, LANES3_K, LANES3_A, FLOAT_SALT, |v| v.to_bits().to_array());
impl_vector_hash!(Vec4, UVec4, LANES4_K, LANES4_A, FLOAT_SALT, |v| v.to_bits().to_array());
impl_vector_hash!(IVec2, UVec2, LANES2_K, LANES2_A, INT_SALT, |v| v.as_uvec2().to_array());
impl_vector_hash!(IVec3, UVec3, LANES3_K, LANES3_A, INT_SALT, |v| v.as_uvec3().to_array());
impl_vector_hash!(IVec4, UVec4, LANES4_K, LANES4_A, INT_SALT, |v| v.as_uvec4().to_array());
impl_vector_hash!(UVec2, UVec2, LANES2_K, LANES2_A, UINT_SALT, |v| v.to_array());
impl_vector_hash!(UVec3, UVec3, LANES3_K, LANES3_A, UINT_SALT, |v| v.to_array());
impl_vector_hash!(UVec4, UVec4, LANES4_K, LANES4_A, UINT_SALT, |v| v.to_array());
impl_vector_hash!(BVec2, UVec2, LANES2_K, LANES2_A, BOOL_SALT, |v| v.as_uvec2().to_array());
impl_vector_hash!(BVec3, UVec3, LANES3_K, LANES3_A, BOOL_SALT, |v| v.as_uvec3().to_array());
impl_vector_hash!(BVec4, UVec4, LANES4_K, LANES4_A, BOOL_SALT, |v| v.as_uvec4().to_array());
impl_vector_hash!(Quat, UVec4, QUAT_K, QUAT_A, FLOAT_SALT, |v| v.to_vec4().to_bits().to_array());

macro_rules! impl_matrix_hash {
    ($name:ident, $wide:ident, $k:ident, $a:ident; $($col:ident),+) => {
        impl DetHash for $name {
            type Wide = $wide;

            #[inline]
            fn hash_wide(&self) -> $wide {
                let cols = [$(self.$col.to_bits().to_array()),+];
                $wide::from_array(mix_columns(cols, &$k, &$a))
            }

            #[inline]
            fn hash(&self) -> u32 {
                narrow(self.hash_wide().to_array())
            }
        }
    };
}

impl_matrix_hash!(Mat2, UVec2, MAT2_K, MAT2_A; c0, c1);
impl_matrix_hash!(Mat3, UVec3, MAT3_K, MAT3_A; c0, c1, c2);
impl_matrix_hash!(Mat4, UVec4, MAT4_K, MAT4_A; c0, c1, c2, c3);

#[cfg(test)]
mod tests {
    use super::*;

    fn all_odd(values: &[u32]) -> bool {
        values.iter().all(|k| k & 1 == 1)
    }

    #[test]
    fn multipliers_are_odd() {
        assert!(all_odd(&[SCALAR_K]));
        assert!(all_odd(&LANES2_K) && all_odd(&LANES3_K) && all_odd(&LANES4_K));
        assert!(all_odd(&QUAT_K));
        assert!(MAT2_K.iter().all(|c| all_odd(c)));
        assert!(MAT3_K.iter().all(|c| all_odd(c)));
        assert!(MAT4_K.iter().all(|c| all_odd(c)));
    }

    #[test]
    fn mix_columns_sums_per_row() {
        let cols = [[1, 0], [0, 1]];
        let out = mix_columns(cols, &MAT2_K, &MAT2_A);
        assert_eq!(out[0], MAT2_K[0][0].wrapping_add(MAT2_A[0]));
        assert_eq!(out[1], MAT2_K[1][1].wrapping_add(MAT2_A[1]));
    }
}
