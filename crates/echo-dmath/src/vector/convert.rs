// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conversions between the four families of one width.
//!
//! - scalar → int/uint: truncate toward zero through the engine
//!   ([`DFloat::to_i32`], [`DFloat::to_u32`]), including their out-of-range
//!   results.
//! - int/uint → scalar: nearest value, ties to even.
//! - int ↔ uint: two's-complement reinterpretation.
//! - bool → numeric: `1`/`0`.
//! - numeric → bool: nonzero is `true`; NaN is nonzero; `-0` is zero.

use super::{BVec2, BVec3, BVec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};
use crate::DFloat;

macro_rules! impl_family_conversions {
    ($vec:ident, $ivec:ident, $uvec:ident, $bvec:ident, $as_vec:ident, $as_ivec:ident, $as_uvec:ident, $as_bvec:ident; $($field:ident),+) => {
        impl $vec {
            /// Truncates each lane toward zero.
            #[inline]
            pub fn $as_ivec(self) -> $ivec {
                $ivec { $($field: self.$field.to_i32()),+ }
            }

            /// Truncates each lane toward zero.
            #[inline]
            pub fn $as_uvec(self) -> $uvec {
                $uvec { $($field: self.$field.to_u32()),+ }
            }

            /// Nonzero (including NaN) lanes are `true`.
            #[inline]
            pub fn $as_bvec(self) -> $bvec {
                $bvec { $($field: !self.$field.is_zero()),+ }
            }
        }

        impl $ivec {
            /// Rounds each lane to the nearest scalar.
            #[inline]
            pub fn $as_vec(self) -> $vec {
                $vec { $($field: DFloat::from_i32(self.$field)),+ }
            }

            /// Reinterprets each lane as unsigned.
            #[inline]
            pub const fn $as_uvec(self) -> $uvec {
                $uvec { $($field: self.$field as u32),+ }
            }

            /// Nonzero lanes are `true`.
            #[inline]
            pub const fn $as_bvec(self) -> $bvec {
                $bvec { $($field: self.$field != 0),+ }
            }
        }

        impl $uvec {
            /// Rounds each lane to the nearest scalar.
            #[inline]
            pub fn $as_vec(self) -> $vec {
                $vec { $($field: DFloat::from_u32(self.$field)),+ }
            }

            /// Reinterprets each lane as signed.
            #[inline]
            pub const fn $as_ivec(self) -> $ivec {
                $ivec { $($field: self.$field as i32),+ }
            }

            /// Nonzero lanes are `true`.
            #[inline]
            pub const fn $as_bvec(self) -> $bvec {
                $bvec { $($field: self.$field != 0),+ }
            }
        }

        impl $bvec {
            /// `1.0` for set lanes, `+0.0` otherwise.
            #[inline]
            pub const fn $as_vec(self) -> $vec {
                $vec { $($field: if self.$field { DFloat::ONE } else { DFloat::ZERO }),+ }
            }

            /// `1` for set lanes, `0` otherwise.
            #[inline]
            pub const fn $as_ivec(self) -> $ivec {
                $ivec { $($field: self.$field as i32),+ }
            }

            /// `1` for set lanes, `0` otherwise.
            #[inline]
            pub const fn $as_uvec(self) -> $uvec {
                $uvec { $($field: self.$field as u32),+ }
            }
        }

        impl From<$ivec> for $vec {
            #[inline]
            fn from(value: $ivec) -> Self {
                value.$as_vec()
            }
        }

        impl From<$uvec> for $vec {
            #[inline]
            fn from(value: $uvec) -> Self {
                value.$as_vec()
            }
        }

        impl From<$bvec> for $vec {
            #[inline]
            fn from(value: $bvec) -> Self {
                value.$as_vec()
            }
        }

        impl From<$bvec> for $ivec {
            #[inline]
            fn from(value: $bvec) -> Self {
                value.$as_ivec()
            }
        }

        impl From<$bvec> for $uvec {
            #[inline]
            fn from(value: $bvec) -> Self {
                value.$as_uvec()
            }
        }
    };
}

impl_family_conversions!(Vec2, IVec2, UVec2, BVec2, as_vec2, as_ivec2, as_uvec2, as_bvec2; x, y);
impl_family_conversions!(Vec3, IVec3, UVec3, BVec3, as_vec3, as_ivec3, as_uvec3, as_bvec3; x, y, z);
impl_family_conversions!(Vec4, IVec4, UVec4, BVec4, as_vec4, as_ivec4, as_uvec4, as_bvec4; x, y, z, w);
