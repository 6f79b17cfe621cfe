// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Unsigned integer vectors.
//!
//! Besides ordinary wrapping arithmetic these carry the raw encodings of
//! scalar vectors ([`crate::Vec3::to_bits`]) and the wide hash lanes.

use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use bytemuck::{Pod, Zeroable};

use super::{impl_lane_op, impl_vector_core, impl_vector_ordered};
use super::{Vec2, Vec3, Vec4};

/// Two `u32` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct UVec2 {
    /// X component.
    pub x: u32,
    /// Y component.
    pub y: u32,
}

/// Three `u32` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct UVec3 {
    /// X component.
    pub x: u32,
    /// Y component.
    pub y: u32,
    /// Z component.
    pub z: u32,
}

/// Four `u32` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct UVec4 {
    /// X component.
    pub x: u32,
    /// Y component.
    pub y: u32,
    /// Z component.
    pub z: u32,
    /// W component.
    pub w: u32,
}

macro_rules! impl_uint_vector {
    ($name:ident, $mask:ident, $float:ident, $len:literal; $($field:ident: $idx:literal),+) => {
        impl_vector_core!($name, $mask, u32, $len; $($field: $idx),+);
        impl_vector_ordered!($name, $mask, u32; $($field),+);
        impl_lane_op!($name, u32, Add, add, AddAssign, add_assign, u32::wrapping_add; $($field),+);
        impl_lane_op!($name, u32, Sub, sub, SubAssign, sub_assign, u32::wrapping_sub; $($field),+);
        impl_lane_op!($name, u32, Mul, mul, MulAssign, mul_assign, u32::wrapping_mul; $($field),+);
        impl_lane_op!($name, u32, Div, div, DivAssign, div_assign, u32::wrapping_div; $($field),+);
        impl_lane_op!($name, u32, Rem, rem, RemAssign, rem_assign, u32::wrapping_rem; $($field),+);
        impl_lane_op!($name, u32, BitAnd, bitand, BitAndAssign, bitand_assign, <u32 as BitAnd>::bitand; $($field),+);
        impl_lane_op!($name, u32, BitOr, bitor, BitOrAssign, bitor_assign, <u32 as BitOr>::bitor; $($field),+);
        impl_lane_op!($name, u32, BitXor, bitxor, BitXorAssign, bitxor_assign, <u32 as BitXor>::bitxor; $($field),+);

        impl $name {
            /// All components `0`.
            pub const ZERO: Self = Self::splat(0);
            /// All components `1`.
            pub const ONE: Self = Self::splat(1);
            /// All components `u32::MAX`.
            pub const MAX: Self = Self::splat(u32::MAX);

            /// Wrapping sum of the components.
            #[inline]
            pub fn element_sum(self) -> u32 {
                self.to_array().into_iter().fold(0, u32::wrapping_add)
            }

            /// Wrapping dot product.
            #[inline]
            pub fn dot(self, rhs: Self) -> u32 {
                (self * rhs).element_sum()
            }

            /// Reinterprets each lane as a scalar encoding (bit pun).
            #[inline]
            pub fn as_dfloat(self) -> $float {
                $float::from_bits(self)
            }
        }

        impl Not for $name {
            type Output = Self;
            #[inline]
            fn not(self) -> Self {
                self.map(|lane| !lane)
            }
        }

        impl Shl<u32> for $name {
            type Output = Self;
            /// Shift amounts are taken modulo 32.
            #[inline]
            fn shl(self, rhs: u32) -> Self {
                self.map(|lane| lane.wrapping_shl(rhs))
            }
        }

        impl Shr<u32> for $name {
            type Output = Self;
            /// Logical shift; amounts are taken modulo 32.
            #[inline]
            fn shr(self, rhs: u32) -> Self {
                self.map(|lane| lane.wrapping_shr(rhs))
            }
        }
    };
}

impl_uint_vector!(UVec2, BVec2, Vec2, 2; x: 0, y: 1);
impl_uint_vector!(UVec3, BVec3, Vec3, 3; x: 0, y: 1, z: 2);
impl_uint_vector!(UVec4, BVec4, Vec4, 4; x: 0, y: 1, z: 2, w: 3);

impl UVec3 {
    /// Widens with `w`.
    #[inline]
    pub const fn extend(self, w: u32) -> UVec4 {
        UVec4::new(self.x, self.y, self.z, w)
    }
}
