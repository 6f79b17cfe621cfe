// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Signed integer vectors.
//!
//! `+ - *` and negation wrap on overflow in every build profile so debug and
//! release produce the same bits. `/` and `%` follow Rust integer rules: a
//! zero divisor lane panics.

use core::ops::{BitAnd, BitOr, BitXor, Neg, Not, Shl, Shr};

use bytemuck::{Pod, Zeroable};

use super::{impl_lane_op, impl_vector_core, impl_vector_ordered};

/// Two `i32` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct IVec2 {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
}

/// Three `i32` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct IVec3 {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
    /// Z component.
    pub z: i32,
}

/// Four `i32` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct IVec4 {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
    /// Z component.
    pub z: i32,
    /// W component.
    pub w: i32,
}

macro_rules! impl_int_vector {
    ($name:ident, $mask:ident, $len:literal; $($field:ident: $idx:literal),+) => {
        impl_vector_core!($name, $mask, i32, $len; $($field: $idx),+);
        impl_vector_ordered!($name, $mask, i32; $($field),+);
        impl_lane_op!($name, i32, Add, add, AddAssign, add_assign, i32::wrapping_add; $($field),+);
        impl_lane_op!($name, i32, Sub, sub, SubAssign, sub_assign, i32::wrapping_sub; $($field),+);
        impl_lane_op!($name, i32, Mul, mul, MulAssign, mul_assign, i32::wrapping_mul; $($field),+);
        impl_lane_op!($name, i32, Div, div, DivAssign, div_assign, i32::wrapping_div; $($field),+);
        impl_lane_op!($name, i32, Rem, rem, RemAssign, rem_assign, i32::wrapping_rem; $($field),+);
        impl_lane_op!($name, i32, BitAnd, bitand, BitAndAssign, bitand_assign, <i32 as BitAnd>::bitand; $($field),+);
        impl_lane_op!($name, i32, BitOr, bitor, BitOrAssign, bitor_assign, <i32 as BitOr>::bitor; $($field),+);
        impl_lane_op!($name, i32, BitXor, bitxor, BitXorAssign, bitxor_assign, <i32 as BitXor>::bitxor; $($field),+);

        impl $name {
            /// All components `0`.
            pub const ZERO: Self = Self::splat(0);
            /// All components `1`.
            pub const ONE: Self = Self::splat(1);
            /// All components `-1`.
            pub const NEG_ONE: Self = Self::splat(-1);

            /// Lane-wise wrapping absolute value (`i32::MIN` stays `i32::MIN`).
            #[inline]
            #[must_use]
            pub fn abs(self) -> Self {
                self.map(i32::wrapping_abs)
            }

            /// Wrapping sum of the components.
            #[inline]
            pub fn element_sum(self) -> i32 {
                self.to_array().into_iter().fold(0, i32::wrapping_add)
            }

            /// Wrapping dot product.
            #[inline]
            pub fn dot(self, rhs: Self) -> i32 {
                (self * rhs).element_sum()
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                self.map(i32::wrapping_neg)
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
            /// Arithmetic shift; amounts are taken modulo 32.
            #[inline]
            fn shr(self, rhs: u32) -> Self {
                self.map(|lane| lane.wrapping_shr(rhs))
            }
        }
    };
}

impl_int_vector!(IVec2, BVec2, 2; x: 0, y: 1);
impl_int_vector!(IVec3, BVec3, 3; x: 0, y: 1, z: 2);
impl_int_vector!(IVec4, BVec4, 4; x: 0, y: 1, z: 2, w: 3);

impl IVec2 {
    /// Widens with `z`.
    #[inline]
    pub const fn extend(self, z: i32) -> IVec3 {
        IVec3::new(self.x, self.y, z)
    }
}

impl IVec3 {
    /// Widens with `w`.
    #[inline]
    pub const fn extend(self, w: i32) -> IVec4 {
        IVec4::new(self.x, self.y, self.z, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_wraps() {
        let v = IVec2::new(i32::MAX, i32::MIN);
        assert_eq!(v + 1, IVec2::new(i32::MIN, i32::MIN + 1));
        assert_eq!(-v, IVec2::new(i32::MIN + 1, i32::MIN));
        assert_eq!(v.abs(), IVec2::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn shifts_are_arithmetic() {
        assert_eq!(IVec3::new(-8, 8, 1) >> 1, IVec3::new(-4, 4, 0));
        assert_eq!(IVec3::new(1, 2, 3) << 33, IVec3::new(2, 4, 6));
    }
}
