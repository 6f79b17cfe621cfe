// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boolean vectors: comparison results and `select` masks.

use core::ops::{BitAnd, BitOr, BitXor, Not};

use super::{impl_lane_op, impl_vector_core};

/// Two `bool` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct BVec2 {
    /// X component.
    pub x: bool,
    /// Y component.
    pub y: bool,
}

/// Three `bool` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct BVec3 {
    /// X component.
    pub x: bool,
    /// Y component.
    pub y: bool,
    /// Z component.
    pub z: bool,
}

/// Four `bool` components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct BVec4 {
    /// X component.
    pub x: bool,
    /// Y component.
    pub y: bool,
    /// Z component.
    pub z: bool,
    /// W component.
    pub w: bool,
}

macro_rules! impl_bool_vector {
    ($name:ident, $len:literal; $($field:ident: $idx:literal),+) => {
        impl_vector_core!($name, $name, bool, $len; $($field: $idx),+);
        impl_lane_op!($name, bool, BitAnd, bitand, BitAndAssign, bitand_assign, <bool as BitAnd>::bitand; $($field),+);
        impl_lane_op!($name, bool, BitOr, bitor, BitOrAssign, bitor_assign, <bool as BitOr>::bitor; $($field),+);
        impl_lane_op!($name, bool, BitXor, bitxor, BitXorAssign, bitxor_assign, <bool as BitXor>::bitxor; $($field),+);

        impl $name {
            /// Every lane `false`.
            pub const FALSE: Self = Self::splat(false);
            /// Every lane `true`.
            pub const TRUE: Self = Self::splat(true);

            /// `true` if any lane is set.
            #[inline]
            pub const fn any(self) -> bool {
                $(self.$field)||+
            }

            /// `true` if every lane is set.
            #[inline]
            pub const fn all(self) -> bool {
                $(self.$field)&&+
            }

            /// Lane-wise `==`.
            #[inline]
            pub fn cmp_eq(self, rhs: Self) -> Self {
                self.zip_mask(rhs, |a, b| a == b)
            }

            /// Lane-wise `!=`.
            #[inline]
            pub fn cmp_ne(self, rhs: Self) -> Self {
                self.zip_mask(rhs, |a, b| a != b)
            }

            /// Set lanes as a bitmask, lane `i` in bit `i`.
            #[inline]
            pub fn bitmask(self) -> u32 {
                self.to_array()
                    .into_iter()
                    .enumerate()
                    .fold(0, |acc, (i, lane)| acc | (u32::from(lane) << i))
            }
        }

        impl Not for $name {
            type Output = Self;
            #[inline]
            fn not(self) -> Self {
                self.map(|lane| !lane)
            }
        }
    };
}

impl_bool_vector!(BVec2, 2; x: 0, y: 1);
impl_bool_vector!(BVec3, 3; x: 0, y: 1, z: 2);
impl_bool_vector!(BVec4, 4; x: 0, y: 1, z: 2, w: 3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reductions_and_logic() {
        let a = BVec3::new(true, false, true);
        assert!(a.any());
        assert!(!a.all());
        assert!((a | !a).all());
        assert!(!(a & !a).any());
        assert_eq!(a.bitmask(), 0b101);
        assert_eq!(a ^ BVec3::TRUE, BVec3::new(false, true, false));
    }
}
