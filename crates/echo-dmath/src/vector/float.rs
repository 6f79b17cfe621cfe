// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vectors of [`DFloat`].
//!
//! All arithmetic goes through the scalar engine. Reductions (`dot`,
//! `element_sum`) accumulate strictly left to right in declared component
//! order; reordering them would change rounding and therefore the bits.

use core::ops::{Add, Div, Mul, Neg, Rem, Sub};

use bytemuck::{Pod, Zeroable};

use super::{impl_lane_op, impl_vector_core, impl_vector_ordered};
use super::{UVec2, UVec3, UVec4};
use crate::DFloat;

/// Two [`DFloat`] components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec2 {
    /// X component.
    pub x: DFloat,
    /// Y component.
    pub y: DFloat,
}

/// Three [`DFloat`] components.
///
/// Used for points and directions alike; see [`crate::Mat4::transform_point`]
/// (`w = 1`) and [`crate::Mat4::transform_direction`] (`w = 0`).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3 {
    /// X component.
    pub x: DFloat,
    /// Y component.
    pub y: DFloat,
    /// Z component.
    pub z: DFloat,
}

/// Four [`DFloat`] components.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec4 {
    /// X component.
    pub x: DFloat,
    /// Y component.
    pub y: DFloat,
    /// Z component.
    pub z: DFloat,
    /// W component.
    pub w: DFloat,
}

macro_rules! impl_float_vector {
    ($name:ident, $mask:ident, $bits:ident, $len:literal; $($field:ident: $idx:literal),+) => {
        impl_vector_core!($name, $mask, DFloat, $len; $($field: $idx),+);
        impl_vector_ordered!($name, $mask, DFloat; $($field),+);
        impl_lane_op!($name, DFloat, Add, add, AddAssign, add_assign, <DFloat as Add>::add; $($field),+);
        impl_lane_op!($name, DFloat, Sub, sub, SubAssign, sub_assign, <DFloat as Sub>::sub; $($field),+);
        impl_lane_op!($name, DFloat, Mul, mul, MulAssign, mul_assign, <DFloat as Mul>::mul; $($field),+);
        impl_lane_op!($name, DFloat, Div, div, DivAssign, div_assign, <DFloat as Div>::div; $($field),+);
        impl_lane_op!($name, DFloat, Rem, rem, RemAssign, rem_assign, <DFloat as Rem>::rem; $($field),+);

        impl $name {
            /// All components `+0`.
            pub const ZERO: Self = Self::splat(DFloat::ZERO);
            /// All components `1`.
            pub const ONE: Self = Self::splat(DFloat::ONE);
            /// All components NaN.
            pub const NAN: Self = Self::splat(DFloat::NAN);

            /// Dot product, accumulated in component order.
            #[inline]
            pub fn dot(self, rhs: Self) -> DFloat {
                let mut lanes = (self * rhs).to_array().into_iter();
                let first = lanes.next().unwrap_or(DFloat::ZERO);
                lanes.fold(first, |acc, lane| acc + lane)
            }

            /// Sum of the components in order.
            #[inline]
            pub fn element_sum(self) -> DFloat {
                self.dot(Self::ONE)
            }

            /// `self · self`.
            #[inline]
            pub fn length_squared(self) -> DFloat {
                self.dot(self)
            }

            /// Euclidean length.
            #[inline]
            pub fn length(self) -> DFloat {
                self.length_squared().sqrt()
            }

            /// `1 / length`.
            #[inline]
            pub fn length_recip(self) -> DFloat {
                self.length_squared().rsqrt()
            }

            /// Distance between two points.
            #[inline]
            pub fn distance(self, rhs: Self) -> DFloat {
                (self - rhs).length()
            }

            /// `self / length`. Unchecked: zero or non-finite input gives
            /// NaN/∞ lanes.
            #[inline]
            #[must_use]
            pub fn normalize(self) -> Self {
                self * self.length_recip()
            }

            /// [`Self::normalize`], or [`Self::ZERO`] when the reciprocal
            /// length is not finite and positive.
            #[inline]
            #[must_use]
            pub fn normalize_or_zero(self) -> Self {
                let recip = self.length_recip();
                if recip.is_finite() && recip.gt(DFloat::ZERO) {
                    self * recip
                } else {
                    Self::ZERO
                }
            }

            /// `self + (rhs - self) * t`.
            #[inline]
            #[must_use]
            pub fn lerp(self, rhs: Self, t: DFloat) -> Self {
                self + (rhs - self) * t
            }

            /// Lane-wise absolute value (sign bit cleared).
            #[inline]
            #[must_use]
            pub fn abs(self) -> Self {
                self.map(DFloat::abs)
            }

            /// Lane-wise `±1` by sign.
            #[inline]
            #[must_use]
            pub fn signum(self) -> Self {
                self.map(DFloat::signum)
            }

            /// `true` when every component is finite.
            #[inline]
            pub fn is_finite(self) -> bool {
                self.to_array().into_iter().all(DFloat::is_finite)
            }

            /// `true` when any component is NaN.
            #[inline]
            pub fn is_nan(self) -> bool {
                self.to_array().into_iter().any(DFloat::is_nan)
            }

            /// Raw component encodings (bit pun, no conversion).
            #[inline]
            pub fn to_bits(self) -> $bits {
                bytemuck::cast(self)
            }

            /// Reinterprets raw encodings as components.
            #[inline]
            pub fn from_bits(bits: $bits) -> Self {
                bytemuck::cast(bits)
            }

            /// XORs `mask` into each component's encoding; with sign-bit lanes
            /// this flips the selected signs exactly.
            #[inline]
            #[must_use]
            pub fn xor_sign(self, mask: $bits) -> Self {
                Self::from_bits(self.to_bits() ^ mask)
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                self.map(Neg::neg)
            }
        }
    };
}

impl_float_vector!(Vec2, BVec2, UVec2, 2; x: 0, y: 1);
impl_float_vector!(Vec3, BVec3, UVec3, 3; x: 0, y: 1, z: 2);
impl_float_vector!(Vec4, BVec4, UVec4, 4; x: 0, y: 1, z: 2, w: 3);

impl Vec2 {
    /// `+X`.
    pub const X: Self = Self::new(DFloat::ONE, DFloat::ZERO);
    /// `+Y`.
    pub const Y: Self = Self::new(DFloat::ZERO, DFloat::ONE);

    /// Widens with `z`.
    #[inline]
    pub const fn extend(self, z: DFloat) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }

    /// 2D cross product (`z` of the 3D cross product).
    #[inline]
    pub fn perp_dot(self, rhs: Self) -> DFloat {
        self.x * rhs.y - self.y * rhs.x
    }
}

impl Vec3 {
    /// `+X`.
    pub const X: Self = Self::new(DFloat::ONE, DFloat::ZERO, DFloat::ZERO);
    /// `+Y`.
    pub const Y: Self = Self::new(DFloat::ZERO, DFloat::ONE, DFloat::ZERO);
    /// `+Z`.
    pub const Z: Self = Self::new(DFloat::ZERO, DFloat::ZERO, DFloat::ONE);

    /// Right-handed cross product.
    #[inline]
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Widens with `w`.
    #[inline]
    pub const fn extend(self, w: DFloat) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Drops `z`.
    #[inline]
    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Vec4 {
    /// `+X`.
    pub const X: Self = Self::new(DFloat::ONE, DFloat::ZERO, DFloat::ZERO, DFloat::ZERO);
    /// `+Y`.
    pub const Y: Self = Self::new(DFloat::ZERO, DFloat::ONE, DFloat::ZERO, DFloat::ZERO);
    /// `+Z`.
    pub const Z: Self = Self::new(DFloat::ZERO, DFloat::ZERO, DFloat::ONE, DFloat::ZERO);
    /// `+W`.
    pub const W: Self = Self::new(DFloat::ZERO, DFloat::ZERO, DFloat::ZERO, DFloat::ONE);

    /// Drops `w`.
    #[inline]
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Drops `z` and `w`.
    #[inline]
    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
