// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-size vectors over four element kinds.
//!
//! | family | element   | arithmetic                    |
//! |--------|-----------|-------------------------------|
//! | `Vec`  | [`DFloat`]| engine `+ - * / %`            |
//! | `IVec` | `i32`     | wrapping `+ - *`, bitwise     |
//! | `UVec` | `u32`     | wrapping `+ - *`, bitwise     |
//! | `BVec` | `bool`    | `& \| ^ !`                    |
//!
//! Every type is `#[repr(C)]` with its components in declared order and no
//! padding, so a vector can be viewed as `[T; N]` (numeric families derive
//! `bytemuck::Pod`). Componentwise plumbing (constructors, indexing,
//! operator fan-out) is generated by the macros below; anything with actual
//! numeric content lives in the per-family files.
//!
//! [`DFloat`]: crate::DFloat

mod boolean;
mod convert;
mod float;
mod int;
mod uint;

pub use boolean::{BVec2, BVec3, BVec4};
pub use float::{Vec2, Vec3, Vec4};
pub use int::{IVec2, IVec3, IVec4};
pub use uint::{UVec2, UVec3, UVec4};

// Constructors, array views, indexing, and lane-wise helpers shared by every
// family. `$mask` is the boolean family of the same width.
macro_rules! impl_vector_core {
    ($name:ident, $mask:ident, $elem:ty, $len:literal; $($field:ident: $idx:literal),+) => {
        impl $name {
            /// Creates a vector from components.
            #[inline]
            pub const fn new($($field: $elem),+) -> Self {
                Self { $($field),+ }
            }

            /// Creates a vector with every component set to `value`.
            #[inline]
            pub const fn splat(value: $elem) -> Self {
                Self { $($field: value),+ }
            }

            /// Builds a vector from components in declared order.
            #[inline]
            pub const fn from_array(array: [$elem; $len]) -> Self {
                let [$($field),+] = array;
                Self { $($field),+ }
            }

            /// Components in declared order.
            #[inline]
            pub const fn to_array(self) -> [$elem; $len] {
                [$(self.$field),+]
            }

            /// Component `index`, or [`MathError::ComponentIndex`] when out of range.
            ///
            /// [`MathError::ComponentIndex`]: crate::MathError::ComponentIndex
            #[inline]
            pub const fn get(self, index: usize) -> Result<$elem, $crate::MathError> {
                match index {
                    $($idx => Ok(self.$field),)+
                    _ => Err($crate::MathError::ComponentIndex { index, len: $len }),
                }
            }

            /// Applies `f` to every component.
            #[inline]
            pub fn map(self, mut f: impl FnMut($elem) -> $elem) -> Self {
                Self { $($field: f(self.$field)),+ }
            }

            /// Applies `f` lane by lane to `self` and `rhs`.
            #[inline]
            pub fn zip_map(self, rhs: Self, mut f: impl FnMut($elem, $elem) -> $elem) -> Self {
                Self { $($field: f(self.$field, rhs.$field)),+ }
            }

            /// Lane-wise predicate over `self` and `rhs`.
            #[inline]
            pub fn zip_mask(self, rhs: Self, mut f: impl FnMut($elem, $elem) -> bool) -> $crate::vector::$mask {
                $crate::vector::$mask { $($field: f(self.$field, rhs.$field)),+ }
            }

            /// Per lane: `b` where `mask` is set, otherwise `a`.
            #[inline]
            pub const fn select(a: Self, b: Self, mask: $crate::vector::$mask) -> Self {
                Self { $($field: if mask.$field { b.$field } else { a.$field }),+ }
            }
        }

        impl From<[$elem; $len]> for $name {
            #[inline]
            fn from(array: [$elem; $len]) -> Self {
                Self::from_array(array)
            }
        }

        impl From<$name> for [$elem; $len] {
            #[inline]
            fn from(value: $name) -> Self {
                value.to_array()
            }
        }

        impl core::ops::Index<usize> for $name {
            type Output = $elem;
            #[inline]
            fn index(&self, index: usize) -> &$elem {
                match index {
                    $($idx => &self.$field,)+
                    _ => $crate::error::component_out_of_range(index, $len),
                }
            }
        }

        impl core::ops::IndexMut<usize> for $name {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut $elem {
                match index {
                    $($idx => &mut self.$field,)+
                    _ => $crate::error::component_out_of_range(index, $len),
                }
            }
        }
    };
}

// Relational comparisons and lane-wise min/max/clamp for ordered elements.
macro_rules! impl_vector_ordered {
    ($name:ident, $mask:ident, $elem:ty; $($field:ident),+) => {
        impl $name {
            /// Lane-wise `==`.
            #[inline]
            pub fn cmp_eq(self, rhs: Self) -> $crate::vector::$mask {
                self.zip_mask(rhs, |a, b| a == b)
            }

            /// Lane-wise `!=`.
            #[inline]
            pub fn cmp_ne(self, rhs: Self) -> $crate::vector::$mask {
                self.zip_mask(rhs, |a, b| a != b)
            }

            /// Lane-wise `<`.
            #[inline]
            pub fn cmp_lt(self, rhs: Self) -> $crate::vector::$mask {
                self.zip_mask(rhs, |a, b| a < b)
            }

            /// Lane-wise `<=`.
            #[inline]
            pub fn cmp_le(self, rhs: Self) -> $crate::vector::$mask {
                self.zip_mask(rhs, |a, b| a <= b)
            }

            /// Lane-wise `>`.
            #[inline]
            pub fn cmp_gt(self, rhs: Self) -> $crate::vector::$mask {
                self.zip_mask(rhs, |a, b| a > b)
            }

            /// Lane-wise `>=`.
            #[inline]
            pub fn cmp_ge(self, rhs: Self) -> $crate::vector::$mask {
                self.zip_mask(rhs, |a, b| a >= b)
            }

            /// Lane-wise minimum.
            #[inline]
            #[must_use]
            pub fn min(self, rhs: Self) -> Self {
                Self { $($field: <$elem>::min(self.$field, rhs.$field)),+ }
            }

            /// Lane-wise maximum.
            #[inline]
            #[must_use]
            pub fn max(self, rhs: Self) -> Self {
                Self { $($field: <$elem>::max(self.$field, rhs.$field)),+ }
            }

            /// `self.max(lo).min(hi)` per lane; never panics on inverted bounds.
            #[inline]
            #[must_use]
            pub fn clamp(self, lo: Self, hi: Self) -> Self {
                self.max(lo).min(hi)
            }

            /// Smallest component.
            #[inline]
            pub fn min_element(self) -> $elem {
                let [first, rest @ ..] = self.to_array();
                rest.into_iter().fold(first, <$elem>::min)
            }

            /// Largest component.
            #[inline]
            pub fn max_element(self) -> $elem {
                let [first, rest @ ..] = self.to_array();
                rest.into_iter().fold(first, <$elem>::max)
            }
        }
    };
}

// `vector ⊕ vector`, `vector ⊕ element`, `element ⊕ vector`, and the
// assigning forms, all lane-wise through `$lane`.
macro_rules! impl_lane_op {
    ($name:ident, $elem:ty, $Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $lane:expr; $($field:ident),+) => {
        impl core::ops::$Op for $name {
            type Output = Self;
            #[inline]
            fn $op(self, rhs: Self) -> Self {
                Self { $($field: $lane(self.$field, rhs.$field)),+ }
            }
        }

        impl core::ops::$Op<$elem> for $name {
            type Output = Self;
            #[inline]
            fn $op(self, rhs: $elem) -> Self {
                Self { $($field: $lane(self.$field, rhs)),+ }
            }
        }

        impl core::ops::$Op<$name> for $elem {
            type Output = $name;
            #[inline]
            fn $op(self, rhs: $name) -> $name {
                $name { $($field: $lane(self, rhs.$field)),+ }
            }
        }

        impl core::ops::$OpAssign for $name {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = core::ops::$Op::$op(*self, rhs);
            }
        }

        impl core::ops::$OpAssign<$elem> for $name {
            #[inline]
            fn $op_assign(&mut self, rhs: $elem) {
                *self = core::ops::$Op::$op(*self, rhs);
            }
        }
    };
}

pub(crate) use impl_lane_op;
pub(crate) use impl_vector_core;
pub(crate) use impl_vector_ordered;
