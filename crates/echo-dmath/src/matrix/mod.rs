// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Column-major square matrices.
//!
//! A matrix is an ordered tuple of column vectors `c0..cN`; `M * v` is
//! `c0·v.x + c1·v.y + …`, accumulated left to right. `from_rows` takes
//! arguments in reading order, which is how the closed-form constructors
//! (Euler, projection) are written.
//!
//! Nothing here checks for singular or degenerate input: `inverse` of a
//! singular matrix yields NaN/∞ entries rather than an error, and the
//! projection constructors assume nonzero extents.

mod mat2;
mod mat3;
mod mat4;
pub mod projection;

pub use mat2::Mat2;
pub use mat3::Mat3;
pub use mat4::Mat4;

// Column access, transposition, `M * v`, `M * M`, `M ± M`, scaling, and
// column indexing.
macro_rules! impl_matrix_core {
    ($name:ident, $col:ident, $len:literal; $($c:ident($r:ident): $idx:literal => $axis:ident),+) => {
        impl $name {
            /// All entries `+0`.
            pub const ZERO: Self = Self { $($c: $col::ZERO),+ };
            /// Multiplicative identity.
            pub const IDENTITY: Self = Self { $($c: $col::$axis),+ };
            /// All entries NaN.
            pub const NAN: Self = Self { $($c: $col::NAN),+ };

            /// Builds a matrix from its columns.
            #[inline]
            pub const fn from_cols($($c: $col),+) -> Self {
                Self { $($c),+ }
            }

            /// Builds a matrix from its rows (reading order).
            #[inline]
            pub fn from_rows($($r: $col),+) -> Self {
                Self { $($c: $r),+ }.transpose()
            }

            /// Column `index`; panics when out of range.
            #[inline]
            #[track_caller]
            pub fn col(&self, index: usize) -> $col {
                self[index]
            }

            /// Column `index`, or [`MathError::ComponentIndex`] when out of range.
            ///
            /// [`MathError::ComponentIndex`]: crate::MathError::ComponentIndex
            #[inline]
            pub const fn get_col(&self, index: usize) -> Result<$col, $crate::MathError> {
                match index {
                    $($idx => Ok(self.$c),)+
                    _ => Err($crate::MathError::ComponentIndex { index, len: $len }),
                }
            }

            /// Row `index`; panics when out of range.
            #[inline]
            #[track_caller]
            pub fn row(&self, index: usize) -> $col {
                $col::new($(self.$c[index]),+)
            }

            /// Swaps rows and columns.
            #[inline]
            #[must_use]
            pub fn transpose(&self) -> Self {
                Self { $($c: self.row($idx)),+ }
            }

            /// `self * v`.
            #[inline]
            pub fn mul_vec(&self, v: $col) -> $col {
                let lanes = v.to_array();
                let mut acc = self.c0 * lanes[0];
                for (col, lane) in [$(self.$c),+].into_iter().zip(lanes).skip(1) {
                    acc += col * lane;
                }
                acc
            }

            /// `self * rhs` (apply `rhs` first).
            #[inline]
            #[must_use]
            pub fn mul_mat(&self, rhs: &Self) -> Self {
                Self { $($c: self.mul_vec(rhs.$c)),+ }
            }

            /// Multiplies every entry by `s`.
            #[inline]
            #[must_use]
            pub fn mul_scalar(&self, s: $crate::DFloat) -> Self {
                Self { $($c: self.$c * s),+ }
            }

            /// `true` when every entry is finite.
            #[inline]
            pub fn is_finite(&self) -> bool {
                self.to_cols_array().into_iter().all($col::is_finite)
            }

            /// Columns in order.
            #[inline]
            pub const fn to_cols_array(&self) -> [$col; $len] {
                [$(self.$c),+]
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl core::ops::Mul for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.mul_mat(&rhs)
            }
        }

        impl core::ops::Mul<$col> for $name {
            type Output = $col;
            #[inline]
            fn mul(self, rhs: $col) -> $col {
                self.mul_vec(rhs)
            }
        }

        impl core::ops::Mul<$crate::DFloat> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: $crate::DFloat) -> Self {
                self.mul_scalar(rhs)
            }
        }

        impl core::ops::Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($c: self.$c + rhs.$c),+ }
            }
        }

        impl core::ops::Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($c: self.$c - rhs.$c),+ }
            }
        }

        impl core::ops::Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($c: -self.$c),+ }
            }
        }

        impl core::ops::Index<usize> for $name {
            type Output = $col;
            #[inline]
            fn index(&self, index: usize) -> &$col {
                match index {
                    $($idx => &self.$c,)+
                    _ => $crate::error::component_out_of_range(index, $len),
                }
            }
        }

        impl core::ops::IndexMut<usize> for $name {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut $col {
                match index {
                    $($idx => &mut self.$c,)+
                    _ => $crate::error::component_out_of_range(index, $len),
                }
            }
        }
    };
}

pub(crate) use impl_matrix_core;
