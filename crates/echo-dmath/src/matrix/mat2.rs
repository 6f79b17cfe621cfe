// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use bytemuck::{Pod, Zeroable};

use super::impl_matrix_core;
use crate::{DFloat, Vec2};

/// Column-major 2×2 matrix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Mat2 {
    /// First column.
    pub c0: Vec2,
    /// Second column.
    pub c1: Vec2,
}

impl_matrix_core!(Mat2, Vec2, 2; c0(r0): 0 => X, c1(r1): 1 => Y);

impl Mat2 {
    /// Counter-clockwise rotation by `angle` radians.
    pub fn from_angle(angle: DFloat) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec2::new(c, s), Vec2::new(-s, c))
    }

    /// Diagonal scale.
    pub const fn from_scale(scale: Vec2) -> Self {
        Self::from_cols(
            Vec2::new(scale.x, DFloat::ZERO),
            Vec2::new(DFloat::ZERO, scale.y),
        )
    }

    /// `c0.x·c1.y - c1.x·c0.y`.
    pub fn determinant(&self) -> DFloat {
        self.c0.x * self.c1.y - self.c1.x * self.c0.y
    }

    /// Adjugate over determinant; singular input yields NaN/∞ entries.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_det = self.determinant().recip();
        Self::from_cols(
            Vec2::new(self.c1.y, -self.c0.y),
            Vec2::new(-self.c1.x, self.c0.x),
        )
        .mul_scalar(inv_det)
    }
}
