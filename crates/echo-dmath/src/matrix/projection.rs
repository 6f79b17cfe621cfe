// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Projection matrices (right-handed view space looking down −Z, OpenGL
//! clip space: `x, y, z ∈ [−1, 1]`).
//!
//! All four are closed forms with no branches. Extents (`width`, `height`,
//! `right − left`, `top − bottom`, `far − near`) and `tan(fov / 2)` must be
//! nonzero; a zero divisor is not checked and produces ∞/NaN entries.

use crate::{DFloat, Mat4, Vec4};

const Z: DFloat = DFloat::ZERO;

impl Mat4 {
    /// Centered orthographic projection of a `width × height` box between
    /// `near` and `far`.
    ///
    /// View-space `z = −near` maps to clip `−1`, `z = −far` to `+1`.
    pub fn orthographic(width: DFloat, height: DFloat, near: DFloat, far: DFloat) -> Self {
        let rcp_dx = width.recip();
        let rcp_dy = height.recip();
        let rcp_dz = (far - near).recip();
        Self::from_rows(
            Vec4::new(DFloat::TWO * rcp_dx, Z, Z, Z),
            Vec4::new(Z, DFloat::TWO * rcp_dy, Z, Z),
            Vec4::new(Z, Z, -DFloat::TWO * rcp_dz, -(far + near) * rcp_dz),
            Vec4::W,
        )
    }

    /// Orthographic projection of an arbitrary box.
    pub fn orthographic_off_center(
        left: DFloat,
        right: DFloat,
        bottom: DFloat,
        top: DFloat,
        near: DFloat,
        far: DFloat,
    ) -> Self {
        let rcp_dx = (right - left).recip();
        let rcp_dy = (top - bottom).recip();
        let rcp_dz = (far - near).recip();
        Self::from_rows(
            Vec4::new(DFloat::TWO * rcp_dx, Z, Z, -(right + left) * rcp_dx),
            Vec4::new(Z, DFloat::TWO * rcp_dy, Z, -(top + bottom) * rcp_dy),
            Vec4::new(Z, Z, -DFloat::TWO * rcp_dz, -(far + near) * rcp_dz),
            Vec4::W,
        )
    }

    /// Symmetric perspective projection.
    ///
    /// `vertical_fov` is the full vertical field of view in radians;
    /// `aspect` is width over height.
    pub fn perspective_fov(vertical_fov: DFloat, aspect: DFloat, near: DFloat, far: DFloat) -> Self {
        let cot = (vertical_fov * DFloat::HALF).tan().recip();
        let rcp_dz = (near - far).recip();
        Self::from_rows(
            Vec4::new(cot / aspect, Z, Z, Z),
            Vec4::new(Z, cot, Z, Z),
            Vec4::new(Z, Z, (far + near) * rcp_dz, DFloat::TWO * near * far * rcp_dz),
            Vec4::new(Z, Z, DFloat::NEG_ONE, Z),
        )
    }

    /// Perspective projection of an asymmetric frustum whose near-plane
    /// rectangle is `[left, right] × [bottom, top]`.
    pub fn perspective_off_center(
        left: DFloat,
        right: DFloat,
        bottom: DFloat,
        top: DFloat,
        near: DFloat,
        far: DFloat,
    ) -> Self {
        let rcp_dz = (near - far).recip();
        let rcp_width = (right - left).recip();
        let rcp_height = (top - bottom).recip();
        Self::from_rows(
            Vec4::new(DFloat::TWO * near * rcp_width, Z, (left + right) * rcp_width, Z),
            Vec4::new(Z, DFloat::TWO * near * rcp_height, (bottom + top) * rcp_height, Z),
            Vec4::new(Z, Z, (far + near) * rcp_dz, DFloat::TWO * near * far * rcp_dz),
            Vec4::new(Z, Z, DFloat::NEG_ONE, Z),
        )
    }
}
