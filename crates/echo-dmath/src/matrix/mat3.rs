// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! 3×3 matrices and the rotation-basis algorithms.
//!
//! The quaternion and axis-angle constructors share one shape: compute the
//! doubled (or `1 - cos`) products once, then assemble each column from a
//! permutation of those products with selected signs flipped by XOR
//! ([`Vec3::xor_sign`]). Sign flips never go through a multiply, so the two
//! paths round identically on every platform.
//!
//! The degenerate-safe constructors ([`Mat3::look_rotation_safe`],
//! [`Mat3::orthonormalize`]) fall back column by column: each output column
//! independently selects between its computed value and the matching identity
//! column, driven by a single accept flag.

use bytemuck::{Pod, Zeroable};

use super::impl_matrix_core;
use crate::bits::{NNP, NPN, NPP, PNN, PNP, PPN};
use crate::{BVec3, DFloat, Mat4, Quat, Vec3};

/// Smallest squared length accepted by [`Mat3::look_rotation_safe`] (`1e-35`).
const LOOK_MIN_LENGTH_SQ: DFloat = DFloat::from_bits(0x0554_AD2E);
/// Largest squared length accepted by [`Mat3::look_rotation_safe`] (`1e35`).
const LOOK_MAX_LENGTH_SQ: DFloat = DFloat::from_bits(0x799A_130C);
/// Shortest column accepted by [`Mat3::orthonormalize`] (`1e-30`).
const ORTHONORMAL_MIN_LENGTH: DFloat = DFloat::from_bits(0x0DA2_4260);

/// Column-major 3×3 matrix.
///
/// Rotation matrices are built from the column basis `(right, up, forward)`;
/// [`Mat3::mul_vec`] maps local coordinates into that basis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Mat3 {
    /// First column.
    pub c0: Vec3,
    /// Second column.
    pub c1: Vec3,
    /// Third column.
    pub c2: Vec3,
}

impl_matrix_core!(Mat3, Vec3, 3; c0(r0): 0 => X, c1(r1): 1 => Y, c2(r2): 2 => Z);

impl Mat3 {
    /// Diagonal scale.
    pub const fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec3::new(scale.x, DFloat::ZERO, DFloat::ZERO),
            Vec3::new(DFloat::ZERO, scale.y, DFloat::ZERO),
            Vec3::new(DFloat::ZERO, DFloat::ZERO, scale.z),
        )
    }

    /// Upper-left 3×3 block.
    pub const fn from_mat4(m: &Mat4) -> Self {
        Self::from_cols(m.c0.xyz(), m.c1.xyz(), m.c2.xyz())
    }

    /// Rotation matrix of a (unit) quaternion.
    ///
    /// With `v = (x, y, z, w)` and `v2 = v + v`:
    ///
    /// ```text
    /// c0 = (y, x, w)⊕NPN · v2.y − (z, w, x)⊕PNN · v2.z + X
    /// c1 = (w, z, y)⊕NNP · v2.z − (y, x, w)⊕NPN · v2.x + Y
    /// c2 = (z, w, x)⊕PNN · v2.x − (w, z, y)⊕NNP · v2.y + Z
    /// ```
    ///
    /// where `⊕M` flips the signs selected by mask `M`. A non-unit quaternion
    /// yields a scaled, non-orthogonal matrix; nothing is normalized here.
    pub fn from_quat(q: Quat) -> Self {
        let v = q.to_vec4();
        let v2 = v + v;

        let yxw = Vec3::new(v.y, v.x, v.w).xor_sign(NPN);
        let zwx = Vec3::new(v.z, v.w, v.x).xor_sign(PNN);
        let wzy = Vec3::new(v.w, v.z, v.y).xor_sign(NNP);

        Self::from_cols(
            yxw * v2.y - zwx * v2.z + Vec3::X,
            wzy * v2.z - yxw * v2.x + Vec3::Y,
            zwx * v2.x - wzy * v2.y + Vec3::Z,
        )
    }

    /// Rotation by `angle` radians about a unit `axis` (Rodrigues).
    ///
    /// The axis is not normalized; a non-unit axis gives a non-orthogonal
    /// result.
    pub fn from_axis_angle(axis: Vec3, angle: DFloat) -> Self {
        let (s, c) = angle.sin_cos();
        let u = axis;
        let uic = u - u * c;
        let t = (u * s).extend(c);

        Self::from_cols(
            uic * u.x + Vec3::new(t.w, t.z, t.y).xor_sign(PPN),
            uic * u.y + Vec3::new(t.z, t.w, t.x).xor_sign(NPP),
            uic * u.z + Vec3::new(t.y, t.x, t.w).xor_sign(PNP),
        )
    }

    /// Rotation about +X by `angle` radians.
    pub fn from_rotation_x(angle: DFloat) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::X,
            Vec3::new(DFloat::ZERO, c, s),
            Vec3::new(DFloat::ZERO, -s, c),
        )
    }

    /// Rotation about +Y by `angle` radians.
    pub fn from_rotation_y(angle: DFloat) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(c, DFloat::ZERO, -s),
            Vec3::Y,
            Vec3::new(s, DFloat::ZERO, c),
        )
    }

    /// Rotation about +Z by `angle` radians.
    pub fn from_rotation_z(angle: DFloat) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(c, s, DFloat::ZERO),
            Vec3::new(-s, c, DFloat::ZERO),
            Vec3::Z,
        )
    }

    /// Basis whose third column is `forward` and whose second column lies in
    /// the plane of `forward` and `up`.
    ///
    /// Both inputs must be unit length and not parallel; otherwise the result
    /// contains NaN. See [`Mat3::look_rotation_safe`] for arbitrary input.
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Self {
        let t = up.cross(forward).normalize();
        Self::from_cols(t, forward.cross(t), forward)
    }

    /// [`Mat3::look_rotation`] for arbitrary (non-unit, possibly degenerate)
    /// input.
    ///
    /// Both vectors are normalized, then the squared lengths of `forward`,
    /// `up`, and `up × forward` must all be finite and inside
    /// `(1e-35, 1e35)`. When they are not, every column is replaced by the
    /// identity column, so the result is always orthonormal and never NaN.
    pub fn look_rotation_safe(forward: Vec3, up: Vec3) -> Self {
        let forward_len_sq = forward.length_squared();
        let up_len_sq = up.length_squared();
        let forward = forward * forward_len_sq.rsqrt();
        let up = up * up_len_sq.rsqrt();

        let t = up.cross(forward);
        let t_len_sq = t.length_squared();
        let t = t * t_len_sq.rsqrt();

        let lo = forward_len_sq.min(up_len_sq).min(t_len_sq);
        let hi = forward_len_sq.max(up_len_sq).max(t_len_sq);
        let accept = lo.gt(LOOK_MIN_LENGTH_SQ)
            && hi.lt(LOOK_MAX_LENGTH_SQ)
            && forward_len_sq.is_finite()
            && up_len_sq.is_finite()
            && t_len_sq.is_finite();
        let mask = BVec3::splat(accept);

        Self::from_cols(
            Vec3::select(Vec3::X, t, mask),
            Vec3::select(Vec3::Y, forward.cross(t), mask),
            Vec3::select(Vec3::Z, forward, mask),
        )
    }

    /// Gram-Schmidt on the first two columns; the third is their cross
    /// product. The input's third column is ignored.
    ///
    /// When either intermediate length is not above `1e-30` (or is NaN), the
    /// first two columns fall back to `X`/`Y` and the result is the identity.
    #[must_use]
    pub fn orthonormalize(&self) -> Self {
        let u_len = self.c0.length();
        let u = self.c0 / u_len;
        let v = self.c1 - u * self.c1.dot(u);
        let v_len = v.length();
        let accept = u_len.gt(ORTHONORMAL_MIN_LENGTH) && v_len.gt(ORTHONORMAL_MIN_LENGTH);
        let mask = BVec3::splat(accept);

        let c0 = Vec3::select(Vec3::X, u, mask);
        let c1 = Vec3::select(Vec3::Y, v / v_len, mask);
        Self::from_cols(c0, c1, c0.cross(c1))
    }

    /// `c0 · (c1 × c2)`.
    pub fn determinant(&self) -> DFloat {
        self.c0.dot(self.c1.cross(self.c2))
    }

    /// Cofactor inverse; singular input yields NaN/∞ entries.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let tmp0 = self.c1.cross(self.c2);
        let tmp1 = self.c2.cross(self.c0);
        let tmp2 = self.c0.cross(self.c1);
        let inv_det = self.c2.dot(tmp2).recip();
        Self::from_cols(tmp0 * inv_det, tmp1 * inv_det, tmp2 * inv_det).transpose()
    }
}
