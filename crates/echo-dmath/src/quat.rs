// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rotation quaternions.

use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

use crate::bits::SIGN_BIT;
use crate::{DFloat, Mat3, Mat4, UVec4, Vec3, Vec4};

const CONJUGATE_MASK: UVec4 = UVec4::new(SIGN_BIT, SIGN_BIT, SIGN_BIT, 0);
const NEG_W_MASK: UVec4 = UVec4::new(0, 0, 0, SIGN_BIT);

/// Lanes of `b` where `mask` is all ones, of `a` where it is zero.
fn blend(a: Vec4, b: Vec4, mask: u32) -> Vec4 {
    let mask = UVec4::splat(mask);
    Vec4::from_bits((a.to_bits() & !mask) | (b.to_bits() & mask))
}

/// Quaternion stored as `(x, y, z, w)` with `w` the scalar part.
///
/// * Angles are radians.
/// * Unit length is expected but not enforced; only the constructors that
///   say so normalize.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Quat {
    /// `i` coefficient.
    pub x: DFloat,
    /// `j` coefficient.
    pub y: DFloat,
    /// `k` coefficient.
    pub z: DFloat,
    /// Scalar part.
    pub w: DFloat,
}

impl Quat {
    /// No rotation.
    pub const IDENTITY: Self = Self::new(DFloat::ZERO, DFloat::ZERO, DFloat::ZERO, DFloat::ONE);

    /// Creates a quaternion from components.
    #[inline]
    pub const fn new(x: DFloat, y: DFloat, z: DFloat, w: DFloat) -> Self {
        Self { x, y, z, w }
    }

    /// Same as [`Quat::new`].
    #[inline]
    pub const fn from_xyzw(x: DFloat, y: DFloat, z: DFloat, w: DFloat) -> Self {
        Self::new(x, y, z, w)
    }

    /// Components `(x, y, z, w)` taken from a vector.
    #[inline]
    pub const fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Components as a vector.
    #[inline]
    pub const fn to_vec4(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, self.w)
    }

    /// Components as an array.
    #[inline]
    pub const fn to_array(self) -> [DFloat; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Vector part `(x, y, z)`.
    #[inline]
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotation by `angle` radians about a unit `axis`.
    ///
    /// The axis is not normalized.
    pub fn from_axis_angle(axis: Vec3, angle: DFloat) -> Self {
        let (s, c) = (angle * DFloat::HALF).sin_cos();
        Self::from_vec4((axis * s).extend(c))
    }

    /// Rotation about +X by `angle` radians.
    pub fn from_rotation_x(angle: DFloat) -> Self {
        let (s, c) = (angle * DFloat::HALF).sin_cos();
        Self::new(s, DFloat::ZERO, DFloat::ZERO, c)
    }

    /// Rotation about +Y by `angle` radians.
    pub fn from_rotation_y(angle: DFloat) -> Self {
        let (s, c) = (angle * DFloat::HALF).sin_cos();
        Self::new(DFloat::ZERO, s, DFloat::ZERO, c)
    }

    /// Rotation about +Z by `angle` radians.
    pub fn from_rotation_z(angle: DFloat) -> Self {
        let (s, c) = (angle * DFloat::HALF).sin_cos();
        Self::new(DFloat::ZERO, DFloat::ZERO, s, c)
    }

    /// Unit quaternion of an orthonormal rotation matrix.
    ///
    /// Branchless: the sign of `m.c0.x` and of `t = m.c1.y ± m.c2.z` choose
    /// which of the four trace forms is numerically largest, expressed as
    /// sign-mask XORs and lane permutations rather than `if` chains.
    pub fn from_mat3(m: &Mat3) -> Self {
        let (u, v, w) = (m.c0, m.c1, m.c2);

        let u_sign = u.x.to_bits() & SIGN_BIT;
        let t = v.y + DFloat::from_bits(w.z.to_bits() ^ u_sign);
        let u_mask = ((u_sign as i32) >> 31) as u32;
        let t_mask = ((t.to_bits() as i32) >> 31) as u32;

        let tr = DFloat::ONE + u.x.abs();

        let flips = UVec4::new(0, SIGN_BIT, SIGN_BIT, SIGN_BIT)
            ^ (UVec4::splat(u_mask) & UVec4::new(0, SIGN_BIT, 0, SIGN_BIT))
            ^ (UVec4::splat(t_mask) & UVec4::new(SIGN_BIT, SIGN_BIT, SIGN_BIT, 0));

        let value = Vec4::new(tr, u.y, w.x, v.z) + Vec4::new(t, v.x, u.z, w.y).xor_sign(flips);
        let value = blend(value, Vec4::new(value.z, value.w, value.x, value.y), u_mask);
        let value = blend(Vec4::new(value.w, value.z, value.y, value.x), value, t_mask);
        Self::from_vec4(value.normalize())
    }

    /// Rotation part of an affine matrix; see [`Quat::from_mat3`].
    pub fn from_mat4(m: &Mat4) -> Self {
        Self::from_mat3(&Mat3::from_mat4(m))
    }

    /// See [`Mat3::look_rotation`]; same preconditions.
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Self {
        Self::from_mat3(&Mat3::look_rotation(forward, up))
    }

    /// See [`Mat3::look_rotation_safe`]; degenerate input gives
    /// [`Quat::IDENTITY`].
    pub fn look_rotation_safe(forward: Vec3, up: Vec3) -> Self {
        Self::from_mat3(&Mat3::look_rotation_safe(forward, up))
    }

    /// 4D dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> DFloat {
        self.to_vec4().dot(rhs.to_vec4())
    }

    /// `self · self`.
    #[inline]
    pub fn length_squared(self) -> DFloat {
        self.dot(self)
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(self) -> DFloat {
        self.length_squared().sqrt()
    }

    /// Scales to unit length; unchecked (zero input gives NaN).
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        Self::from_vec4(self.to_vec4().normalize())
    }

    /// [`Quat::normalize`], or [`Quat::IDENTITY`] when the squared length is
    /// not above [`DFloat::MIN_POSITIVE`] or is not finite.
    #[must_use]
    pub fn normalize_or_identity(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq.gt(DFloat::MIN_POSITIVE) && len_sq.is_finite() {
            Self::from_vec4(self.to_vec4() * len_sq.rsqrt())
        } else {
            Self::IDENTITY
        }
    }

    /// `(-x, -y, -z, w)`, sign flips only.
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::from_vec4(self.to_vec4().xor_sign(CONJUGATE_MASK))
    }

    /// `conjugate / |q|²`; zero input gives NaN/∞ components.
    #[inline]
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::from_vec4(self.conjugate().to_vec4() * self.length_squared().recip())
    }

    /// Hamilton product `self * rhs`: applies `rhs` first, then `self`.
    #[must_use]
    pub fn mul_quat(self, rhs: Self) -> Self {
        let (a, b) = (self.to_vec4(), rhs.to_vec4());
        let xyzx = Vec4::new(a.x, a.y, a.z, a.x) * Vec4::new(b.w, b.w, b.w, b.x);
        let yzxy = Vec4::new(a.y, a.z, a.x, a.y) * Vec4::new(b.z, b.x, b.y, b.y);
        let zxyz = Vec4::new(a.z, a.x, a.y, a.z) * Vec4::new(b.y, b.z, b.x, b.z);
        Self::from_vec4(a.w * b + (xyzx + yzxy).xor_sign(NEG_W_MASK) - zxyz)
    }

    /// Rotates `v` by this (unit) quaternion.
    pub fn mul_vec3(self, v: Vec3) -> Vec3 {
        let q = self.xyz();
        let t = DFloat::TWO * q.cross(v);
        v + self.w * t + q.cross(t)
    }

    /// Normalized linear interpolation along the shorter arc.
    #[must_use]
    pub fn nlerp(self, rhs: Self, t: DFloat) -> Self {
        let end = if self.dot(rhs).lt(DFloat::ZERO) {
            -rhs.to_vec4()
        } else {
            rhs.to_vec4()
        };
        Self::from_vec4(self.to_vec4().lerp(end, t).normalize())
    }

    /// Rotation matrix; see [`Mat3::from_quat`].
    #[inline]
    pub fn to_mat3(self) -> Mat3 {
        Mat3::from_quat(self)
    }
}

impl Default for Quat {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_quat(rhs)
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec3(rhs)
    }
}

impl From<Quat> for Vec4 {
    #[inline]
    fn from(q: Quat) -> Self {
        q.to_vec4()
    }
}

impl From<Vec4> for Quat {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::from_vec4(v)
    }
}
