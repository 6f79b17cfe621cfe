// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Euler-angle rotations.
//!
//! An order names the axes in the sequence they are *applied*: `XYZ` rotates
//! about X first, then Y, then Z, so the composed matrix is `Rz · Ry · Rx`.
//! Angles are always passed as `(x, y, z)` regardless of order.
//!
//! Each order has its own hand-expanded closed form; nothing here multiplies
//! three single-axis matrices at call time, which would add rounding steps.
//! The closed forms agree with the composed products within a few ulps, not
//! bit for bit.

use crate::bits::SIGN_BIT;
use crate::{DFloat, Mat3, Mat4, MathError, Quat, UVec4, Vec3, Vec4};

/// Order in which the three axis rotations are applied.
///
/// Closed: every value names one of the six Tait-Bryan sequences, so there is
/// no "unknown order" case to fall back from. Raw discriminants are checked
/// once, at the [`TryFrom<u8>`] boundary.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum RotationOrder {
    /// X, then Y, then Z (`Rz · Ry · Rx`).
    XYZ = 0,
    /// X, then Z, then Y (`Ry · Rz · Rx`).
    XZY = 1,
    /// Y, then X, then Z (`Rz · Rx · Ry`).
    YXZ = 2,
    /// Y, then Z, then X (`Rx · Rz · Ry`).
    YZX = 3,
    /// Z, then X, then Y (`Ry · Rx · Rz`); the engine's canonical order.
    #[default]
    ZXY = 4,
    /// Z, then Y, then X (`Rx · Ry · Rz`).
    ZYX = 5,
}

impl RotationOrder {
    /// Every order, in discriminant order.
    pub const ALL: [Self; 6] = [Self::XYZ, Self::XZY, Self::YXZ, Self::YZX, Self::ZXY, Self::ZYX];

    /// Raw discriminant.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for RotationOrder {
    type Error = MathError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::XYZ),
            1 => Ok(Self::XZY),
            2 => Ok(Self::YXZ),
            3 => Ok(Self::YZX),
            4 => Ok(Self::ZXY),
            5 => Ok(Self::ZYX),
            other => Err(MathError::UnknownRotationOrder(other)),
        }
    }
}

impl From<RotationOrder> for u8 {
    #[inline]
    fn from(order: RotationOrder) -> Self {
        order.to_u8()
    }
}

/// Per-angle sines and cosines.
struct SinCos3 {
    sx: DFloat,
    cx: DFloat,
    sy: DFloat,
    cy: DFloat,
    sz: DFloat,
    cz: DFloat,
}

impl SinCos3 {
    fn new(angles: Vec3) -> Self {
        let (sx, cx) = angles.x.sin_cos();
        let (sy, cy) = angles.y.sin_cos();
        let (sz, cz) = angles.z.sin_cos();
        Self { sx, cx, sy, cy, sz, cz }
    }
}

impl Mat3 {
    /// X, then Y, then Z.
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        let SinCos3 { sx, cx, sy, cy, sz, cz } = SinCos3::new(angles);
        Self::from_rows(
            Vec3::new(cy * cz, cz * sx * sy - cx * sz, cx * cz * sy + sx * sz),
            Vec3::new(cy * sz, cx * cz + sx * sy * sz, cx * sy * sz - cz * sx),
            Vec3::new(-sy, cy * sx, cx * cy),
        )
    }

    /// X, then Z, then Y.
    pub fn from_euler_xzy(angles: Vec3) -> Self {
        let SinCos3 { sx, cx, sy, cy, sz, cz } = SinCos3::new(angles);
        Self::from_rows(
            Vec3::new(cy * cz, sx * sy - cx * cy * sz, cx * sy + cy * sx * sz),
            Vec3::new(sz, cx * cz, -cz * sx),
            Vec3::new(-cz * sy, cy * sx + cx * sy * sz, cx * cy - sx * sy * sz),
        )
    }

    /// Y, then X, then Z.
    pub fn from_euler_yxz(angles: Vec3) -> Self {
        let SinCos3 { sx, cx, sy, cy, sz, cz } = SinCos3::new(angles);
        Self::from_rows(
            Vec3::new(cy * cz - sx * sy * sz, -cx * sz, cz * sy + cy * sx * sz),
            Vec3::new(cz * sx * sy + cy * sz, cx * cz, sy * sz - cy * cz * sx),
            Vec3::new(-cx * sy, sx, cx * cy),
        )
    }

    /// Y, then Z, then X.
    pub fn from_euler_yzx(angles: Vec3) -> Self {
        let SinCos3 { sx, cx, sy, cy, sz, cz } = SinCos3::new(angles);
        Self::from_rows(
            Vec3::new(cy * cz, -sz, cz * sy),
            Vec3::new(sx * sy + cx * cy * sz, cx * cz, cx * sy * sz - cy * sx),
            Vec3::new(cy * sx * sz - cx * sy, cz * sx, cx * cy + sx * sy * sz),
        )
    }

    /// Z, then X, then Y (`Ry · Rx · Rz`).
    pub fn from_euler_zxy(angles: Vec3) -> Self {
        let SinCos3 { sx, cx, sy, cy, sz, cz } = SinCos3::new(angles);
        Self::from_rows(
            Vec3::new(cy * cz + sx * sy * sz, cz * sx * sy - cy * sz, cx * sy),
            Vec3::new(cx * sz, cx * cz, -sx),
            Vec3::new(cy * sx * sz - cz * sy, sy * sz + cy * cz * sx, cx * cy),
        )
    }

    /// Z, then Y, then X.
    pub fn from_euler_zyx(angles: Vec3) -> Self {
        let SinCos3 { sx, cx, sy, cy, sz, cz } = SinCos3::new(angles);
        Self::from_rows(
            Vec3::new(cy * cz, -cy * sz, sy),
            Vec3::new(cz * sx * sy + cx * sz, cx * cz - sx * sy * sz, -cy * sx),
            Vec3::new(sx * sz - cx * cz * sy, cz * sx + cx * sy * sz, cx * cy),
        )
    }

    /// Dispatches to the closed form for `order`.
    pub fn from_euler(order: RotationOrder, angles: Vec3) -> Self {
        match order {
            RotationOrder::XYZ => Self::from_euler_xyz(angles),
            RotationOrder::XZY => Self::from_euler_xzy(angles),
            RotationOrder::YXZ => Self::from_euler_yxz(angles),
            RotationOrder::YZX => Self::from_euler_yzx(angles),
            RotationOrder::ZXY => Self::from_euler_zxy(angles),
            RotationOrder::ZYX => Self::from_euler_zyx(angles),
        }
    }

    /// [`RotationOrder::default`] (ZXY).
    pub fn from_euler_default(angles: Vec3) -> Self {
        Self::from_euler(RotationOrder::default(), angles)
    }
}

impl Mat4 {
    /// Euler rotation with no translation; see [`Mat3::from_euler`].
    pub fn from_euler(order: RotationOrder, angles: Vec3) -> Self {
        Self::from_mat3_translation(Mat3::from_euler(order, angles), Vec3::ZERO)
    }
}

// Every order expands to
//   (sx·cy·cz, sy·cx·cz, sz·cx·cy, cx·cy·cz) ± (sy·sz·cx, sx·sz·cy, sx·sy·cz, sy·sz·sx)
// on half angles; only the per-lane sign of the second term differs.
const QUAT_XYZ: UVec4 = UVec4::new(SIGN_BIT, 0, SIGN_BIT, 0);
const QUAT_XZY: UVec4 = UVec4::new(0, 0, SIGN_BIT, SIGN_BIT);
const QUAT_YXZ: UVec4 = UVec4::new(SIGN_BIT, 0, 0, SIGN_BIT);
const QUAT_YZX: UVec4 = UVec4::new(SIGN_BIT, SIGN_BIT, 0, 0);
const QUAT_ZXY: UVec4 = UVec4::new(0, SIGN_BIT, SIGN_BIT, 0);
const QUAT_ZYX: UVec4 = UVec4::new(0, SIGN_BIT, 0, SIGN_BIT);

fn euler_quat(angles: Vec3, signs: UVec4) -> Quat {
    let SinCos3 { sx, cx, sy, cy, sz, cz } = SinCos3::new(angles * DFloat::HALF);
    let lead = Vec4::new(sx, sy, sz, cx) * Vec4::new(cy, cx, cx, cy) * Vec4::new(cz, cz, cy, cz);
    let cross = Vec4::new(sy, sx, sx, sy) * Vec4::new(sz, sz, sy, sz) * Vec4::new(cx, cy, cz, sx);
    Quat::from_vec4(lead + cross.xor_sign(signs))
}

impl Quat {
    /// X, then Y, then Z.
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        euler_quat(angles, QUAT_XYZ)
    }

    /// X, then Z, then Y.
    pub fn from_euler_xzy(angles: Vec3) -> Self {
        euler_quat(angles, QUAT_XZY)
    }

    /// Y, then X, then Z.
    pub fn from_euler_yxz(angles: Vec3) -> Self {
        euler_quat(angles, QUAT_YXZ)
    }

    /// Y, then Z, then X.
    pub fn from_euler_yzx(angles: Vec3) -> Self {
        euler_quat(angles, QUAT_YZX)
    }

    /// Z, then X, then Y.
    pub fn from_euler_zxy(angles: Vec3) -> Self {
        euler_quat(angles, QUAT_ZXY)
    }

    /// Z, then Y, then X.
    pub fn from_euler_zyx(angles: Vec3) -> Self {
        euler_quat(angles, QUAT_ZYX)
    }

    /// Dispatches to the closed form for `order`.
    pub fn from_euler(order: RotationOrder, angles: Vec3) -> Self {
        match order {
            RotationOrder::XYZ => Self::from_euler_xyz(angles),
            RotationOrder::XZY => Self::from_euler_xzy(angles),
            RotationOrder::YXZ => Self::from_euler_yxz(angles),
            RotationOrder::YZX => Self::from_euler_yzx(angles),
            RotationOrder::ZXY => Self::from_euler_zxy(angles),
            RotationOrder::ZYX => Self::from_euler_zyx(angles),
        }
    }

    /// [`RotationOrder::default`] (ZXY).
    pub fn from_euler_default(angles: Vec3) -> Self {
        Self::from_euler(RotationOrder::default(), angles)
    }
}
