// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The audit corpus: operation families replayed from a seeded [`Prng`].
//!
//! Each family draws its operands from its own generator stream and feeds the
//! raw bits of every result, little-endian, into a [`DigestSink`]. Two
//! machines that agree on every bit produce the same digest per family.
//!
//! Adding a family is backwards compatible. Changing what an existing family
//! draws or records is not: bump [`crate::audit::GOLDEN_VERSION`].

use core::fmt;
use core::ops::{Add, Div, Mul, Rem, Sub};

use echo_dmath::{DFloat, DetHash, Mat3, Mat4, Quat, RotationOrder, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::prng::Prng;

/// Domain separator prefixed to every family digest.
pub const HASH_DOMAIN: &str = "ECHO_DMATH_AUDIT_V1";

/// One operation family of the corpus.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Family {
    /// `a + b` over biased bit patterns.
    ScalarAdd,
    /// `a - b`.
    ScalarSub,
    /// `a * b`.
    ScalarMul,
    /// `a / b`.
    ScalarDiv,
    /// Truncated remainder.
    ScalarRem,
    /// Square root.
    ScalarSqrt,
    /// Float/int conversions and the integral rounding family.
    ScalarConvert,
    /// `sin`, `cos`, `tan`.
    ScalarTrig,
    /// Narrow and wide hashes of scalars, vectors, quaternions, matrices.
    Hash,
    /// Quaternion to matrix and back.
    QuatToMat3,
    /// Every Euler order, matrix and quaternion forms.
    Euler,
    /// Degenerate-safe look rotation.
    LookRotationSafe,
    /// Gram-Schmidt with identity fallback.
    Orthonormalize,
    /// The four projection constructors plus a projected point.
    Projection,
}

impl Family {
    /// Every family, in digest order.
    pub const ALL: [Self; 14] = [
        Self::ScalarAdd,
        Self::ScalarSub,
        Self::ScalarMul,
        Self::ScalarDiv,
        Self::ScalarRem,
        Self::ScalarSqrt,
        Self::ScalarConvert,
        Self::ScalarTrig,
        Self::Hash,
        Self::QuatToMat3,
        Self::Euler,
        Self::LookRotationSafe,
        Self::Orthonormalize,
        Self::Projection,
    ];

    /// Stable name used in golden files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ScalarAdd => "scalar_add",
            Self::ScalarSub => "scalar_sub",
            Self::ScalarMul => "scalar_mul",
            Self::ScalarDiv => "scalar_div",
            Self::ScalarRem => "scalar_rem",
            Self::ScalarSqrt => "scalar_sqrt",
            Self::ScalarConvert => "scalar_convert",
            Self::ScalarTrig => "scalar_trig",
            Self::Hash => "hash",
            Self::QuatToMat3 => "quat_to_mat3",
            Self::Euler => "euler",
            Self::LookRotationSafe => "look_rotation_safe",
            Self::Orthonormalize => "orthonormalize",
            Self::Projection => "projection",
        }
    }

    /// Generator for this family's operand stream.
    ///
    /// Streams are independent, so running a subset of families yields the
    /// same digests as a full run.
    pub fn stream(self, seed: u64) -> Prng {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or_default();
        Prng::from_seed_u64(seed ^ ((index as u64 + 1) << 56))
    }

    /// Replays `cases` operations, recording every result into `sink`.
    pub fn run(self, prng: &mut Prng, cases: u32, sink: &mut DigestSink) {
        for _ in 0..cases {
            match self {
                Self::ScalarAdd => binary(prng, sink, <DFloat as Add>::add),
                Self::ScalarSub => binary(prng, sink, <DFloat as Sub>::sub),
                Self::ScalarMul => binary(prng, sink, <DFloat as Mul>::mul),
                Self::ScalarDiv => binary(prng, sink, <DFloat as Div>::div),
                Self::ScalarRem => binary(prng, sink, <DFloat as Rem>::rem),
                Self::ScalarSqrt => sink.push(prng.next_bits().sqrt()),
                Self::ScalarConvert => convert_case(prng, sink),
                Self::ScalarTrig => trig_case(prng, sink),
                Self::Hash => hash_case(prng, sink),
                Self::QuatToMat3 => quat_case(prng, sink),
                Self::Euler => euler_case(prng, sink),
                Self::LookRotationSafe => look_case(prng, sink),
                Self::Orthonormalize => orthonormalize_case(prng, sink),
                Self::Projection => projection_case(prng, sink),
            }
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// BLAKE3 accumulator over little-endian result words.
pub struct DigestSink {
    hasher: blake3::Hasher,
    words: u64,
}

impl DigestSink {
    /// Fresh sink, domain-separated by the family name.
    pub fn new(family: Family) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(HASH_DOMAIN.as_bytes());
        hasher.update(&[0]);
        hasher.update(family.name().as_bytes());
        hasher.update(&[0]);
        Self { hasher, words: 0 }
    }

    /// Records one raw word.
    pub fn push_bits(&mut self, bits: u32) {
        self.hasher.update(&bits.to_le_bytes());
        self.words += 1;
    }

    /// Records a scalar's encoding.
    pub fn push(&mut self, value: DFloat) {
        self.push_bits(value.to_bits());
    }

    /// Records a sequence of scalars in order.
    pub fn push_all(&mut self, values: impl IntoIterator<Item = DFloat>) {
        for value in values {
            self.push(value);
        }
    }

    /// Records the columns of a 3×3 matrix.
    pub fn push_mat3(&mut self, m: &Mat3) {
        self.push_all(m.to_cols_array().into_iter().flat_map(Vec3::to_array));
    }

    /// Records the columns of a 4×4 matrix.
    pub fn push_mat4(&mut self, m: &Mat4) {
        self.push_all(m.to_cols_array().into_iter().flat_map(Vec4::to_array));
    }

    /// Number of words recorded so far.
    pub const fn words(&self) -> u64 {
        self.words
    }

    /// Hex digest of everything recorded.
    pub fn finish(&self) -> String {
        hex::encode(self.hasher.finalize().as_bytes())
    }
}

const FOUR: DFloat = DFloat::from_bits(0x4080_0000);
const THREE: DFloat = DFloat::from_bits(0x4040_0000);
const TEN: DFloat = DFloat::from_bits(0x4120_0000);
const SIXTY_FOUR: DFloat = DFloat::from_bits(0x4280_0000);
const HUNDRED: DFloat = DFloat::from_bits(0x42C8_0000);
const THOUSAND: DFloat = DFloat::from_bits(0x447A_0000);
const QUARTER: DFloat = DFloat::from_bits(0x3E80_0000);
/// Nearest binary32 to `0.1`.
const TENTH: DFloat = DFloat::from_bits(0x3DCC_CCCD);
/// Nearest binary32 to `0.01`.
const HUNDREDTH: DFloat = DFloat::from_bits(0x3C23_D70A);
/// Nearest binary32 to `1e-20`; scales a vector below the look-rotation band.
const TINY: DFloat = DFloat::from_bits(0x1E3C_E508);
/// Nearest binary32 to `1e20`; scales a vector above the look-rotation band.
const HUGE: DFloat = DFloat::from_bits(0x60AD_78EC);

fn next_vec3(prng: &mut Prng, lo: DFloat, hi: DFloat) -> Vec3 {
    let x = prng.next_range(lo, hi);
    let y = prng.next_range(lo, hi);
    let z = prng.next_range(lo, hi);
    Vec3::new(x, y, z)
}

fn next_bits_vec3(prng: &mut Prng) -> Vec3 {
    let x = prng.next_bits();
    let y = prng.next_bits();
    let z = prng.next_bits();
    Vec3::new(x, y, z)
}

fn binary(prng: &mut Prng, sink: &mut DigestSink, op: fn(DFloat, DFloat) -> DFloat) {
    let a = prng.next_bits();
    let b = prng.next_bits();
    sink.push(op(a, b));
}

fn convert_case(prng: &mut Prng, sink: &mut DigestSink) {
    let a = prng.next_bits();
    sink.push_bits(a.to_i32().cast_unsigned());
    sink.push_bits(a.to_u32());
    sink.push_all([a.trunc(), a.floor(), a.ceil(), a.round_ties_even(), a.fract()]);

    let n = prng.next_u32();
    sink.push(DFloat::from_i32(n.cast_signed()));
    sink.push(DFloat::from_u32(n));
}

fn trig_case(prng: &mut Prng, sink: &mut DigestSink) {
    let x = if prng.next_below(4) == 0 {
        prng.next_bits()
    } else {
        prng.next_range(-SIXTY_FOUR, SIXTY_FOUR)
    };
    let (s, c) = x.sin_cos();
    sink.push_all([s, c, x.tan()]);
}

fn hash_case(prng: &mut Prng, sink: &mut DigestSink) {
    let w = prng.next_bits();
    let v = next_bits_vec3(prng).extend(w);
    sink.push_bits(w.hash());
    sink.push_bits(v.xyz().hash());
    sink.push_bits(v.hash());
    for lane in v.hash_wide().to_array() {
        sink.push_bits(lane);
    }
    sink.push_bits(v.to_bits().hash());
    sink.push_bits(Quat::from_vec4(v).hash());

    let m = Mat3::from_cols(v.xyz(), next_bits_vec3(prng), next_bits_vec3(prng));
    sink.push_bits(m.hash());
    for lane in m.hash_wide().to_array() {
        sink.push_bits(lane);
    }
}

fn quat_case(prng: &mut Prng, sink: &mut DigestSink) {
    let raw = next_vec3(prng, -DFloat::ONE, DFloat::ONE).extend(prng.next_range(-DFloat::ONE, DFloat::ONE));
    let q = Quat::from_vec4(raw).normalize_or_identity();
    let m = q.to_mat3();
    sink.push_mat3(&m);
    sink.push_all(Quat::from_mat3(&m).to_array());

    let v = next_vec3(prng, -HUNDRED, HUNDRED);
    sink.push_all(q.mul_vec3(v).to_array());
}

fn euler_case(prng: &mut Prng, sink: &mut DigestSink) {
    let angles = next_vec3(prng, -DFloat::TAU, DFloat::TAU);
    for order in RotationOrder::ALL {
        sink.push_mat3(&Mat3::from_euler(order, angles));
        sink.push_all(Quat::from_euler(order, angles).to_array());
    }
}

fn look_case(prng: &mut Prng, sink: &mut DigestSink) {
    let forward = next_vec3(prng, -TEN, TEN);
    let (forward, up) = match prng.next_below(8) {
        0 => (Vec3::ZERO, forward),
        1 => (forward, forward * prng.next_range(-FOUR, FOUR)),
        2 => (forward * TINY, next_vec3(prng, -DFloat::ONE, DFloat::ONE)),
        3 => (forward * HUGE, next_vec3(prng, -DFloat::ONE, DFloat::ONE)),
        4 => (next_bits_vec3(prng), next_bits_vec3(prng)),
        _ => (forward, next_vec3(prng, -TEN, TEN)),
    };
    sink.push_mat3(&Mat3::look_rotation_safe(forward, up));
    sink.push_all(Quat::look_rotation_safe(forward, up).to_array());
}

fn orthonormalize_case(prng: &mut Prng, sink: &mut DigestSink) {
    let c0 = next_vec3(prng, -TEN, TEN);
    let c1 = match prng.next_below(8) {
        0 => c0 * prng.next_range(-FOUR, FOUR),
        1 => next_bits_vec3(prng),
        _ => next_vec3(prng, -TEN, TEN),
    };
    let c2 = next_vec3(prng, -TEN, TEN);
    sink.push_mat3(&Mat3::from_cols(c0, c1, c2).orthonormalize());
}

fn projection_case(prng: &mut Prng, sink: &mut DigestSink) {
    let near = prng.next_range(HUNDREDTH, TEN);
    let far = near + prng.next_range(DFloat::ONE, THOUSAND);
    let width = prng.next_range(TENTH, HUNDRED);
    let height = prng.next_range(TENTH, HUNDRED);
    let left = prng.next_range(-TEN, DFloat::ZERO);
    let bottom = prng.next_range(-TEN, DFloat::ZERO);
    let fov = prng.next_range(TENTH, THREE);
    let aspect = prng.next_range(QUARTER, FOUR);

    let ortho = Mat4::orthographic(width, height, near, far);
    let ortho_off = Mat4::orthographic_off_center(left, left + width, bottom, bottom + height, near, far);
    let persp = Mat4::perspective_fov(fov, aspect, near, far);
    let persp_off =
        Mat4::perspective_off_center(left, left + width, bottom, bottom + height, near, far);
    for m in [ortho, ortho_off, persp, persp_off] {
        sink.push_mat4(&m);
    }

    let mut point = next_vec3(prng, -TEN, TEN);
    point.z = -prng.next_range(near, far);
    sink.push_all(persp.project_point(point).to_array());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(family: Family, seed: u64, cases: u32) -> (String, u64) {
        let mut sink = DigestSink::new(family);
        family.run(&mut family.stream(seed), cases, &mut sink);
        (sink.finish(), sink.words())
    }

    #[test]
    fn operand_bounds_are_exact_encodings() {
        let pairs = [
            (FOUR, 4.0),
            (THREE, 3.0),
            (TEN, 10.0),
            (SIXTY_FOUR, 64.0),
            (HUNDRED, 100.0),
            (THOUSAND, 1000.0),
            (QUARTER, 0.25),
            (TENTH, 0.1),
            (HUNDREDTH, 0.01),
            (TINY, 1e-20),
            (HUGE, 1e20),
        ];
        for (constant, decimal) in pairs {
            assert_eq!(constant.to_bits(), f32::to_bits(decimal), "{decimal}");
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Family::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Family::ALL.len());
    }

    #[test]
    fn every_family_records_words() {
        for family in Family::ALL {
            let (_, words) = digest(family, 1, 8);
            assert!(words >= 8, "{family} recorded {words} words");
        }
    }

    #[test]
    fn replay_is_stable() {
        for family in Family::ALL {
            assert_eq!(digest(family, 99, 32), digest(family, 99, 32), "{family}");
        }
    }

    #[test]
    fn families_are_domain_separated() {
        let (add, _) = digest(Family::ScalarAdd, 5, 0);
        let (sub, _) = digest(Family::ScalarSub, 5, 0);
        assert_ne!(add, sub);
    }

    #[test]
    fn serde_names_match_display() {
        for family in Family::ALL {
            let json = serde_json::to_string(&family).unwrap_or_default();
            assert_eq!(json, format!("\"{family}\""));
        }
    }
}
