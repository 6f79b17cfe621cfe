// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! echo-dmath: bit-reproducible math for lockstep simulation.
//!
//! Two layers:
//! - [`DFloat`], a 32-bit value with the IEEE-754 binary32 layout whose
//!   arithmetic is emulated with integer operations only. Results never depend
//!   on the host FPU, its rounding mode, denormal flushing, or FMA contraction.
//! - Vectors, matrices, and quaternions built exclusively from [`DFloat`].
//!
//! Every operation is a pure function of its arguments. Nothing in this crate
//! allocates, performs I/O, or touches shared state, so any value can be used
//! from any number of threads without synchronization.
//!
//! Numeric edge cases (division by zero, out-of-range conversion, invalid
//! operations) follow binary32 conventions and produce NaN/∞ bit patterns.
//! Only programming-contract violations (component index out of range) panic;
//! the fallible accessors return [`MathError`] instead.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

/// Bit reinterpretation helpers and sign masks.
pub mod bits;
mod error;
/// Deterministic narrow/wide hashing.
pub mod hash;
/// Square matrices (2x2, 3x3, 4x4) and their construction algorithms.
pub mod matrix;
mod quat;
mod rotation;
/// Integer-emulated binary32 scalar.
pub mod scalar;
/// Fixed-size vector families.
pub mod vector;

pub use error::MathError;
pub use hash::DetHash;
pub use matrix::{Mat2, Mat3, Mat4};
pub use quat::Quat;
pub use rotation::RotationOrder;
pub use scalar::DFloat;
pub use vector::{BVec2, BVec3, BVec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};
