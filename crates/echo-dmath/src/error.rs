// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contract-violation errors.
//!
//! Numeric conditions never surface here; they are encoded as NaN/∞ bit
//! patterns by the scalar engine.

use thiserror::Error;

/// Errors raised by fallible accessors and conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// A component (or column) index was outside `0..len`.
    #[error("component index {index} out of range for a {len}-wide value")]
    ComponentIndex {
        /// Requested index.
        index: usize,
        /// Number of addressable components.
        len: usize,
    },
    /// A raw discriminant did not name one of the six rotation orders.
    #[error("unknown rotation order discriminant {0}")]
    UnknownRotationOrder(u8),
}

/// Panics with the [`MathError::ComponentIndex`] message.
///
/// Backs the `Index`/`IndexMut` operators, where an out-of-range index is a
/// caller bug rather than a numeric edge case.
#[cold]
#[track_caller]
#[allow(clippy::panic)]
pub(crate) fn component_out_of_range(index: usize, len: usize) -> ! {
    panic!("{}", MathError::ComponentIndex { index, len })
}
