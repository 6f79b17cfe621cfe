// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cross-machine determinism audit for `echo-dmath`.
//!
//! Replays a seeded corpus of engine operations, digests the result bits per
//! operation family, and records or verifies golden digest files. Two
//! machines that verify the same golden file computed identical bits for
//! every operation in the corpus.
#![forbid(unsafe_code)]

/// Audit runs, golden files, torture loops.
pub mod audit;
/// Command-line front end.
pub mod cli;
pub mod corpus;
pub mod prng;

pub use audit::{run_audit, AuditConfig, AuditError, AuditReport, FamilyDigest, Golden};
pub use corpus::Family;
pub use prng::Prng;
