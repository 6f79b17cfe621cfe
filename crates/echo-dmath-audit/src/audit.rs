// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Audit runs, golden files, and torture loops.
//!
//! A run replays every selected [`Family`] for `cases` operations and reduces
//! each to a BLAKE3 digest. A [`Golden`] file pins those digests together with
//! the parameters that produced them, so `verify` on another machine (or after
//! a refactor of the engine) replays exactly the same corpus.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::corpus::{DigestSink, Family, HASH_DOMAIN};

/// Golden file format version.
pub const GOLDEN_VERSION: u16 = 1;
/// Hash algorithm recorded in golden files.
pub const HASH_ALG: &str = "BLAKE3";
/// Seed used when neither the config file nor the command line sets one.
pub const DEFAULT_SEED: u64 = 0x0EC0_D3A7_F1EE_7001;
/// Operations per family when unset.
pub const DEFAULT_CASES: u32 = 4096;

/// Errors surfaced by the audit harness.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Reading or writing a file failed.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A config or golden file is not valid JSON for its schema.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The run parameters are unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// The golden file was written by an incompatible harness.
    #[error("unsupported golden file: {0}")]
    UnsupportedGolden(String),
    /// A golden digest is not 32 bytes of hex.
    #[error("malformed digest for {family}: {reason}")]
    MalformedDigest {
        /// Family whose digest is malformed.
        family: Family,
        /// What is wrong with it.
        reason: String,
    },
    /// A family's replayed digest differs from the golden one.
    #[error("digest mismatch in family {family}\nexpected: {expected}\nactual:   {actual}")]
    Mismatch {
        /// First family that differs, in digest order.
        family: Family,
        /// Digest from the golden file.
        expected: String,
        /// Digest from this machine.
        actual: String,
    },
    /// Two runs in the same process disagreed.
    #[error("divergence in run {run}, family {family}\nbaseline: {baseline}\ncurrent:  {current}")]
    Divergence {
        /// 1-based index of the diverging run (the baseline is run 1).
        run: u32,
        /// First family that differs.
        family: Family,
        /// Baseline digest.
        baseline: String,
        /// Digest of the diverging run.
        current: String,
    },
}

/// Parameters of an audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Root seed; each family derives its own stream from it.
    pub seed: u64,
    /// Operations replayed per family.
    pub cases: u32,
    /// Families to run, in any order; runs always proceed in digest order.
    pub families: Vec<Family>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            cases: DEFAULT_CASES,
            families: Family::ALL.to_vec(),
        }
    }
}

impl AuditConfig {
    /// Reads a JSON config; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let file = open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs that would record an empty golden file.
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.cases == 0 {
            return Err(AuditError::InvalidConfig("cases must be non-zero".to_string()));
        }
        if self.families.is_empty() {
            return Err(AuditError::InvalidConfig("no families selected".to_string()));
        }
        Ok(())
    }

    /// Selected families, deduplicated and in digest order.
    pub fn ordered_families(&self) -> Vec<Family> {
        let mut families = self.families.clone();
        families.sort_unstable();
        families.dedup();
        families
    }
}

/// Digest of one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDigest {
    /// Family replayed.
    pub family: Family,
    /// Result words fed to the hash.
    pub words: u64,
    /// Lowercase hex BLAKE3 digest.
    pub digest_hex: String,
}

/// Output of [`run_audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// Root seed used.
    pub seed: u64,
    /// Operations per family.
    pub cases: u32,
    /// One entry per family, in digest order.
    pub digests: Vec<FamilyDigest>,
}

impl AuditReport {
    /// Digest recorded for `family`, if it was run.
    pub fn digest(&self, family: Family) -> Option<&str> {
        self.digests
            .iter()
            .find(|d| d.family == family)
            .map(|d| d.digest_hex.as_str())
    }

    /// First family (in digest order) whose digest differs from `other`.
    pub fn first_divergence<'a>(&'a self, other: &'a Self) -> Option<(&'a FamilyDigest, &'a FamilyDigest)> {
        self.digests
            .iter()
            .zip(&other.digests)
            .find(|(a, b)| a.family != b.family || a.digest_hex != b.digest_hex)
    }

    /// Total words hashed across all families.
    pub fn total_words(&self) -> u64 {
        self.digests.iter().map(|d| d.words).sum()
    }
}

/// Replays the corpus described by `config`.
#[instrument(skip(config), fields(seed = config.seed, cases = config.cases))]
pub fn run_audit(config: &AuditConfig) -> AuditReport {
    let digests = config
        .ordered_families()
        .into_iter()
        .map(|family| {
            let mut sink = DigestSink::new(family);
            family.run(&mut family.stream(config.seed), config.cases, &mut sink);
            let digest = FamilyDigest {
                family,
                words: sink.words(),
                digest_hex: sink.finish(),
            };
            debug!(%family, words = digest.words, digest = %digest.digest_hex, "family replayed");
            digest
        })
        .collect();
    AuditReport {
        seed: config.seed,
        cases: config.cases,
        digests,
    }
}

/// Pinned digests plus the parameters that reproduce them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Golden {
    /// [`GOLDEN_VERSION`] at record time.
    pub version: u16,
    /// Domain separator of the family hashes.
    pub hash_domain: String,
    /// Always [`HASH_ALG`].
    pub hash_alg: String,
    /// Root seed.
    pub seed: u64,
    /// Operations per family.
    pub cases: u32,
    /// Hex digest per family.
    pub digests: BTreeMap<Family, String>,
}

impl Golden {
    /// Captures a report.
    pub fn from_report(report: &AuditReport) -> Self {
        Self {
            version: GOLDEN_VERSION,
            hash_domain: HASH_DOMAIN.to_string(),
            hash_alg: HASH_ALG.to_string(),
            seed: report.seed,
            cases: report.cases,
            digests: report
                .digests
                .iter()
                .map(|d| (d.family, d.digest_hex.clone()))
                .collect(),
        }
    }

    /// The config that replays this golden file.
    pub fn config(&self) -> AuditConfig {
        AuditConfig {
            seed: self.seed,
            cases: self.cases,
            families: self.digests.keys().copied().collect(),
        }
    }

    /// Reads and validates a golden file.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let file = open(path)?;
        let golden: Self = serde_json::from_reader(BufReader::new(file))?;
        golden.validate()?;
        Ok(golden)
    }

    /// Writes the golden file as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), AuditError> {
        let io_err = |source| AuditError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)
    }

    fn validate(&self) -> Result<(), AuditError> {
        if self.version != GOLDEN_VERSION {
            return Err(AuditError::UnsupportedGolden(format!(
                "version {} (expected {GOLDEN_VERSION})",
                self.version
            )));
        }
        if self.hash_domain != HASH_DOMAIN {
            return Err(AuditError::UnsupportedGolden(format!("hash domain {}", self.hash_domain)));
        }
        if self.hash_alg != HASH_ALG {
            return Err(AuditError::UnsupportedGolden(format!("hash algorithm {}", self.hash_alg)));
        }
        for (&family, digest) in &self.digests {
            let bytes = hex::decode(digest).map_err(|e| AuditError::MalformedDigest {
                family,
                reason: e.to_string(),
            })?;
            if bytes.len() != blake3::OUT_LEN {
                return Err(AuditError::MalformedDigest {
                    family,
                    reason: format!("{} bytes, expected {}", bytes.len(), blake3::OUT_LEN),
                });
            }
        }
        self.config().validate()
    }
}

/// Runs `config` and writes the result to `out`.
#[instrument(skip(config))]
pub fn record(config: &AuditConfig, out: &Path) -> Result<Golden, AuditError> {
    config.validate()?;
    let report = run_audit(config);
    let golden = Golden::from_report(&report);
    golden.save(out)?;
    info!(
        families = golden.digests.len(),
        words = report.total_words(),
        "recorded golden digests"
    );
    Ok(golden)
}

/// Replays the corpus pinned in `golden` and compares family by family.
///
/// Reports the first family (in digest order) that differs.
#[instrument(skip(golden), fields(seed = golden.seed, cases = golden.cases))]
pub fn verify(golden: &Golden) -> Result<AuditReport, AuditError> {
    let report = run_audit(&golden.config());
    for actual in &report.digests {
        let expected = golden.digests.get(&actual.family).map_or("", String::as_str);
        if expected != actual.digest_hex {
            warn!(family = %actual.family, "digest mismatch");
            return Err(AuditError::Mismatch {
                family: actual.family,
                expected: expected.to_string(),
                actual: actual.digest_hex.clone(),
            });
        }
    }
    info!(families = report.digests.len(), "all family digests match");
    Ok(report)
}

/// [`verify`] against a golden file on disk.
pub fn verify_file(path: &Path) -> Result<AuditReport, AuditError> {
    verify(&Golden::load(path)?)
}

/// Replays the same corpus `runs` times in-process and fails on the first
/// run whose digests differ from the first.
#[instrument(skip(config), fields(seed = config.seed, cases = config.cases))]
pub fn torture(config: &AuditConfig, runs: u32) -> Result<AuditReport, AuditError> {
    config.validate()?;
    info!("torture starting");
    let baseline = run_audit(config);
    for run in 2..=runs {
        let current = run_audit(config);
        if let Some((base, cur)) = baseline.first_divergence(&current) {
            warn!(run, family = %cur.family, "divergence detected");
            return Err(AuditError::Divergence {
                run,
                family: base.family,
                baseline: base.digest_hex.clone(),
                current: cur.digest_hex.clone(),
            });
        }
        if run % 10 == 0 {
            info!("{run}/{runs} runs clean");
        }
    }
    info!(runs = runs.max(1), "torture complete, all runs identical");
    Ok(baseline)
}

fn open(path: &Path) -> Result<File, AuditError> {
    File::open(path).map_err(|source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    })
}
