// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use clap::Parser;
use echo_dmath_audit::audit::{self, GOLDEN_VERSION};
use echo_dmath_audit::cli::{self, Cli};
use echo_dmath_audit::{run_audit, AuditConfig, AuditError, Family, Golden};

fn small_config() -> AuditConfig {
    AuditConfig {
        seed: 0xD1CE,
        cases: 64,
        families: vec![Family::ScalarAdd, Family::ScalarTrig, Family::LookRotationSafe],
    }
}

fn rewrite_golden(path: &Path, edit: impl FnOnce(&mut Golden)) {
    let mut golden = Golden::load(path).expect("load golden");
    edit(&mut golden);
    let json = serde_json::to_string_pretty(&golden).expect("serialize golden");
    fs::write(path, json).expect("write golden");
}

#[test]
fn record_then_verify_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("golden.json");

    let recorded = audit::record(&small_config(), &path).expect("record");
    assert_eq!(recorded.version, GOLDEN_VERSION);
    assert_eq!(recorded.hash_alg, "BLAKE3");
    assert_eq!(recorded.digests.len(), 3);
    for digest in recorded.digests.values() {
        assert_eq!(digest.len(), 64);
    }

    let loaded = Golden::load(&path).expect("load");
    assert_eq!(loaded, recorded);

    let report = audit::verify_file(&path).expect("verify");
    assert_eq!(report.digests.len(), 3);
    assert_eq!(report.total_words(), 64 + 64 * 3 + 64 * 13);
}

#[test]
fn golden_json_uses_family_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("golden.json");
    audit::record(&small_config(), &path).expect("record");

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    let digests = value["digests"].as_object().expect("digests map");
    let mut keys: Vec<_> = digests.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["look_rotation_safe", "scalar_add", "scalar_trig"]);
    assert_eq!(value["seed"], 0xD1CE);
}

#[test]
fn tampered_digest_reports_that_family() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("golden.json");
    audit::record(&small_config(), &path).expect("record");

    let bogus = "ab".repeat(32);
    rewrite_golden(&path, |g| {
        g.digests.insert(Family::ScalarTrig, bogus.clone());
    });

    match audit::verify_file(&path) {
        Err(AuditError::Mismatch { family, expected, actual }) => {
            assert_eq!(family, Family::ScalarTrig);
            assert_eq!(expected, bogus);
            assert_ne!(actual, bogus);
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn first_mismatch_is_reported_in_digest_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("golden.json");
    audit::record(&small_config(), &path).expect("record");

    rewrite_golden(&path, |g| {
        for digest in g.digests.values_mut() {
            *digest = "00".repeat(32);
        }
    });

    let err = audit::verify_file(&path).expect_err("all digests tampered");
    assert!(matches!(err, AuditError::Mismatch { family: Family::ScalarAdd, .. }));
}

#[test]
fn unsupported_golden_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("golden.json");
    audit::record(&small_config(), &path).expect("record");

    rewrite_golden(&path, |g| g.version = GOLDEN_VERSION + 1);
    assert!(matches!(Golden::load(&path), Err(AuditError::UnsupportedGolden(_))));
}

#[test]
fn malformed_digest_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("golden.json");
    audit::record(&small_config(), &path).expect("record");

    rewrite_golden(&path, |g| {
        g.digests.insert(Family::ScalarAdd, "not hex".to_string());
    });
    assert!(matches!(
        Golden::load(&path),
        Err(AuditError::MalformedDigest { family: Family::ScalarAdd, .. })
    ));

    rewrite_golden_raw(&path, "abcd");
    assert!(matches!(
        Golden::load(&path),
        Err(AuditError::MalformedDigest { family: Family::ScalarAdd, .. })
    ));
}

fn rewrite_golden_raw(path: &Path, digest: &str) {
    let mut value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json");
    value["digests"]["scalar_add"] = serde_json::Value::String(digest.to_string());
    fs::write(path, value.to_string()).expect("write");
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.json");
    assert!(matches!(Golden::load(&missing), Err(AuditError::Io { .. })));
    assert!(matches!(AuditConfig::load(&missing), Err(AuditError::Io { .. })));
}

#[test]
fn torture_finds_no_divergence() {
    let config = AuditConfig {
        cases: 16,
        ..small_config()
    };
    let report = audit::torture(&config, 3).expect("torture");
    assert_eq!(report, run_audit(&config));
}

#[test]
fn config_file_fills_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("audit.json");
    fs::write(&path, r#"{ "cases": 32, "families": ["euler", "hash"] }"#).expect("write");

    let config = AuditConfig::load(&path).expect("load");
    assert_eq!(config.seed, AuditConfig::default().seed);
    assert_eq!(config.cases, 32);
    assert_eq!(config.families, vec![Family::Euler, Family::Hash]);
}

#[test]
fn config_file_rejects_unknown_fields_and_families() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("audit.json");

    fs::write(&path, r#"{ "casez": 32 }"#).expect("write");
    assert!(matches!(AuditConfig::load(&path), Err(AuditError::Json(_))));

    fs::write(&path, r#"{ "families": ["scalar_pow"] }"#).expect("write");
    assert!(matches!(AuditConfig::load(&path), Err(AuditError::Json(_))));

    fs::write(&path, r#"{ "cases": 0 }"#).expect("write");
    assert!(matches!(AuditConfig::load(&path), Err(AuditError::InvalidConfig(_))));
}

#[test]
fn cli_flags_override_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("audit.json");
    fs::write(&config_path, r#"{ "seed": 1, "cases": 8 }"#).expect("write");

    let cli = Cli::try_parse_from([
        "echo-dmath-audit",
        "torture",
        "--config",
        config_path.to_str().expect("utf-8 path"),
        "--cases",
        "4",
        "--family",
        "scalar_sqrt",
        "--family",
        "projection",
    ])
    .expect("parse");
    let cli::Commands::Torture { run, runs } = cli.command else {
        panic!("expected torture");
    };
    assert_eq!(runs, 20);
    let config = run.resolve().expect("resolve");
    assert_eq!(config.seed, 1);
    assert_eq!(config.cases, 4);
    assert_eq!(config.families, vec![Family::ScalarSqrt, Family::Projection]);
}

#[test]
fn cli_record_and_verify() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("golden.json");
    let out_str = out.to_str().expect("utf-8 path");

    let record = Cli::try_parse_from([
        "echo-dmath-audit",
        "record",
        "--cases",
        "8",
        "--seed",
        "77",
        "--out",
        out_str,
    ])
    .expect("parse record");
    cli::run(record).expect("record");

    let golden = Golden::load(&out).expect("load");
    assert_eq!(golden.digests.len(), Family::ALL.len());
    assert_eq!(golden.seed, 77);

    let verify = Cli::try_parse_from(["echo-dmath-audit", "verify", out_str]).expect("parse verify");
    cli::run(verify).expect("verify");
}

#[test]
fn cli_rejects_unknown_family() {
    let parsed = Cli::try_parse_from(["echo-dmath-audit", "torture", "--family", "scalar_pow"]);
    assert!(parsed.is_err());
}
