//! Settings-store error-message, atomic-write-safety, and first-run tests.

use assert_fs::prelude::*;
use harbor_core::{JsonSettings, RepositoryConfig, SettingsError, SettingsStore};
use predicates::prelude::predicate;
use std::fs;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn corrupt_settings_error_names_the_file() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    let settings = JsonSettings::open_at(root.path(), home.path());

    fs::write(root.path().join("config.json"), b"]]]").expect("seed");
    let err = settings.repository().unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("config.json"), "must contain file path, got: {msg}");
}

#[test]
fn wrong_type_repository_record_is_a_parse_error() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    let settings = JsonSettings::open_at(root.path(), home.path());

    fs::write(
        root.path().join("config.json"),
        br#"{"repository": "a bare string, not a record"}"#,
    )
    .expect("seed");
    let err = settings.repository().unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn mid_write_crash_leaves_original_intact() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    let settings = JsonSettings::open_at(root.path(), home.path());

    settings
        .set_repository(&RepositoryConfig::new("/data/ipfs"))
        .expect("save");
    let original_bytes = fs::read(settings.path()).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = settings.path().with_extension("json.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let current_bytes = fs::read(settings.path()).expect("read after crash");
    assert_eq!(
        original_bytes, current_bytes,
        "original must be unchanged after crash"
    );
    assert!(tmp.exists(), ".tmp orphan must exist (crash = no cleanup)");
}

// ---------------------------------------------------------------------------
// 3. First run
// ---------------------------------------------------------------------------

#[test]
fn first_run_reads_defaults_without_creating_the_file() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    let settings = JsonSettings::open_at(root.path(), home.path());

    let config = settings.repository().expect("defaults");
    assert_eq!(config.path, home.path().join(".ipfs"));
    root.child("config.json")
        .assert(predicate::path::missing());
}

#[test]
fn first_write_creates_the_file() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let home = assert_fs::TempDir::new().expect("tempdir");
    let settings = JsonSettings::open_at(root.path(), home.path());

    settings
        .set_repository(&RepositoryConfig::new("/data/ipfs"))
        .expect("save");
    root.child("config.json").assert(predicate::path::exists());
}
