// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ensure_unblocked, run_clear_error_in};
use crate::config::Config;
use crate::sentinel::{ErrorRecord, ErrorStore};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn init_repo(path: &Path) {
    for args in [
        vec!["init", "--quiet"],
        vec!["config", "user.email", "test@example.com"],
        vec!["config", "user.name", "Test"],
    ] {
        let output = Command::new("git")
            .args(&args)
            .current_dir(path)
            .output()
            .expect("failed to run git");
        assert!(output.status.success());
    }
}

#[test]
fn test_clear_removes_the_record() {
    let tmp = temp_dir();
    init_repo(tmp.path());
    let config = Config::default();

    let store = ErrorStore::new(tmp.path(), &config.repo.sentinel_file);
    store
        .record(&ErrorRecord::now("feature", "push", "boom", tmp.path()))
        .expect("record");

    run_clear_error_in(tmp.path(), &config).expect("clear");
    assert!(!store.has_unresolved_error());
}

#[test]
fn test_clear_without_record_succeeds() {
    let tmp = temp_dir();
    init_repo(tmp.path());
    run_clear_error_in(tmp.path(), &Config::default()).expect("nothing to clear is fine");
}

#[test]
fn test_clear_outside_a_repository_fails() {
    let tmp = temp_dir();
    run_clear_error_in(tmp.path(), &Config::default())
        .expect_err("must refuse outside a repository");
}

// Every command runs through this gate; a record must block all of them,
// not just format.
#[test]
fn test_gate_blocks_while_a_record_exists() {
    let tmp = temp_dir();
    init_repo(tmp.path());
    let config = Config::default();

    let store = ErrorStore::new(tmp.path(), &config.repo.sentinel_file);
    store
        .record(&ErrorRecord::now("feature", "push", "boom", tmp.path()))
        .expect("record");

    let err = ensure_unblocked(tmp.path(), &config).expect_err("must block");
    assert!(err.to_string().contains("blocks this run"), "got: {err}");
}

#[test]
fn test_gate_passes_without_a_record() {
    let tmp = temp_dir();
    init_repo(tmp.path());
    ensure_unblocked(tmp.path(), &Config::default()).expect("nothing blocks");
}

#[test]
fn test_gate_is_a_no_op_outside_a_repository() {
    let tmp = temp_dir();
    ensure_unblocked(tmp.path(), &Config::default())
        .expect("no repository means no store to consult");
}
