// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::WorktreeGuard;
use crate::error::{BbError, WorkflowError};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo(path: &Path) {
    git(&["init", "--quiet"], path);
    git(&["config", "user.email", "test@example.com"], path);
    git(&["config", "user.name", "Test"], path);
    std::fs::write(path.join("lib.py"), "x = 1\n").expect("write");
    git(&["add", "lib.py"], path);
    git(&["commit", "-q", "-m", "Initial commit"], path);
}

#[test]
fn test_clean_tree_takes_no_snapshot() {
    let tmp = temp_dir();
    init_repo(tmp.path());

    let mut guard = WorktreeGuard::new(tmp.path());
    assert!(!guard.snapshot().expect("snapshot"), "clean tree, nothing to stash");
    assert!(!guard.has_snapshot());
    guard.restore().expect("restore of nothing is a no-op");
}

#[test]
fn test_round_trip_preserves_tracked_and_untracked() {
    let tmp = temp_dir();
    init_repo(tmp.path());
    std::fs::write(tmp.path().join("lib.py"), "x = 2\n").expect("write");
    std::fs::write(tmp.path().join("untracked.py"), "u = 1\n").expect("write");

    let mut guard = WorktreeGuard::new(tmp.path());
    assert!(guard.snapshot().expect("snapshot"));
    assert!(guard.has_snapshot());
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("lib.py")).expect("read"),
        "x = 1\n",
        "tree should be back at HEAD after snapshot"
    );
    assert!(!tmp.path().join("untracked.py").exists());

    guard.restore().expect("restore");
    assert!(!guard.has_snapshot());
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("lib.py")).expect("read"),
        "x = 2\n"
    );
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("untracked.py")).expect("read"),
        "u = 1\n"
    );
}

#[test]
fn test_double_snapshot_is_rejected() {
    let tmp = temp_dir();
    init_repo(tmp.path());
    std::fs::write(tmp.path().join("lib.py"), "x = 2\n").expect("write");

    let mut guard = WorktreeGuard::new(tmp.path());
    assert!(guard.snapshot().expect("first snapshot"));
    guard.snapshot().expect_err("second snapshot while outstanding must fail");
    // The original snapshot is still intact
    guard.restore().expect("restore");
}

#[test]
fn test_restore_conflict_is_surfaced_not_swallowed() {
    let tmp = temp_dir();
    init_repo(tmp.path());
    std::fs::write(tmp.path().join("lib.py"), "stashed side\n").expect("write");

    let mut guard = WorktreeGuard::new(tmp.path());
    assert!(guard.snapshot().expect("snapshot"));

    // Commit conflicting content while the snapshot is parked
    std::fs::write(tmp.path().join("lib.py"), "committed side\n").expect("write");
    git(&["commit", "-q", "-am", "conflicting commit"], tmp.path());

    let err = guard.restore().expect_err("pop should conflict");
    assert!(
        matches!(&err, BbError::Workflow(w) if matches!(**w, WorkflowError::RestoreConflict { .. })),
        "got: {err}"
    );
    // Conflict markers are left for the user to resolve
    let content = std::fs::read_to_string(tmp.path().join("lib.py")).expect("read");
    assert!(content.contains("<<<<<<<"), "expected conflict markers, got: {content}");
    // Consumed either way, so rollback never pops twice
    assert!(!guard.has_snapshot());
}
