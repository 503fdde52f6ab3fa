// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Rollback;
use crate::config::types::RepoConfig;
use crate::git::cmd::rev_exists;
use crate::git::query::current_branch;
use crate::workflow::inspect::RepoContext;
use crate::workflow::snapshot::WorktreeGuard;
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

fn feature_repo(path: &Path) -> RepoContext {
    git(&["init", "--quiet"], path);
    git(&["config", "user.email", "test@example.com"], path);
    git(&["config", "user.name", "Test"], path);
    std::fs::write(path.join("lib.py"), "x = 1\n").expect("write");
    git(&["add", "lib.py"], path);
    git(&["commit", "-q", "-m", "Initial commit"], path);
    let output = Command::new("git")
        .args(["branch", "--show-current"])
        .current_dir(path)
        .output()
        .expect("git");
    let base = String::from_utf8_lossy(&output.stdout).trim().to_string();
    git(&["checkout", "-q", "-b", "feature"], path);

    let config = RepoConfig {
        base_branch_candidates: vec![base],
        ..Default::default()
    };
    RepoContext::discover(path, &config).expect("discover")
}

#[test]
fn test_full_rollback_mid_sequence() {
    let tmp = temp_dir();
    let repo = feature_repo(tmp.path());

    // Simulate a run that stashed, created the branch and then died on it
    std::fs::write(tmp.path().join("lib.py"), "uncommitted\n").expect("write");
    let mut guard = WorktreeGuard::new(tmp.path());
    assert!(guard.snapshot().expect("snapshot"));
    git(
        &["checkout", "-q", "-B", "feature-auto-black-formatting", "HEAD"],
        tmp.path(),
    );

    let rollback = Rollback::new("feature-auto-black-formatting");
    rollback.branch_created();
    let failures = rollback.run(&repo, &mut guard);

    assert!(failures.is_empty(), "all steps should succeed: {failures:?}");
    assert_eq!(
        current_branch(tmp.path()).expect("branch").as_deref(),
        Some("feature")
    );
    assert!(!rev_exists(tmp.path(), "feature-auto-black-formatting"));
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("lib.py")).expect("read"),
        "uncommitted\n",
        "stashed changes should be back"
    );
}

#[test]
fn test_reentry_is_a_noop() {
    let tmp = temp_dir();
    let repo = feature_repo(tmp.path());

    std::fs::write(tmp.path().join("lib.py"), "uncommitted\n").expect("write");
    let mut guard = WorktreeGuard::new(tmp.path());
    assert!(guard.snapshot().expect("snapshot"));

    let rollback = Rollback::new("feature-auto-black-formatting");
    assert!(rollback.run(&repo, &mut guard).is_empty());
    assert!(
        !guard.has_snapshot(),
        "first rollback consumed the snapshot"
    );

    // A second invocation must not try to pop the stash again
    assert!(rollback.run(&repo, &mut guard).is_empty());
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("lib.py")).expect("read"),
        "uncommitted\n"
    );
}

#[test]
fn test_steps_it_never_took_are_skipped() {
    let tmp = temp_dir();
    let repo = feature_repo(tmp.path());

    // No snapshot, no branch created: rollback has nothing to do
    let mut guard = WorktreeGuard::new(tmp.path());
    let rollback = Rollback::new("feature-auto-black-formatting");
    let failures = rollback.run(&repo, &mut guard);
    assert!(failures.is_empty());
    assert_eq!(
        current_branch(tmp.path()).expect("branch").as_deref(),
        Some("feature")
    );
}
