// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{RepoContext, find_base_branch, validate_repository};
use crate::config::types::RepoConfig;
use crate::error::{BbError, RepoError};
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

fn init_repo(path: &Path) -> String {
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
        .expect("failed to run git");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn config_with_base(base: &str) -> RepoConfig {
    RepoConfig {
        base_branch_candidates: vec![base.to_string()],
        ..Default::default()
    }
}

#[test]
fn test_not_a_repository() {
    let tmp = temp_dir();
    let err = validate_repository(tmp.path()).expect_err("plain dir is not a repo");
    assert!(
        matches!(&err, BbError::Repo(r) if matches!(**r, RepoError::NotARepository { .. })),
        "got: {err}"
    );
}

#[test]
fn test_discover_on_feature_branch() {
    let tmp = temp_dir();
    let base = init_repo(tmp.path());
    let base_commit = {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(tmp.path())
            .output()
            .expect("git");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    };

    git(&["checkout", "-q", "-b", "feature"], tmp.path());
    std::fs::write(tmp.path().join("feature.py"), "y = 2\n").expect("write");
    git(&["add", "feature.py"], tmp.path());
    git(&["commit", "-q", "-m", "feature work"], tmp.path());

    let ctx = RepoContext::discover(tmp.path(), &config_with_base(&base)).expect("discover");
    assert_eq!(ctx.current_branch(), "feature");
    assert_eq!(ctx.base_branch(), base);
    assert_eq!(ctx.base_commit(), base_commit);
    assert_eq!(ctx.merge_base(), base_commit, "base did not move, so it is the merge base");
}

#[test]
fn test_detached_head_is_rejected() {
    let tmp = temp_dir();
    let base = init_repo(tmp.path());
    git(&["checkout", "-q", "--detach", "HEAD"], tmp.path());

    let err = RepoContext::discover(tmp.path(), &config_with_base(&base))
        .expect_err("detached HEAD must be rejected");
    assert!(
        matches!(&err, BbError::Repo(r) if matches!(**r, RepoError::DetachedHead)),
        "got: {err}"
    );
}

#[test]
fn test_base_branch_probe_order() {
    let tmp = temp_dir();
    let base = init_repo(tmp.path());

    let candidates = vec![
        "does-not-exist".to_string(),
        base.clone(),
        "also-missing".to_string(),
    ];
    let found = find_base_branch(tmp.path(), &candidates).expect("probe");
    assert_eq!(found, base, "first resolving candidate wins");
}

#[test]
fn test_no_base_branch_names_every_candidate() {
    let tmp = temp_dir();
    init_repo(tmp.path());

    let candidates = vec!["alpha".to_string(), "beta".to_string()];
    let err = find_base_branch(tmp.path(), &candidates).expect_err("none resolve");
    let text = err.to_string();
    assert!(text.contains("alpha") && text.contains("beta"), "got: {text}");
}
