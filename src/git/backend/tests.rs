// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitQuery, GixBackend, ShellBackend};
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

fn init_repo_with_commit(path: &Path) {
    git(&["init", "--quiet"], path);
    git(&["config", "user.email", "test@example.com"], path);
    git(&["config", "user.name", "Test"], path);
    git(
        &["commit", "--allow-empty", "-m", "Initial commit", "--quiet"],
        path,
    );
}

#[test]
fn test_is_git_repo_agrees_between_backends() {
    let repo = temp_dir();
    init_repo_with_commit(repo.path());
    let plain = temp_dir();

    assert!(GixBackend::is_git_repo(repo.path()));
    assert!(ShellBackend::is_git_repo(repo.path()));
    assert!(!GixBackend::is_git_repo(plain.path()));
    assert!(!ShellBackend::is_git_repo(plain.path()));
}

#[test]
fn test_current_branch_detached_head_is_none() {
    let repo = temp_dir();
    init_repo_with_commit(repo.path());

    let attached = GixBackend::current_branch(repo.path()).expect("current_branch");
    assert!(attached.is_some(), "fresh repo should be on a branch");

    git(
        &["-c", "advice.detachedHead=false", "checkout", "-q", "HEAD^{commit}"],
        repo.path(),
    );
    let detached = GixBackend::current_branch(repo.path()).expect("current_branch");
    assert_eq!(detached, None, "detached HEAD should report no branch");
}

#[test]
fn test_has_uncommitted_changes_sees_untracked() {
    let repo = temp_dir();
    init_repo_with_commit(repo.path());

    assert!(
        !GixBackend::has_uncommitted_changes(repo.path()).expect("status"),
        "fresh repo should be clean"
    );

    std::fs::write(repo.path().join("scratch.py"), "x=1\n").expect("write");
    assert!(
        GixBackend::has_uncommitted_changes(repo.path()).expect("status"),
        "untracked files count as uncommitted"
    );
}

#[test]
fn test_repo_root_from_subdirectory() {
    let repo = temp_dir();
    init_repo_with_commit(repo.path());
    let sub = repo.path().join("pkg");
    std::fs::create_dir_all(&sub).expect("mkdir");

    let root = GixBackend::repo_root(&sub).expect("repo_root");
    assert_eq!(
        root.canonicalize().expect("canonicalize"),
        repo.path().canonicalize().expect("canonicalize")
    );
}

#[test]
fn test_git_command_failure_carries_stderr() {
    let repo = temp_dir();
    init_repo_with_commit(repo.path());

    let err = ShellBackend::git_command(&["checkout", "no-such-branch"], repo.path())
        .expect_err("checkout of missing branch should fail");
    let text = err.to_string();
    assert!(
        text.contains("no-such-branch"),
        "error should carry git's own diagnostic, got: {text}"
    );
}
