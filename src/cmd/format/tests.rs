// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::run_format_in;
use crate::cli::format::FormatArgs;
use crate::config::Config;
use crate::sentinel::{ErrorRecord, ErrorStore};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

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

fn feature_repo(path: &Path) {
    git(&["init", "--quiet"], path);
    git(&["config", "user.email", "test@example.com"], path);
    git(&["config", "user.name", "Test"], path);
    std::fs::write(path.join("base.py"), "x=1\n").expect("write");
    git(&["add", "base.py"], path);
    git(&["commit", "-q", "-m", "Initial commit"], path);
    git(&["checkout", "-q", "-b", "feature"], path);
    std::fs::write(path.join("new.py"), "y=2\n").expect("write");
    git(&["add", "new.py"], path);
    git(&["commit", "-q", "-m", "feature work"], path);
}

fn rewriting_config() -> Config {
    let mut config = Config::default();
    config.formatter.command = "sh".to_string();
    config.formatter.args = vec![
        "-c".to_string(),
        "for f in \"$@\"; do printf 'formatted\\n' > \"$f\"; done".to_string(),
        "sh".to_string(),
    ];
    config
}

fn args_for(files: &[&str]) -> FormatArgs {
    FormatArgs {
        files: files.iter().map(PathBuf::from).collect(),
        no_pr: false,
        // No remote in these fixtures; the workflow itself is under test
        no_push: true,
    }
}

#[tokio::test]
async fn test_sentinel_gate_blocks_the_run() {
    let tmp = temp_dir();
    feature_repo(tmp.path());
    let config = rewriting_config();

    let store = ErrorStore::new(tmp.path(), &config.repo.sentinel_file);
    store
        .record(&ErrorRecord::now("feature", "push", "boom", tmp.path()))
        .expect("record");

    let err = run_format_in(
        tmp.path(),
        &args_for(&["base.py"]),
        &config,
        &CancellationToken::new(),
    )
    .await
    .expect_err("gate must block");
    assert!(err.to_string().contains("blocks this run"), "got: {err}");

    // Blocked before any mutation
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("base.py")).expect("read"),
        "x=1\n"
    );
}

#[tokio::test]
async fn test_format_command_end_to_end_without_push() {
    let tmp = temp_dir();
    feature_repo(tmp.path());

    run_format_in(
        tmp.path(),
        &args_for(&["base.py", "new.py"]),
        &rewriting_config(),
        &CancellationToken::new(),
    )
    .await
    .expect("run");

    assert_eq!(
        std::fs::read_to_string(tmp.path().join("base.py")).expect("read"),
        "formatted\n"
    );
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("new.py")).expect("read"),
        "formatted\n"
    );
    assert!(!tmp.path().join(".blackbranch-error").exists());
}

// The run token must react to the polite external-timeout signal, not only
// to Ctrl-C.
#[cfg(unix)]
#[tokio::test]
async fn test_terminate_signal_cancels_the_run_token() {
    // Listeners are registered before shutdown_token returns
    let token = super::shutdown_token().expect("token");

    let status = Command::new("sh")
        .args(["-c", &format!("kill -TERM {}", std::process::id())])
        .status()
        .expect("kill");
    assert!(status.success());

    tokio::time::timeout(std::time::Duration::from_secs(5), token.cancelled())
        .await
        .expect("SIGTERM must cancel the run token");
}

#[tokio::test]
async fn test_gate_lifts_after_clear() {
    let tmp = temp_dir();
    feature_repo(tmp.path());
    let config = rewriting_config();

    let store = ErrorStore::new(tmp.path(), &config.repo.sentinel_file);
    store
        .record(&ErrorRecord::now("feature", "push", "boom", tmp.path()))
        .expect("record");
    assert!(store.clear().expect("clear"));

    run_format_in(
        tmp.path(),
        &args_for(&["base.py"]),
        &config,
        &CancellationToken::new(),
    )
    .await
    .expect("cleared record must unblock the run");
}
