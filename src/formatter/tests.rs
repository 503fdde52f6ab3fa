// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Formatter;
use crate::config::types::FormatterConfig;
use crate::error::BbError;
use std::path::PathBuf;

fn config_for(command: &str, args: &[&str]) -> FormatterConfig {
    FormatterConfig {
        command: command.to_string(),
        args: args.iter().map(ToString::to_string).collect(),
        ..Default::default()
    }
}

#[test]
fn test_missing_executable_is_a_process_error() {
    let err = Formatter::from_config(&config_for("definitely-not-a-formatter-xyz", &[]))
        .err()
        .expect("resolution should fail");
    assert!(matches!(err, BbError::Process(_)), "got: {err}");
}

#[tokio::test]
async fn test_empty_batch_is_a_noop() {
    let formatter = Formatter::from_config(&config_for("false", &[])).expect("resolve");
    let tmp = tempfile::tempdir().expect("tempdir");
    // `false` would fail if invoked; an empty batch must never invoke it
    formatter
        .format(tmp.path(), &[])
        .await
        .expect("empty batch should succeed");
}

#[tokio::test]
async fn test_successful_batch() {
    let formatter = Formatter::from_config(&config_for("true", &[])).expect("resolve");
    let tmp = tempfile::tempdir().expect("tempdir");
    formatter
        .format(tmp.path(), &[PathBuf::from("a.py")])
        .await
        .expect("true always succeeds");
}

#[tokio::test]
async fn test_failure_carries_raw_diagnostics() {
    let formatter = Formatter::from_config(&config_for(
        "sh",
        &["-c", "echo 'error: cannot format a.py' >&2; exit 1", "sh"],
    ))
    .expect("resolve");
    let tmp = tempfile::tempdir().expect("tempdir");

    let err = formatter
        .format(tmp.path(), &[PathBuf::from("a.py")])
        .await
        .expect_err("exit 1 should fail the batch");
    assert!(
        err.to_string().contains("cannot format a.py"),
        "raw formatter output should be preserved, got: {err}"
    );
    assert!(matches!(err, BbError::Workflow(_)));
}
