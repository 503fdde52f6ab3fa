// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ErrorRecord, ErrorStore, format_utc};
use crate::error::BbError;
use std::path::Path;

fn sample_record() -> ErrorRecord {
    ErrorRecord {
        timestamp: 1_756_000_000,
        branch: "feature".to_string(),
        operation: "merge formatting branch".to_string(),
        detail: "CONFLICT (content): Merge conflict in lib.py".to_string(),
        working_dir: "/work/repo".to_string(),
    }
}

#[test]
fn test_format_utc_known_instants() {
    assert_eq!(format_utc(0), "1970-01-01 00:00:00");
    assert_eq!(format_utc(1_756_000_000), "2025-08-24 01:46:40");
}

#[test]
fn test_record_render_is_complete() {
    let rendered = sample_record().render();
    insta::assert_snapshot!(rendered, @r"
    blackbranch error record
    ========================

    time:       2025-08-24 01:46:40 UTC
    branch:     feature
    operation:  merge formatting branch
    directory:  /work/repo

    error:
    CONFLICT (content): Merge conflict in lib.py

    This file blocks every blackbranch run. Investigate the failure,
    then delete it (or run `blackbranch clear-error`) to resume.
    ");
}

#[test]
fn test_store_round_trip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ErrorStore::new(tmp.path(), ".blackbranch-error");

    assert!(!store.has_unresolved_error());
    store.record(&sample_record()).expect("record");
    assert!(store.has_unresolved_error());

    let text = store.read().expect("read");
    assert!(text.contains("merge formatting branch"));
    assert!(text.contains("CONFLICT"));

    assert!(store.clear().expect("clear"));
    assert!(!store.has_unresolved_error());
    assert!(!store.clear().expect("second clear"), "nothing left to clear");
}

#[test]
fn test_record_never_overwrites() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ErrorStore::new(tmp.path(), ".blackbranch-error");
    store.record(&sample_record()).expect("first record");

    let mut second = sample_record();
    second.operation = "push formatting branch".to_string();
    let err = store.record(&second).expect_err("second record must fail");
    assert!(matches!(err, BbError::Sentinel(_)), "got: {err}");

    // The first record is untouched
    let text = store.read().expect("read");
    assert!(text.contains("merge formatting branch"));
    assert!(!text.contains("push formatting branch"));
}

#[test]
fn test_store_path_is_repo_root_joined() {
    let store = ErrorStore::new(Path::new("/repo"), ".blackbranch-error");
    assert_eq!(store.path(), Path::new("/repo/.blackbranch-error"));
}
