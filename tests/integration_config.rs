// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.

use blackbranch::config::Config;
use blackbranch::config::loader::ConfigLoader;

#[test]
fn test_defaults_describe_the_standard_workflow() {
    let config = Config::default();
    assert_eq!(config.branch.suffix, "-auto-black-formatting");
    assert_eq!(config.branch.commit_message, "Apply automatic black formatting");
    assert_eq!(config.formatter.command, "black");
    assert_eq!(config.repo.sentinel_file, ".blackbranch-error");
    assert_eq!(
        config.repo.base_branch_candidates,
        vec!["main", "master", "origin/main", "origin/master"]
    );
    assert!(config.pr.enabled);
}

#[test]
fn test_file_layering_later_file_wins() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let base = tmp.path().join("blackbranch.toml");
    let extra = tmp.path().join("override.toml");
    std::fs::write(
        &base,
        "[push]\nretries = 7\n\n[branch]\nsuffix = \"-base\"\n",
    )
    .expect("write");
    std::fs::write(&extra, "[branch]\nsuffix = \"-override\"\n").expect("write");

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&extra)
        .build()
        .expect("build");

    assert_eq!(config.push.retries, 7, "kept from the first file");
    assert_eq!(config.branch.suffix, "-override", "second file wins");
}

#[test]
fn test_set_override_beats_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let file = tmp.path().join("blackbranch.toml");
    std::fs::write(&file, "[formatter]\ncommand = \"black\"\n").expect("write");

    let config = ConfigLoader::new()
        .add_toml_file(&file)
        .set("formatter.command", "ruff")
        .expect("set")
        .build()
        .expect("build");

    assert_eq!(config.formatter.command, "ruff");
}

#[test]
fn test_missing_required_file_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let result = ConfigLoader::new()
        .add_toml_file(tmp.path().join("nope.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_missing_optional_file_is_fine() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = ConfigLoader::new()
        .add_toml_file_optional(tmp.path().join("nope.toml"))
        .build()
        .expect("optional file may be absent");
    assert_eq!(config.formatter.command, "black");
}

#[test]
fn test_unknown_section_is_rejected() {
    let result = Config::parse("[surprise]\nkey = 1\n");
    assert!(result.is_err(), "unknown sections must not pass silently");
}

#[test]
fn test_options_listing_hides_the_token() {
    let config = Config::parse("[pr]\ntoken = \"ghp_secret\"\n").expect("parse");
    let lines = config.format_options();
    let rendered = lines.join("\n");
    assert!(!rendered.contains("ghp_secret"));
    assert!(rendered.contains("[hidden]"));
}
