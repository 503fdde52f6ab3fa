// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for blackbranch.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. blackbranch.toml (cwd)
//! 3. --config FILE (repeatable)
//! 4. BLACKBRANCH_* env vars
//! 5. CLI overrides (--quiet, --dry, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! Section and key are joined with a double underscore, so key names that
//! contain underscores remain reachable:
//!
//! ```text
//! BLACKBRANCH_GLOBAL__DRY=true              → global.dry = true
//! BLACKBRANCH_PR__TOKEN=ghp_...             → pr.token
//! BLACKBRANCH_GLOBAL__OUTPUT_LOG_LEVEL=4    → global.output_log_level
//! ```
//!
//! The knobs the workflow state machine depends on (base-branch candidate
//! list, branch-name suffix, commit message, retry/backoff) are all data here
//! rather than inline conditionals, so tests can exercise every permutation.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{BranchConfig, FormatterConfig, GlobalConfig, PrConfig, PushConfig, RepoConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Repository inspection options.
    pub repo: RepoConfig,
    /// Formatting-branch options.
    pub branch: BranchConfig,
    /// External formatter options.
    pub formatter: FormatterConfig,
    /// Background push options.
    pub push: PushConfig,
    /// Pull-request hosting options.
    pub pr: PrConfig,
}

impl Config {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields (the PR token) are hidden with a `[hidden]` marker.
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert("global.quiet".into(), self.global.quiet.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );

        options.insert(
            "repo.base_branch_candidates".into(),
            self.repo.base_branch_candidates.join(", "),
        );
        options.insert("repo.remote".into(), self.repo.remote.clone());
        options.insert("repo.sentinel_file".into(), self.repo.sentinel_file.clone());
        options.insert("repo.lock_file".into(), self.repo.lock_file.clone());

        options.insert("branch.suffix".into(), self.branch.suffix.clone());
        options.insert(
            "branch.commit_message".into(),
            self.branch.commit_message.clone(),
        );

        options.insert("formatter.command".into(), self.formatter.command.clone());
        if !self.formatter.args.is_empty() {
            options.insert("formatter.args".into(), self.formatter.args.join(" "));
        }
        options.insert(
            "formatter.extensions".into(),
            self.formatter.extensions.join(", "),
        );

        options.insert("push.retries".into(), self.push.retries.to_string());
        options.insert(
            "push.backoff_secs".into(),
            self.push.backoff_secs.to_string(),
        );

        options.insert("pr.enabled".into(), self.pr.enabled.to_string());
        options.insert("pr.api_base".into(), self.pr.api_base.clone());
        if self.pr.token.is_some() {
            options.insert("pr.token".into(), "[hidden]".into());
        }
        options.insert("pr.title".into(), self.pr.title.clone());

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
