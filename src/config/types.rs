// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for blackbranch.
//!
//! ```text
//! Config: GlobalConfig, RepoConfig, BranchConfig,
//!         FormatterConfig, PushConfig, PrConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log every mutation instead of executing it.
    pub dry: bool,
    /// Suppress success output entirely; failures always print.
    pub quiet: bool,
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            quiet: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

/// Repository inspection options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Candidate base-branch names, probed in order. The first that resolves
    /// wins; remote-tracking names are allowed.
    pub base_branch_candidates: Vec<String>,
    /// Remote the formatting branch is pushed to.
    pub remote: String,
    /// Sentinel file name at the repository root (Error State Store).
    pub sentinel_file: String,
    /// Run-lock file name under `.git/`.
    pub lock_file: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            base_branch_candidates: vec![
                "main".to_string(),
                "master".to_string(),
                "origin/main".to_string(),
                "origin/master".to_string(),
            ],
            remote: "origin".to_string(),
            sentinel_file: ".blackbranch-error".to_string(),
            lock_file: "blackbranch.lock".to_string(),
        }
    }
}

/// Formatting-branch options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BranchConfig {
    /// Suffix appended to the current branch name to form the formatting
    /// branch name. Deterministic so re-runs reuse the same branch.
    pub suffix: String,
    /// Fixed, recognizable message for the single formatting commit.
    pub commit_message: String,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            suffix: "-auto-black-formatting".to_string(),
            commit_message: "Apply automatic black formatting".to_string(),
        }
    }
}

/// External formatter options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    /// Formatter executable. Resolved through PATH.
    pub command: String,
    /// Extra arguments passed before the file list.
    pub args: Vec<String>,
    /// Accepted file extensions (without dot). Anything else is invalid input.
    pub extensions: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            command: "black".to_string(),
            args: Vec::new(),
            extensions: vec!["py".to_string(), "pyi".to_string()],
        }
    }
}

/// Background push options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushConfig {
    /// Bounded number of push attempts on transient failure.
    pub retries: u32,
    /// Base backoff in seconds; attempt N sleeps N * `backoff_secs`.
    pub backoff_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff_secs: 2,
        }
    }
}

/// Pull-request hosting options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrConfig {
    /// Whether the coordinator drafts a pull request at all.
    pub enabled: bool,
    /// API base URL. Overridable so tests can point at a local mock.
    pub api_base: String,
    /// Bearer token. Usually set via `BLACKBRANCH_PR__TOKEN`.
    pub token: Option<String>,
    /// PR title template; `{branch}` is replaced with the feature branch.
    pub title: String,
    /// PR body template; `{branch}` and `{files}` are replaced.
    pub body: String,
}

impl Default for PrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: "https://api.github.com".to_string(),
            token: None,
            title: "Automatic black formatting for {branch}".to_string(),
            body: "Automatic formatting pass over:\n{files}\n\nGenerated for branch `{branch}`."
                .to_string(),
        }
    }
}
