// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `format` command.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the format command.
#[derive(Debug, Clone, Args)]
pub struct FormatArgs {
    /// Files to format. Paths may be absolute or relative to the current
    /// directory; anything outside the repository is reported and skipped.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Skips drafting a pull request; the formatting branch is still pushed.
    #[arg(long = "no-pr")]
    pub no_pr: bool,

    /// Skips the background push and pull request entirely. The formatting
    /// commit stays merged locally.
    #[arg(long = "no-push")]
    pub no_push: bool,
}
