// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for blackbranch using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! blackbranch [global options] <command>
//! format [files...]
//! clear-error
//! options
//! version
//! ```

pub mod format;
pub mod global;


use crate::cli::format::FormatArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Review-clean automatic black formatting.
///
/// Splits mechanical formatting churn away from a feature branch.
#[derive(Debug, Parser)]
#[command(
    name = "blackbranch",
    author,
    version,
    about = "Review-clean automatic black formatting",
    long_about = "blackbranch Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Formats files with black while keeping the mechanical churn\n\
                  out of the feature branch's review diff: formatting of files\n\
                  that existed at the merge base lands as a single commit on a\n\
                  separate branch, merged back and pushed for its own pull\n\
                  request. Files new since the merge base are formatted in\n\
                  place. See `blackbranch <command> --help` for details.",
    after_help = "CONFIG FILES:\n\n\
                  By default, blackbranch looks for `blackbranch.toml` in the\n\
                  current directory. Additional files can be specified with\n\
                  --config and are loaded afterwards, overriding it. Use\n\
                  --no-default-config to disable auto detection and only use\n\
                  --config. Environment variables prefixed BLACKBRANCH_\n\
                  override files; CLI flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values after merging every source.
    Options,

    /// Formats files, isolating the churn for already-reviewed code on a
    /// dedicated branch.
    Format(FormatArgs),

    /// Removes the unresolved error record so runs can resume.
    #[command(name = "clear-error")]
    ClearError,

    /// Internal re-entry point for the detached background worker; reads
    /// its task from stdin.
    #[command(name = "push-worker", hide = true)]
    PushWorker,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
