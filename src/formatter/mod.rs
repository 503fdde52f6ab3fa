// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External formatter collaborator.
//!
//! ```text
//! Formatter::from_config(&FormatterConfig)
//!        |
//!        v
//!   format(cwd, files).await
//!        |
//!        v
//!   black [args...] file1.py file2.py ...
//!        |
//!   exit 0            exit != 0
//!   files mutated     FormattingFailed { raw diagnostics }
//!   in place          (whole batch is fatal)
//! ```
//!
//! The contract is all-or-nothing per invocation: any failure output aborts
//! the whole batch, because a partially-formatted branch cannot be safely
//! merged.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, trace};

use crate::config::types::FormatterConfig;
use crate::error::{BbResult, ProcessError, WorkflowError};

/// Resolved external formatter command.
pub struct Formatter {
    program: PathBuf,
    args: Vec<String>,
}

impl Formatter {
    /// Resolve the configured formatter through PATH.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if the command does not
    /// resolve.
    pub fn from_config(config: &FormatterConfig) -> BbResult<Self> {
        let program = which::which(&config.command).map_err(|_| ProcessError::ExecutableNotFound {
            name: config.command.clone(),
        })?;
        Ok(Self {
            program,
            args: config.args.clone(),
        })
    }

    /// The resolved program path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the formatter over a batch of files, mutating them in place.
    ///
    /// An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::FormattingFailed` carrying the formatter's raw
    /// diagnostic output if it exits non-zero, or `ProcessError::SpawnFailed`
    /// if it cannot be started.
    pub async fn format(&self, cwd: &Path, files: &[PathBuf]) -> BbResult<()> {
        if files.is_empty() {
            trace!("empty batch, nothing to format");
            return Ok(());
        }

        let command_line = self.command_line(files);
        debug!(cmd = %command_line, "exec formatter");

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(files)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|e| ProcessError::SpawnFailed {
                command: command_line.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if diagnostics.is_empty() {
                diagnostics = stdout;
            } else if !stdout.is_empty() {
                diagnostics.push('\n');
                diagnostics.push_str(&stdout);
            }
            return Err(WorkflowError::FormattingFailed {
                output: diagnostics,
            }
            .into());
        }

        trace!(count = files.len(), "formatted batch");
        Ok(())
    }

    fn command_line(&self, files: &[PathBuf]) -> String {
        let mut cmd = self.program.display().to_string();
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(arg);
        }
        for file in files {
            cmd.push(' ');
            cmd.push_str(&file.display().to_string());
        }
        cmd
    }
}

#[cfg(test)]
mod tests;
