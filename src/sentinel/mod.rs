// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error State Store: a persistent sentinel recording unresolved failures.
//!
//! ```text
//! ErrorStore::new(repo_root, file_name)
//!   .has_unresolved_error()   gate: blocks every run while present
//!   .read()                   printed verbatim on blocked runs
//!   .record(&ErrorRecord)     create-new only, never overwrites
//!   .clear()                  explicit user action only
//! ```
//!
//! Fail-closed by design: silent partial failures are worse than blocking
//! all future runs until a human has looked at the record.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::error::{BbResult, SentinelError};

/// One unresolved failure, persisted human-readable at the repository root.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    /// Seconds since the unix epoch at the time of failure.
    pub timestamp: u64,
    /// Branch the repository was on when the failure happened.
    pub branch: String,
    /// Description of the failing operation.
    pub operation: String,
    /// The underlying error text, verbatim.
    pub detail: String,
    /// Working directory of the failing process.
    pub working_dir: String,
}

impl ErrorRecord {
    /// Capture a record for a failure happening now.
    #[must_use]
    pub fn now(branch: &str, operation: &str, detail: &str, working_dir: &Path) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            timestamp,
            branch: branch.to_string(),
            operation: operation.to_string(),
            detail: detail.to_string(),
            working_dir: working_dir.display().to_string(),
        }
    }

    /// Render the record as the sentinel file content.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "blackbranch error record");
        let _ = writeln!(out, "========================");
        let _ = writeln!(out);
        let _ = writeln!(out, "time:       {} UTC", format_utc(self.timestamp));
        let _ = writeln!(out, "branch:     {}", self.branch);
        let _ = writeln!(out, "operation:  {}", self.operation);
        let _ = writeln!(out, "directory:  {}", self.working_dir);
        let _ = writeln!(out);
        let _ = writeln!(out, "error:");
        let _ = writeln!(out, "{}", self.detail);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "This file blocks every blackbranch run. Investigate the failure,\n\
             then delete it (or run `blackbranch clear-error`) to resume."
        );
        out
    }
}

/// Format a unix timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Civil-from-days conversion; enough precision for a diagnostic record
/// without pulling in a date-time crate.
fn format_utc(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let mo = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if mo <= 2 { y + 1 } else { y };

    format!("{y:04}-{mo:02}-{d:02} {h:02}:{m:02}:{s:02}")
}

/// Handle to the sentinel file for one repository.
pub struct ErrorStore {
    path: PathBuf,
}

impl ErrorStore {
    /// Sentinel location for a repository root and configured file name.
    #[must_use]
    pub fn new(repo_root: &Path, file_name: &str) -> Self {
        Self {
            path: repo_root.join(file_name),
        }
    }

    /// The sentinel file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an unresolved record exists.
    #[must_use]
    pub fn has_unresolved_error(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored record verbatim.
    ///
    /// # Errors
    ///
    /// Returns a `SentinelError` if the file cannot be read.
    pub fn read(&self) -> BbResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            SentinelError::Io {
                path: self.path.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    /// Persist a new record. Refuses to overwrite an existing one so a
    /// double failure leaves both visible (the first on disk, the second
    /// loud in the caller's logs).
    ///
    /// # Errors
    ///
    /// Returns `SentinelError::AlreadyExists` if a record is present, or a
    /// `SentinelError::Io` if the write fails.
    pub fn record(&self, record: &ErrorRecord) -> BbResult<()> {
        if self.path.exists() {
            warn!(path = %self.path.display(), "error record already exists, not overwriting");
            return Err(SentinelError::AlreadyExists {
                path: self.path.display().to_string(),
            }
            .into());
        }
        std::fs::write(&self.path, record.render()).map_err(|e| {
            SentinelError::Io {
                path: self.path.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    /// Delete the sentinel. Only ever called from the explicit user-invoked
    /// cleanup command, never from the happy path.
    ///
    /// Returns whether a record was actually removed.
    ///
    /// # Errors
    ///
    /// Returns a `SentinelError` if the file exists but cannot be deleted.
    pub fn clear(&self) -> BbResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path).map_err(|e| SentinelError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests;
