// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository run lock.
//!
//! One mutating run at a time per repository. The lock is a file under the
//! git directory holding the owner's pid; a lock whose owner is no longer
//! alive is broken automatically, so a crashed run does not wedge the
//! repository forever.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{BbResult, WorkflowError};

/// Held for the duration of one mutating run; released on drop.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    armed: bool,
}

impl RunLock {
    /// Acquire the lock under `git_dir`, breaking it first if the recorded
    /// owner process is gone.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::LockHeld` if another live run owns the lock,
    /// or an io error if the lock file cannot be created.
    pub fn acquire(git_dir: &Path, file_name: &str) -> BbResult<Self> {
        let path = git_dir.join(file_name);

        match Self::try_create(&path) {
            Ok(lock) => Ok(lock),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                let owner = std::fs::read_to_string(&path)
                    .ok()
                    .and_then(|s| s.trim().parse::<u32>().ok());
                if let Some(pid) = owner {
                    if process_alive(pid) {
                        return Err(WorkflowError::LockHeld {
                            path: path.display().to_string(),
                            pid,
                        }
                        .into());
                    }
                    warn!(pid, path = %path.display(), "breaking stale lock, owner is gone");
                } else {
                    warn!(path = %path.display(), "breaking unreadable lock file");
                }
                std::fs::remove_file(&path)?;
                Ok(Self::try_create(&path)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn try_create(path: &Path) -> std::io::Result<Self> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        writeln!(file, "{}", std::process::id())?;
        debug!(path = %path.display(), "run lock acquired");
        Ok(Self {
            path: path.to_path_buf(),
            armed: true,
        })
    }

    /// The lock file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to release run lock");
            }
        }
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // No cheap portable liveness probe; treat the owner as alive and let the
    // user remove the file by hand.
    true
}
