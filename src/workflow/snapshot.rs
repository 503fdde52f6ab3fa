// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-Tree Guard.
//!
//! ```text
//! WorktreeGuard::new(root)
//!   snapshot()   dirty tree  -> stash push --include-untracked, record kept
//!                clean tree  -> no-op, nothing recorded
//!   restore()    record kept -> stash pop
//!                no record   -> no-op (safe to call unconditionally)
//! ```
//!
//! The stash round-trip law: every snapshot taken is restored exactly once,
//! on success and on every failure path alike. At most one snapshot is
//! outstanding per guard.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{BbError, BbResult, GitError, WorkflowError};
use crate::git::backend::{GitQuery, GixBackend};
use crate::git::cmd;

const STASH_MESSAGE: &str = "blackbranch: pre-format snapshot";

/// Guards the user's uncommitted work across the branch dance.
pub struct WorktreeGuard {
    root: PathBuf,
    outstanding: bool,
}

impl WorktreeGuard {
    /// A guard for the repository rooted at `root`, with no snapshot taken.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            outstanding: false,
        }
    }

    /// Whether a snapshot is waiting to be restored.
    #[must_use]
    pub fn has_snapshot(&self) -> bool {
        self.outstanding
    }

    /// Stash pending modifications, tracked and untracked, if any exist.
    ///
    /// Returns whether a snapshot was actually taken; a clean tree records
    /// nothing and the later [`restore`](Self::restore) is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check or the stash fails. Taking a
    /// second snapshot while one is outstanding is a logic error and fails
    /// without touching the repository.
    pub fn snapshot(&mut self) -> BbResult<bool> {
        if self.outstanding {
            return Err(GitError::CommandFailed {
                command: "stash push".to_string(),
                message: "a snapshot is already outstanding".to_string(),
            }
            .into());
        }
        if !GixBackend::has_uncommitted_changes(&self.root)? {
            debug!("working tree clean, no snapshot needed");
            return Ok(false);
        }
        cmd::stash_push(&self.root, STASH_MESSAGE)?;
        self.outstanding = true;
        info!("uncommitted changes stashed");
        Ok(true)
    }

    /// Reapply the snapshot, if one is outstanding. Safe to call from any
    /// failure path without checking first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::RestoreConflict` if the stash collides with
    /// current content; git leaves conflict markers in place and keeps the
    /// stash entry, so nothing is lost. The guard counts the snapshot as
    /// consumed either way so rollback never pops twice.
    pub fn restore(&mut self) -> BbResult<()> {
        if !self.outstanding {
            debug!("no snapshot to restore");
            return Ok(());
        }
        self.outstanding = false;
        match cmd::stash_pop(&self.root) {
            Ok(()) => {
                info!("uncommitted changes restored");
                Ok(())
            }
            Err(BbError::Git(g)) => {
                let detail = match *g {
                    GitError::CommandFailed { message, .. } => message,
                    other => other.to_string(),
                };
                Err(WorkflowError::RestoreConflict { detail }.into())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests;
