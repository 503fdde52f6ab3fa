// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Emergency rollback.
//!
//! Best effort, in order, each step independent of the previous one's
//! outcome:
//!
//! ```text
//! 1. merge --abort          (ignore failure, usually nothing in progress)
//! 2. checkout original      (skip when already there)
//! 3. branch -D formatting   (only if this run created it)
//! 4. stash pop snapshot     (only if one is outstanding)
//! ```
//!
//! Reentrant-safe: a second invocation is a no-op, so overlapping failure
//! paths cannot double-pop the snapshot or double-delete the branch.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::git::backend::{GitQuery, GixBackend};
use crate::git::cmd;

use super::inspect::RepoContext;
use super::snapshot::WorktreeGuard;

/// Tracks what this run has mutated, so rollback undoes exactly that much.
pub struct Rollback {
    entered: AtomicBool,
    branch_created: AtomicBool,
    formatting_branch: String,
}

impl Rollback {
    #[must_use]
    pub fn new(formatting_branch: &str) -> Self {
        Self {
            entered: AtomicBool::new(false),
            branch_created: AtomicBool::new(false),
            formatting_branch: formatting_branch.to_string(),
        }
    }

    /// Mark that the formatting branch now exists because of this run.
    pub fn branch_created(&self) {
        self.branch_created.store(true, Ordering::SeqCst);
    }

    /// Undo as much of this run's mutation as possible. Never fails; every
    /// step's failure is logged and the next step still runs. Collected
    /// failure text is returned for the error record.
    pub fn run(&self, repo: &RepoContext, guard: &mut WorktreeGuard) -> Vec<String> {
        if self.entered.swap(true, Ordering::SeqCst) {
            info!("rollback already performed, skipping");
            return Vec::new();
        }
        info!("rolling back");
        let mut failures = Vec::new();

        // Usually a no-op; only an interrupted merge leaves one in progress.
        let _ = cmd::merge_abort(repo.root());

        match GixBackend::current_branch(repo.root()) {
            Ok(Some(branch)) if branch == repo.current_branch() => {}
            _ => {
                if let Err(e) = cmd::checkout(repo.root(), repo.current_branch()) {
                    warn!(error = %e, "rollback: could not return to original branch");
                    failures.push(format!("checkout {}: {e}", repo.current_branch()));
                }
            }
        }

        if self.branch_created.load(Ordering::SeqCst)
            && cmd::rev_exists(repo.root(), &self.formatting_branch)
        {
            if let Err(e) = cmd::delete_branch(repo.root(), &self.formatting_branch) {
                warn!(error = %e, "rollback: could not delete formatting branch");
                failures.push(format!("delete {}: {e}", self.formatting_branch));
            }
        }

        if let Err(e) = guard.restore() {
            warn!(error = %e, "rollback: could not restore stashed changes");
            failures.push(format!("restore snapshot: {e}"));
        }

        if failures.is_empty() {
            info!("rollback complete");
        } else {
            warn!(steps = failures.len(), "rollback finished with failed steps");
        }
        failures
    }
}

#[cfg(test)]
mod tests;
