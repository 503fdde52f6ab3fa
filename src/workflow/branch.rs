// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatting Branch Manager.
//!
//! ```text
//! checkout -B {branch}-auto-black-formatting  at merge-base
//!   format files that existed at base
//!   stage exactly those paths
//!   anything staged?  yes -> commit, remember id
//!                     no  -> skip commit
//! checkout original branch
//!   merge formatting branch (no-op when nothing committed)
//!     conflict -> merge --abort, fail
//! branch -D formatting branch   (the commit id survives for the push)
//! ```
//!
//! An existing formatting branch from an earlier run is reset to the merge
//! base, not reused; its old commits are superseded by this run's.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::types::BranchConfig;
use crate::error::{BbError, BbResult, GitError, WorkflowError};
use crate::formatter::Formatter;
use crate::git::cmd;

use super::inspect::RepoContext;

/// What the branch dance produced.
#[derive(Debug, Clone)]
pub struct BranchOutcome {
    /// Formatting branch name, derived from the feature branch.
    pub branch: String,
    /// An earlier run's branch existed and was reset.
    pub reused: bool,
    /// Commit id of the formatting commit; `None` when formatting changed
    /// nothing and no commit was created.
    pub commit: Option<String>,
}

/// Runs the formatting branch state machine for one batch of files.
pub struct BranchManager<'a> {
    repo: &'a RepoContext,
    config: &'a BranchConfig,
}

impl<'a> BranchManager<'a> {
    pub fn new(repo: &'a RepoContext, config: &'a BranchConfig) -> Self {
        Self { repo, config }
    }

    /// The formatting branch name for the current feature branch.
    #[must_use]
    pub fn branch_name(&self) -> String {
        format!("{}{}", self.repo.current_branch(), self.config.suffix)
    }

    /// Drive the full sequence: branch at merge base, format, commit, merge
    /// back, delete.
    ///
    /// `files` are repo-relative paths that existed at the merge base. The
    /// caller guarantees a clean working tree (snapshot already taken).
    ///
    /// # Errors
    ///
    /// Formatting failures and git failures propagate; a merge conflict is
    /// aborted first and surfaced as `WorkflowError::MergeConflict`. On any
    /// error the repository may be mid-sequence and needs rollback.
    pub async fn run(&self, formatter: &Formatter, files: &[PathBuf]) -> BbResult<BranchOutcome> {
        let branch = self.branch_name();
        let reused = cmd::rev_exists(self.repo.root(), &branch);
        if reused {
            debug!(%branch, "formatting branch exists, resetting to merge base");
        }

        cmd::checkout_reset(self.repo.root(), &branch, self.repo.merge_base())?;
        info!(%branch, at = %self.repo.merge_base(), "formatting branch checked out");

        if let Err(e) = formatter.format(self.repo.root(), files).await {
            // A failed batch may have rewritten some files before dying;
            // none of that partial output may leave this branch
            let _ = cmd::reset_hard(self.repo.root());
            return Err(e);
        }

        cmd::stage(self.repo.root(), files)?;
        let commit = if cmd::has_staged_changes(self.repo.root())? {
            cmd::commit(self.repo.root(), &self.config.commit_message)?;
            let id = cmd::rev_parse(self.repo.root(), "HEAD")?;
            info!(commit = %id, "formatting commit created");
            Some(id)
        } else {
            info!("formatting produced no changes at the merge base");
            None
        };

        cmd::checkout(self.repo.root(), self.repo.current_branch())?;
        if let Err(e) = cmd::merge(self.repo.root(), &branch) {
            return Err(self.surface_merge_conflict(&branch, e));
        }
        info!(%branch, "formatting branch merged");

        cmd::delete_branch(self.repo.root(), &branch)?;
        debug!(%branch, "local formatting branch deleted");

        Ok(BranchOutcome {
            branch,
            reused,
            commit,
        })
    }

    fn surface_merge_conflict(&self, branch: &str, e: BbError) -> BbError {
        // Leave the tree mergeable again before reporting; a half-done merge
        // would make every subsequent git operation fail.
        let _ = cmd::merge_abort(self.repo.root());
        match e {
            BbError::Git(g) => {
                let detail = match *g {
                    GitError::CommandFailed { message, .. } => message,
                    other => other.to_string(),
                };
                WorkflowError::MergeConflict {
                    branch: branch.to_string(),
                    detail,
                }
                .into()
            }
            other => other,
        }
    }
}
