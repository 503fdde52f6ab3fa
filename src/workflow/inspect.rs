// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository Inspector.
//!
//! ```text
//! RepoContext::discover(cwd, &RepoConfig)
//!   validate_repository   NotARepository
//!   current_branch        DetachedHead
//!   find_base_branch      NoBaseBranch (table-driven probe)
//!   merge_base            MergeBaseUnavailable
//!        |
//!        v
//!   RepoContext { root, branch, base_branch, base_commit, merge_base }
//!   computed once per run, immutable afterward
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::RepoConfig;
use crate::error::{BbResult, RepoError};
use crate::git::{cmd, query};

/// Everything the pipeline needs to know about the repository, computed once
/// per run and immutable afterward.
#[derive(Debug, Clone)]
pub struct RepoContext {
    root: PathBuf,
    current_branch: String,
    base_branch: String,
    base_commit: String,
    merge_base: String,
}

impl RepoContext {
    /// Inspect the repository around `cwd` and answer every environment
    /// question up front.
    ///
    /// # Errors
    ///
    /// Returns a precondition `RepoError` if `cwd` is not inside a work tree,
    /// HEAD is detached, no base branch resolves, or the histories share no
    /// ancestor. No mutation has happened at any of these points.
    pub fn discover(cwd: &Path, config: &RepoConfig) -> BbResult<Self> {
        let root = validate_repository(cwd)?;
        let current_branch = current_branch(&root)?;
        let base_branch = find_base_branch(&root, &config.base_branch_candidates)?;
        let base_commit = cmd::rev_parse(&root, &base_branch)?;
        let merge_base = merge_base(&root, &base_branch)?;

        debug!(
            branch = %current_branch,
            base = %base_branch,
            merge_base = %merge_base,
            "repository inspected"
        );

        Ok(Self {
            root,
            current_branch,
            base_branch,
            base_commit,
            merge_base,
        })
    }

    /// Repository work-tree root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The branch the user is on.
    #[must_use]
    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    /// The resolved base branch name.
    #[must_use]
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    /// Commit id the base branch points at.
    #[must_use]
    pub fn base_commit(&self) -> &str {
        &self.base_commit
    }

    /// Common ancestor of HEAD and the base branch.
    #[must_use]
    pub fn merge_base(&self) -> &str {
        &self.merge_base
    }
}

/// Fail with `NotARepository` unless `cwd` is inside a work tree; returns the
/// work-tree root otherwise.
///
/// # Errors
///
/// Returns `RepoError::NotARepository`.
pub fn validate_repository(cwd: &Path) -> BbResult<PathBuf> {
    if !query::is_git_repo(cwd) {
        return Err(RepoError::NotARepository {
            path: cwd.display().to_string(),
        }
        .into());
    }
    query::repo_root(cwd)
}

/// The active branch name; `DetachedHead` if HEAD is not attached.
///
/// # Errors
///
/// Returns `RepoError::DetachedHead`, or a `GitError` if head resolution
/// fails outright.
pub fn current_branch(root: &Path) -> BbResult<String> {
    query::current_branch(root)?.ok_or_else(|| RepoError::DetachedHead.into())
}

/// Probe the candidate list in priority order; the first name that resolves
/// to a commit wins.
///
/// # Errors
///
/// Returns `RepoError::NoBaseBranch` naming every candidate tried.
pub fn find_base_branch(root: &Path, candidates: &[String]) -> BbResult<String> {
    for candidate in candidates {
        if cmd::rev_exists(root, candidate) {
            return Ok(candidate.clone());
        }
    }
    Err(RepoError::NoBaseBranch {
        tried: candidates.join(", "),
    }
    .into())
}

/// Common ancestor of HEAD and the base branch.
///
/// # Errors
///
/// Returns `RepoError::MergeBaseUnavailable` when the histories are
/// unrelated.
pub fn merge_base(root: &Path, base_branch: &str) -> BbResult<String> {
    cmd::merge_base(root, "HEAD", base_branch).map_err(|_| {
        RepoError::MergeBaseUnavailable {
            base: base_branch.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests;
