// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git (stash, merge, push, history lookups)
//! ```

use crate::error::BbResult;
use std::path::{Path, PathBuf};

use super::backend::{GitMutation, ShellBackend};

/// Execute git command with standard environment variables.
/// ALWAYS sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
///
/// This is exposed for internal use by callers that need raw command
/// execution.
pub(crate) fn git_command(args: &[&str], cwd: &Path) -> BbResult<String> {
    ShellBackend::git_command(args, cwd)
}

/// Checkout a branch, tag, or commit.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn checkout(repo_path: &Path, what: &str) -> BbResult<()> {
    ShellBackend::checkout(repo_path, what)
}

/// Create or reset a branch at a commit and check it out.
///
/// # Errors
///
/// Returns a `GitError` if the checkout operation fails.
pub fn checkout_reset(repo_path: &Path, branch: &str, at: &str) -> BbResult<()> {
    ShellBackend::checkout_reset(repo_path, branch, at)
}

/// Delete a local branch, even if unmerged.
///
/// # Errors
///
/// Returns a `GitError` if the branch cannot be deleted.
pub fn delete_branch(repo_path: &Path, branch: &str) -> BbResult<()> {
    ShellBackend::delete_branch(repo_path, branch)
}

/// Stage exactly the given paths.
///
/// # Errors
///
/// Returns a `GitError` if staging fails.
pub fn stage(repo_path: &Path, paths: &[PathBuf]) -> BbResult<()> {
    ShellBackend::stage(repo_path, paths)
}

/// Create a commit from the index.
///
/// # Errors
///
/// Returns a `GitError` if the commit cannot be created.
pub fn commit(repo_path: &Path, message: &str) -> BbResult<()> {
    ShellBackend::commit(repo_path, message)
}

/// Merge a branch into the current branch.
///
/// # Errors
///
/// Returns a `GitError` carrying the conflict output if the merge fails.
pub fn merge(repo_path: &Path, branch: &str) -> BbResult<()> {
    ShellBackend::merge(repo_path, branch)
}

/// Abort an in-progress merge.
///
/// # Errors
///
/// Returns a `GitError` if the abort fails.
pub fn merge_abort(repo_path: &Path) -> BbResult<()> {
    ShellBackend::merge_abort(repo_path)
}

/// Stash all pending modifications, tracked and untracked.
///
/// # Errors
///
/// Returns a `GitError` if the stash cannot be created.
pub fn stash_push(repo_path: &Path, message: &str) -> BbResult<()> {
    ShellBackend::stash_push(repo_path, message)
}

/// Pop the most recent stash entry.
///
/// # Errors
///
/// Returns a `GitError` carrying the conflict output if reapplication
/// collides with current content.
pub fn stash_pop(repo_path: &Path) -> BbResult<()> {
    ShellBackend::stash_pop(repo_path)
}

/// Push a branch with `--force-with-lease`.
///
/// # Errors
///
/// Returns a `GitError` if the push fails.
pub fn push_force_with_lease(repo_path: &Path, remote: &str, branch: &str) -> BbResult<()> {
    ShellBackend::push_force_with_lease(repo_path, remote, branch)
}

// --- History queries that need the CLI ---

/// Resolve a revision to a full commit id.
///
/// # Errors
///
/// Returns a `GitError` if the revision does not resolve.
pub fn rev_parse(repo_path: &Path, rev: &str) -> BbResult<String> {
    git_command(&["rev-parse", "--verify", "--quiet", &format!("{rev}^{{commit}}")], repo_path)
}

/// Check whether a revision (branch, remote-tracking ref, commit) resolves.
#[must_use]
pub fn rev_exists(repo_path: &Path, rev: &str) -> bool {
    rev_parse(repo_path, rev).is_ok()
}

/// Compute the common ancestor of two revisions.
///
/// # Errors
///
/// Returns a `GitError` if the revisions share no ancestor.
pub fn merge_base(repo_path: &Path, a: &str, b: &str) -> BbResult<String> {
    git_command(&["merge-base", a, b], repo_path)
}

/// Check whether a path has retrievable content at a commit.
///
/// `git cat-file -e <commit>:<path>` exits zero only when the object exists
/// in that tree.
#[must_use]
pub fn path_exists_at(repo_path: &Path, commit: &str, relative: &str) -> bool {
    git_command(&["cat-file", "-e", &format!("{commit}:{relative}")], repo_path).is_ok()
}

/// Check whether the index differs from HEAD (anything staged to commit).
///
/// # Errors
///
/// Returns a `GitError` if the diff check itself fails.
pub fn has_staged_changes(repo_path: &Path) -> BbResult<bool> {
    use crate::error::{BbError, GitError};

    // --quiet exits 1 on a diff, which surfaces as CommandFailed with an
    // empty message; anything else is a real failure.
    match git_command(&["diff", "--cached", "--quiet"], repo_path) {
        Ok(_) => Ok(false),
        Err(BbError::Git(g))
            if matches!(&*g, GitError::CommandFailed { message, .. } if message.is_empty()) =>
        {
            Ok(true)
        }
        Err(e) => Err(e),
    }
}

/// Discard every tracked modification, returning the tree to HEAD.
///
/// # Errors
///
/// Returns a `GitError` if the reset fails.
pub fn reset_hard(repo_path: &Path) -> BbResult<()> {
    git_command(&["reset", "--hard", "-q"], repo_path)?;
    Ok(())
}

/// Locate the repository's git directory (handles linked worktrees, where
/// `.git` is a file).
///
/// # Errors
///
/// Returns a `GitError` if the lookup fails.
pub fn git_dir(repo_path: &Path) -> BbResult<PathBuf> {
    git_command(&["rev-parse", "--absolute-git-dir"], repo_path).map(PathBuf::from)
}

/// Get the fetch URL of a remote.
///
/// # Errors
///
/// Returns a `GitError` if the remote does not exist.
pub fn remote_url(repo_path: &Path, remote: &str) -> BbResult<String> {
    git_command(&["remote", "get-url", remote], repo_path)
}
