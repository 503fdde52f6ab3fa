// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)  --> GixBackend (pure Rust gix)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{BbResult, GitError, GixError};
use std::path::{Path, PathBuf};

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without
/// modification.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get the repository work-tree root for a path inside it.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery fails or the repository
    /// is bare.
    fn repo_root(path: &Path) -> BbResult<PathBuf>;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> BbResult<Option<String>>;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or status check fails.
    fn has_uncommitted_changes(path: &Path) -> BbResult<bool>;
}

// --- Mutation Trait (Write operations) ---

/// Git mutation operations that modify repository state.
///
/// These go through the shell git CLI: stash, merge and push semantics are
/// exactly the ones users already know, and conflict output comes back
/// verbatim for error records.
pub trait GitMutation {
    /// Checkout a branch, tag, or commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout(repo_path: &Path, what: &str) -> BbResult<()>;

    /// Create the branch rooted at `at`, or reset it there if it already
    /// exists, and check it out (`git checkout -B`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout operation fails.
    fn checkout_reset(repo_path: &Path, branch: &str, at: &str) -> BbResult<()>;

    /// Delete a local branch, even if unmerged (`git branch -D`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch cannot be deleted.
    fn delete_branch(repo_path: &Path, branch: &str) -> BbResult<()>;

    /// Stage exactly the given paths.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging fails or a path is not valid UTF-8.
    fn stage(repo_path: &Path, paths: &[PathBuf]) -> BbResult<()>;

    /// Create a commit from the index with the given message.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit cannot be created.
    fn commit(repo_path: &Path, message: &str) -> BbResult<()>;

    /// Merge `branch` into the current branch without opening an editor.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` carrying the conflict output if the merge fails.
    fn merge(repo_path: &Path, branch: &str) -> BbResult<()>;

    /// Abort an in-progress merge.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if no merge is in progress or the abort fails.
    fn merge_abort(repo_path: &Path) -> BbResult<()>;

    /// Stash all pending modifications, tracked and untracked, under a
    /// recognizable message.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the stash cannot be created.
    fn stash_push(repo_path: &Path, message: &str) -> BbResult<()>;

    /// Pop the most recent stash entry back onto the working tree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` carrying the conflict output if reapplication
    /// collides with current content.
    fn stash_pop(repo_path: &Path) -> BbResult<()>;

    /// Push a branch using the conflict-safe force mode
    /// (`--force-with-lease`), never a plain force overwrite.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push fails.
    fn push_force_with_lease(repo_path: &Path, remote: &str, branch: &str) -> BbResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides efficient read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn repo_root(path: &Path) -> BbResult<PathBuf> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let workdir = repo
            .workdir()
            .ok_or(GitError::Gix(GixError::BareRepository))?;
        Ok(workdir.to_path_buf())
    }

    fn current_branch(path: &Path) -> BbResult<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_uncommitted_changes(path: &Path) -> BbResult<bool> {
        use gix::status::UntrackedFiles;

        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using git CLI.
///
/// Required for stash/merge/push semantics and for history lookups at
/// arbitrary commits.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and
    /// `GIT_TERMINAL_PROMPT=0` so nothing ever blocks on a prompt.
    ///
    /// On failure the error message carries stderr, falling back to stdout
    /// (merge conflicts report on stdout).
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> BbResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message,
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn path_arg(path: &Path, command: &str) -> BbResult<String> {
        path.to_str()
            .map(str::to_owned)
            .ok_or_else(|| {
                GitError::CommandFailed {
                    command: command.to_string(),
                    message: "invalid path".to_string(),
                }
                .into()
            })
    }
}

impl GitMutation for ShellBackend {
    fn checkout(repo_path: &Path, what: &str) -> BbResult<()> {
        Self::git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", what],
            repo_path,
        )?;
        Ok(())
    }

    fn checkout_reset(repo_path: &Path, branch: &str, at: &str) -> BbResult<()> {
        Self::git_command(&["checkout", "-q", "-B", branch, at], repo_path)?;
        Ok(())
    }

    fn delete_branch(repo_path: &Path, branch: &str) -> BbResult<()> {
        Self::git_command(&["branch", "-q", "-D", branch], repo_path)?;
        Ok(())
    }

    fn stage(repo_path: &Path, paths: &[PathBuf]) -> BbResult<()> {
        let mut args = vec!["add".to_string(), "--".to_string()];
        for path in paths {
            args.push(Self::path_arg(path, "git add")?);
        }
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        Self::git_command(&arg_refs, repo_path)?;
        Ok(())
    }

    fn commit(repo_path: &Path, message: &str) -> BbResult<()> {
        Self::git_command(&["commit", "-q", "-m", message], repo_path)?;
        Ok(())
    }

    fn merge(repo_path: &Path, branch: &str) -> BbResult<()> {
        Self::git_command(&["merge", "--no-edit", "-q", branch], repo_path)?;
        Ok(())
    }

    fn merge_abort(repo_path: &Path) -> BbResult<()> {
        Self::git_command(&["merge", "--abort"], repo_path)?;
        Ok(())
    }

    fn stash_push(repo_path: &Path, message: &str) -> BbResult<()> {
        Self::git_command(
            &["stash", "push", "-q", "--include-untracked", "-m", message],
            repo_path,
        )?;
        Ok(())
    }

    fn stash_pop(repo_path: &Path) -> BbResult<()> {
        Self::git_command(&["stash", "pop", "-q"], repo_path)?;
        Ok(())
    }

    fn push_force_with_lease(repo_path: &Path, remote: &str, branch: &str) -> BbResult<()> {
        Self::git_command(
            &["push", "-q", "--force-with-lease", remote, branch],
            repo_path,
        )?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--is-inside-work-tree"], path).is_ok()
    }

    fn repo_root(path: &Path) -> BbResult<PathBuf> {
        let root = Self::git_command(&["rev-parse", "--show-toplevel"], path)?;
        Ok(PathBuf::from(root))
    }

    fn current_branch(path: &Path) -> BbResult<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }

    fn has_uncommitted_changes(path: &Path) -> BbResult<bool> {
        let output = Self::git_command(&["status", "--porcelain"], path)?;
        Ok(!output.is_empty())
    }
}

#[cfg(test)]
mod tests;
