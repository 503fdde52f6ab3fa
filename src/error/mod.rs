// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              BbError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+
//!   |      |      |       |      |      |
//!   v      v      v       v      v      v
//! Bail   Repo  Workflow  Git    Pr  Sentinel
//!        Box    Box      Box   Box    Box    ... Cfg/Proc/Io/Other
//!
//! Sub-errors (unboxed internally):
//!   Repo      NotARepository, DetachedHead, NoBaseBranch, MergeBaseUnavailable
//!   Workflow  FormattingFailed, MergeConflict, RestoreConflict, LockHeld
//!   Git       CommandFailed, BranchNotFound, Gix
//!   Pr        AuthFailed, HttpError, Reqwest, InvalidRemote
//!   Sentinel  AlreadyExists, Unresolved, Io
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit
//!
//! All variants boxed => BbError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BbError`].
pub type BbResult<T> = std::result::Result<T, BbError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum BbError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Precondition failure while inspecting the repository.
    #[error("repository error: {0}")]
    Repo(#[from] Box<RepoError>),

    /// Operational failure mid-pipeline.
    #[error("workflow error: {0}")]
    Workflow(#[from] Box<WorkflowError>),

    /// Git command or library failure.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Pull-request hosting API failure.
    #[error("pull request error: {0}")]
    Pr(#[from] Box<PrError>),

    /// Error State Store failure.
    #[error("sentinel error: {0}")]
    Sentinel(#[from] Box<SentinelError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// External process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`BbError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> BbError {
    BbError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BbError {
                fn from(err: $error) -> Self {
                    BbError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    RepoError => Repo,
    WorkflowError => Workflow,
    GitError => Git,
    PrError => Pr,
    SentinelError => Sentinel,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Repository precondition errors ---

/// Precondition failures reported by the Repository Inspector.
///
/// These occur before any mutation, so they never trigger rollback and never
/// write a sentinel record.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Working directory is not inside a git work tree.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// HEAD is not attached to a branch.
    ///
    /// Formatting-branch naming and restoration both need a named branch, so
    /// detached HEAD is an unsupported precondition rather than an edge case.
    #[error("HEAD is detached; blackbranch needs a named branch to return to")]
    DetachedHead,

    /// None of the candidate base branches resolve.
    #[error("no base branch found (tried: {tried})")]
    NoBaseBranch { tried: String },

    /// HEAD and the base branch share no common ancestor.
    #[error("no merge base between HEAD and '{base}' (unrelated histories?)")]
    MergeBaseUnavailable { base: String },
}

// --- Workflow errors ---

/// Operational failures mid-pipeline. All of these trigger Emergency Rollback
/// followed by a sentinel record.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The external formatter reported failure for the batch.
    ///
    /// Fatal for the whole run, not just the offending file: a
    /// partially-formatted branch cannot be safely merged.
    #[error("formatter failed:\n{output}")]
    FormattingFailed { output: String },

    /// Merging the formatting branch back conflicted.
    ///
    /// Conflicts are never auto-resolved by discarding one side; the merge is
    /// aborted and the run rolls back.
    #[error("merge of '{branch}' conflicted: {detail}")]
    MergeConflict { branch: String, detail: String },

    /// Reapplying the working-tree snapshot collided with content introduced
    /// by the run itself. Conflict markers are left in place for the user.
    #[error("restoring uncommitted changes conflicted: {detail}")]
    RestoreConflict { detail: String },

    /// Another invocation holds the run lock for this repository.
    #[error("another blackbranch run (pid {pid}) holds the lock at {path}")]
    LockHeld { path: String, pid: u32 },
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Branch not found.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },
}

// --- Pull request errors ---

/// Pull-request hosting API errors.
#[derive(Debug, Error)]
pub enum PrError {
    /// Authentication rejected (401/403). Kept distinguishable so the
    /// coordinator can record "fix your token" instead of a generic failure.
    #[error("authentication failed ({status}): {url}")]
    AuthFailed { status: u16, url: String },

    /// Any other non-success HTTP response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The origin remote URL does not look like a hosted repository.
    #[error("cannot derive owner/repo from remote url: {url}")]
    InvalidRemote { url: String },
}

// --- Sentinel errors ---

/// Error State Store failures.
#[derive(Debug, Error)]
pub enum SentinelError {
    /// A record already exists; it is never silently overwritten.
    #[error("an unresolved error record already exists at {path}")]
    AlreadyExists { path: String },

    /// An unresolved record blocks this invocation.
    #[error("unresolved error record at {path} blocks this run")]
    Unresolved { path: String },

    /// I/O failure reading or writing the sentinel file.
    #[error("sentinel I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// External process execution errors (the formatter, mainly).
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}
