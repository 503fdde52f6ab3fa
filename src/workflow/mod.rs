// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The formatting workflow, end to end.
//!
//! ```text
//! inspect --> lock --> classify --> resolve formatter     (preconditions,
//!                                                          no mutation yet)
//!     snapshot --> branch dance --> restore --> format new files in place
//!         |             |              |                  (mutating phase)
//!         +-------------+--------------+--> on failure:
//!                                           emergency rollback
//!                                           sentinel record
//! ```
//!
//! Precondition failures abort cleanly with no rollback and no record.
//! Once the mutating phase begins, any failure rolls back and writes the
//! sentinel, blocking future runs until a human intervenes.

pub mod branch;
pub mod classify;
pub mod inspect;
pub mod lock;
pub mod rollback;
pub mod snapshot;

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{BbResult, bail_out};
use crate::formatter::Formatter;
use crate::git::cmd;
use crate::sentinel::{ErrorRecord, ErrorStore};

use branch::{BranchManager, BranchOutcome};
use classify::ClassifiedFiles;
use inspect::RepoContext;
use lock::RunLock;
use rollback::Rollback;
use snapshot::WorktreeGuard;

/// What one run did, for reporting and for the background coordinator.
#[derive(Debug)]
pub struct FormatOutcome {
    /// The repository context the run operated on.
    pub repo: RepoContext,
    /// Branch dance result; `None` when no file existed at the merge base
    /// or the run was dry.
    pub branch: Option<BranchOutcome>,
    /// Files formatted on the formatting branch.
    pub existed_at_base: Vec<PathBuf>,
    /// Files formatted in place on the feature branch.
    pub new_since_base: Vec<PathBuf>,
    /// Rejected inputs and why.
    pub invalid: Vec<(PathBuf, String)>,
    /// The run stopped after planning, nothing was touched.
    pub dry: bool,
}

/// Run the full formatting workflow over `files`, rooted at `cwd`.
///
/// # Errors
///
/// Precondition failures (`RepoError`, lock held, formatter missing) abort
/// before mutation. Operational failures roll back, persist a sentinel
/// record, and propagate.
#[instrument(skip_all)]
pub async fn run_format(
    config: &Config,
    cwd: &Path,
    files: &[PathBuf],
    cancel: &CancellationToken,
) -> BbResult<FormatOutcome> {
    // --- Precondition phase, no mutation ---

    let repo = RepoContext::discover(cwd, &config.repo)?;
    let store = ErrorStore::new(repo.root(), &config.repo.sentinel_file);

    let git_dir = cmd::git_dir(repo.root())?;
    let _lock = RunLock::acquire(&git_dir, &config.repo.lock_file)?;

    let classified = classify::classify(repo.root(), repo.merge_base(), files, &config.formatter.extensions);
    report_invalid(&classified);
    if !classified.has_work() {
        info!("no formattable files, nothing to do");
        return Ok(FormatOutcome {
            repo,
            branch: None,
            existed_at_base: Vec::new(),
            new_since_base: Vec::new(),
            invalid: classified.invalid,
            dry: config.global.dry,
        });
    }

    let formatter = Formatter::from_config(&config.formatter)?;

    if config.global.dry {
        plan_only(&repo, &config.branch.suffix, &classified);
        return Ok(FormatOutcome {
            repo,
            branch: None,
            existed_at_base: classified.existed_at_base,
            new_since_base: classified.new_since_base,
            invalid: classified.invalid,
            dry: true,
        });
    }

    // --- Mutating phase ---

    let mut guard = WorktreeGuard::new(repo.root());
    let manager = BranchManager::new(&repo, &config.branch);
    let rollback = Rollback::new(&manager.branch_name());

    match mutate(
        &repo, &mut guard, &manager, &rollback, &formatter, &classified, cancel,
    )
    .await
    {
        Ok(branch) => Ok(FormatOutcome {
            repo,
            branch,
            existed_at_base: classified.existed_at_base,
            new_since_base: classified.new_since_base,
            invalid: classified.invalid,
            dry: false,
        }),
        Err((operation, err)) => {
            let failures = rollback.run(&repo, &mut guard);
            let interrupted = operation == "interrupt";

            if !interrupted || !failures.is_empty() {
                let mut detail = err.to_string();
                for failure in &failures {
                    detail.push_str("\nrollback step failed: ");
                    detail.push_str(failure);
                }
                let record =
                    ErrorRecord::now(repo.current_branch(), operation, &detail, repo.root());
                if let Err(record_err) = store.record(&record) {
                    warn!(error = %record_err, "could not persist error record");
                }
            }
            Err(err)
        }
    }
}

type PhaseError = (&'static str, crate::error::BbError);

/// Every mutating step, with the phase name carried alongside failures so
/// the sentinel record can say which operation broke.
async fn mutate(
    repo: &RepoContext,
    guard: &mut WorktreeGuard,
    manager: &BranchManager<'_>,
    rollback: &Rollback,
    formatter: &Formatter,
    classified: &ClassifiedFiles,
    cancel: &CancellationToken,
) -> Result<Option<BranchOutcome>, PhaseError> {
    let check = |phase: &'static str| {
        if cancel.is_cancelled() {
            Err((phase, bail_out("interrupted")))
        } else {
            Ok(())
        }
    };

    check("interrupt")?;
    guard
        .snapshot()
        .map_err(|e| ("snapshot uncommitted changes", e))?;

    let branch = if classified.existed_at_base.is_empty() {
        info!("no files existed at the merge base, skipping formatting branch");
        None
    } else {
        check("interrupt")?;
        rollback.branch_created();
        let outcome = manager
            .run(formatter, &classified.existed_at_base)
            .await
            .map_err(|e| ("formatting branch workflow", e))?;
        Some(outcome)
    };

    check("interrupt")?;
    guard
        .restore()
        .map_err(|e| ("restore uncommitted changes", e))?;

    if !classified.new_since_base.is_empty() {
        check("interrupt")?;
        formatter
            .format(repo.root(), &classified.new_since_base)
            .await
            .map_err(|e| ("format new files in place", e))?;
        info!(
            count = classified.new_since_base.len(),
            "new files formatted in place, left uncommitted"
        );
    }

    Ok(branch)
}

fn report_invalid(classified: &ClassifiedFiles) {
    for (file, reason) in &classified.invalid {
        warn!(file = %file.display(), "skipped: {reason}");
    }
}

fn plan_only(repo: &RepoContext, suffix: &str, classified: &ClassifiedFiles) {
    let branch = format!("{}{}", repo.current_branch(), suffix);
    info!(%branch, at = %repo.merge_base(), "dry run: would create formatting branch");
    for file in &classified.existed_at_base {
        info!(file = %file.display(), "dry run: would format on the formatting branch");
    }
    for file in &classified.new_since_base {
        info!(file = %file.display(), "dry run: would format in place");
    }
}
