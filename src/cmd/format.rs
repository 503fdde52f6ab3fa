// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `format` command.
//!
//! ```text
//! sentinel gate --> workflow::run_format --> summary
//!                                        --> detached worker (push + pull request)
//! ```
//!
//! The gate runs before anything else: while an unresolved error record
//! exists, the stored record is printed verbatim and the run refuses to
//! start. Only `clear-error` lifts it. The push and the pull request happen
//! in a separate worker process that this one never joins.

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::format::FormatArgs;
use crate::config::Config;
use crate::coordinator::{self, Coordinator, PushTask};
use crate::error::Result;
use crate::workflow::{self, FormatOutcome};

/// Runs the whole formatting workflow for one batch of files.
///
/// # Errors
///
/// Returns an error when the sentinel gate blocks the run, a precondition
/// fails, or the workflow fails operationally (after rollback and record).
pub async fn run_format_command(
    args: &FormatArgs,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    run_format_in(&cwd, args, config, cancel).await
}

pub(crate) async fn run_format_in(
    cwd: &Path,
    args: &FormatArgs,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    super::sentinel::ensure_unblocked(cwd, config)?;

    let mut config = config.clone();
    if args.no_pr {
        config.pr.enabled = false;
    }

    let outcome = workflow::run_format(&config, cwd, &args.files, cancel).await?;
    print_summary(&config, &outcome);

    let Some(branch) = &outcome.branch else {
        return Ok(());
    };
    let Some(commit) = &branch.commit else {
        return Ok(());
    };
    if args.no_push || outcome.dry {
        debug!("skipping background push");
        return Ok(());
    }

    // The interactive verdict is already decided; the push and the pull
    // request run in a detached worker process that reports only through
    // the sentinel, so this process exits without waiting on it.
    let task = PushTask {
        root: outcome.repo.root().to_path_buf(),
        remote: config.repo.remote.clone(),
        branch: branch.branch.clone(),
        commit: commit.clone(),
        feature_branch: outcome.repo.current_branch().to_string(),
        files: outcome
            .existed_at_base
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        push: config.push.clone(),
        pr: config.pr.clone(),
        sentinel_file: config.repo.sentinel_file.clone(),
    };
    if !config.global.quiet {
        println!(
            "Pushing {} and preparing its pull request in the background.",
            branch.branch
        );
    }
    coordinator::spawn_detached(&task)
}

/// Entry point of the detached worker: reads its task from stdin and runs
/// the push and pull-request steps to completion. Failures are reported
/// only through the error store, never to a caller.
///
/// # Errors
///
/// Returns an error when the stdin payload is missing or malformed.
pub async fn run_push_worker_command() -> Result<()> {
    use std::io::Read as _;

    let mut payload = String::new();
    std::io::stdin().read_to_string(&mut payload)?;
    let task: PushTask = serde_json::from_str(&payload)?;

    let coordinator = Coordinator::new();
    coordinator.dispatch(task);
    coordinator.wait().await;
    Ok(())
}

/// A token cancelled on the first shutdown signal (Ctrl-C, or SIGTERM from
/// an enclosing tool imposing its own timeout). The workflow checks it
/// between steps and rolls back instead of dying mid-mutation.
///
/// # Errors
///
/// Returns an error when the signal listeners cannot be registered.
pub fn shutdown_token() -> Result<CancellationToken> {
    let cancel = CancellationToken::new();
    watch_signals(cancel.clone())?;
    Ok(cancel)
}

#[cfg(unix)]
fn watch_signals(cancel: CancellationToken) -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    // Both listeners are registered before returning, so a signal arriving
    // right after cannot hit the default disposition
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
        eprintln!("Shutdown signal received, rolling back...");
        cancel.cancel();
    });
    Ok(())
}

#[cfg(not(unix))]
fn watch_signals(cancel: CancellationToken) -> Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupt received, rolling back...");
            cancel.cancel();
        }
    });
    Ok(())
}

fn print_summary(config: &Config, outcome: &FormatOutcome) {
    if config.global.quiet {
        return;
    }
    let prefix = if outcome.dry { "[dry] " } else { "" };

    for (file, reason) in &outcome.invalid {
        println!("{prefix}Skipped {}: {reason}", file.display());
    }
    if let Some(branch) = &outcome.branch {
        match &branch.commit {
            Some(commit) => println!(
                "{prefix}Formatting for {} file(s) committed on {} ({}) and merged.",
                outcome.existed_at_base.len(),
                branch.branch,
                &commit[..12.min(commit.len())],
            ),
            None => println!("{prefix}Already formatted, no separate commit needed."),
        }
    } else if outcome.dry && !outcome.existed_at_base.is_empty() {
        println!(
            "{prefix}Would commit formatting for {} file(s) on a separate branch.",
            outcome.existed_at_base.len()
        );
    }
    if !outcome.new_since_base.is_empty() {
        println!(
            "{prefix}Formatted {} new file(s) in place; changes left uncommitted.",
            outcome.new_since_base.len()
        );
    }
}

#[cfg(test)]
mod tests;
