// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `clear-error` command and the fail-closed gate it lifts.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{BbError, Result, SentinelError};
use crate::sentinel::ErrorStore;
use crate::workflow::inspect;

/// Refuses to continue while an unresolved error record blocks the
/// repository: the stored record is printed verbatim and an error is
/// returned. Every command except `clear-error` runs through this gate.
/// Outside a repository there is no store to consult, so the gate passes
/// and the command itself decides whether a repository is required.
///
/// # Errors
///
/// Returns `SentinelError::Unresolved` while a record exists.
pub fn ensure_unblocked(cwd: &Path, config: &Config) -> Result<()> {
    let Ok(root) = inspect::validate_repository(cwd) else {
        return Ok(());
    };
    let store = ErrorStore::new(&root, &config.repo.sentinel_file);
    if !store.has_unresolved_error() {
        return Ok(());
    }
    let record = store
        .read()
        .unwrap_or_else(|_| format!("unreadable record at {}", store.path().display()));
    eprintln!("{record}");
    Err(BbError::from(SentinelError::Unresolved {
        path: store.path().display().to_string(),
    })
    .into())
}

/// Removes the unresolved error record, if one exists.
///
/// # Errors
///
/// Returns an error when run outside a repository or when the record cannot
/// be deleted.
pub fn run_clear_error_command(config: &Config) -> Result<()> {
    let cwd = std::env::current_dir()?;
    run_clear_error_in(&cwd, config)
}

pub(crate) fn run_clear_error_in(cwd: &Path, config: &Config) -> Result<()> {
    let root = inspect::validate_repository(cwd)?;
    let store = ErrorStore::new(&root, &config.repo.sentinel_file);

    if store.clear()? {
        info!(path = %store.path().display(), "error record removed");
        println!("Error record removed. Runs can resume.");
    } else {
        println!("No error record present, nothing to clear.");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
