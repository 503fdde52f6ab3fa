// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Background task coordinator.
//!
//! ```text
//! interactive run
//!   spawn_detached(PushTask)    task handed to a fresh `push-worker`
//!     |                         process on stdin; never joined, the run
//!     |                         exits and the user gets their terminal back
//!     v
//! worker: Coordinator::new()
//!   dispatch(PushTask)
//!   push {commit}:refs/heads/{branch}   --force-with-lease
//!     retry with increasing backoff, bounded
//!   draft or refresh the pull request   (when enabled)
//!     |
//!   any failure -> sentinel record, nothing raised
//!   wait()                      drains outstanding tasks before exit
//! ```
//!
//! The interactive run's verdict is already decided when a task is handed
//! off; background failures are reported exclusively through the Error
//! State Store, which the next run will refuse to start over.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use crate::config::types::{PrConfig, PushConfig};
use crate::error::{BbError, BbResult};
use crate::git::cmd;
use crate::pr::{PrClient, render_template};
use crate::sentinel::{ErrorRecord, ErrorStore};

/// Everything a background task needs, owned and serializable, so the task
/// survives the handoff to a worker process that outlives the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTask {
    pub root: PathBuf,
    pub remote: String,
    /// Formatting branch name on the remote.
    pub branch: String,
    /// Formatting commit id; the local branch is already deleted, the
    /// commit is what gets pushed.
    pub commit: String,
    /// Feature branch the pull request targets.
    pub feature_branch: String,
    /// Repo-relative files formatted, for the pull-request body.
    pub files: Vec<String>,
    pub push: PushConfig,
    pub pr: PrConfig,
    pub sentinel_file: String,
}

/// Owns the set of in-flight background tasks.
pub struct Coordinator {
    tracker: TaskTracker,
}

impl Coordinator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: TaskTracker::new(),
        }
    }

    /// Hand a task to the background. Returns immediately; the task reports
    /// failures only through the sentinel store.
    pub fn dispatch(&self, task: PushTask) {
        self.tracker.spawn(run_task(task));
    }

    /// Wait for every dispatched task to finish.
    pub async fn wait(self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands the task to a freshly spawned `push-worker` process and returns
/// without waiting for it. The worker must survive this process being gone:
/// it owns its error reporting (the sentinel store) and its own completion.
///
/// # Errors
///
/// Returns an error when the worker cannot be spawned or the task cannot be
/// written to its stdin.
#[allow(clippy::zombie_processes)]
pub fn spawn_detached(task: &PushTask) -> crate::error::Result<()> {
    use std::io::Write as _;
    use std::process::{Command, Stdio};

    let exe = std::env::current_exe().context("cannot locate own executable")?;
    let payload = serde_json::to_string(task).context("cannot serialize push task")?;

    let mut child = Command::new(exe)
        .arg("push-worker")
        .current_dir(&task.root)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("cannot spawn push worker")?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(payload.as_bytes())
            .context("cannot hand the task to the push worker")?;
    }
    info!(pid = child.id(), "push worker detached");
    Ok(())
}

async fn run_task(task: PushTask) {
    let store = ErrorStore::new(&task.root, &task.sentinel_file);

    if let Err(e) = push_with_retry(&task).await {
        record(&store, &task, "push formatting branch", &e);
        return;
    }
    info!(branch = %task.branch, remote = %task.remote, "formatting branch pushed");

    if !task.pr.enabled {
        return;
    }
    if let Err(e) = ensure_pull_request(&task).await {
        record(&store, &task, "draft pull request", &e);
    }
}

/// Bounded retry with increasing backoff: attempt N sleeps N * base before
/// the next try.
async fn push_with_retry(task: &PushTask) -> BbResult<()> {
    let refspec = format!("{}:refs/heads/{}", task.commit, task.branch);
    let mut last_err: Option<BbError> = None;

    for attempt in 1..=task.push.retries.max(1) {
        let root = task.root.clone();
        let remote = task.remote.clone();
        let spec = refspec.clone();
        let result = tokio::task::spawn_blocking(move || {
            cmd::push_force_with_lease(&root, &remote, &spec)
        })
        .await
        .unwrap_or_else(|e| Err(crate::error::bail_out(format!("push task panicked: {e}"))));

        match result {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!(attempt, error = %e, "push failed");
                last_err = Some(e);
                if attempt < task.push.retries.max(1) {
                    let backoff = Duration::from_secs(u64::from(attempt) * task.push.backoff_secs);
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
    Err(last_err.unwrap_or_else(|| crate::error::bail_out("push failed with no attempts")))
}

async fn ensure_pull_request(task: &PushTask) -> BbResult<()> {
    let root = task.root.clone();
    let remote = task.remote.clone();
    let url = tokio::task::spawn_blocking(move || cmd::remote_url(&root, &remote))
        .await
        .unwrap_or_else(|e| Err(crate::error::bail_out(format!("remote lookup panicked: {e}"))))?;

    let client = PrClient::new(&task.pr, &url)?;
    let title = render_template(&task.pr.title, &task.feature_branch, &task.files);
    let body = render_template(&task.pr.body, &task.feature_branch, &task.files);

    let (pull, created) = client
        .ensure(&task.branch, &task.feature_branch, &title, &body)
        .await?;
    info!(
        url = %pull.html_url,
        created,
        "pull request ready for review"
    );
    Ok(())
}

fn record(store: &ErrorStore, task: &PushTask, operation: &str, err: &BbError) {
    warn!(operation, error = %err, "background task failed, recording");
    let record = ErrorRecord::now(&task.feature_branch, operation, &err.to_string(), &task.root);
    if let Err(e) = store.record(&record) {
        warn!(error = %e, "could not persist background error record");
    }
}
