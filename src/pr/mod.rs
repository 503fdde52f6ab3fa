// blackbranch: review-clean automatic black formatting
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull-request hosting client.
//!
//! ```text
//! PrClient::new(&PrConfig, remote_url)
//!   ensure(head, base, title, body)
//!     GET  /repos/{owner}/{repo}/pulls?head={owner}:{head}  open PR exists?
//!       yes -> PATCH /pulls/{number}   refresh title and body
//!       no  -> POST  /pulls            draft a new one
//! ```
//!
//! Find-or-create keeps re-runs idempotent: one formatting branch, one open
//! pull request, refreshed in place.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::types::PrConfig;
use crate::error::{BbResult, PrError};

const API_ACCEPT: &str = "application/vnd.github.v3+json";

/// The slice of the hosting API's pull-request object we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

#[derive(Serialize)]
struct CreatePull<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
}

#[derive(Serialize)]
struct UpdatePull<'a> {
    title: &'a str,
    body: &'a str,
}

/// Client bound to one hosted repository.
pub struct PrClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
}

impl PrClient {
    /// Build a client for the repository the remote URL points at.
    ///
    /// # Errors
    ///
    /// Returns `PrError::InvalidRemote` if owner and repository cannot be
    /// derived from the URL, or a `PrError::Reqwest` if the client cannot be
    /// constructed.
    pub fn new(config: &PrConfig, remote_url: &str) -> BbResult<Self> {
        let (owner, repo) = parse_remote(remote_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(API_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("blackbranch/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| PrError::InvalidRemote {
                    url: "token contains invalid header characters".to_string(),
                })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PrError::Reqwest)?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner,
            repo,
        })
    }

    fn pulls_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/pulls",
            self.api_base, self.owner, self.repo
        )
    }

    /// Find the open pull request whose head is `head`, if any.
    ///
    /// # Errors
    ///
    /// Returns a `PrError` on transport failure or a non-success response.
    pub async fn find_by_head(&self, head: &str) -> BbResult<Option<PullRequest>> {
        let url = self.pulls_url();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("head", format!("{}:{head}", self.owner)),
                ("state", "open".to_string()),
            ])
            .send()
            .await
            .map_err(PrError::Reqwest)?;

        let response = check_status(response)?;
        let mut pulls: Vec<PullRequest> = response.json().await.map_err(PrError::Reqwest)?;
        Ok(if pulls.is_empty() {
            None
        } else {
            Some(pulls.swap_remove(0))
        })
    }

    /// Draft a new pull request from `head` into `base`.
    ///
    /// # Errors
    ///
    /// Returns a `PrError` on transport failure or a non-success response.
    pub async fn create(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> BbResult<PullRequest> {
        let url = self.pulls_url();
        let response = self
            .http
            .post(&url)
            .json(&CreatePull {
                title,
                body,
                head,
                base,
            })
            .send()
            .await
            .map_err(PrError::Reqwest)?;

        let response = check_status(response)?;
        Ok(response.json().await.map_err(PrError::Reqwest)?)
    }

    /// Refresh the title and body of an existing pull request.
    ///
    /// # Errors
    ///
    /// Returns a `PrError` on transport failure or a non-success response.
    pub async fn update(&self, number: u64, title: &str, body: &str) -> BbResult<PullRequest> {
        let url = format!("{}/{number}", self.pulls_url());
        let response = self
            .http
            .patch(&url)
            .json(&UpdatePull { title, body })
            .send()
            .await
            .map_err(PrError::Reqwest)?;

        let response = check_status(response)?;
        Ok(response.json().await.map_err(PrError::Reqwest)?)
    }

    /// Find-or-create: one open pull request per formatting branch.
    ///
    /// Returns the pull request and whether it was newly created.
    ///
    /// # Errors
    ///
    /// Returns a `PrError` on transport failure or a non-success response.
    pub async fn ensure(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> BbResult<(PullRequest, bool)> {
        match self.find_by_head(head).await? {
            Some(existing) => {
                debug!(number = existing.number, "refreshing existing pull request");
                let updated = self.update(existing.number, title, body).await?;
                Ok((updated, false))
            }
            None => {
                let created = self.create(head, base, title, body).await?;
                info!(url = %created.html_url, "pull request drafted");
                Ok((created, true))
            }
        }
    }
}

/// Map non-success responses, keeping authentication failures
/// distinguishable from everything else.
fn check_status(response: reqwest::Response) -> BbResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let err = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        PrError::AuthFailed {
            status: status.as_u16(),
            url,
        }
    } else {
        PrError::HttpError {
            status: status.as_u16(),
            url,
        }
    };
    Err(err.into())
}

/// Derive `(owner, repo)` from the common remote URL shapes:
/// `https://host/owner/repo.git`, `git@host:owner/repo.git` and
/// `ssh://git@host/owner/repo`.
pub fn parse_remote(url: &str) -> BbResult<(String, String)> {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let path = if let Some((_, rest)) = trimmed.split_once("://") {
        // Drop the authority, keep the path
        rest.split_once('/').map(|(_, p)| p)
    } else if let Some((_, rest)) = trimmed.split_once(':') {
        // scp-like syntax
        Some(rest)
    } else {
        None
    };

    let segments: Vec<&str> = path
        .unwrap_or("")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [.., owner, repo] => Ok(((*owner).to_string(), (*repo).to_string())),
        _ => Err(PrError::InvalidRemote {
            url: url.to_string(),
        }
        .into()),
    }
}

/// Fill the `{branch}` and `{files}` placeholders of a configured template.
#[must_use]
pub fn render_template(template: &str, branch: &str, files: &[String]) -> String {
    template
        .replace("{branch}", branch)
        .replace("{files}", &files.join("\n"))
}
