// SPDX-License-Identifier: Apache-2.0

//! Workflow event context.
//!
//! Inside GitHub Actions the triggering event is written as JSON to the file
//! named by `GITHUB_EVENT_PATH`, and the repository is in `GITHUB_REPOSITORY`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{PullRequestTarget, parse_owner_repo};
use crate::error::PrlensError;

/// Environment variable naming the event payload file.
pub const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

/// Environment variable holding `owner/repo`.
pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

/// Extracts the pull request number from an event payload.
///
/// # Errors
///
/// Returns [`PrlensError::NotPullRequestEvent`] if the payload has no
/// `pull_request`, or an error if it is not valid JSON.
pub fn pull_request_number(payload: &str) -> Result<u64> {
    let event: EventPayload =
        serde_json::from_str(payload).context("Failed to parse workflow event payload")?;
    let pr = event.pull_request.ok_or(PrlensError::NotPullRequestEvent)?;
    Ok(pr.number)
}

/// Builds the review target from a repository slug and an event payload file.
///
/// # Errors
///
/// Returns an error if the slug is malformed, the file cannot be read, or the
/// event is not a pull request event.
pub fn target_from_event(repository: &str, event_path: &Path) -> Result<PullRequestTarget> {
    let (owner, repo) = parse_owner_repo(repository)?;
    let payload = std::fs::read_to_string(event_path)
        .with_context(|| format!("Failed to read event payload {}", event_path.display()))?;
    let number = pull_request_number(&payload)?;
    Ok(PullRequestTarget::new(owner, repo, number))
}

/// Builds the review target from the Actions environment.
///
/// # Errors
///
/// Returns an error if `GITHUB_REPOSITORY` or `GITHUB_EVENT_PATH` is unset, or
/// see [`target_from_event`].
#[instrument]
pub fn target_from_env() -> Result<PullRequestTarget> {
    let repository = std::env::var(GITHUB_REPOSITORY).with_context(|| {
        format!("{GITHUB_REPOSITORY} is not set; pass a PR reference when running outside GitHub Actions")
    })?;
    let event_path = std::env::var(GITHUB_EVENT_PATH).with_context(|| {
        format!("{GITHUB_EVENT_PATH} is not set; pass a PR reference when running outside GitHub Actions")
    })?;

    let target = target_from_event(&repository, Path::new(&event_path))?;
    debug!(%target, "Resolved pull request from workflow event");
    Ok(target)
}
