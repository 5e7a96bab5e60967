// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Token resolution, workflow event parsing, pull request references, and
//! the [`PullRequestApi`] seam the review pipeline talks to.

use std::fmt;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

pub mod auth;
pub mod event;
pub mod pulls;

/// A pull request addressed by repository and number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestTarget {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number.
    pub number: u64,
}

impl PullRequestTarget {
    /// Creates a target from its parts.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }
}

impl fmt::Display for PullRequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// A file changed by a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrFile {
    /// Path relative to the repository root.
    pub filename: String,
    /// Change status, lower-case (`added`, `modified`, `removed`, ...).
    pub status: String,
    /// Unified diff for this file; absent for binary or very large files.
    pub patch: Option<String>,
}

impl PrFile {
    /// Whether the pull request deletes this file.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.status == "removed"
    }
}

/// Pull request operations used by the review pipeline.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Lists the files changed by the pull request.
    async fn list_files(&self, target: &PullRequestTarget) -> Result<Vec<PrFile>>;

    /// Posts a conversation comment and returns its URL.
    async fn post_comment(&self, target: &PullRequestTarget, body: &str) -> Result<String>;
}

/// Parses an owner/repo string to extract owner and repo.
///
/// Validates format: exactly one `/`, non-empty parts.
///
/// # Errors
///
/// Returns an error if the format is invalid.
pub fn parse_owner_repo(s: &str) -> Result<(String, String)> {
    match s.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => bail!(
            "Invalid owner/repo format.\n\
             Expected: owner/repo\n\
             Got: {s}"
        ),
    }
}

/// Parses a pull request reference.
///
/// Supports:
/// - Full URL: `https://github.com/owner/repo/pull/123`
/// - Short form: `owner/repo#123`
/// - Bare number: `123` or `#123` (requires `repo_context`)
///
/// # Errors
///
/// Returns an error if the format is invalid or a bare number has no repository context.
pub fn parse_pr_reference(reference: &str, repo_context: Option<&str>) -> Result<PullRequestTarget> {
    let reference = reference.trim();

    if let Some(path) = reference
        .strip_prefix("https://github.com/")
        .or_else(|| reference.strip_prefix("http://github.com/"))
    {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();
        if parts.len() >= 4 && parts[2] == "pull" {
            let number: u64 = parts[3]
                .parse()
                .with_context(|| format!("Invalid PR number in URL: {}", parts[3]))?;
            let (owner, repo) = parse_owner_repo(&format!("{}/{}", parts[0], parts[1]))
                .with_context(|| format!("Invalid GitHub PR URL: {reference}"))?;
            debug!(owner = %owner, repo = %repo, number, "Parsed PR URL");
            return Ok(PullRequestTarget::new(owner, repo, number));
        }
        bail!("Invalid GitHub PR URL format: {reference}");
    }

    if let Some((repo_part, num_part)) = reference.split_once('#') {
        let number: u64 = num_part
            .parse()
            .with_context(|| format!("Invalid PR number: {num_part}"))?;
        let (owner, repo) = if repo_part.is_empty() {
            let ctx = repo_context
                .with_context(|| format!("PR reference {reference} requires --repo"))?;
            parse_owner_repo(ctx)?
        } else {
            parse_owner_repo(repo_part)?
        };
        return Ok(PullRequestTarget::new(owner, repo, number));
    }

    if let Ok(number) = reference.parse::<u64>() {
        let Some(ctx) = repo_context else {
            bail!("Bare PR number requires --repo flag: {reference}");
        };
        let (owner, repo) = parse_owner_repo(ctx)?;
        return Ok(PullRequestTarget::new(owner, repo, number));
    }

    bail!(
        "Invalid PR reference format: {reference}. Expected URL, owner/repo#number, or number with --repo"
    )
}
