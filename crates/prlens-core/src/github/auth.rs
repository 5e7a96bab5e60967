// SPDX-License-Identifier: Apache-2.0

//! GitHub token resolution and client construction.
//!
//! Token resolution priority chain:
//! 1. `GH_TOKEN` environment variable
//! 2. `GITHUB_TOKEN` environment variable
//! 3. The `github_token` action input
//! 4. GitHub CLI (`gh auth token`)

use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::PrlensError;

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Token from `GH_TOKEN` or `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token from the `github_token` action input.
    ActionInput,
    /// Token from `gh auth token` command.
    GhCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::ActionInput => write!(f, "action input"),
            TokenSource::GhCli => write!(f, "GitHub CLI"),
        }
    }
}

/// Attempts to get a token from the GitHub CLI (`gh auth token`).
///
/// Returns `None` if `gh` is missing, not logged in, or prints nothing.
#[instrument]
fn get_token_from_gh_cli() -> Option<SecretString> {
    debug!("Attempting to get token from gh CLI");

    match Command::new("gh").args(["auth", "token"]).output() {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                debug!("gh auth token returned empty output");
                None
            } else {
                Some(SecretString::from(token))
            }
        }
        Ok(output) => {
            debug!(status = ?output.status, "gh auth token failed");
            None
        }
        Err(e) => {
            debug!(error = %e, "Failed to execute gh command");
            None
        }
    }
}

/// Picks the first token available from the environment, the action input,
/// or (when allowed) the GitHub CLI.
///
/// `env` is the environment lookup; it is a parameter so the chain can be
/// exercised without touching the process environment.
pub fn resolve_token_with(
    env: impl Fn(&str) -> Option<String>,
    action_token: Option<&SecretString>,
    use_gh_cli: bool,
) -> Option<(SecretString, TokenSource)> {
    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Some(token) = env(var).filter(|t| !t.is_empty()) {
            debug!("Using token from {var} environment variable");
            return Some((SecretString::from(token), TokenSource::Environment));
        }
    }

    if let Some(token) = action_token {
        debug!("Using token from github_token input");
        return Some((token.clone(), TokenSource::ActionInput));
    }

    if use_gh_cli && let Some(token) = get_token_from_gh_cli() {
        debug!("Using token from GitHub CLI");
        return Some((token, TokenSource::GhCli));
    }

    debug!("No token found in any source");
    None
}

/// Resolves a GitHub token using the full priority chain.
#[instrument(skip(action_token))]
pub fn resolve_token(action_token: Option<&SecretString>) -> Option<(SecretString, TokenSource)> {
    resolve_token_with(|name| std::env::var(name).ok(), action_token, true)
}

/// Creates an authenticated Octocrab client.
///
/// # Errors
///
/// Returns [`PrlensError::NotAuthenticated`] when no token is found, or an
/// error if the client cannot be built.
#[instrument(skip(action_token))]
pub fn create_client(action_token: Option<&SecretString>, timeout: Duration) -> Result<Octocrab> {
    let (token, source) = resolve_token(action_token).ok_or(PrlensError::NotAuthenticated)?;

    info!(source = %source, "Creating GitHub client");
    build_client(&token, timeout, None)
}

/// Builds an Octocrab client for `token`, against `base_uri` or GitHub.com.
///
/// Octocrab's built-in retry layer is turned off: it would resend
/// `create_comment` on a 5xx. Listing is retried in [`super::pulls`] instead.
///
/// # Errors
///
/// Returns an error if `base_uri` is not a valid URI or the client cannot be built.
pub fn build_client(
    token: &SecretString,
    timeout: Duration,
    base_uri: Option<&str>,
) -> Result<Octocrab> {
    let mut builder = Octocrab::builder()
        .personal_token(token.expose_secret().to_string())
        .add_retry_config(RetryConfig::None)
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout));

    if let Some(uri) = base_uri {
        builder = builder
            .base_uri(uri)
            .with_context(|| format!("Invalid GitHub API URL: {uri}"))?;
    }

    let client = builder.build().context("Failed to build GitHub client")?;

    debug!("Created authenticated GitHub client");
    Ok(client)
}
