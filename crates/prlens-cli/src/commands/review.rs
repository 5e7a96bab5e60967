// SPDX-License-Identifier: Apache-2.0

//! Pull request review command.

use std::time::Duration;

use anyhow::{Context, Result};
use prlens_core::github::auth::create_client;
use prlens_core::github::event::{GITHUB_REPOSITORY, target_from_env};
use prlens_core::github::parse_pr_reference;
use prlens_core::{
    ActionInputs, AppConfig, GitHubPulls, PullRequestTarget, ReviewModel, ReviewOptions,
    ReviewOutcome, run_review,
};
use tracing::{debug, info};

/// Determines which pull request to review.
///
/// An explicit reference wins; bare numbers take their repository from
/// `--repo` or `GITHUB_REPOSITORY`. Without a reference the pull request
/// comes from the Actions event payload.
pub fn resolve_target(reference: Option<&str>, repo: Option<String>) -> Result<PullRequestTarget> {
    match reference {
        Some(reference) => {
            let repo = repo.or_else(|| {
                std::env::var(GITHUB_REPOSITORY)
                    .ok()
                    .filter(|r| !r.is_empty())
            });
            parse_pr_reference(reference, repo.as_deref())
        }
        None => {
            debug!("No reference given, reading the workflow event");
            target_from_env().context("Failed to determine pull request")
        }
    }
}

/// Reviews `target` and posts the result unless `dry_run` is set.
pub async fn run(
    target: &PullRequestTarget,
    model: &dyn ReviewModel,
    config: &AppConfig,
    inputs: &ActionInputs,
    dry_run: bool,
) -> Result<ReviewOutcome> {
    let client = create_client(
        inputs.github_token.as_ref(),
        Duration::from_secs(config.github.api_timeout_seconds),
    )?;
    let api = GitHubPulls::new(client, config.github.max_files);

    let options = ReviewOptions::builder()
        .review(config.review.clone())
        .dry_run(dry_run)
        .build();

    let outcome = run_review(&api, model, target, &options).await?;
    info!(
        reviewed = outcome.reviewed_files.len(),
        skipped = outcome.skipped.len(),
        "Review complete"
    );
    Ok(outcome)
}
