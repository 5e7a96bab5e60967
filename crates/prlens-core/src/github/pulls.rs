// SPDX-License-Identifier: Apache-2.0

//! Pull request access via Octocrab.

use anyhow::{Context, Result};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use octocrab::Octocrab;
use tracing::{debug, instrument, warn};

use super::{PrFile, PullRequestApi, PullRequestTarget};
use crate::error::PrlensError;
use crate::retry::{is_retryable_anyhow, retry_backoff};

/// [`PullRequestApi`] backed by an authenticated Octocrab client.
#[derive(Debug, Clone)]
pub struct GitHubPulls {
    client: Octocrab,
    max_files: usize,
    backoff: ExponentialBuilder,
}

impl GitHubPulls {
    /// Wraps a client; at most `max_files` changed files are returned per PR.
    #[must_use]
    pub fn new(client: Octocrab, max_files: usize) -> Self {
        Self {
            client,
            max_files,
            backoff: retry_backoff(),
        }
    }

    /// Replaces the retry backoff policy for file listing.
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }
}

/// Converts a raw octocrab error into [`PrlensError::GitHub`].
///
/// Applied after retrying, since the retry predicate inspects the raw error.
fn github_error(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<octocrab::Error>() {
        Ok(err) => PrlensError::from(err).into(),
        Err(err) => err,
    }
}

#[async_trait]
impl PullRequestApi for GitHubPulls {
    #[instrument(skip(self), fields(target = %target))]
    async fn list_files(&self, target: &PullRequestTarget) -> Result<Vec<PrFile>> {
        debug!("Fetching PR files");

        let entries = (|| async {
            let first = self
                .client
                .pulls(&target.owner, &target.repo)
                .list_files(target.number)
                .await?;
            self.client.all_pages(first).await.map_err(anyhow::Error::from)
        })
        .retry(self.backoff)
        .when(is_retryable_anyhow)
        .notify(|err, dur| {
            warn!(error = %err, retry_after = ?dur, "Retrying list_files");
        })
        .await
        .map_err(github_error)
        .with_context(|| format!("Failed to fetch files for PR {target}"))?;

        let total = entries.len();
        let files: Vec<PrFile> = entries
            .into_iter()
            .take(self.max_files)
            .map(|f| PrFile {
                filename: f.filename,
                status: format!("{:?}", f.status).to_lowercase(),
                patch: f.patch,
            })
            .collect();

        if total > files.len() {
            warn!(total, kept = files.len(), "PR has more files than max_files");
        }
        debug!(file_count = files.len(), "PR files fetched");

        Ok(files)
    }

    #[instrument(skip(self, body), fields(target = %target, body_len = body.len()))]
    async fn post_comment(&self, target: &PullRequestTarget, body: &str) -> Result<String> {
        debug!("Posting PR comment");

        // Not retried: a retry after a lost response would post a duplicate.
        let comment = self
            .client
            .issues(&target.owner, &target.repo)
            .create_comment(target.number, body)
            .await
            .map_err(PrlensError::from)
            .with_context(|| format!("Failed to post comment to PR {target}"))?;

        let url = comment.html_url.to_string();
        debug!(url = %url, "Comment posted");
        Ok(url)
    }
}
