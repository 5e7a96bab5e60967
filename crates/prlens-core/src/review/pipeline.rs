// SPDX-License-Identifier: Apache-2.0

//! End-to-end review of a pull request.
//!
//! Sequence: status comment, list files, filter, prompt, model, final comment.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument};

use super::filter::{FileFilter, SkippedFile};
use super::prompt::{
    NO_REVIEW_FALLBACK, build_prompt, nothing_to_review_comment, review_comment, status_comment,
};
use crate::ai::ReviewModel;
use crate::config::{ReviewConfig, Strictness};
use crate::github::{PrFile, PullRequestApi, PullRequestTarget};

/// Options for a single review run.
#[derive(Debug, Clone, bon::Builder)]
pub struct ReviewOptions {
    /// Filtering and strictness settings.
    #[builder(default)]
    pub review: ReviewConfig,
    /// Compute the review but post nothing.
    #[builder(default)]
    pub dry_run: bool,
}

/// Result of [`run_review`].
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    /// The reviewed pull request.
    pub target: PullRequestTarget,
    /// Files sent to the model.
    pub reviewed_files: Vec<String>,
    /// Files left out for size.
    pub skipped: Vec<SkippedFile>,
    /// Model output; `None` when no file qualified for review.
    pub review: Option<String>,
    /// Body of the final comment (posted unless this was a dry run).
    pub body: String,
    /// URL of the final comment, if posted.
    pub comment_url: Option<String>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

/// Reviews one pull request and posts the result as a comment.
///
/// With `dry_run` set, no comment is posted; the outcome still carries the
/// body that would have been posted.
///
/// # Errors
///
/// Returns an error if an exclude pattern is invalid, or a GitHub or model
/// call fails.
#[instrument(skip(api, model, options), fields(target = %target, dry_run = options.dry_run))]
pub async fn run_review(
    api: &dyn PullRequestApi,
    model: &dyn ReviewModel,
    target: &PullRequestTarget,
    options: &ReviewOptions,
) -> Result<ReviewOutcome> {
    let filter = FileFilter::new(&options.review)?;
    let strictness = options.review.strictness;

    info!(%strictness, max_file_size = options.review.max_file_size, "Starting review");

    if !options.dry_run {
        api.post_comment(target, &status_comment(strictness))
            .await
            .context("Failed to post status comment")?;
    }

    let files = api.list_files(target).await?;
    info!(changed = files.len(), "Fetched changed files");

    let selection = filter.select(files);
    info!(
        to_review = selection.to_review.len(),
        skipped = selection.skipped.len(),
        "Filtered files"
    );

    let reviewed_files: Vec<String> = selection
        .to_review
        .iter()
        .map(|f| f.filename.clone())
        .collect();

    let (review, body) = if selection.to_review.is_empty() {
        (None, nothing_to_review_comment(&selection.skipped))
    } else {
        let prompt = build_prompt(strictness, &selection.to_review);
        let text = model
            .generate(&prompt)
            .await
            .with_context(|| format!("{} review failed", model.name()))?
            .unwrap_or_else(|| NO_REVIEW_FALLBACK.to_string());
        let body = review_comment(&text, &selection.skipped);
        (Some(text), body)
    };

    let comment_url = if options.dry_run {
        None
    } else {
        let url = api.post_comment(target, &body).await?;
        info!(url = %url, "Review posted");
        Some(url)
    };

    Ok(ReviewOutcome {
        target: target.clone(),
        reviewed_files,
        skipped: selection.skipped,
        review,
        body,
        comment_url,
        dry_run: options.dry_run,
    })
}

/// Reviews a single local file, treating its whole content as the diff.
///
/// Returns the model output, or `None` if the model produced no text.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the model call fails.
#[instrument(skip(model), fields(path = %path.display()))]
pub async fn check_file(
    model: &dyn ReviewModel,
    path: &Path,
    strictness: Strictness,
) -> Result<Option<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let file = PrFile {
        filename: path.display().to_string(),
        status: "modified".to_string(),
        patch: Some(content),
    };

    let prompt = build_prompt(strictness, std::slice::from_ref(&file));
    model.generate(&prompt).await
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct FakeApi {
        files: Vec<PrFile>,
        comments: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PullRequestApi for FakeApi {
        async fn list_files(&self, _target: &PullRequestTarget) -> Result<Vec<PrFile>> {
            Ok(self.files.clone())
        }

        async fn post_comment(&self, target: &PullRequestTarget, body: &str) -> Result<String> {
            let mut comments = self.comments.lock().unwrap();
            comments.push(body.to_string());
            Ok(format!(
                "https://github.com/{}/{}/pull/{}#issuecomment-{}",
                target.owner,
                target.repo,
                target.number,
                comments.len()
            ))
        }
    }

    struct FakeModel {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeModel {
        fn replying(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(String::from),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReviewModel for FakeModel {
        fn name(&self) -> &str {
            "fake"
        }

        async fn generate(&self, prompt: &str) -> Result<Option<String>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ReviewModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<Option<String>> {
            anyhow::bail!("model unavailable")
        }
    }

    fn file(name: &str, status: &str, patch: &str) -> PrFile {
        PrFile {
            filename: name.to_string(),
            status: status.to_string(),
            patch: Some(patch.to_string()),
        }
    }

    fn target() -> PullRequestTarget {
        PullRequestTarget::new("octo", "demo", 7)
    }

    fn options(max_file_size: usize, dry_run: bool) -> ReviewOptions {
        ReviewOptions::builder()
            .review(ReviewConfig {
                max_file_size,
                ..ReviewConfig::default()
            })
            .dry_run(dry_run)
            .build()
    }

    #[tokio::test]
    async fn test_review_posts_status_then_review() {
        let api = FakeApi {
            files: vec![
                file("app.py", "modified", "+def add(a, b): return a + b"),
                file("README.md", "modified", "+docs"),
            ],
            ..FakeApi::default()
        };
        let model = FakeModel::replying(Some("## 🔎 Review Summary\nLooks fine."));

        let outcome = run_review(&api, &model, &target(), &options(6000, false))
            .await
            .unwrap();

        let comments = api.comments.lock().unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments[0].contains("Analyzing changes"));
        assert_eq!(comments[1], "## 🔎 Review Summary\nLooks fine.");

        assert_eq!(outcome.reviewed_files, vec!["app.py"]);
        assert!(outcome.skipped.is_empty());
        assert_eq!(
            outcome.comment_url.as_deref(),
            Some("https://github.com/octo/demo/pull/7#issuecomment-2")
        );

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("### File: app.py"));
        assert!(!prompts[0].contains("README.md"));
    }

    #[tokio::test]
    async fn test_nothing_to_review_skips_model() {
        let api = FakeApi {
            files: vec![
                file("big.py", "modified", &"x".repeat(50)),
                file("gone.py", "removed", "-x"),
            ],
            ..FakeApi::default()
        };
        let model = FakeModel::replying(Some("unused"));

        let outcome = run_review(&api, &model, &target(), &options(10, false))
            .await
            .unwrap();

        assert!(model.prompts.lock().unwrap().is_empty());
        assert!(outcome.review.is_none());
        let comments = api.comments.lock().unwrap();
        assert_eq!(
            comments.last().unwrap(),
            "## 🤖 AI Code Review\n\n✅ No reviewable code changes found.\n(Skipped 1 large files)"
        );
    }

    #[tokio::test]
    async fn test_review_footer_lists_skipped_files() {
        let api = FakeApi {
            files: vec![
                file("small.rs", "added", "+fn main() {}"),
                file("huge.rs", "added", &"y".repeat(40)),
            ],
            ..FakeApi::default()
        };
        let model = FakeModel::replying(Some("Review text"));

        let outcome = run_review(&api, &model, &target(), &options(20, false))
            .await
            .unwrap();

        assert_eq!(
            outcome.body,
            "Review text\n\n---\n*⚠️ Skipped files (too large):* \n- huge.rs (Too large: 40 chars)"
        );
    }

    #[tokio::test]
    async fn test_empty_model_reply_uses_fallback() {
        let api = FakeApi {
            files: vec![file("a.go", "modified", "+package main")],
            ..FakeApi::default()
        };
        let model = FakeModel::replying(None);

        let outcome = run_review(&api, &model, &target(), &options(6000, false))
            .await
            .unwrap();

        assert_eq!(outcome.review.as_deref(), Some(NO_REVIEW_FALLBACK));
        assert_eq!(
            api.comments.lock().unwrap().last().unwrap(),
            NO_REVIEW_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_dry_run_posts_nothing() {
        let api = FakeApi {
            files: vec![file("a.ts", "modified", "+let x = 1;")],
            ..FakeApi::default()
        };
        let model = FakeModel::replying(Some("Review"));

        let outcome = run_review(&api, &model, &target(), &options(6000, true))
            .await
            .unwrap();

        assert!(api.comments.lock().unwrap().is_empty());
        assert!(outcome.comment_url.is_none());
        assert!(outcome.dry_run);
        assert_eq!(outcome.body, "Review");
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let api = FakeApi {
            files: vec![file("a.ts", "modified", "+let x = 1;")],
            ..FakeApi::default()
        };

        let err = run_review(&api, &FailingModel, &target(), &options(6000, false))
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("model unavailable"));
        // Only the status comment went out
        assert_eq!(api.comments.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_exclude_pattern_fails_before_posting() {
        let api = FakeApi::default();
        let model = FakeModel::replying(Some("unused"));
        let opts = ReviewOptions::builder()
            .review(ReviewConfig {
                exclude_patterns: vec!["[".to_string()],
                ..ReviewConfig::default()
            })
            .build();

        assert!(run_review(&api, &model, &target(), &opts).await.is_err());
        assert!(api.comments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_file() {
        let mut file = tempfile::Builder::new().suffix(".py").tempfile().unwrap();
        write!(file, "def divide(a, b):\n    return a / b\n").unwrap();
        let model = FakeModel::replying(Some("Division by zero risk"));

        let review = check_file(&model, file.path(), Strictness::Low)
            .await
            .unwrap();

        assert_eq!(review.as_deref(), Some("Division by zero risk"));
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Strictness Level: LOW"));
        assert!(prompts[0].contains("return a / b"));
    }

    #[tokio::test]
    async fn test_check_file_missing() {
        let model = FakeModel::replying(Some("unused"));
        let result = check_file(&model, Path::new("/nonexistent/file.py"), Strictness::Medium).await;
        assert!(result.is_err());
    }
}
