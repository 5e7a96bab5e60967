// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # prlens Core
//!
//! Core library for prlens - AI-powered pull request review.
//!
//! This crate provides reusable components for:
//! - GitHub API integration (authentication, changed files, comments)
//! - Review generation via the Gemini `generateContent` API
//! - Configuration management and GitHub Actions inputs
//! - File filtering and prompt construction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use prlens_core::{GeminiClient, GitHubPulls, ReviewOptions, load_config, run_review};
//! use prlens_core::github::{auth::create_client, parse_pr_reference};
//! use anyhow::Result;
//!
//! # async fn example() -> Result<()> {
//! let config = load_config()?;
//!
//! let octocrab = create_client(None, Duration::from_secs(config.github.api_timeout_seconds))?;
//! let api = GitHubPulls::new(octocrab, config.github.max_files);
//! let model = GeminiClient::new(&config.ai)?;
//!
//! let target = parse_pr_reference("octo/demo#7", None)?;
//! let options = ReviewOptions::builder()
//!     .review(config.review.clone())
//!     .dry_run(true)
//!     .build();
//!
//! let outcome = run_review(&api, &model, &target, &options).await?;
//! println!("{}", outcome.body);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`action`] - GitHub Actions inputs
//! - [`ai`] - Gemini integration
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub API (auth, events, pull requests)
//! - [`review`] - Filtering, prompts, and the review pipeline

// ============================================================================
// Error Handling
// ============================================================================

pub use error::PrlensError;

/// Convenience Result type for prlens operations.
///
/// This is equivalent to `std::result::Result<T, PrlensError>`.
pub type Result<T> = std::result::Result<T, PrlensError>;

// ============================================================================
// Configuration
// ============================================================================

pub use action::ActionInputs;
pub use config::{
    AiConfig, AppConfig, GitHubConfig, ReviewConfig, Strictness, config_dir, config_file_path,
    load_config, load_config_from,
};

// ============================================================================
// AI Integration
// ============================================================================

pub use ai::{GeminiClient, ReviewModel, resolve_api_key};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::auth::TokenSource;
pub use github::pulls::GitHubPulls;
pub use github::{PrFile, PullRequestApi, PullRequestTarget};

// ============================================================================
// Review
// ============================================================================

pub use review::{ReviewOptions, ReviewOutcome, SkippedFile, check_file, run_review};

// ============================================================================
// Retry Logic
// ============================================================================

pub use retry::{
    extract_retry_after, honor_retry_after, is_retryable_anyhow, is_retryable_http, retry_backoff,
};

// ============================================================================
// Modules
// ============================================================================

pub mod action;
pub mod ai;
pub mod config;
pub mod error;
pub mod github;
pub mod retry;
pub mod review;
