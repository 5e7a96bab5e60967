// SPDX-License-Identifier: Apache-2.0

//! Error types for prlens.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur during prlens operations.
#[derive(Error, Debug)]
pub enum PrlensError {
    /// GitHub API error from octocrab.
    #[error("GitHub API error: {message}")]
    GitHub {
        /// Error message.
        message: String,
    },

    /// AI provider error.
    #[error("AI provider error: {message}")]
    AI {
        /// Error message from the AI provider.
        message: String,
        /// Optional HTTP status code from the provider.
        status: Option<u16>,
        /// Name of the AI provider (e.g., `gemini`).
        provider: String,
    },

    /// No GitHub token could be found.
    #[error("Authentication required - set GITHUB_TOKEN in the environment or pass the github_token input")]
    NotAuthenticated,

    /// Rate limit exceeded from an AI provider.
    #[error("Rate limit exceeded on {provider}, retry after {retry_after}s")]
    RateLimited {
        /// Name of the provider that rate limited.
        provider: String,
        /// Number of seconds to wait before retrying.
        retry_after: u64,
    },

    /// Configuration error (file, environment or action inputs).
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Response body from the AI provider was not valid JSON.
    #[error("Invalid JSON response from AI")]
    InvalidAIResponse(#[source] serde_json::Error),

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The triggering workflow event carries no pull request.
    #[error("This action only supports pull_request events")]
    NotPullRequestEvent,
}

impl From<octocrab::Error> for PrlensError {
    fn from(err: octocrab::Error) -> Self {
        let message = match &err {
            octocrab::Error::GitHub { source, .. } => {
                format!("{} (HTTP {})", source.message, source.status_code.as_u16())
            }
            other => other.to_string(),
        };
        PrlensError::GitHub { message }
    }
}

impl From<config::ConfigError> for PrlensError {
    fn from(err: config::ConfigError) -> Self {
        PrlensError::Config {
            message: err.to_string(),
        }
    }
}

impl From<globset::Error> for PrlensError {
    fn from(err: globset::Error) -> Self {
        PrlensError::Config {
            message: format!("invalid exclude pattern: {err}"),
        }
    }
}
