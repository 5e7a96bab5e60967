// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `PrlensError` and appends a hint for each
//! error kind. Errors of any other type print their full context chain.

use std::fmt::Write;

use anyhow::Error;
use prlens_core::ai::GEMINI_API_KEY_ENV;
use prlens_core::error::PrlensError;

/// Formats an error for CLI display with helpful hints.
pub fn format_error(error: &Error) -> String {
    let Some(prlens_err) = error.downcast_ref::<PrlensError>() else {
        return format!("{error:#}");
    };

    match prlens_err {
        PrlensError::RateLimited {
            provider,
            retry_after,
        } => format_rate_limited_error(provider, *retry_after),
        PrlensError::NotAuthenticated => format!(
            "{prlens_err}\n\nTip: In a workflow, pass `github_token: ${{{{ secrets.GITHUB_TOKEN }}}}`. Locally, run `gh auth login`."
        ),
        PrlensError::AI {
            message, status, ..
        } => {
            let mut msg = format!("AI provider error: {message}");
            if let Some(code) = status {
                let _ = write!(msg, " (HTTP {code})");
            }
            let _ = write!(
                msg,
                "\n\nTip: Check your {GEMINI_API_KEY_ENV} environment variable or the model name."
            );
            msg
        }
        PrlensError::Config { .. } => format!(
            "{prlens_err}\n\nTip: Check your config file at {}",
            prlens_core::config_file_path().display()
        ),
        PrlensError::InvalidAIResponse(_) => format!(
            "{prlens_err}\n\nTip: This may be a temporary issue with the AI provider. Try again in a moment."
        ),
        PrlensError::Network(_) => {
            format!("{prlens_err}\n\nTip: Check your internet connection and try again.")
        }
        // Keep the chain: it names the pull request and the failed call
        PrlensError::GitHub { .. } => format!(
            "{error:#}\n\nTip: Check that the pull request exists. The token needs `pull-requests: write` permission to comment."
        ),
        PrlensError::NotPullRequestEvent => format!(
            "{prlens_err}\n\nTip: Trigger the workflow on `pull_request`, or pass a reference: prlens review owner/repo#123"
        ),
    }
}

/// Formats a rate limit error with hints.
fn format_rate_limited_error(provider: &str, retry_after: u64) -> String {
    let mut msg = format!("Rate limit exceeded on {provider}, retry after {retry_after}s");

    msg.push_str("\n\nTip: You've hit the rate limit for this provider.");
    msg.push_str("\n- Wait at least ");
    let _ = write!(msg, "{retry_after}");
    msg.push_str(" seconds before retrying.");
    if provider == "gemini" {
        msg.push_str("\n- Free tier quotas are listed at https://ai.google.dev/gemini-api/docs/rate-limits");
    }

    msg
}
