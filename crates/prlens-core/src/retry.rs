// SPDX-License-Identifier: Apache-2.0

//! Retry helpers for transient GitHub and Gemini failures.
//!
//! Both the AI client and the pull request API wrap their calls in
//! [`retry_backoff`] and use the predicates here to decide which errors are
//! worth another attempt.

use std::time::Duration;

use backon::ExponentialBuilder;

use crate::error::PrlensError;

/// Whether an HTTP status code indicates a transient failure.
///
/// 429 and the 5xx gateway/availability codes are retryable.
#[must_use]
pub fn is_retryable_http(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Whether an octocrab error is transient.
///
/// 403 counts as retryable here because GitHub uses it for secondary rate limits.
#[must_use]
pub fn is_retryable_octocrab(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            status == 403 || is_retryable_http(status)
        }
        octocrab::Error::Service { .. } | octocrab::Error::Hyper { .. } => true,
        _ => false,
    }
}

/// Whether an error chain is worth retrying.
///
/// Recognizes octocrab errors, reqwest timeouts/connect failures/statuses,
/// [`PrlensError::RateLimited`], and AI errors carrying a retryable status.
#[must_use]
pub fn is_retryable_anyhow(e: &anyhow::Error) -> bool {
    if let Some(oct_err) = e.downcast_ref::<octocrab::Error>() {
        return is_retryable_octocrab(oct_err);
    }

    if let Some(req_err) = e.downcast_ref::<reqwest::Error>() {
        return is_retryable_reqwest(req_err);
    }

    match e.downcast_ref::<PrlensError>() {
        Some(PrlensError::Network(req_err)) => is_retryable_reqwest(req_err),
        Some(PrlensError::RateLimited { .. }) => true,
        Some(PrlensError::AI {
            status: Some(status),
            ..
        }) => is_retryable_http(*status),
        _ => false,
    }
}

fn is_retryable_reqwest(e: &reqwest::Error) -> bool {
    e.is_timeout()
        || e.is_connect()
        || e
            .status()
            .is_some_and(|status| is_retryable_http(status.as_u16()))
}

/// Exponential backoff used for every retried call.
///
/// Factor 2, first delay 1s, at most 3 retries, with jitter.
#[must_use]
pub fn retry_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_factor(2.0)
        .with_min_delay(Duration::from_secs(1))
        .with_max_times(3)
        .with_jitter()
}

/// Upper bound on a server-requested delay.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Delay requested by a [`PrlensError::RateLimited`] error, capped at 120s.
///
/// Returns `None` for any other error, or when no delay was requested.
#[must_use]
pub fn extract_retry_after(e: &anyhow::Error) -> Option<Duration> {
    if let Some(PrlensError::RateLimited { retry_after, .. }) = e.downcast_ref::<PrlensError>()
        && *retry_after > 0
    {
        return Some(Duration::from_secs((*retry_after).min(MAX_RETRY_AFTER_SECS)));
    }
    None
}

/// Backoff adjustment for [`backon::Retry::adjust`].
///
/// Waits as long as the server asked instead of the computed delay. An
/// exhausted backoff (`None`) stays exhausted.
#[must_use]
pub fn honor_retry_after(e: &anyhow::Error, delay: Option<Duration>) -> Option<Duration> {
    delay.map(|d| extract_retry_after(e).unwrap_or(d))
}
