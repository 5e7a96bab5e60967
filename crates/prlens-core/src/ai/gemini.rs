// SPDX-License-Identifier: Apache-2.0

//! Google AI Studio (Gemini) API client for pull request review.
//!
//! Talks to the native `generateContent` endpoint. The API key travels in the
//! `x-goog-api-key` header so it never appears in URLs or request logs.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use super::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use super::{GEMINI_API_KEY_ENV, PROVIDER_NAME, ReviewModel};
use crate::config::AiConfig;
use crate::error::PrlensError;
use crate::retry::{honor_retry_after, is_retryable_anyhow, retry_backoff};

/// Gemini API client.
///
/// Holds the HTTP client, API key, and model configuration for reuse across requests.
pub struct GeminiClient {
    /// HTTP client with configured timeout.
    http: Client,
    /// API key for Gemini authentication.
    api_key: SecretString,
    /// Base API URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    api_url: String,
    /// Model name (e.g., "gemini-2.0-flash").
    model: String,
    /// Sampling parameters sent with every request.
    generation: GenerationConfig,
    /// Backoff policy for transient failures.
    backoff: ExponentialBuilder,
}

impl GeminiClient {
    /// Creates a new Gemini client, reading the API key from `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `GEMINI_API_KEY` environment variable is not set
    /// - HTTP client creation fails
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).with_context(|| {
            format!(
                "Missing {GEMINI_API_KEY_ENV} environment variable.\n\
                 Set it with: export {GEMINI_API_KEY_ENV}=your_api_key\n\
                 Get a free key at: https://aistudio.google.com/app/apikey"
            )
        })?;

        Self::with_api_key(SecretString::from(api_key), config)
    }

    /// Creates a new Gemini client with a provided API key.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn with_api_key(api_key: SecretString, config: &AiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_key,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            generation: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
            backoff: retry_backoff(),
        })
    }

    /// Replaces the retry backoff policy.
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    /// Model this client sends requests to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    /// Sends one request without retrying.
    async fn send_once(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(PrlensError::Network)?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate limited by {PROVIDER_NAME} API");
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(0);
            return Err(PrlensError::RateLimited {
                provider: PROVIDER_NAME.to_string(),
                retry_after,
            }
            .into());
        }

        let body = response.text().await.map_err(PrlensError::Network)?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            anyhow::bail!(
                "Invalid {PROVIDER_NAME} API key (HTTP {}). Check your {GEMINI_API_KEY_ENV} environment variable or the GEMINI_API_KEY input.",
                status.as_u16()
            );
        }

        // Error responses usually carry a JSON `error` object; fall back to the raw body.
        let parsed = serde_json::from_str::<GenerateContentResponse>(&body);

        if !status.is_success() {
            let message = match &parsed {
                Ok(GenerateContentResponse {
                    error: Some(err), ..
                }) => err.message.clone(),
                _ => body,
            };
            return Err(PrlensError::AI {
                message,
                status: Some(status.as_u16()),
                provider: PROVIDER_NAME.to_string(),
            }
            .into());
        }

        let parsed = parsed.map_err(PrlensError::InvalidAIResponse)?;

        if let Some(err) = &parsed.error {
            return Err(PrlensError::AI {
                message: err.message.clone(),
                status: err.code,
                provider: PROVIDER_NAME.to_string(),
            }
            .into());
        }

        Ok(parsed)
    }
}

#[async_trait]
impl ReviewModel for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        debug!("Calling {PROVIDER_NAME} API");

        let request = GenerateContentRequest::single_prompt(prompt, self.generation);
        let start = std::time::Instant::now();

        let response = (|| async { self.send_once(&request).await })
            .retry(self.backoff)
            .when(is_retryable_anyhow)
            .adjust(honor_retry_after)
            .notify(|err, dur| warn!(error = %err, delay = ?dur, "Retrying after error"))
            .await?;

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;

        let text = response.first_text().map(str::to_string);
        match &text {
            Some(t) => debug!(duration_ms, response_length = t.len(), "Received AI response"),
            None => warn!(
                duration_ms,
                finish_reason = ?response.candidates.first().and_then(|c| c.finish_reason.as_deref()),
                "AI response contained no text"
            ),
        }

        Ok(text)
    }
}
