// SPDX-License-Identifier: Apache-2.0

//! AI integration module.
//!
//! Provides the [`ReviewModel`] seam and its Gemini implementation.

pub mod gemini;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use secrecy::SecretString;

pub use gemini::GeminiClient;

use crate::action::ActionInputs;

/// Provider name used in errors and logs.
pub const PROVIDER_NAME: &str = "gemini";

/// Environment variable for the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// A language model that turns a review prompt into review text.
#[async_trait]
pub trait ReviewModel: Send + Sync {
    /// Returns the name of the provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Generates a review for `prompt`.
    ///
    /// Returns `Ok(None)` when the model answered without any text.
    async fn generate(&self, prompt: &str) -> Result<Option<String>>;
}

/// Finds the Gemini API key: the action input first, then `GEMINI_API_KEY`.
#[must_use]
pub fn resolve_api_key(inputs: &ActionInputs) -> Option<SecretString> {
    inputs.gemini_api_key.clone().or_else(|| {
        std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .map(SecretString::from)
    })
}
