// SPDX-License-Identifier: Apache-2.0

//! GitHub Actions input handling.
//!
//! The Actions runner exposes each `with:` input of a step as an environment
//! variable named `INPUT_<NAME>` (upper-cased). This module reads the inputs
//! prlens understands and layers them over the loaded [`AppConfig`].

use secrecy::SecretString;
use tracing::debug;

use crate::config::{AppConfig, Strictness};
use crate::error::PrlensError;

/// Input holding the Gemini API key.
pub const INPUT_GEMINI_API_KEY: &str = "INPUT_GEMINI_API_KEY";

/// Input holding comma-separated exclude globs.
pub const INPUT_EXCLUDE_FILES: &str = "INPUT_EXCLUDE_FILES";

/// Input holding the reviewer strictness.
pub const INPUT_STRICTNESS: &str = "INPUT_STRICTNESS";

/// Input holding the per-file patch size limit.
pub const INPUT_MAX_FILE_SIZE: &str = "INPUT_MAX_FILE_SIZE";

/// Input holding a GitHub token.
pub const INPUT_GITHUB_TOKEN: &str = "INPUT_GITHUB_TOKEN";

/// Inputs passed to the action step.
///
/// Every field is optional; an input that is unset or empty is `None`.
#[derive(Debug, Default)]
pub struct ActionInputs {
    /// Gemini API key.
    pub gemini_api_key: Option<SecretString>,
    /// Exclude globs, trimmed, empties removed.
    pub exclude_patterns: Option<Vec<String>>,
    /// Reviewer strictness.
    pub strictness: Option<Strictness>,
    /// Per-file patch size limit.
    pub max_file_size: Option<usize>,
    /// GitHub token.
    pub github_token: Option<SecretString>,
}

impl ActionInputs {
    /// Reads inputs from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `PrlensError::Config` if an input is present but malformed.
    pub fn from_env() -> Result<Self, PrlensError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads inputs through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns `PrlensError::Config` if `strictness` or `max_file_size` cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PrlensError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let strictness = get(INPUT_STRICTNESS)
            .map(|s| s.parse::<Strictness>())
            .transpose()?;

        let max_file_size = get(INPUT_MAX_FILE_SIZE)
            .map(|s| {
                s.trim().parse::<usize>().map_err(|e| PrlensError::Config {
                    message: format!("invalid max_file_size '{s}': {e}"),
                })
            })
            .transpose()?;

        let exclude_patterns = get(INPUT_EXCLUDE_FILES).map(|s| split_patterns(&s));

        Ok(Self {
            gemini_api_key: get(INPUT_GEMINI_API_KEY).map(SecretString::from),
            exclude_patterns,
            strictness,
            max_file_size,
            github_token: get(INPUT_GITHUB_TOKEN).map(SecretString::from),
        })
    }

    /// Overrides review settings in `config` with the inputs that are present.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(patterns) = &self.exclude_patterns {
            debug!(count = patterns.len(), "Applying exclude_files input");
            config.review.exclude_patterns.clone_from(patterns);
        }
        if let Some(strictness) = self.strictness {
            debug!(%strictness, "Applying strictness input");
            config.review.strictness = strictness;
        }
        if let Some(max_file_size) = self.max_file_size {
            debug!(max_file_size, "Applying max_file_size input");
            config.review.max_file_size = max_file_size;
        }
    }
}

/// Splits a comma-separated pattern list, trimming entries and dropping empties.
#[must_use]
pub fn split_patterns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
