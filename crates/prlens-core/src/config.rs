// SPDX-License-Identifier: Apache-2.0

//! Configuration management for prlens.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. GitHub Actions inputs (applied by [`crate::action::ActionInputs::apply`])
//! 2. Environment variables (prefix: `PRLENS_`)
//! 3. Config file: `~/.config/prlens/config.toml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Raise the per-file patch limit via environment variable
//! PRLENS_REVIEW__MAX_FILE_SIZE=8000 prlens review
//!
//! # Exclude generated files
//! PRLENS_REVIEW__EXCLUDE_PATTERNS="dist/*,*.lock.json" prlens review
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::PrlensError;

/// How picky the reviewer should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strictness {
    /// Only bugs and security problems.
    Low,
    /// Bugs, security and notable clean-code issues.
    #[default]
    Medium,
    /// Everything, including style and whitespace.
    High,
}

impl Strictness {
    /// Upper-case label used inside prompts (e.g. `MEDIUM`).
    #[must_use]
    pub fn as_upper(self) -> &'static str {
        match self {
            Strictness::Low => "LOW",
            Strictness::Medium => "MEDIUM",
            Strictness::High => "HIGH",
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strictness::Low => "low",
            Strictness::Medium => "medium",
            Strictness::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Strictness {
    type Err = PrlensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Strictness::Low),
            "medium" => Ok(Strictness::Medium),
            "high" => Ok(Strictness::High),
            other => Err(PrlensError::Config {
                message: format!("unknown strictness '{other}', expected low, medium or high"),
            }),
        }
    }
}

impl TryFrom<String> for Strictness {
    type Error = PrlensError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Strictness> for String {
    fn from(value: Strictness) -> Self {
        value.to_string()
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// AI provider settings.
    pub ai: AiConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Review behaviour.
    pub review: ReviewConfig,
}

/// AI provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Gemini model identifier.
    pub model: String,
    /// Base URL of the Gemini REST API (without the `/models/...` suffix).
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Temperature for API requests (0.0-1.0).
    pub temperature: f32,
    /// Maximum tokens the model may generate.
    pub max_output_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_seconds: 60,
            temperature: 0.3,
            max_output_tokens: 8192,
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Upper bound on changed files fetched per pull request.
    pub max_files: usize,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_timeout_seconds: 10,
            max_files: 100,
        }
    }
}

/// Review behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Reviewer strictness.
    pub strictness: Strictness,
    /// Glob patterns for files that are never reviewed.
    pub exclude_patterns: Vec<String>,
    /// Largest patch (in characters) sent to the model.
    pub max_file_size: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Medium,
            exclude_patterns: Vec::new(),
            max_file_size: 6000,
        }
    }
}

/// Returns the prlens configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/prlens`. Falls back to a relative
/// `.config/prlens` when no home directory is known (e.g. minimal CI images).
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("prlens");
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("prlens")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `PRLENS_` and double underscore
/// for nested keys (e.g., `PRLENS_AI__MODEL`).
///
/// # Errors
///
/// Returns `PrlensError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, PrlensError> {
    load_config_from(&config_file_path())
}

/// Load application configuration using an explicit config file path.
///
/// # Errors
///
/// Returns `PrlensError::Config` if the file exists but is invalid, or an
/// environment override cannot be parsed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, PrlensError> {
    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::from(path).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("PRLENS")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("review.exclude_patterns")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
