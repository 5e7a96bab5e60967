// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the prlens CLI.

pub mod check;
pub mod completion;
pub mod review;

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use prlens_core::ai::GEMINI_API_KEY_ENV;
use prlens_core::{ActionInputs, AiConfig, AppConfig, GeminiClient, resolve_api_key};

use crate::cli::{Commands, OutputContext};
use crate::output::{self, ReviewReport};

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        s.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Builds the Gemini client from the action input or `GEMINI_API_KEY`.
fn gemini_client(inputs: &ActionInputs, config: &AiConfig) -> Result<GeminiClient> {
    let api_key = resolve_api_key(inputs).with_context(|| {
        format!(
            "Missing Gemini API key.\n\
             Set {GEMINI_API_KEY_ENV} or pass the gemini_api_key input.\n\
             Get a free key at: https://aistudio.google.com/app/apikey"
        )
    })?;
    GeminiClient::with_api_key(api_key, config)
}

/// Dispatch to the appropriate command handler.
pub async fn run(
    command: Commands,
    ctx: OutputContext,
    config: &AppConfig,
    inputs: &ActionInputs,
) -> Result<()> {
    match command {
        Commands::Review {
            reference,
            repo,
            dry_run,
        } => {
            let model = gemini_client(inputs, &config.ai)?;
            let target = review::resolve_target(reference.as_deref(), repo)?;

            let spinner = maybe_spinner(&ctx, &format!("Reviewing {target}..."));
            let result = review::run(&target, &model, config, inputs, dry_run).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }

            output::render(&ReviewReport(result?), &ctx)
        }

        Commands::Check { file } => {
            let model = gemini_client(inputs, &config.ai)?;

            let spinner = maybe_spinner(&ctx, &format!("Reviewing {}...", file.display()));
            let result = check::run(&model, &file, config.review.strictness).await;
            if let Some(s) = spinner {
                s.finish_and_clear();
            }

            output::render(&result?, &ctx)
        }

        Commands::Completion { shell } => {
            completion::run_generate(shell);
            Ok(())
        }
    }
}
