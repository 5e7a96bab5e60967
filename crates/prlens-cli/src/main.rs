// SPDX-License-Identifier: Apache-2.0

//! prlens - AI code review for GitHub pull requests.
//!
//! Runs as a step in a GitHub Actions `pull_request` workflow, or locally
//! against any pull request or file.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use prlens_core::{ActionInputs, config};
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output_ctx = OutputContext::from_cli(cli.output, cli.verbose);

    let mut config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    // Action inputs override the config file and PRLENS_* variables
    let inputs = ActionInputs::from_env().context("Invalid action input")?;
    inputs.apply(&mut config);

    if let Some(model) = &cli.model {
        config.ai.model.clone_from(model);
        debug!("Overriding AI model to: {model}");
    }

    commands::run(cli.command, output_ctx, &config, &inputs).await
}
