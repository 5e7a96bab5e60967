// SPDX-License-Identifier: Apache-2.0

//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use tracing::debug;

use crate::cli::Cli;

/// Writes the completion script for `shell` to stdout.
pub fn run_generate(shell: Shell) {
    debug!(?shell, "Generating completions");
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "prlens", &mut io::stdout());
}
