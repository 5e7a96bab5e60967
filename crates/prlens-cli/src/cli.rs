// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for prlens.
//!
//! Uses clap's derive API for declarative CLI parsing.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the completion subcommand with shell-specific examples.
const COMPLETION_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(prlens completion bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      prlens completion zsh > ~/.zsh/completions/_prlens

  fish
    Generate completion file:
      prlens completion fish > ~/.config/fish/completions/prlens.fish
"#;

/// Extended help text for the review subcommand.
const REVIEW_HELP: &str = r"EXAMPLES

  Inside a GitHub Actions pull_request workflow (PR taken from the event):
    prlens review

  Any pull request:
    prlens review https://github.com/octo/demo/pull/7
    prlens review octo/demo#7
    prlens review 7 --repo octo/demo

  Preview without posting comments:
    prlens review octo/demo#7 --dry-run
";

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && matches!(self.format, OutputFormat::Text)
    }
}

/// prlens - AI code review for GitHub pull requests.
///
/// Reviews the changed files of a pull request with Gemini and posts the
/// result as a PR comment.
#[derive(Parser)]
#[command(name = "prlens")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Enable verbose output (info-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Override configured Gemini model (e.g., gemini-2.0-flash)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Review a pull request and post the result as a comment
    #[command(after_long_help = REVIEW_HELP)]
    Review {
        /// PR reference: URL, owner/repo#number, or number (defaults to the Actions event)
        reference: Option<String>,

        /// Repository for bare PR numbers (owner/repo)
        #[arg(long)]
        repo: Option<String>,

        /// Print the review instead of posting comments
        #[arg(long)]
        dry_run: bool,
    },

    /// Review a single local file
    Check {
        /// File to review
        file: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(after_long_help = COMPLETION_HELP)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
