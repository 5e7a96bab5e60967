// SPDX-License-Identifier: Apache-2.0

//! Output rendering for CLI commands.
//!
//! Command handlers return data; this module handles presentation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use console::style;
use prlens_core::ReviewOutcome;
use prlens_core::review::NO_REVIEW_FALLBACK;
use serde::Serialize;

use crate::cli::{OutputContext, OutputFormat};

/// Separator printed around a single-file review.
const SEPARATOR: &str = "---";

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;
}

/// Generic render function - handles JSON via serde, delegates text to the trait.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            result
                .render_text(&mut io::stdout(), ctx)
                .context("Failed to render text")?;
        }
    }
    Ok(())
}

/// Result of `prlens check`.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    /// Reviewed file.
    pub file: String,
    /// Model output, if any.
    pub review: Option<String>,
}

impl Renderable for CheckResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{SEPARATOR}")?;
        writeln!(w, "{}", self.review.as_deref().unwrap_or(NO_REVIEW_FALLBACK))?;
        writeln!(w, "{SEPARATOR}")
    }
}

/// Wrapper so the core outcome can be rendered by this crate.
#[derive(Serialize)]
#[serde(transparent)]
pub struct ReviewReport(pub ReviewOutcome);

impl Renderable for ReviewReport {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let outcome = &self.0;

        writeln!(
            w,
            "{} {} ({} file(s) reviewed)",
            style("Reviewed").green().bold(),
            outcome.target,
            outcome.reviewed_files.len()
        )?;

        if ctx.verbose {
            for file in &outcome.reviewed_files {
                writeln!(w, "  {} {file}", style("+").green())?;
            }
        }

        if !outcome.skipped.is_empty() {
            writeln!(w, "{}", style("Skipped (too large)").yellow().bold())?;
            for file in &outcome.skipped {
                writeln!(w, "  - {}", file.describe())?;
            }
        }

        if outcome.dry_run {
            writeln!(w)?;
            writeln!(w, "{}", style("Dry run: comment not posted").dim())?;
            writeln!(w, "{SEPARATOR}")?;
            writeln!(w, "{}", outcome.body)?;
            writeln!(w, "{SEPARATOR}")?;
        } else if let Some(url) = &outcome.comment_url {
            writeln!(w, "{} {url}", style("Comment:").bold())?;
        }

        Ok(())
    }
}
