// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the prlens CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging to stderr,
//! so stdout stays clean for `--output json`.
//!
//! # Examples
//!
//! ```bash
//! # Debug output for troubleshooting
//! RUST_LOG=prlens=debug prlens review octo/demo#7
//!
//! # Include GitHub client internals
//! RUST_LOG=prlens=debug,octocrab=debug prlens review octo/demo#7
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence. Otherwise prlens logs warnings only, or
/// progress at info level when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        "prlens=info,octocrab=error,reqwest=error"
    } else {
        "prlens=warn,octocrab=error,reqwest=error"
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
