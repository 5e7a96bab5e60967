// SPDX-License-Identifier: Apache-2.0

//! Error types for the sample functions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the sample functions.
#[derive(Error, Debug)]
pub enum SampleError {
    /// Divisor was zero.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// An operation that needs at least one element got none.
    #[error("Input sequence is empty")]
    EmptyInput,

    /// Operation is undefined for negative input.
    #[error("Negative input is not allowed: {value}")]
    NegativeInput {
        /// The rejected value, rendered for display.
        value: String,
    },

    /// Integer result does not fit in the return type.
    #[error("Arithmetic overflow in {operation}")]
    Overflow {
        /// Name of the overflowing operation.
        operation: &'static str,
    },

    /// User id is not a positive integer.
    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),

    /// Command line was empty after trimming.
    #[error("Command is empty")]
    EmptyCommand,

    /// Program is not on the caller's allowlist.
    #[error("Command not allowed: {0}")]
    DisallowedCommand(String),

    /// Config file could not be read.
    #[error("Failed to read config file {}", path.display())]
    ReadConfig {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required credential environment variable is unset or empty.
    #[error("Missing {0} environment variable")]
    MissingCredential(&'static str),
}
