// SPDX-License-Identifier: Apache-2.0

//! Pull request review: file selection, prompt construction, and the
//! end-to-end pipeline.

pub mod filter;
pub mod pipeline;
pub mod prompt;

pub use filter::{FileFilter, SUPPORTED_EXTENSIONS, Selection, SkippedFile};
pub use pipeline::{ReviewOptions, ReviewOutcome, check_file, run_review};
pub use prompt::{COMMENT_HEADING, NO_REVIEW_FALLBACK};
