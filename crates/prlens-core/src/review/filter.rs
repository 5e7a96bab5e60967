// SPDX-License-Identifier: Apache-2.0

//! Changed-file selection.
//!
//! Decides which files of a pull request are sent to the model. Files with
//! unsupported extensions, excluded paths, or deleted status are dropped
//! silently; files whose patch exceeds the size limit are reported as skipped.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Serialize;
use tracing::debug;

use crate::config::ReviewConfig;
use crate::error::PrlensError;
use crate::github::PrFile;

/// File extensions the reviewer understands.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".js", ".ts", ".jsx", ".tsx", ".py", ".java", ".cpp", ".c", ".h", ".cs", ".go", ".rs", ".php",
    ".rb", ".swift", ".kt", ".html", ".css", ".scss", ".sql", ".sh", ".yaml", ".yml", ".json",
    ".xml",
];

/// A file left out of the review because its patch is too large.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// Path of the file.
    pub filename: String,
    /// Patch length in characters.
    pub patch_chars: usize,
}

impl SkippedFile {
    /// Line used in comments, e.g. `big.py (Too large: 9000 chars)`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} (Too large: {} chars)", self.filename, self.patch_chars)
    }
}

/// Outcome of filtering a pull request's files.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Selection {
    /// Files to send to the model, in pull request order.
    pub to_review: Vec<PrFile>,
    /// Files dropped for size.
    pub skipped: Vec<SkippedFile>,
}

/// Whether `filename` ends with one of [`SUPPORTED_EXTENSIONS`].
#[must_use]
pub fn is_supported(filename: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| filename.ends_with(ext))
}

/// Compiled file filter.
#[derive(Debug)]
pub struct FileFilter {
    excludes: GlobSet,
    max_file_size: usize,
}

impl FileFilter {
    /// Compiles the exclude patterns from `config`.
    ///
    /// `*` does not match across `/`; use `**` for that.
    ///
    /// # Errors
    ///
    /// Returns `PrlensError::Config` if a pattern is not a valid glob.
    pub fn new(config: &ReviewConfig) -> Result<Self, PrlensError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.exclude_patterns {
            let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
            builder.add(glob);
        }

        Ok(Self {
            excludes: builder.build()?,
            max_file_size: config.max_file_size,
        })
    }

    /// Whether `filename` matches an exclude pattern.
    #[must_use]
    pub fn is_excluded(&self, filename: &str) -> bool {
        self.excludes.is_match(filename)
    }

    /// Splits `files` into files to review and files skipped for size.
    #[must_use]
    pub fn select(&self, files: Vec<PrFile>) -> Selection {
        let mut selection = Selection::default();

        for file in files {
            if !is_supported(&file.filename) {
                debug!(file = %file.filename, "Unsupported extension");
                continue;
            }
            if self.is_excluded(&file.filename) {
                debug!(file = %file.filename, "Excluded by pattern");
                continue;
            }
            if file.is_removed() {
                debug!(file = %file.filename, "Removed file");
                continue;
            }

            let patch_chars = file.patch.as_deref().map_or(0, |p| p.chars().count());
            if patch_chars > self.max_file_size {
                debug!(file = %file.filename, patch_chars, "Patch too large");
                selection.skipped.push(SkippedFile {
                    filename: file.filename,
                    patch_chars,
                });
                continue;
            }

            selection.to_review.push(file);
        }

        selection
    }
}
