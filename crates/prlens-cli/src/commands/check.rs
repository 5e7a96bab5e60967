// SPDX-License-Identifier: Apache-2.0

//! Single-file review command.

use std::path::Path;

use anyhow::Result;
use prlens_core::{ReviewModel, Strictness, check_file};

use crate::output::CheckResult;

/// Reviews one local file.
pub async fn run(model: &dyn ReviewModel, file: &Path, strictness: Strictness) -> Result<CheckResult> {
    let review = check_file(model, file, strictness).await?;
    Ok(CheckResult {
        file: file.display().to_string(),
        review,
    })
}
