// SPDX-License-Identifier: Apache-2.0

//! Prompt and comment text.

use std::fmt::Write;

use crate::config::Strictness;
use crate::github::PrFile;

use super::filter::SkippedFile;

/// Heading shared by every comment prlens posts.
pub const COMMENT_HEADING: &str = "## 🤖 AI Code Review";

/// Text used when the model returns nothing.
pub const NO_REVIEW_FALLBACK: &str = "❌ No review generated.";

/// Renders the diff section: one fenced block per file.
#[must_use]
pub fn build_diff_context(files: &[PrFile]) -> String {
    let mut context = String::new();
    for file in files {
        let _ = write!(
            context,
            "\n### File: {}\n```diff\n{}\n```\n",
            file.filename,
            file.patch.as_deref().unwrap_or_default()
        );
    }
    context
}

/// Builds the full reviewer prompt.
#[must_use]
pub fn build_prompt(strictness: Strictness, files: &[PrFile]) -> String {
    format!(
        r"
You are an expert Senior Staff Engineer doing a code review.
Strictness Level: {level}

INSTRUCTIONS:
1. Analyze the code for Bugs, Security Vulnerabilities, and Clean Code violations.
2. context is limited, so only comment on what you see in the diff.
3. IGNORE minor style/whitespace issues unless strictness is HIGH.
4. FORMAT YOUR RESPONSE using the structure below.

STRUCTURE:
## 🔎 Review Summary
[1-2 sentences overall thought]

## 🔴 Critical Issues (Bugs/Security)
- [File.py]: Description of bug...

## ⚠️ Improvements (Refactoring/Perf)
- [File.js]: Suggestion...

## ℹ️ Nitpicks (Docs/Style)
- [File]: Description...

CODE DIFF:
{diff}
",
        level = strictness.as_upper(),
        diff = build_diff_context(files),
    )
}

/// Comment posted when the review starts.
#[must_use]
pub fn status_comment(strictness: Strictness) -> String {
    format!("{COMMENT_HEADING}\n\n🔎 Analyzing changes... \n*Config: Strictness={strictness}*")
}

/// Comment posted when no file qualifies for review.
#[must_use]
pub fn nothing_to_review_comment(skipped: &[SkippedFile]) -> String {
    let mut msg = String::from("✅ No reviewable code changes found.");
    if !skipped.is_empty() {
        let _ = write!(msg, "\n(Skipped {} large files)", skipped.len());
    }
    format!("{COMMENT_HEADING}\n\n{msg}")
}

/// The final review comment: model output plus a footer listing skipped files.
#[must_use]
pub fn review_comment(review: &str, skipped: &[SkippedFile]) -> String {
    if skipped.is_empty() {
        return review.to_string();
    }

    let list = skipped
        .iter()
        .map(|f| format!("- {}", f.describe()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{review}\n\n---\n*⚠️ Skipped files (too large):* \n{list}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, patch: &str) -> PrFile {
        PrFile {
            filename: name.to_string(),
            status: "modified".to_string(),
            patch: Some(patch.to_string()),
        }
    }

    fn skipped(name: &str, chars: usize) -> SkippedFile {
        SkippedFile {
            filename: name.to_string(),
            patch_chars: chars,
        }
    }

    #[test]
    fn test_diff_context() {
        let context = build_diff_context(&[file("a.py", "+x = 1"), file("b.rs", "-let y = 2;")]);
        assert_eq!(
            context,
            "\n### File: a.py\n```diff\n+x = 1\n```\n\n### File: b.rs\n```diff\n-let y = 2;\n```\n"
        );
    }

    #[test]
    fn test_prompt_contains_level_and_diff() {
        let prompt = build_prompt(Strictness::High, &[file("app.py", "+print('hi')")]);
        assert!(prompt.contains("Strictness Level: HIGH"));
        assert!(prompt.contains("## 🔴 Critical Issues (Bugs/Security)"));
        assert!(
            prompt.contains("2. context is limited, so only comment on what you see in the diff.")
        );
        assert!(prompt.contains("CODE DIFF:\n\n### File: app.py\n```diff\n+print('hi')\n```"));
    }

    #[test]
    fn test_status_comment() {
        assert_eq!(
            status_comment(Strictness::Medium),
            "## 🤖 AI Code Review\n\n🔎 Analyzing changes... \n*Config: Strictness=medium*"
        );
    }

    #[test]
    fn test_nothing_to_review_comment() {
        assert_eq!(
            nothing_to_review_comment(&[]),
            "## 🤖 AI Code Review\n\n✅ No reviewable code changes found."
        );
        assert!(
            nothing_to_review_comment(&[skipped("a.py", 9000), skipped("b.py", 7000)])
                .ends_with("\n(Skipped 2 large files)")
        );
    }

    #[test]
    fn test_review_comment_without_skips() {
        assert_eq!(review_comment("All good", &[]), "All good");
    }

    #[test]
    fn test_review_comment_with_footer() {
        let body = review_comment("Review", &[skipped("big.py", 9000)]);
        assert_eq!(
            body,
            "Review\n\n---\n*⚠️ Skipped files (too large):* \n- big.py (Too large: 9000 chars)"
        );
    }
}
