//! Whitespace cleanup applied after markup removal.
//!
//! Removing components leaves behind empty lines and indentation-only lines.
//! The rules run in a fixed order:
//!
//! 1. Runs of three or more newlines collapse to one blank line.
//! 2. Lines containing only horizontal whitespace become empty.
//! 3. Trailing horizontal whitespace before each newline is removed.
//!
//! The whole document is then trimmed.

use std::sync::LazyLock;

use regex::Regex;

/// Three or more newlines, with horizontal whitespace allowed between them.
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[^\S\n]*\n(?:[^\S\n]*\n)+").expect("invalid blank run regex"));

/// A line made only of horizontal whitespace.
static WHITESPACE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^\S\n]+$").expect("invalid whitespace line regex"));

/// Horizontal whitespace directly before a newline.
static TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+\n").expect("invalid trailing whitespace regex"));

/// Normalize whitespace left over after stripping markup.
#[must_use]
pub fn normalize_whitespace(content: &str) -> String {
    let collapsed = BLANK_RUN.replace_all(content, "\n\n");
    let blanked = WHITESPACE_LINE.replace_all(&collapsed, "");
    let trimmed_lines = TRAILING.replace_all(&blanked, "\n");
    trimmed_lines.trim().to_owned()
}
