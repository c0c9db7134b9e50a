//! Mintlify component and comment removal.
//!
//! Removal is pattern based rather than a markup parse. Passes run in a fixed
//! order, each assuming the previous ones already simplified the text:
//!
//! 1. `{/* Mintlify ... */}` comment regions
//! 2. paired components `<Name ...>...</Name>` including their content
//! 3. self-closing components `<Name .../>`
//! 4. any leftover bare `<Name ...>` or `</Name>` tag
//! 5. whitespace cleanup (see [`crate::whitespace`])
//!
//! A paired region ends at the first close tag with the same name, so a
//! component nested inside another of the same name leaves the outer close tag
//! behind for pass 4.
//!
//! Passes 2 and 3 match a name only on a boundary (followed by whitespace, `/`
//! or `>`), so `<Tab>...</Tab>` pairing never swallows a `<Tabs>` region. Pass
//! 4 matches open tags by prefix and repeats until nothing changes: after
//! [`strip`], no `<Name` or `</Name>` of any vocabulary name is left, even
//! when that removes an unrelated tag such as `<Notebook>`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::tables::{COMMENT_MARKER, COMPONENTS};
use crate::whitespace::normalize_whitespace;

/// `{/* Mintlify ... */}` comment, possibly spanning lines.
static MARKER_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)\{{/\*\s*{COMMENT_MARKER}.*?\*/\}}"))
        .expect("invalid marker comment regex")
});

/// Compiled patterns for one component name.
struct ComponentPatterns {
    /// Open tag through the nearest close tag of the same name.
    paired: Regex,
    /// Self-closing tag.
    self_closing: Regex,
    /// Open tag by prefix, or the bare `<Name` when no `>` follows.
    open: Regex,
    /// Bare close tag.
    close: Regex,
}

impl ComponentPatterns {
    fn new(name: &str) -> Self {
        let compile = |pattern: String| {
            Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid pattern for <{name}>: {e}"))
        };
        Self {
            paired: compile(format!(r"(?s)<{name}(?:[\s/][^>]*)?>.*?</{name}\s*>")),
            self_closing: compile(format!(r"<{name}(?:\s[^>]*)?/>")),
            open: compile(format!(r"<{name}(?:[^>]*>)?")),
            close: compile(format!(r"</{name}\s*>")),
        }
    }
}

/// Patterns for every component, in vocabulary order.
static PATTERNS: LazyLock<Vec<ComponentPatterns>> =
    LazyLock::new(|| COMPONENTS.iter().map(|name| ComponentPatterns::new(name)).collect());

/// Replace every match of `re` in `content` with nothing.
///
/// Only reallocates when something matched.
fn delete_all(content: String, re: &Regex) -> String {
    match re.replace_all(&content, "") {
        Cow::Borrowed(_) => content,
        Cow::Owned(replaced) => replaced,
    }
}

/// Remove Mintlify comment regions, including their delimiters.
#[must_use]
pub fn remove_marker_comments(content: &str) -> String {
    MARKER_COMMENT.replace_all(content, "").into_owned()
}

/// Remove paired components together with everything between the tags.
#[must_use]
pub fn remove_paired_components(content: &str) -> String {
    PATTERNS
        .iter()
        .fold(content.to_owned(), |acc, p| delete_all(acc, &p.paired))
}

/// Remove self-closing components.
#[must_use]
pub fn remove_self_closing_components(content: &str) -> String {
    PATTERNS
        .iter()
        .fold(content.to_owned(), |acc, p| delete_all(acc, &p.self_closing))
}

/// Remove any open or close component tag still left in the content.
///
/// Repeats until a pass removes nothing, since deleting a tag can join its
/// neighbours into a new one (`<<Tip>Tip>`).
#[must_use]
pub fn remove_bare_tags(content: &str) -> String {
    let mut current = content.to_owned();
    loop {
        let next = PATTERNS.iter().fold(current.clone(), |acc, p| {
            let acc = delete_all(acc, &p.open);
            delete_all(acc, &p.close)
        });
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Strip all Mintlify markup from content and normalize whitespace.
///
/// # Example
///
/// ```
/// use docmig_convert::strip;
///
/// let output = strip("Intro\n\n<Note>Read this first.</Note>\n\n\n\nBody <Frame src=\"a.png\"/>");
/// assert_eq!(output, "Intro\n\nBody");
/// ```
#[must_use]
pub fn strip(content: &str) -> String {
    let content = remove_marker_comments(content);
    let content = remove_paired_components(&content);
    let content = remove_self_closing_components(&content);
    let content = remove_bare_tags(&content);
    normalize_whitespace(&content)
}
