//! Whole-document conversion: frontmatter first, then markup.

use crate::frontmatter::try_normalize;
use crate::markup::strip;

/// Result of converting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Converted document text.
    pub content: String,
    /// Whether the converted text differs from the input.
    pub changed: bool,
    /// Problems that were recovered from while converting.
    pub warnings: Vec<String>,
}

/// Convert a Mintlify document to Docusaurus-compatible Markdown.
///
/// The frontmatter block is converted on the full content, then markup is
/// stripped from the result. A frontmatter block that cannot be parsed is kept
/// as is and reported in [`Conversion::warnings`] for the caller to log; markup
/// stripping still runs.
///
/// # Example
///
/// ```
/// use docmig_convert::convert;
///
/// let input = "---\ntitle: Intro\nicon: book\n---\n\n<Tip>Hint</Tip>\n\n# Welcome\n";
/// let conversion = convert(input);
///
/// assert_eq!(conversion.content, "---\ntitle: \"Intro\"\n---\n\n# Welcome");
/// assert!(conversion.changed);
/// assert!(conversion.warnings.is_empty());
/// ```
#[must_use]
pub fn convert(content: &str) -> Conversion {
    let mut warnings = Vec::new();

    let normalized = match try_normalize(content) {
        Ok(normalized) => normalized,
        Err(e) => {
            warnings.push(e.to_string());
            content.to_owned()
        }
    };

    let stripped = strip(&normalized);
    Conversion {
        changed: stripped != content,
        content: stripped,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_full_document() {
        let input = r#"---
title: 'Getting Started'
sidebarTitle: "Start"
description: Learn the basics
icon: rocket
---

{/* Mintlify: this page is generated */}

# Getting Started

<Note>
  You need an account first.
</Note>

Install the SDK:

<CodeGroup>
```bash npm
npm install sdk
```
</CodeGroup>



<Frame>
  <img src="/images/hero.png" />
</Frame>

Then read the guide.   
"#;
        let conversion = convert(input);
        assert_eq!(
            conversion.content,
            "---\ntitle: \"Getting Started\"\nsidebar_label: \"Start\"\ndescription: \"Learn the basics\"\n---\n\n# Getting Started\n\nInstall the SDK:\n\nThen read the guide."
        );
        assert!(conversion.changed);
        assert!(conversion.warnings.is_empty());
    }

    #[test]
    fn test_invalid_frontmatter_still_strips_markup() {
        let input = "---\ntitle: [oops\n---\n<Info>x</Info>Body";
        let conversion = convert(input);
        assert_eq!(conversion.content, "---\ntitle: [oops\n---\nBody");
        assert_eq!(conversion.warnings.len(), 1);
        assert!(conversion.warnings[0].contains("Invalid frontmatter YAML"));
    }

    #[test]
    fn test_plain_document_unchanged() {
        let input = "# Title\n\nPlain text.";
        let conversion = convert(input);
        assert_eq!(conversion.content, input);
        assert!(!conversion.changed);
    }

    #[test]
    fn test_trailing_newline_counts_as_change() {
        let conversion = convert("# Title\n");
        assert_eq!(conversion.content, "# Title");
        assert!(conversion.changed);
    }

    #[test]
    fn test_frontmatter_only_document() {
        let conversion = convert("---\ntitle: Only\n---\n");
        assert_eq!(conversion.content, "---\ntitle: \"Only\"\n---");
    }
}
