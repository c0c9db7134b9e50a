//! Fixed conversion tables: frontmatter field mapping and component vocabulary.

/// A frontmatter field rename from the Mintlify schema to the Docusaurus schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name in the source frontmatter.
    pub source: &'static str,
    /// Field name written to the converted frontmatter.
    pub target: &'static str,
}

/// Source field that is always emitted first.
pub const TITLE_FIELD: &str = "title";

/// Frontmatter fields carried over, in output order after the title.
///
/// Fields missing from this table are dropped.
pub static FIELD_MAPPINGS: &[FieldMapping] = &[
    FieldMapping {
        source: "sidebarTitle",
        target: "sidebar_label",
    },
    FieldMapping {
        source: "description",
        target: "description",
    },
    FieldMapping {
        source: TITLE_FIELD,
        target: TITLE_FIELD,
    },
];

/// Mintlify component tag names that are stripped from content.
///
/// Order matters: the paired-tag pass runs over the names in this order.
pub static COMPONENTS: &[&str] = &[
    "Frame",
    "Card",
    "CardGroup",
    "CodeGroup",
    "ParamField",
    "Accordion",
    "AccordionGroup",
    "Steps",
    "Tabs",
    "Tab",
    "TabItem",
    "ResponseField",
    "RequestExample",
    "ResponseExample",
    "Tip",
    "Info",
    "Warning",
    "Note",
    "Expandable",
    "Step",
    "Check",
    "CodeBlock",
    "Col",
    "TagFiltersProperties",
    "Property",
    "Update",
    "Snippet",
];

/// Word that marks a `{/* ... */}` comment as Mintlify-specific.
pub const COMMENT_MARKER: &str = "Mintlify";

/// Look up the target name for a source frontmatter field.
pub fn target_field(source: &str) -> Option<&'static str> {
    FIELD_MAPPINGS
        .iter()
        .find(|m| m.source == source)
        .map(|m| m.target)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_target_field_known() {
        assert_eq!(target_field("sidebarTitle"), Some("sidebar_label"));
        assert_eq!(target_field("description"), Some("description"));
        assert_eq!(target_field("title"), Some("title"));
    }

    #[test]
    fn test_target_field_unknown() {
        assert_eq!(target_field("icon"), None);
        assert_eq!(target_field("sidebar_label"), None);
    }

    #[test]
    fn test_components_unique() {
        let unique: HashSet<_> = COMPONENTS.iter().collect();
        assert_eq!(unique.len(), COMPONENTS.len());
    }

    #[test]
    fn test_components_are_identifiers() {
        for name in COMPONENTS {
            assert!(
                name.chars().all(|c| c.is_ascii_alphanumeric()),
                "{name} must be a plain tag name"
            );
        }
    }
}
