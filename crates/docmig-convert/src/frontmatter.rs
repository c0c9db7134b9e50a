//! Frontmatter conversion from the Mintlify schema to the Docusaurus schema.
//!
//! Only the leading `---` delimited block is touched. Its YAML body is parsed,
//! known fields are renamed per [`FIELD_MAPPINGS`], string values are
//! re-emitted with exactly one pair of double quotes, and every other field is
//! dropped. The rest of the document is appended unchanged.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::tables::{FIELD_MAPPINGS, TITLE_FIELD};

/// Frontmatter delimiter line.
const DELIMITER: &str = "---";

/// Leading frontmatter block. Group 1 is the body, absent for an empty block.
static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[^\S\n]*\n(?:---|(.*?)\n---)[^\S\n]*(?:\n|\z)")
        .expect("invalid frontmatter regex")
});

/// Error converting a frontmatter block.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// The block body is not valid YAML.
    #[error("Invalid frontmatter YAML: {0}")]
    Parse(#[source] serde_yaml::Error),
    /// The block body is valid YAML but not a key-value mapping.
    #[error("Frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
    /// A converted value could not be serialized.
    #[error("Failed to serialize frontmatter field {field}: {source}")]
    Serialize {
        /// Target field name.
        field: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Leading frontmatter block split from the rest of a document.
struct Block<'a> {
    /// YAML between the delimiter lines.
    body: &'a str,
    /// Everything after the closing delimiter line.
    rest: &'a str,
}

impl<'a> Block<'a> {
    fn find(content: &'a str) -> Option<Self> {
        let caps = BLOCK.captures(content)?;
        let whole = caps.get(0)?;
        Some(Self {
            body: caps.get(1).map_or("", |m| m.as_str()),
            rest: &content[whole.end()..],
        })
    }
}

/// Convert the frontmatter block, leaving the content unchanged on failure.
///
/// Content without a leading block is returned as is. A block that fails to
/// parse is logged and kept verbatim.
///
/// # Example
///
/// ```
/// use docmig_convert::normalize;
///
/// let input = "---\ntitle: 'Quickstart'\nsidebarTitle: Start\nicon: rocket\n---\n# Hello\n";
/// assert_eq!(
///     normalize(input),
///     "---\ntitle: \"Quickstart\"\nsidebar_label: \"Start\"\n---\n# Hello\n"
/// );
/// ```
#[must_use]
pub fn normalize(content: &str) -> String {
    match try_normalize(content) {
        Ok(normalized) => normalized,
        Err(e) => {
            tracing::warn!(error = %e, "Leaving frontmatter unchanged");
            content.to_owned()
        }
    }
}

/// Convert the frontmatter block, reporting why it could not be converted.
pub fn try_normalize(content: &str) -> Result<String, FrontmatterError> {
    let Some(block) = Block::find(content) else {
        return Ok(content.to_owned());
    };

    let source = parse_body(block.body)?;
    let fields = remap_fields(&source);

    let mut output = String::with_capacity(content.len());
    output.push_str(DELIMITER);
    output.push('\n');
    for (field, value) in fields {
        write_field(&mut output, field, &value)?;
    }
    output.push_str(DELIMITER);
    output.push('\n');
    output.push_str(block.rest);
    Ok(output)
}

/// Parse the block body into a mapping. An empty body is an empty mapping.
fn parse_body(body: &str) -> Result<Mapping, FrontmatterError> {
    if body.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str(body).map_err(FrontmatterError::Parse)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(FrontmatterError::NotAMapping(kind_name(&other))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// A converted field value.
#[derive(Debug, PartialEq)]
enum Field {
    /// Written as a double-quoted string.
    Quoted(String),
    /// Written as YAML in block style.
    Plain(Value),
}

/// Build the converted field list: title first, then the mapping table order.
fn remap_fields(source: &Mapping) -> Vec<(&'static str, Field)> {
    let mut fields = Vec::with_capacity(FIELD_MAPPINGS.len());

    if let Some(title) = source.get(TITLE_FIELD).and_then(title_field) {
        fields.push((TITLE_FIELD, title));
    }

    for mapping in FIELD_MAPPINGS.iter().filter(|m| m.source != TITLE_FIELD) {
        let Some(value) = source.get(mapping.source) else {
            continue;
        };
        let field = match value {
            Value::String(s) => Field::Quoted(strip_quotes(s).to_owned()),
            other => Field::Plain(other.clone()),
        };
        fields.push((mapping.target, field));
    }

    fields
}

/// Convert the title value. Scalars become quoted strings, null is dropped.
fn title_field(value: &Value) -> Option<Field> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => return Some(Field::Plain(other.clone())),
    };
    Some(Field::Quoted(strip_quotes(&text).to_owned()))
}

/// Remove any quote characters around a value.
fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

/// Append one `key: value` entry in block style.
fn write_field(
    output: &mut String,
    field: &'static str,
    value: &Field,
) -> Result<(), FrontmatterError> {
    match value {
        Field::Quoted(text) => {
            output.push_str(field);
            output.push_str(": ");
            push_double_quoted(output, text);
            output.push('\n');
        }
        Field::Plain(value) => {
            let mut entry = Mapping::new();
            entry.insert(Value::String(field.to_owned()), value.clone());
            let yaml = serde_yaml::to_string(&entry)
                .map_err(|source| FrontmatterError::Serialize { field, source })?;
            output.push_str(&yaml);
        }
    }
    Ok(())
}

/// Write `text` as a YAML double-quoted scalar.
///
/// Only quotes, backslashes and control characters are escaped; other
/// characters, including non-ASCII, are written literally.
fn push_double_quoted(output: &mut String, text: &str) {
    output.push('"');
    for c in text.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\t' => output.push_str("\\t"),
            '\r' => output.push_str("\\r"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04X}", u32::from(c)));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}
