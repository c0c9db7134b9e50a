//! Reading and writing document text.
//!
//! Files that are not valid UTF-8 or contain NUL bytes near the start are
//! treated as binary and reported as [`ReadError::Binary`].

use std::fs;
use std::io;
use std::path::Path;

/// UTF-8 byte order mark.
const BOM: &str = "\u{feff}";

/// Number of leading bytes searched for NUL.
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Error reading a document.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The file does not contain UTF-8 text.
    #[error("not a UTF-8 text file")]
    Binary,
}

/// Text content of a document.
///
/// A leading byte order mark is split off so converters never see it, and is
/// written back by [`TextFile::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    /// Document text without byte order mark.
    pub content: String,
    bom: bool,
}

impl TextFile {
    /// Create a text file from content, without byte order mark.
    #[must_use]
    pub fn new(content: String) -> Self {
        Self {
            content,
            bom: false,
        }
    }

    /// Replace the content, keeping the byte order mark setting.
    #[must_use]
    pub fn with_content(&self, content: String) -> Self {
        Self {
            content,
            bom: self.bom,
        }
    }

    /// Whether the file started with a byte order mark.
    pub fn has_bom(&self) -> bool {
        self.bom
    }

    /// Write the content to `path`, overwriting it.
    pub fn write(&self, path: &Path) -> io::Result<()> {
        if self.bom {
            fs::write(path, format!("{BOM}{}", self.content))
        } else {
            fs::write(path, &self.content)
        }
    }
}

/// Read a document as text.
///
/// # Errors
///
/// Returns [`ReadError::Binary`] for binary content and [`ReadError::Io`] if
/// the file cannot be read.
pub fn read_text(path: &Path) -> Result<TextFile, ReadError> {
    let bytes = fs::read(path)?;
    decode(bytes)
}

fn decode(bytes: Vec<u8>) -> Result<TextFile, ReadError> {
    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if sniff.contains(&0) {
        return Err(ReadError::Binary);
    }
    let text = String::from_utf8(bytes).map_err(|_| ReadError::Binary)?;
    Ok(match text.strip_prefix(BOM) {
        Some(rest) => TextFile {
            content: rest.to_owned(),
            bom: true,
        },
        None => TextFile::new(text),
    })
}
