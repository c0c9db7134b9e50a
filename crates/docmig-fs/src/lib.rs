//! Filesystem side of a docs migration.
//!
//! This crate handles:
//!
//! - Recursive discovery of Markdown/MDX documents ([`Scanner`])
//! - Reading documents as text, rejecting binary files ([`read_text`])
//! - One-time backup of the source tree ([`create_backup`])
//! - Path comparison for nested-directory checks ([`is_within`])
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use docmig_fs::{Scanner, create_backup, read_text};
//!
//! create_backup(Path::new("docs"), Path::new("docs_backup"))?;
//! let scanner = Scanner::new(PathBuf::from("docs"), &["md".to_owned(), "mdx".to_owned()]);
//! for path in scanner.scan() {
//!     let file = read_text(&path)?;
//!     println!("{}: {} bytes", path.display(), file.content.len());
//! }
//! ```

mod backup;
mod paths;
mod scanner;
mod text;

pub use backup::{BackupError, BackupStatus, create_backup};
pub use paths::{absolutize, clean, is_within, resolve};
pub use scanner::Scanner;
pub use text::{ReadError, TextFile, read_text};
