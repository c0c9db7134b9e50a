//! Conversion engine for migrating Mintlify docs to Docusaurus.
//!
//! Two text transformations run on each document:
//!
//! - [`normalize`] rewrites the leading YAML frontmatter block: known fields
//!   are renamed, string values re-quoted, unknown fields dropped.
//! - [`strip`] removes Mintlify comments and components, then tidies the
//!   whitespace they leave behind.
//!
//! [`convert`] chains both and reports recoverable problems.
//!
//! Both are plain functions over `&str`; the fixed tables in [`tables`] are
//! immutable statics, so documents can be converted from any thread.

mod convert;
mod frontmatter;
mod markup;
pub mod tables;
mod whitespace;

pub use convert::{Conversion, convert};
pub use frontmatter::{FrontmatterError, normalize, try_normalize};
pub use markup::{
    remove_bare_tags, remove_marker_comments, remove_paired_components,
    remove_self_closing_components, strip,
};
pub use whitespace::normalize_whitespace;
