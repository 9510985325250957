//! Documents, records and field values.
//!
//! This module holds both sides of a bridge:
//!
//! - [`record::Record`] and [`field_value::FieldValue`] - domain records as
//!   they come in, with dynamically typed attribute values
//! - [`document::Document`] and [`field::IndexedField`] - index documents as
//!   they go out, a list of normalized text entries
//! - [`converter`] - readers that turn files (JSONL) into records
//!
//! # Examples
//!
//! ```
//! use fieldbridge::document::document::{Document, DocumentSink};
//!
//! let mut doc = Document::new();
//! doc.add_field("status", "OPEN".to_string(), false, true);
//!
//! assert_eq!(doc.len(), 1);
//! assert!(doc.has_field("status"));
//! ```

#[allow(clippy::module_inception)]
pub mod document;
pub mod converter;
pub mod field;
pub mod field_value;
pub mod record;

pub use document::{Document, DocumentBuilder, DocumentSink};
pub use field::{FieldOption, IndexedField};
pub use field_value::FieldValue;
pub use record::Record;
