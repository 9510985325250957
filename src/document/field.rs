//! Indexed field entries and their options.
//!
//! This module defines:
//! - [`IndexedField`] - One entry appended to a [`Document`](crate::document::document::Document)
//! - [`FieldOption`] - Whether the entry is indexed and whether its text is stored
//!
//! "Indexed" means the text is searchable as a token. "Stored" means the text
//! can be retrieved verbatim from the index. The two flags are independent.
//!
//! # Examples
//!
//! ```
//! use fieldbridge::document::field::{FieldOption, IndexedField};
//!
//! let field = IndexedField::new("status", "OPEN", FieldOption::new(false, true));
//! assert_eq!(field.text, "OPEN");
//! assert!(!field.option.stored);
//! assert!(field.option.indexed);
//! ```

use serde::{Deserialize, Serialize};

/// Options attached to one indexed field entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldOption {
    /// Whether the original text is retrievable from the index.
    pub stored: bool,

    /// Whether the text is searchable as a token.
    pub indexed: bool,
}

impl FieldOption {
    /// Create a new field option.
    pub fn new(stored: bool, indexed: bool) -> Self {
        Self { stored, indexed }
    }
}

impl Default for FieldOption {
    fn default() -> Self {
        Self {
            stored: false,
            indexed: true,
        }
    }
}

/// A single field entry in an index document.
///
/// The text is indexed untokenized, as a single keyword, so exact-match
/// and token lookups both hit it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexedField {
    /// The field name.
    pub name: String,

    /// The normalized text of the field.
    pub text: String,

    /// Indexing and storage flags.
    pub option: FieldOption,
}

impl IndexedField {
    /// Create a new indexed field.
    pub fn new<S: Into<String>, T: Into<String>>(name: S, text: T, option: FieldOption) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            option,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_option_is_indexed_not_stored() {
        let option = FieldOption::default();
        assert!(option.indexed);
        assert!(!option.stored);
    }

    #[test]
    fn test_indexed_field_serialization_shape() {
        let field = IndexedField::new("status", "42", FieldOption::default());
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["name"], "status");
        assert_eq!(json["text"], "42");
        assert_eq!(json["option"]["stored"], false);
        assert_eq!(json["option"]["indexed"], true);
    }
}
