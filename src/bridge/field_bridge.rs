//! The field bridge seam and the to-string bridge.
//!
//! A bridge converts one attribute of a domain record into zero or more
//! entries of an index document. [`ToStringFieldBridge`] is the general
//! purpose one: it renders the value as text and writes a single indexed,
//! unstored entry, or nothing at all when the value is null.

use std::fmt;

use crate::bridge::display::{Displayable, NormalizedToken};
use crate::bridge::options::{IndexingOptions, StoragePolicy};
use crate::document::document::DocumentSink;

/// Converts a domain value into index document entries.
///
/// Implementations must not fail and must not keep state between calls;
/// the same inputs always produce the same entries.
pub trait FieldBridge: Send + Sync {
    /// Write the entries for `value` under `name` into `document`.
    fn set(
        &self,
        name: &str,
        value: Option<&dyn Displayable>,
        document: &mut dyn DocumentSink,
        options: &IndexingOptions,
    );

    /// Get the name of this bridge.
    fn name(&self) -> &'static str;
}

/// A named slot about to be written into a document.
///
/// Built transiently while a document is assembled and consumed once.
#[derive(Clone, Copy)]
pub struct IndexableField<'a> {
    /// The field name. Non-empty; callers guarantee this.
    pub name: &'a str,

    /// The domain value, if any.
    pub raw_value: Option<&'a dyn Displayable>,

    /// Whether the original value is kept alongside the token.
    pub storage_policy: StoragePolicy,
}

impl<'a> IndexableField<'a> {
    /// Create a new indexable field.
    pub fn new(
        name: &'a str,
        raw_value: Option<&'a dyn Displayable>,
        storage_policy: StoragePolicy,
    ) -> Self {
        Self {
            name,
            raw_value,
            storage_policy,
        }
    }

    /// Render the value, or `None` if it is null.
    pub fn normalize(&self) -> Option<NormalizedToken> {
        self.raw_value
            .filter(|value| !value.is_absent())
            .map(|value| NormalizedToken::from_value(value))
    }
}

impl fmt::Debug for IndexableField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexableField")
            .field("name", &self.name)
            .field("raw_value", &self.raw_value.map(|_| "<Displayable>"))
            .field("storage_policy", &self.storage_policy)
            .finish()
    }
}

/// Indexes the text rendering of a value, never storing it.
///
/// # Example
///
/// ```
/// use fieldbridge::bridge::field_bridge::{FieldBridge, ToStringFieldBridge};
/// use fieldbridge::bridge::options::IndexingOptions;
/// use fieldbridge::document::document::Document;
///
/// let bridge = ToStringFieldBridge::new();
/// let options = IndexingOptions::default();
/// let mut doc = Document::new();
///
/// bridge.set("status", Some(&42), &mut doc, &options);
/// bridge.set("owner", None, &mut doc, &options);
///
/// assert_eq!(doc.len(), 1);
/// assert_eq!(doc.get_field("status").unwrap().text, "42");
/// assert!(!doc.get_field("status").unwrap().option.stored);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ToStringFieldBridge;

impl ToStringFieldBridge {
    /// Create a new to-string bridge.
    pub fn new() -> Self {
        ToStringFieldBridge
    }
}

impl FieldBridge for ToStringFieldBridge {
    fn set(
        &self,
        name: &str,
        value: Option<&dyn Displayable>,
        document: &mut dyn DocumentSink,
        options: &IndexingOptions,
    ) {
        let field = IndexableField::new(name, value, StoragePolicy::DoNotStore);
        let Some(token) = field.normalize() else {
            log::trace!("Skipping null value for field '{name}'");
            return;
        };

        if options.storage.is_stored() {
            log::trace!("Field '{name}' requests storage, {} indexes only", self.name());
        }

        document.add_field(name, token.text, field.storage_policy.is_stored(), true);
    }

    fn name(&self) -> &'static str {
        "ToStringFieldBridge"
    }
}

/// Adapts a closure into a [`FieldBridge`].
///
/// # Example
///
/// ```
/// use fieldbridge::bridge::display::to_display_string;
/// use fieldbridge::bridge::field_bridge::{FieldBridge, FnFieldBridge};
/// use fieldbridge::bridge::options::IndexingOptions;
/// use fieldbridge::document::document::Document;
///
/// let lowercase = FnFieldBridge::new("LowercaseBridge", |name, value, doc, options| {
///     if let Some(value) = value {
///         let text = to_display_string(value).to_lowercase();
///         doc.add_field(name, text, options.storage.is_stored(), options.indexed);
///     }
/// });
///
/// let mut doc = Document::new();
/// lowercase.set("status", Some(&"OPEN"), &mut doc, &IndexingOptions::default());
/// assert_eq!(doc.get_field("status").unwrap().text, "open");
/// ```
pub struct FnFieldBridge<F> {
    name: &'static str,
    f: F,
}

impl<F> FnFieldBridge<F>
where
    F: Fn(&str, Option<&dyn Displayable>, &mut dyn DocumentSink, &IndexingOptions) + Send + Sync,
{
    /// Wrap a closure under the given bridge name.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> fmt::Debug for FnFieldBridge<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFieldBridge")
            .field("name", &self.name)
            .finish()
    }
}

impl<F> FieldBridge for FnFieldBridge<F>
where
    F: Fn(&str, Option<&dyn Displayable>, &mut dyn DocumentSink, &IndexingOptions) + Send + Sync,
{
    fn set(
        &self,
        name: &str,
        value: Option<&dyn Displayable>,
        document: &mut dyn DocumentSink,
        options: &IndexingOptions,
    ) {
        (self.f)(name, value, document, options)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::display::{FALLBACK_TEXT, Opaque, Serialized};
    use crate::document::document::Document;
    use crate::document::field::FieldOption;
    use crate::document::field_value::FieldValue;
    use serde::Serialize;

    #[derive(Serialize)]
    enum SomeEnum {
        #[serde(rename = "OPEN")]
        Open,
    }

    fn apply(value: Option<&dyn Displayable>) -> Document {
        let mut doc = Document::new();
        ToStringFieldBridge::new().set("status", value, &mut doc, &IndexingOptions::default());
        doc
    }

    #[test]
    fn test_null_leaves_document_unchanged() {
        let doc = apply(None);
        assert!(doc.is_empty());
        assert_eq!(doc, Document::new());
    }

    #[test]
    fn test_null_field_value_is_skipped() {
        assert!(apply(Some(&FieldValue::Null)).is_empty());
        assert!(apply(Some(&None::<i32>)).is_empty());
    }

    #[test]
    fn test_integer() {
        let doc = apply(Some(&42));
        let expected = Document::builder().add_indexed("status", "42").build();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_text() {
        let doc = apply(Some(&"Active"));
        assert_eq!(doc.len(), 1);
        let field = doc.get_field("status").unwrap();
        assert_eq!(field.text, "Active");
        assert_eq!(field.option, FieldOption::new(false, true));
    }

    #[test]
    fn test_enum_canonical_name() {
        let doc = apply(Some(&Serialized(SomeEnum::Open)));
        assert_eq!(doc.get_field("status").unwrap().text, "OPEN");
    }

    #[test]
    fn test_never_stores_even_when_options_ask() {
        let mut doc = Document::new();
        let options = IndexingOptions::new(StoragePolicy::StoreOriginal);
        ToStringFieldBridge::new().set("status", Some(&1), &mut doc, &options);
        assert!(!doc.get_field("status").unwrap().option.stored);
    }

    #[test]
    fn test_unusual_values_always_produce_one_entry() {
        let values: Vec<Box<dyn Displayable>> = vec![
            Box::new(String::new()),
            Box::new(Vec::<i32>::new()),
            Box::new(FieldValue::List(vec![FieldValue::Null])),
            Box::new(0i32),
            Box::new(-1i32),
            Box::new(i64::MIN),
            Box::new(f64::MAX),
            Box::new(Opaque(())),
        ];

        for value in &values {
            let doc = apply(Some(&**value));
            assert_eq!(doc.len(), 1);
        }

        assert_eq!(apply(Some(&Opaque(()))).get_field("status").unwrap().text, FALLBACK_TEXT);
    }

    #[test]
    fn test_stateless_across_documents() {
        let first = apply(Some(&"same"));
        let second = apply(Some(&"same"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_indexable_field_normalize() {
        let value = 3.5;
        let field = IndexableField::new("ratio", Some(&value), StoragePolicy::DoNotStore);
        assert_eq!(field.normalize().unwrap().text, "3.5");

        let empty = IndexableField::new("ratio", None, StoragePolicy::DoNotStore);
        assert!(empty.normalize().is_none());
    }

    #[test]
    fn test_fn_bridge_can_emit_multiple_entries() {
        let split = FnFieldBridge::new("SplitBridge", |name, value, doc, _options| {
            if let Some(value) = value {
                for part in value.to_text().split(',') {
                    doc.add_field(name, part.trim().to_string(), false, true);
                }
            }
        });

        let mut doc = Document::new();
        split.set("tags", Some(&"a, b"), &mut doc, &IndexingOptions::default());
        assert_eq!(doc.len(), 2);
        assert_eq!(split.name(), "SplitBridge");
    }
}
