//! Index document and the sink interface bridges write to.

use serde::{Deserialize, Serialize};

use crate::document::field::{FieldOption, IndexedField};

/// An append-only accumulator for indexed field entries.
///
/// Bridges receive a `&mut dyn DocumentSink` for the duration of a single
/// call and may only append to it. The sink is owned by the indexing
/// pipeline building the document.
pub trait DocumentSink {
    /// Append a field entry.
    fn add_field(&mut self, name: &str, text: String, stored: bool, indexed: bool);
}

/// A document represents a single item to be written to a search index.
///
/// Fields are kept in insertion order. The same name may appear more than
/// once, which makes the field multi-valued.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The field entries for this document
    fields: Vec<IndexedField>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Document { fields: Vec::new() }
    }

    /// Append an indexed field.
    pub fn push(&mut self, field: IndexedField) {
        self.fields.push(field);
    }

    /// Get the first entry with the given name.
    pub fn get_field(&self, name: &str) -> Option<&IndexedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get all entries with the given name.
    pub fn get_fields<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a IndexedField> + 'a {
        self.fields.iter().filter(move |f| f.name == name)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Get all field names in insertion order, duplicates included.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Get all field entries.
    pub fn fields(&self) -> &[IndexedField] {
        &self.fields
    }

    /// Get the number of field entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }
}

impl DocumentSink for Document {
    fn add_field(&mut self, name: &str, text: String, stored: bool, indexed: bool) {
        self.fields
            .push(IndexedField::new(name, text, FieldOption::new(stored, indexed)));
    }
}

/// A builder for constructing documents in a fluent manner.
///
/// Mostly useful for writing expected documents in tests.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder.
    pub fn new() -> Self {
        DocumentBuilder {
            document: Document::new(),
        }
    }

    /// Add an indexed, unstored field.
    pub fn add_indexed<S: Into<String>, T: Into<String>>(mut self, name: S, text: T) -> Self {
        self.document
            .push(IndexedField::new(name, text, FieldOption::new(false, true)));
        self
    }

    /// Add a field with explicit options.
    pub fn add_field<S: Into<String>, T: Into<String>>(
        mut self,
        name: S,
        text: T,
        option: FieldOption,
    ) -> Self {
        self.document.push(IndexedField::new(name, text, option));
        self
    }

    /// Build the final document.
    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_appends_in_order() {
        let mut doc = Document::new();
        doc.add_field("b", "2".to_string(), false, true);
        doc.add_field("a", "1".to_string(), true, true);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.field_names(), vec!["b", "a"]);
        assert!(doc.get_field("a").unwrap().option.stored);
        assert!(!doc.get_field("b").unwrap().option.stored);
    }

    #[test]
    fn test_multi_valued_field() {
        let doc = Document::builder()
            .add_indexed("tag", "red")
            .add_indexed("tag", "blue")
            .build();

        let tags: Vec<_> = doc.get_fields("tag").map(|f| f.text.as_str()).collect();
        assert_eq!(tags, vec!["red", "blue"]);
        assert_eq!(doc.get_field("tag").unwrap().text, "red");
    }

    #[test]
    fn test_builder_matches_sink() {
        let mut via_sink = Document::new();
        via_sink.add_field("status", "OPEN".to_string(), false, true);

        let via_builder = Document::builder().add_indexed("status", "OPEN").build();
        assert_eq!(via_sink, via_builder);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert!(!doc.has_field("anything"));
        assert!(doc.get_field("anything").is_none());
    }
}
