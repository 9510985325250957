//! Domain records fed to the indexing pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::field_value::FieldValue;
use crate::error::{FieldBridgeError, Result};

/// A domain record: an ordered list of named attribute values.
///
/// Records are what the pipeline turns into index documents, one document
/// per record. Attribute order is preserved so the produced documents are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Optional identifier of the record.
    id: Option<String>,

    /// Attribute values in insertion order.
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty record with an id.
    pub fn with_id<S: Into<String>>(id: S) -> Self {
        Self {
            id: Some(id.into()),
            fields: Vec::new(),
        }
    }

    /// Set an attribute, builder style.
    pub fn set<S: Into<String>, V: Into<FieldValue>>(mut self, name: S, value: V) -> Self {
        self.push(name, value);
        self
    }

    /// Append an attribute.
    pub fn push<S: Into<String>, V: Into<FieldValue>>(&mut self, name: S, value: V) {
        self.fields.push((name.into(), value.into()));
    }

    /// The record id, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Get the first value with the given name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Get the number of attributes.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from a JSON object.
    ///
    /// Attributes keep the key order of the JSON object. When `id_key` is
    /// given and the object carries that key with a non-null value, it
    /// becomes the record id and is removed from the attributes.
    pub fn from_json(value: Value, id_key: Option<&str>) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(FieldBridgeError::parse(format!(
                    "Expected a JSON object, found: {other}"
                )));
            }
        };

        let mut record = Record::new();
        for (key, val) in map {
            if id_key == Some(key.as_str()) {
                record.id = match val {
                    Value::Null => None,
                    Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                };
                continue;
            }
            record.push(key, FieldValue::from_json(val));
        }

        Ok(record)
    }
}
