//! Per-field bridge registry.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::bridge::display::Displayable;
use crate::bridge::field_bridge::{FieldBridge, ToStringFieldBridge};
use crate::bridge::options::IndexingOptions;
use crate::document::document::DocumentSink;

/// A registry that applies different bridges and options to different fields.
///
/// Fields not explicitly configured use the default bridge and the default
/// options. The registry holds no per-call state and can be shared across
/// threads behind an `Arc`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use fieldbridge::bridge::field_bridge::ToStringFieldBridge;
/// use fieldbridge::bridge::options::{IndexingOptions, StoragePolicy};
/// use fieldbridge::bridge::per_field::PerFieldBridge;
/// use fieldbridge::document::document::Document;
///
/// let mut bridges = PerFieldBridge::new(Arc::new(ToStringFieldBridge::new()));
/// bridges.add_options("title", IndexingOptions::new(StoragePolicy::StoreOriginal));
///
/// let mut doc = Document::new();
/// bridges.apply("status", Some(&"OPEN"), &mut doc);
/// bridges.apply("owner", None, &mut doc);
///
/// assert_eq!(doc.len(), 1);
/// ```
#[derive(Clone)]
pub struct PerFieldBridge {
    /// Default bridge for fields not in the map.
    default_bridge: Arc<dyn FieldBridge>,

    /// Default options for fields not in the map.
    default_options: IndexingOptions,

    /// Map of field names to their specific bridges.
    field_bridges: AHashMap<String, Arc<dyn FieldBridge>>,

    /// Map of field names to their specific options.
    field_options: AHashMap<String, IndexingOptions>,
}

impl PerFieldBridge {
    /// Create a new registry with a default bridge.
    pub fn new(default_bridge: Arc<dyn FieldBridge>) -> Self {
        Self {
            default_bridge,
            default_options: IndexingOptions::default(),
            field_bridges: AHashMap::new(),
            field_options: AHashMap::new(),
        }
    }

    /// Replace the default options.
    pub fn with_default_options(mut self, options: IndexingOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Add a field-specific bridge.
    pub fn add_bridge(&mut self, field: impl Into<String>, bridge: Arc<dyn FieldBridge>) {
        self.field_bridges.insert(field.into(), bridge);
    }

    /// Add field-specific options.
    pub fn add_options(&mut self, field: impl Into<String>, options: IndexingOptions) {
        self.field_options.insert(field.into(), options);
    }

    /// Get the bridge for a specific field.
    pub fn get_bridge(&self, field: &str) -> &Arc<dyn FieldBridge> {
        self.field_bridges
            .get(field)
            .unwrap_or(&self.default_bridge)
    }

    /// Get the options for a specific field.
    pub fn get_options(&self, field: &str) -> &IndexingOptions {
        self.field_options
            .get(field)
            .unwrap_or(&self.default_options)
    }

    /// Get the default bridge.
    pub fn default_bridge(&self) -> &Arc<dyn FieldBridge> {
        &self.default_bridge
    }

    /// Bridge one value into the document using the field's bridge and options.
    pub fn apply(
        &self,
        field: &str,
        value: Option<&dyn Displayable>,
        document: &mut dyn DocumentSink,
    ) {
        self.get_bridge(field)
            .set(field, value, document, self.get_options(field));
    }
}

impl Default for PerFieldBridge {
    fn default() -> Self {
        Self::new(Arc::new(ToStringFieldBridge::new()))
    }
}

impl fmt::Debug for PerFieldBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self
            .field_bridges
            .iter()
            .map(|(field, bridge)| (field.as_str(), bridge.name()))
            .collect();
        fields.sort_unstable();

        f.debug_struct("PerFieldBridge")
            .field("default_bridge", &self.default_bridge.name())
            .field("default_options", &self.default_options)
            .field("field_bridges", &fields)
            .field("field_options", &self.field_options.len())
            .finish()
    }
}
