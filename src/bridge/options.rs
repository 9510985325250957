//! Indexing options passed to field bridges.

use serde::{Deserialize, Serialize};

use crate::document::field::FieldOption;

/// Whether an index entry keeps the original value next to the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoragePolicy {
    /// Keep the rendered value retrievable from the index.
    StoreOriginal,
    /// Index only; the value cannot be read back.
    #[default]
    DoNotStore,
}

impl StoragePolicy {
    /// Whether this policy stores the value.
    pub fn is_stored(self) -> bool {
        matches!(self, StoragePolicy::StoreOriginal)
    }
}

/// Per-field options handed to a bridge along with the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingOptions {
    /// Storage policy for the field.
    pub storage: StoragePolicy,

    /// Whether the field is searchable.
    pub indexed: bool,
}

impl IndexingOptions {
    /// Create options with the given storage policy, indexed.
    pub fn new(storage: StoragePolicy) -> Self {
        Self {
            storage,
            indexed: true,
        }
    }

    /// The field option these settings translate to.
    pub fn field_option(&self) -> FieldOption {
        FieldOption::new(self.storage.is_stored(), self.indexed)
    }
}

impl Default for IndexingOptions {
    fn default() -> Self {
        Self::new(StoragePolicy::DoNotStore)
    }
}
