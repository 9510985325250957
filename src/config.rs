//! Configuration for the indexing pipeline.
//!
//! Configuration is plain JSON. Every key is optional:
//!
//! ```json
//! {
//!   "default_options": {"storage": "do_not_store", "indexed": true},
//!   "fields": {"title": {"storage": "store_original"}},
//!   "excluded_fields": ["password"],
//!   "id_field": "id",
//!   "batch_size": 1000,
//!   "thread_pool_size": 4,
//!   "allow_partial_failures": true
//! }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bridge::options::{IndexingOptions, StoragePolicy};
use crate::bridge::per_field::PerFieldBridge;
use crate::error::{FieldBridgeError, Result};

/// Field-specific overrides of the default indexing options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Storage policy override.
    pub storage: Option<StoragePolicy>,

    /// Indexed flag override.
    pub indexed: Option<bool>,
}

impl FieldConfig {
    /// Resolve the overrides against the default options.
    pub fn resolve(&self, defaults: &IndexingOptions) -> IndexingOptions {
        IndexingOptions {
            storage: self.storage.unwrap_or(defaults.storage),
            indexed: self.indexed.unwrap_or(defaults.indexed),
        }
    }
}

/// Configuration for [`IndexingPipeline`](crate::pipeline::IndexingPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Options for fields without an entry in `fields`.
    pub default_options: IndexingOptions,

    /// Per-field option overrides.
    pub fields: HashMap<String, FieldConfig>,

    /// Record attributes that never reach the document.
    pub excluded_fields: Vec<String>,

    /// Field name the record id is indexed under, if any.
    pub id_field: Option<String>,

    /// Number of records indexed per parallel batch.
    pub batch_size: usize,

    /// Thread pool size for parallel processing.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Whether unparsable input records are skipped instead of aborting.
    pub allow_partial_failures: bool,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            default_options: IndexingOptions::default(),
            fields: HashMap::new(),
            excluded_fields: Vec::new(),
            id_field: None,
            batch_size: 1000,
            thread_pool_size: None,
            allow_partial_failures: true,
        }
    }
}

impl IndexingConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            FieldBridgeError::config(format!("Failed to open {}: {e}", path.display()))
        })?;
        let config: IndexingConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;

        log::debug!("Loaded indexing config from {}", path.display());
        Ok(config)
    }

    /// Check the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(FieldBridgeError::config("batch_size must be positive"));
        }
        if self.thread_pool_size == Some(0) {
            return Err(FieldBridgeError::config("thread_pool_size must be positive"));
        }
        if self.fields.keys().any(|name| name.is_empty()) {
            return Err(FieldBridgeError::config("field names must not be empty"));
        }
        if self.excluded_fields.iter().any(|name| name.is_empty()) {
            return Err(FieldBridgeError::config(
                "excluded field names must not be empty",
            ));
        }
        if self.id_field.as_deref() == Some("") {
            return Err(FieldBridgeError::config("id_field must not be empty"));
        }
        Ok(())
    }

    /// Effective thread count.
    pub fn threads(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get)
    }

    /// Options for a specific field.
    pub fn options_for(&self, field: &str) -> IndexingOptions {
        self.fields
            .get(field)
            .map_or(self.default_options, |f| f.resolve(&self.default_options))
    }

    /// Whether a record attribute is excluded from indexing.
    pub fn is_excluded(&self, field: &str) -> bool {
        self.excluded_fields.iter().any(|name| name == field)
    }

    /// Names whose options the to-string bridge ignores.
    ///
    /// The to-string bridge writes every entry indexed and not stored, so
    /// options asking for anything else only take effect for fields with a
    /// custom bridge. `default_options` is listed first, then field names in
    /// sorted order.
    pub fn ignored_overrides(&self) -> Vec<String> {
        let honoured = IndexingOptions::default();
        let mut names: Vec<String> = self
            .fields
            .keys()
            .filter(|name| self.options_for(name) != honoured)
            .cloned()
            .collect();
        names.sort();
        if self.default_options != honoured {
            names.insert(0, "default_options".to_string());
        }
        names
    }

    /// Build a to-string bridge registry carrying these options.
    ///
    /// Logs a warning for every option the to-string bridge will ignore.
    pub fn build_bridges(&self) -> PerFieldBridge {
        for name in self.ignored_overrides() {
            log::warn!(
                "Options for '{name}' are ignored by the to-string bridge, which indexes without storing"
            );
        }

        let mut bridges = PerFieldBridge::default().with_default_options(self.default_options);
        for name in self.fields.keys() {
            bridges.add_options(name.clone(), self.options_for(name));
        }
        bridges
    }
}
