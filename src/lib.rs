//! # fieldbridge
//!
//! Field bridges for search indexing: turning arbitrary domain values into
//! normalized index text.
//!
//! ## Features
//!
//! - Total, deterministic text rendering of any value ([`bridge::display`])
//! - A to-string field bridge that skips nulls and never fails
//! - Per-field bridge and storage configuration
//! - A batch indexing pipeline over JSON Lines records
//!
//! ## Example
//!
//! ```
//! use fieldbridge::prelude::*;
//!
//! let mut doc = Document::new();
//! let bridge = ToStringFieldBridge::new();
//! let options = IndexingOptions::default();
//!
//! bridge.set("status", None, &mut doc, &options);
//! assert!(doc.is_empty());
//!
//! bridge.set("status", Some(&42), &mut doc, &options);
//! assert_eq!(doc.get_field("status").unwrap().text, "42");
//! ```

pub mod bridge;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;

pub mod prelude {
    pub use crate::bridge::{
        Displayable, FieldBridge, IndexingOptions, PerFieldBridge, Serialized, StoragePolicy,
        ToStringFieldBridge, to_display_string,
    };
    pub use crate::config::IndexingConfig;
    pub use crate::document::{Document, DocumentSink, FieldValue, Record};
    pub use crate::error::{FieldBridgeError, Result};
    pub use crate::pipeline::IndexingPipeline;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
