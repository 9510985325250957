//! Field bridges: turning domain values into index document entries.
//!
//! # Core Components
//!
//! - [`display`] - the [`Displayable`] capability and the total
//!   [`to_display_string`] conversion
//! - [`options`] - [`IndexingOptions`] and [`StoragePolicy`]
//! - [`field_bridge`] - the [`FieldBridge`] trait and [`ToStringFieldBridge`]
//! - [`per_field`] - [`PerFieldBridge`], a field name to bridge registry
//!
//! # Examples
//!
//! ```
//! use fieldbridge::bridge::{FieldBridge, IndexingOptions, ToStringFieldBridge};
//! use fieldbridge::document::Document;
//!
//! let mut doc = Document::new();
//! ToStringFieldBridge::new().set("status", Some(&"Active"), &mut doc, &IndexingOptions::default());
//!
//! let field = doc.get_field("status").unwrap();
//! assert_eq!(field.text, "Active");
//! assert!(!field.option.stored);
//! ```

pub mod display;
pub mod field_bridge;
pub mod options;
pub mod per_field;

pub use display::{
    Displayable, FALLBACK_TEXT, NormalizedToken, Opaque, Serialized, Shown, to_display_string,
};
pub use field_bridge::{FieldBridge, FnFieldBridge, IndexableField, ToStringFieldBridge};
pub use options::{IndexingOptions, StoragePolicy};
pub use per_field::PerFieldBridge;
