//! Record converters for reading domain records from files.
//!
//! This module provides the [`RecordConverter`] trait and the JSON Lines
//! implementation used by the CLI.

use std::path::Path;

use crate::document::record::Record;
use crate::error::Result;

pub mod jsonl;

/// A trait for converting file formats into Record iterators.
///
/// # Example
///
/// ```no_run
/// use fieldbridge::document::converter::RecordConverter;
/// use fieldbridge::document::converter::jsonl::JsonlRecordConverter;
///
/// let converter = JsonlRecordConverter::new();
/// for record in converter.convert("records.jsonl").unwrap() {
///     let record = record.unwrap();
///     println!("Record: {:?}", record);
/// }
/// ```
pub trait RecordConverter {
    /// The iterator type that yields records.
    type Iter: Iterator<Item = Result<Record>>;

    /// Convert a file into an iterator of Records.
    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter>;
}
