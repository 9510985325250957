//! Indexing pipeline: applying field bridges to domain records.
//!
//! The pipeline owns the document lifecycle. For each record it creates a
//! fresh [`Document`], hands every attribute to the configured bridge and
//! returns the finished document. Batches are processed on a rayon thread
//! pool; each worker only ever writes to the document of the record it is
//! processing.
//!
//! # Examples
//!
//! ```
//! use fieldbridge::config::IndexingConfig;
//! use fieldbridge::document::{FieldValue, Record};
//! use fieldbridge::pipeline::IndexingPipeline;
//!
//! let pipeline = IndexingPipeline::new(IndexingConfig::default()).unwrap();
//!
//! let record = Record::new()
//!     .set("status", "Active")
//!     .set("budget", 42)
//!     .set("owner", FieldValue::Null);
//!
//! let doc = pipeline.index_record(&record);
//! assert_eq!(doc.field_names(), vec!["status", "budget"]);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bridge::display::Displayable;
use crate::bridge::per_field::PerFieldBridge;
use crate::config::IndexingConfig;
use crate::document::document::Document;
use crate::document::record::Record;
use crate::error::{FieldBridgeError, Result};

/// Counters for one run of [`IndexingPipeline::index_converted`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexingSummary {
    /// Records successfully read from the input.
    pub records_read: usize,

    /// Documents handed to the output callback.
    pub documents_written: usize,

    /// Field entries across all written documents.
    pub fields_emitted: usize,

    /// Input records that failed to parse and were skipped.
    pub records_skipped: usize,

    /// Total execution time.
    pub duration: Duration,
}

/// Turns domain records into index documents.
pub struct IndexingPipeline {
    /// Configuration for the pipeline.
    config: IndexingConfig,

    /// Bridge registry applied to every attribute.
    bridges: PerFieldBridge,

    /// Thread pool for batch indexing.
    thread_pool: Arc<ThreadPool>,
}

impl IndexingPipeline {
    /// Create a pipeline using the to-string bridge for every field.
    pub fn new(config: IndexingConfig) -> Result<Self> {
        let bridges = config.build_bridges();
        Self::with_bridges(config, bridges)
    }

    /// Create a pipeline with a custom bridge registry.
    pub fn with_bridges(config: IndexingConfig, bridges: PerFieldBridge) -> Result<Self> {
        config.validate()?;

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(config.threads())
            .thread_name(|i| format!("fieldbridge-index-{i}"))
            .build()
            .map_err(|e| FieldBridgeError::other(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            config,
            bridges,
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// Get the pipeline configuration.
    pub fn config(&self) -> &IndexingConfig {
        &self.config
    }

    /// Get the bridge registry.
    pub fn bridges(&self) -> &PerFieldBridge {
        &self.bridges
    }

    /// Build the document for a single record.
    pub fn index_record(&self, record: &Record) -> Document {
        let mut document = Document::new();

        if let (Some(id_field), Some(id)) = (self.config.id_field.as_deref(), record.id()) {
            self.bridges.apply(id_field, Some(&id), &mut document);
        }

        for (name, value) in record.iter() {
            if name.is_empty() {
                log::warn!("Skipping attribute with an empty name");
                continue;
            }
            if self.config.is_excluded(name) {
                continue;
            }

            let value = (!value.is_null()).then_some(value as &dyn Displayable);
            self.bridges.apply(name, value, &mut document);
        }

        document
    }

    /// Build documents for a batch of records, preserving order.
    pub fn index_batch(&self, records: &[Record]) -> Vec<Document> {
        if records.len() < 2 || self.thread_pool.current_num_threads() < 2 {
            return records.iter().map(|r| self.index_record(r)).collect();
        }

        self.thread_pool
            .install(|| records.par_iter().map(|r| self.index_record(r)).collect())
    }

    /// Drain a record source in batches, passing each document to `on_document`.
    ///
    /// Source errors are skipped and counted when partial failures are
    /// allowed; otherwise the first one aborts the run. Errors returned by
    /// `on_document` always abort.
    pub fn index_converted<I, F>(&self, records: I, mut on_document: F) -> Result<IndexingSummary>
    where
        I: IntoIterator<Item = Result<Record>>,
        F: FnMut(Document) -> Result<()>,
    {
        let start = Instant::now();
        let mut summary = IndexingSummary::default();
        let mut batch = Vec::with_capacity(self.config.batch_size);

        for record in records {
            match record {
                Ok(record) => {
                    summary.records_read += 1;
                    batch.push(record);
                }
                Err(e) if self.config.allow_partial_failures => {
                    log::warn!("Skipping invalid record: {e}");
                    summary.records_skipped += 1;
                }
                Err(e) => return Err(e),
            }

            if batch.len() >= self.config.batch_size {
                self.flush(&mut batch, &mut summary, &mut on_document)?;
            }
        }
        self.flush(&mut batch, &mut summary, &mut on_document)?;

        summary.duration = start.elapsed();
        Ok(summary)
    }

    fn flush<F>(
        &self,
        batch: &mut Vec<Record>,
        summary: &mut IndexingSummary,
        on_document: &mut F,
    ) -> Result<()>
    where
        F: FnMut(Document) -> Result<()>,
    {
        if batch.is_empty() {
            return Ok(());
        }

        log::debug!("Indexing batch of {} records", batch.len());
        for document in self.index_batch(batch) {
            summary.fields_emitted += document.len();
            summary.documents_written += 1;
            on_document(document)?;
        }
        batch.clear();
        Ok(())
    }
}

impl std::fmt::Debug for IndexingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexingPipeline")
            .field("config", &self.config)
            .field("bridges", &self.bridges)
            .field("threads", &self.thread_pool.current_num_threads())
            .finish()
    }
}
