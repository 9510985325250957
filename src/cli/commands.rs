//! Command implementations for the fieldbridge CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;

use crate::bridge::display::Displayable;
use crate::bridge::field_bridge::IndexableField;
use crate::bridge::options::StoragePolicy;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::IndexingConfig;
use crate::document::converter::RecordConverter;
use crate::document::converter::jsonl::JsonlRecordConverter;
use crate::document::field_value::FieldValue;
use crate::error::{FieldBridgeError, Result};
use crate::pipeline::IndexingPipeline;

/// Execute a CLI command.
pub fn execute_command(args: FieldBridgeArgs) -> Result<()> {
    match &args.command {
        Command::Index(index_args) => index_records(index_args.clone(), &args),
        Command::Render(render_args) => render_value(render_args.clone(), &args),
    }
}

/// Index a JSONL file of records.
fn index_records(args: IndexArgs, cli_args: &FieldBridgeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => IndexingConfig::from_file(path)?,
        None => IndexingConfig::default(),
    };
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(threads) = args.threads {
        config.thread_pool_size = Some(threads);
    }

    // The CLI only has the to-string bridge, so these options could never apply.
    let ignored = config.ignored_overrides();
    if !ignored.is_empty() {
        return Err(FieldBridgeError::invalid_argument(format!(
            "Options for {} have no effect: every field is indexed and never stored",
            ignored.join(", ")
        )));
    }

    let converter = match &config.id_field {
        Some(id_field) => JsonlRecordConverter::with_id_key(id_field.clone()),
        None => JsonlRecordConverter::new(),
    };
    let pipeline = IndexingPipeline::new(config)?;
    log::info!("Indexing records from {}", args.input.display());

    let records = converter.convert(&args.input)?;
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = pipeline.index_converted(records, |document| {
        serde_json::to_writer(&mut out, &document)?;
        writeln!(out)?;
        Ok(())
    })?;
    out.flush()?;

    let result = IndexResult::from(&summary);
    match &args.output {
        Some(path) => output_result(
            &format!("Documents written to {}", path.display()),
            &result,
            cli_args,
        ),
        None => {
            // Stdout carries the documents; keep the summary out of it.
            log::info!(
                "Indexed {} records into {} documents ({} fields, {} skipped) in {} ms",
                result.records_read,
                result.documents_written,
                result.fields_emitted,
                result.records_skipped,
                result.duration_ms
            );
            Ok(())
        }
    }
}

/// Render a single JSON value the way the to-string bridge would.
fn render_value(args: RenderArgs, cli_args: &FieldBridgeArgs) -> Result<()> {
    let json: serde_json::Value = serde_json::from_str(&args.value)
        .map_err(|e| FieldBridgeError::invalid_argument(format!("Not a JSON value: {e}")))?;
    let value = FieldValue::from_json(json);

    let result = RenderResult {
        text: render_text(&value),
    };
    output_result("Normalized text", &result, cli_args)
}

fn render_text(value: &dyn Displayable) -> Option<String> {
    IndexableField::new("value", Some(value), StoragePolicy::DoNotStore)
        .normalize()
        .map(|token| token.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document::Document;
    use clap::Parser;
    use std::ffi::OsString;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&FieldValue::Integer(42)), Some("42".to_string()));
        assert_eq!(render_text(&FieldValue::Null), None);
    }

    #[test]
    fn test_index_command_writes_documents() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, r#"{{"status": "OPEN", "budget": 10}}"#).unwrap();
        writeln!(input, r#"{{"status": null}}"#).unwrap();
        writeln!(input, "broken").unwrap();
        input.flush().unwrap();

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("documents.jsonl");

        let args = FieldBridgeArgs::try_parse_from([
            OsString::from("fieldbridge"),
            OsString::from("-q"),
            OsString::from("index"),
            input.path().as_os_str().to_os_string(),
            OsString::from("--output"),
            output.as_os_str().to_os_string(),
        ])
        .unwrap();
        execute_command(args).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Document = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.get_field("budget").unwrap().text, "10");
        assert_eq!(first.get_field("status").unwrap().text, "OPEN");
        assert!(!first.get_field("status").unwrap().option.stored);

        let second: Document = serde_json::from_str(lines[1]).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_index_command_rejects_options_it_cannot_apply() {
        let mut config = NamedTempFile::new().unwrap();
        write!(config, r#"{{"default_options": {{"indexed": false}}}}"#).unwrap();
        config.flush().unwrap();

        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, r#"{{"status": "OPEN"}}"#).unwrap();
        input.flush().unwrap();

        let args = FieldBridgeArgs::try_parse_from([
            OsString::from("fieldbridge"),
            OsString::from("-q"),
            OsString::from("index"),
            input.path().as_os_str().to_os_string(),
            OsString::from("--config"),
            config.path().as_os_str().to_os_string(),
        ])
        .unwrap();

        let err = execute_command(args).unwrap_err();
        assert!(matches!(err, FieldBridgeError::InvalidArgument(_)));
        assert!(err.to_string().contains("default_options"), "{err}");
    }

    #[test]
    fn test_index_command_reports_output_path_on_failure() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, r#"{{"status": "OPEN"}}"#).unwrap();
        input.flush().unwrap();

        let dir = TempDir::new().unwrap();
        let output = dir.path().join("missing").join("documents.jsonl");

        let args = FieldBridgeArgs::try_parse_from([
            OsString::from("fieldbridge"),
            OsString::from("-q"),
            OsString::from("index"),
            input.path().as_os_str().to_os_string(),
            OsString::from("--output"),
            output.as_os_str().to_os_string(),
        ])
        .unwrap();

        let err = execute_command(args).unwrap_err();
        assert!(matches!(err, FieldBridgeError::Anyhow(_)));
        assert!(
            err.to_string()
                .starts_with(&format!("Failed to create output file {}: ", output.display())),
            "{err}"
        );
    }

    #[test]
    fn test_render_rejects_invalid_json() {
        let args =
            FieldBridgeArgs::try_parse_from(["fieldbridge", "-q", "render", "{oops"]).unwrap();
        assert!(execute_command(args).is_err());
    }
}
