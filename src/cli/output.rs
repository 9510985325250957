//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{FieldBridgeArgs, OutputFormat};
use crate::error::Result;
use crate::pipeline::IndexingSummary;

/// Result structure for the index command.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResult {
    pub records_read: usize,
    pub documents_written: usize,
    pub fields_emitted: usize,
    pub records_skipped: usize,
    pub duration_ms: u64,
    pub docs_per_second: f64,
}

impl From<&IndexingSummary> for IndexResult {
    fn from(summary: &IndexingSummary) -> Self {
        let secs = summary.duration.as_secs_f64();
        Self {
            records_read: summary.records_read,
            documents_written: summary.documents_written,
            fields_emitted: summary.fields_emitted,
            records_skipped: summary.records_skipped,
            duration_ms: summary.duration.as_millis() as u64,
            docs_per_second: if secs > 0.0 {
                summary.documents_written as f64 / secs
            } else {
                0.0
            },
        }
    }
}

/// Result structure for the render command.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResult {
    /// The normalized text, or `None` when the value is null.
    pub text: Option<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    args: &FieldBridgeArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &FieldBridgeArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
    }

    let value = serde_json::to_value(result)?;
    if let serde_json::Value::Object(map) = value {
        for (key, val) in map {
            match val {
                serde_json::Value::String(s) => println!("  {key}: {s}"),
                serde_json::Value::Null => println!("  {key}: (none)"),
                other => println!("  {key}: {other}"),
            }
        }
    }

    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FieldBridgeArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_index_result_from_summary() {
        let summary = IndexingSummary {
            records_read: 10,
            documents_written: 10,
            fields_emitted: 25,
            records_skipped: 1,
            duration: Duration::from_millis(500),
        };

        let result = IndexResult::from(&summary);
        assert_eq!(result.duration_ms, 500);
        assert_eq!(result.docs_per_second, 20.0);
        assert_eq!(result.records_skipped, 1);
    }

    #[test]
    fn test_index_result_zero_duration() {
        let result = IndexResult::from(&IndexingSummary::default());
        assert_eq!(result.docs_per_second, 0.0);
    }
}
