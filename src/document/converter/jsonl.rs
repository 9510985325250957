//! JSONL format record converter.
//!
//! Converts JSONL (JSON Lines) files into Records.
//! Each line in the file should be a single JSON object:
//! ```jsonl
//! {"id": "P-1", "status": "OPEN", "budget": 1200}
//! {"id": "P-2", "status": null, "budget": 0}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::document::converter::RecordConverter;
use crate::document::record::Record;
use crate::error::{FieldBridgeError, Result};

/// A record converter for JSONL format.
#[derive(Debug, Clone, Default)]
pub struct JsonlRecordConverter {
    /// JSON key lifted into the record id.
    id_key: Option<String>,
}

impl JsonlRecordConverter {
    /// Create a new JSONL converter without an id key.
    pub fn new() -> Self {
        JsonlRecordConverter { id_key: None }
    }

    /// Create a JSONL converter that lifts `id_key` into the record id.
    pub fn with_id_key<S: Into<String>>(id_key: S) -> Self {
        JsonlRecordConverter {
            id_key: Some(id_key.into()),
        }
    }

    /// Parse a single JSON line into a Record.
    pub fn parse_line(&self, line: &str) -> Result<Record> {
        let value: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| FieldBridgeError::parse(format!("Failed to parse JSON: {e}")))?;
        Record::from_json(value, self.id_key.as_deref())
    }
}

/// Iterator over JSONL records.
pub struct JsonlRecordIterator {
    reader: BufReader<File>,
    converter: JsonlRecordConverter,
    line_number: usize,
}

impl Iterator for JsonlRecordIterator {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self.reader.read_line(&mut line);
            self.line_number += 1;
            let line_number = self.line_number;

            match read {
                Ok(0) => return None,
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(self.converter.parse_line(line).map_err(|e| match e {
                        FieldBridgeError::Parse(msg) => {
                            FieldBridgeError::parse(format!("line {line_number}: {msg}"))
                        }
                        other => other,
                    }));
                }
                Err(e) => {
                    return Some(Err(FieldBridgeError::parse(format!(
                        "line {line_number}: Failed to read line: {e}"
                    ))));
                }
            }
        }
    }
}

impl RecordConverter for JsonlRecordConverter {
    type Iter = JsonlRecordIterator;

    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Self::Iter> {
        let file = File::open(path.as_ref())
            .map_err(|e| FieldBridgeError::parse(format!("Failed to open JSONL file: {e}")))?;

        Ok(JsonlRecordIterator {
            reader: BufReader::new(file),
            converter: self.clone(),
            line_number: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::field_value::FieldValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_jsonl_parsing() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"title": "Test", "year": 2024}}"#).unwrap();
        file.flush().unwrap();

        let converter = JsonlRecordConverter::new();
        let mut iter = converter.convert(file.path()).unwrap();
        let record = iter.next().unwrap().unwrap();

        assert_eq!(record.get("title"), Some(&FieldValue::Text("Test".into())));
        assert_eq!(record.get("year"), Some(&FieldValue::Integer(2024)));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_jsonl_skips_blank_lines_and_reports_line_numbers() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"a": 1}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "not json").unwrap();
        file.flush().unwrap();

        let converter = JsonlRecordConverter::new();
        let results: Vec<_> = converter.convert(file.path()).unwrap().collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err().to_string();
        assert!(err.contains("line 3"), "unexpected error: {err}");
    }

    #[test]
    fn test_jsonl_errors_carry_a_single_prefix() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xfe\n").unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file, "[1, 2]").unwrap();
        writeln!(file, r#"{{"a": 1}}"#).unwrap();
        file.flush().unwrap();

        let results: Vec<_> = JsonlRecordConverter::new()
            .convert(file.path())
            .unwrap()
            .collect();
        assert_eq!(results.len(), 4);

        let errors: Vec<String> = results[..3]
            .iter()
            .map(|r| r.as_ref().unwrap_err().to_string())
            .collect();
        assert!(errors[0].starts_with("Parse error: line 1: Failed to read line"), "{}", errors[0]);
        assert!(errors[1].starts_with("Parse error: line 2: Failed to parse JSON"), "{}", errors[1]);
        assert!(errors[2].starts_with("Parse error: line 3: Expected a JSON object"), "{}", errors[2]);
        for error in &errors {
            assert_eq!(error.matches("Parse error").count(), 1, "{error}");
        }
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_jsonl_keeps_attribute_order() {
        let record = JsonlRecordConverter::new()
            .parse_line(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#)
            .unwrap();
        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_jsonl_id_key() {
        let converter = JsonlRecordConverter::with_id_key("id");
        let record = converter.parse_line(r#"{"id": "P-1", "status": "OPEN"}"#).unwrap();
        assert_eq!(record.id(), Some("P-1"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_jsonl_missing_file() {
        let converter = JsonlRecordConverter::new();
        assert!(converter.convert("/nonexistent/records.jsonl").is_err());
    }
}
