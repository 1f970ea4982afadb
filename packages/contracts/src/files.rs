//! Intermediate file I/O.
//!
//! Every stage persists its full output as a UTF-8 JSON array before the
//! next stage begins, so stages can be inspected and re-run
//! independently. The validator and review stages read the same files as
//! raw values to stay tolerant of malformed records.

use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::types::ContractRecord;

/// Read an intermediate file as typed records.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ContractRecord>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read an intermediate file as raw JSON values.
pub fn read_raw_records(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write records as a pretty-printed UTF-8 JSON array.
pub fn write_records(path: impl AsRef<Path>, records: &[ContractRecord]) -> Result<()> {
    let body = serde_json::to_string_pretty(records)?;
    std::fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClientFields, EventFields};

    #[test]
    fn test_written_file_is_readable_by_both_views() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_records.json");

        let records = vec![ContractRecord {
            client: Some(ClientFields {
                legal_name: Some("ACME".to_string()),
                tax_id: Some("12345678000195".to_string()),
                ..Default::default()
            }),
            events: Some(vec![EventFields {
                net_value: Some(100.0),
                ..Default::default()
            }]),
            source_file: Some("termo_001.docx".to_string()),
            drive_file_id: Some("f1".to_string()),
        }];

        write_records(&path, &records).unwrap();

        let typed = read_records(&path).unwrap();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].source_file.as_deref(), Some("termo_001.docx"));

        let raw = read_raw_records(&path).unwrap();
        assert_eq!(raw[0]["cliente"]["documento"], "12345678000195");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = read_records("/nonexistent/extracted_records.json").unwrap_err();
        assert!(matches!(err, crate::error::PipelineError::Io(_)));
    }
}
