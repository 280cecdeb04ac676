use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::types::{RawEntry, SessionEntry};

/// Read and parse an exported log file.
pub fn load_entries(path: &Path) -> Result<Vec<SessionEntry>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entries(&content)
}

/// Parse the JSON array of session records, in file order.
///
/// Each record is checked on its own so a failure names the offending entry.
/// Nothing is skipped: a single malformed record fails the whole load.
pub fn parse_entries(json: &str) -> Result<Vec<SessionEntry>, LoadError> {
    let records: Vec<Value> = serde_json::from_str::<Option<Vec<Value>>>(json)?.unwrap_or_default();
    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, record: Value) -> Result<SessionEntry, LoadError> {
    let id = record
        .get("id")
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let malformed = |reason: String| {
        tracing::error!(index, id = %id, %reason, "Malformed log entry");
        LoadError::MalformedEntry {
            index,
            id: id.clone(),
            reason,
        }
    };

    let raw: RawEntry = serde_json::from_value(record).map_err(|e| malformed(e.to_string()))?;
    let timestamp_ms = raw.timestamp_ms;
    SessionEntry::from_raw(raw)
        .ok_or_else(|| malformed(format!("timestamp {} is out of range", timestamp_ms)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_in_file_order() {
        let json = r#"[
            {"id": 2, "date": 2000, "elapsed": 60, "course": {"code": "JOL3"}, "notes": "W1"},
            {"id": 1, "date": 1000, "elapsed": 30, "course": {"name": "Custom"}, "notes": null}
        ]"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[1].course.name.as_deref(), Some("Custom"));
        assert!(entries[1].notes.is_none());
    }

    #[test]
    fn empty_or_null_is_an_error() {
        assert!(matches!(parse_entries("[]"), Err(LoadError::Empty)));
        assert!(matches!(parse_entries("null"), Err(LoadError::Empty)));
    }

    #[test]
    fn non_array_is_a_json_error() {
        assert!(matches!(parse_entries("{\"id\": 1}"), Err(LoadError::Json(_))));
        assert!(matches!(parse_entries("not json"), Err(LoadError::Json(_))));
    }

    #[test]
    fn malformed_record_names_its_id() {
        let json = r#"[
            {"id": 1, "date": 1000, "elapsed": 30},
            {"id": 77, "date": 2000}
        ]"#;
        match parse_entries(json) {
            Err(LoadError::MalformedEntry { index, id, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(id, "77");
                assert!(reason.contains("elapsed"));
            }
            other => panic!("expected MalformedEntry, got {:?}", other),
        }
    }

    #[test]
    fn missing_course_is_an_empty_course() {
        let entries = parse_entries(r#"[{"id": 1, "date": 0, "elapsed": 5}]"#).unwrap();
        assert_eq!(entries[0].course_code(), None);
        assert_eq!(entries[0].course.name, None);
    }
}
