use std::path::PathBuf;

use thiserror::Error;

/// Failures while building an [`EntryStore`](crate::EntryStore). No partial store is produced.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read log file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Log file contains no entries")]
    Empty,

    #[error("Malformed entry at index {index} (id: {id}): {reason}")]
    MalformedEntry {
        index: usize,
        id: String,
        reason: String,
    },

    #[error("Invalid bucket definition '{bucket}': {reason}")]
    Taxonomy { bucket: String, reason: String },
}

/// Failures answering a search or report against a loaded store.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown bucket: {0}")]
    UnknownBucket(String),

    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Date range '{0}' must have the form 'start,end'")]
    Malformed(String),

    #[error("Could not parse '{element}' in date range '{input}'")]
    InvalidElement { element: String, input: String },
}
