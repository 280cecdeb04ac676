use std::path::Path;

use crate::aggregate::Aggregate;
use crate::buckets::{Bucket, Buckets};
use crate::error::{LoadError, QueryError};
use crate::parser::{load_entries, parse_entries};
use crate::search::SearchQuery;
use crate::taxonomy::TAXONOMY;
use crate::types::SessionEntry;

/// Immutable, chronologically ordered session log with every bucket derived up front.
#[derive(Debug, Clone)]
pub struct EntryStore {
    entries: Vec<SessionEntry>,
    buckets: Buckets,
}

impl EntryStore {
    /// Load an exported log file.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let store = Self::from_entries(load_entries(path)?)?;
        tracing::info!(path = %path.display(), entries = store.len(), "Loaded meditation log");
        Ok(store)
    }

    /// Build a store from the JSON text of an export.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::from_entries(parse_entries(json)?)
    }

    /// Sort by timestamp (stable, so equal timestamps keep file order) and
    /// derive all buckets.
    pub fn from_entries(mut entries: Vec<SessionEntry>) -> Result<Self, LoadError> {
        if entries.is_empty() {
            return Err(LoadError::Empty);
        }
        entries.sort_by_key(|e| e.timestamp_ms);
        let buckets = Buckets::derive(&entries, TAXONOMY)?;
        Ok(Self { entries, buckets })
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bucket names in derivation order.
    pub fn bucket_names(&self) -> Vec<&'static str> {
        self.buckets.names().collect()
    }

    /// Entries of a bucket (`name` or `name/section`) in chronological order.
    pub fn bucket(&self, scope: &str) -> Result<Vec<&SessionEntry>, QueryError> {
        Ok(self.select(&self.buckets.resolve(scope)?))
    }

    /// Sections of a keyed bucket in taxonomy order, empty ones included.
    pub fn sections(&self, name: &str) -> Result<Vec<(&'static str, Vec<&SessionEntry>)>, QueryError> {
        match self.buckets.get(name) {
            Some(Bucket::Keyed(sections)) => Ok(sections
                .iter()
                .map(|s| (s.label, self.select(&s.members)))
                .collect()),
            _ => Err(QueryError::UnknownBucket(name.to_string())),
        }
    }

    pub fn aggregate(&self, scope: &str) -> Result<Aggregate, QueryError> {
        Ok(Aggregate::of(self.bucket(scope)?))
    }

    /// Newest entry of a bucket, if it has any.
    pub fn most_recent(&self, scope: &str) -> Result<Option<&SessionEntry>, QueryError> {
        Ok(self.bucket(scope)?.last().copied())
    }

    /// Entries whose notes match the query, in chronological order.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<&SessionEntry>, QueryError> {
        let regex = query.compile()?;
        let population = match query.scope.as_deref() {
            Some(scope) => self.bucket(scope)?,
            None => self.entries.iter().collect(),
        };
        Ok(population
            .into_iter()
            .filter(|e| query.accepts(&regex, e))
            .collect())
    }

    /// Like [`search`](Self::search) but returns only the notes text.
    pub fn search_notes(&self, query: &SearchQuery) -> Result<Vec<&str>, QueryError> {
        Ok(self
            .search(query)?
            .into_iter()
            .filter_map(|e| e.notes.as_deref())
            .collect())
    }

    fn select(&self, members: &[usize]) -> Vec<&SessionEntry> {
        members.iter().map(|&i| &self.entries[i]).collect()
    }
}
