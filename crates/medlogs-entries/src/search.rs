use regex::{Regex, RegexBuilder};

use crate::date_range::DateRange;
use crate::error::QueryError;
use crate::types::SessionEntry;

/// Full-text search over session notes.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Case-insensitive regex; `.` also matches newlines.
    pub pattern: String,
    /// Bucket name (or `bucket/section`) to search instead of the whole store.
    pub scope: Option<String>,
    pub date_range: Option<DateRange>,
}

impl SearchQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn in_bucket(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn within(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub(crate) fn compile(&self) -> Result<Regex, QueryError> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| QueryError::InvalidPattern {
                pattern: self.pattern.clone(),
                source,
            })
    }

    /// Entries without notes never match.
    pub(crate) fn accepts(&self, regex: &Regex, entry: &SessionEntry) -> bool {
        let Some(notes) = entry.notes.as_deref() else {
            return false;
        };

        if let Some(range) = self.date_range {
            if !range.contains(entry.effective) {
                return false;
            }
        }

        regex.is_match(notes)
    }
}
