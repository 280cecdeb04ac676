//! Summary tables built from the derived buckets.

use serde::Serialize;

use crate::aggregate::Aggregate;
use crate::duration::format_duration;
use crate::error::QueryError;
use crate::store::EntryStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub sessions: usize,
    pub seconds: u64,
    /// Minimum width of the hours field when rendering `total_time`.
    #[serde(skip)]
    pub hours_width: usize,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, aggregate: Aggregate) -> Self {
        Self {
            label: label.into(),
            sessions: aggregate.sessions,
            seconds: aggregate.seconds,
            hours_width: 1,
        }
    }

    pub fn with_hours_width(mut self, width: usize) -> Self {
        self.hours_width = width;
        self
    }

    pub fn total_time(&self) -> String {
        format_duration(self.seconds, self.hours_width)
    }
}

/// A titled table of rows with a trailing total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub label_header: String,
    pub rows: Vec<ReportRow>,
    pub total: ReportRow,
}

pub struct Reports;

impl Reports {
    /// All summary tables in display order.
    pub fn standard(store: &EntryStore) -> Result<Vec<Report>, QueryError> {
        Ok(vec![
            Self::joy_of_living(store)?,
            Self::bardo_courses(store)?,
            Self::fully_being(store, "Fully Being V1 Course", "fb-sections", "fully-being-v1")?,
            Self::fully_being(store, "Fully Being V2 Course", "fb2-sections", "fully-being-v2")?,
            Self::path_of_liberation(store)?,
            Self::general(store)?,
        ])
    }

    /// One row per week, empty weeks included.
    pub fn joy_of_living(store: &EntryStore) -> Result<Report, QueryError> {
        let rows = store
            .sections("jol3-by-week")?
            .into_iter()
            .map(|(week, entries)| ReportRow::new(week, Aggregate::of(entries)).with_hours_width(2))
            .collect();

        Ok(Report {
            title: "Joy of Living 3    (add 20-30 hours before tracking)".to_string(),
            label_header: "Week".to_string(),
            rows,
            total: ReportRow::new("Total", store.aggregate("jol3")?),
        })
    }

    /// The total adds the three courses, so a session tagged twice counts twice.
    pub fn bardo_courses(store: &EntryStore) -> Result<Report, QueryError> {
        let rows = [("DED", "ded"), ("ADL", "adl"), ("DOA", "doa")]
            .into_iter()
            .map(|(label, bucket)| Ok(ReportRow::new(label, store.aggregate(bucket)?)))
            .collect::<Result<Vec<_>, QueryError>>()?;
        let total: Aggregate = rows.iter().map(row_aggregate).sum();

        Ok(Report {
            title: "Bardo Courses".to_string(),
            label_header: "Course".to_string(),
            rows,
            total: ReportRow::new("Total", total),
        })
    }

    /// Sections with no sessions are left out.
    pub fn fully_being(
        store: &EntryStore,
        title: &str,
        sections: &str,
        course: &str,
    ) -> Result<Report, QueryError> {
        Ok(Report {
            title: format!(
                "{}  (combined section times are greater than total due to overlap)",
                title
            ),
            label_header: "Section".to_string(),
            rows: non_empty_rows(store, sections)?,
            total: ReportRow::new("Total", store.aggregate(course)?),
        })
    }

    /// The total covers the Four Thoughts sections only.
    pub fn path_of_liberation(store: &EntryStore) -> Result<Report, QueryError> {
        let rows = non_empty_rows(store, "pol1")?;
        let total: Aggregate = rows
            .iter()
            .filter(|row| row.label.to_lowercase().contains("thoughts"))
            .map(row_aggregate)
            .sum();

        Ok(Report {
            title: "POL 1 - NOP".to_string(),
            label_header: "Section".to_string(),
            rows,
            total: ReportRow::new("Total", total),
        })
    }

    pub fn general(store: &EntryStore) -> Result<Report, QueryError> {
        Ok(Report {
            title: "General".to_string(),
            label_header: String::new(),
            rows: vec![
                ReportRow::new("NOP", store.aggregate("nop")?),
                ReportRow::new("Not In Any Course", store.aggregate("not-any-course")?),
            ],
            total: ReportRow::new("Overall Meditation", Aggregate::of(store.entries())),
        })
    }
}

fn row_aggregate(row: &ReportRow) -> Aggregate {
    Aggregate {
        sessions: row.sessions,
        seconds: row.seconds,
    }
}

fn non_empty_rows(store: &EntryStore, name: &str) -> Result<Vec<ReportRow>, QueryError> {
    Ok(store
        .sections(name)?
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(label, entries)| ReportRow::new(label, Aggregate::of(entries)))
        .collect())
}
