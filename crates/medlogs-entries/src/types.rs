use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::date_range::parse_datetime;

/// Course descriptor attached to a session. Legacy custom sessions carry a
/// name but no code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Course {
    pub fn with_code(code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            name: None,
        }
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            code: None,
            name: Some(name.to_string()),
        }
    }
}

/// Mirrors one record of the exported JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntry {
    pub id: i64,
    #[serde(rename = "date")]
    pub timestamp_ms: i64,
    #[serde(default)]
    pub date_string: Option<String>,
    #[serde(deserialize_with = "elapsed_seconds")]
    pub elapsed: u64,
    #[serde(default)]
    pub course: Option<Course>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Some exports carry `elapsed` as a quoted integer or as a whole-valued float.
fn elapsed_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Elapsed {
        Seconds(u64),
        Fractional(f64),
        Text(String),
    }

    match Elapsed::deserialize(deserializer)? {
        Elapsed::Seconds(secs) => Ok(secs),
        Elapsed::Fractional(secs)
            if secs.is_finite() && secs >= 0.0 && secs.fract() == 0.0 && secs < u64::MAX as f64 =>
        {
            Ok(secs as u64)
        }
        Elapsed::Fractional(secs) => Err(serde::de::Error::custom(format!(
            "elapsed must be a whole non-negative number of seconds, got {}",
            secs
        ))),
        Elapsed::Text(text) => text.trim().parse::<u64>().map_err(|_| {
            serde::de::Error::custom(format!(
                "elapsed must be a non-negative integer, got {:?}",
                text
            ))
        }),
    }
}

/// One logged meditation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEntry {
    pub id: i64,
    pub timestamp_ms: i64,
    pub date_string: Option<String>,
    pub elapsed_secs: u64,
    pub course: Course,
    /// `None` when the export had no notes or an empty string.
    pub notes: Option<String>,
    /// UTC date-time derived from `timestamp_ms`; the only value used for filtering.
    pub effective: DateTime<Utc>,
    /// Text shown for the session date; never used for filtering.
    pub display_date: String,
}

impl SessionEntry {
    /// Build an entry from its authoritative fields. Returns `None` when the
    /// timestamp cannot be represented as a date.
    pub fn new(id: i64, timestamp_ms: i64, elapsed_secs: u64) -> Option<Self> {
        let effective = DateTime::from_timestamp(timestamp_ms.div_euclid(1000), 0)?;
        Some(Self {
            id,
            timestamp_ms,
            date_string: None,
            elapsed_secs,
            course: Course::default(),
            notes: None,
            effective,
            display_date: effective.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.course = course;
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string()).filter(|n| !n.is_empty());
        self
    }

    /// Attach the exported locale date string. It only changes `display_date`.
    pub fn with_date_string(mut self, date_string: &str) -> Self {
        self.display_date = match parse_datetime(date_string) {
            Some(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => {
                tracing::debug!(
                    id = self.id,
                    date_string,
                    "Unrecognised dateString layout, displaying verbatim"
                );
                date_string.to_string()
            }
        };
        self.date_string = Some(date_string.to_string());
        self
    }

    pub(crate) fn from_raw(raw: RawEntry) -> Option<Self> {
        let mut entry = Self::new(raw.id, raw.timestamp_ms, raw.elapsed)?
            .with_course(raw.course.unwrap_or_default());
        if let Some(notes) = raw.notes {
            entry = entry.with_notes(&notes);
        }
        if let Some(date_string) = raw.date_string.filter(|s| !s.trim().is_empty()) {
            entry = entry.with_date_string(&date_string);
        }
        Some(entry)
    }

    pub fn course_code(&self) -> Option<&str> {
        self.course.code.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_date_comes_from_timestamp() {
        // 2021-12-25T07:30:00Z
        let entry = SessionEntry::new(1, 1_640_417_400_000, 600).unwrap();
        assert_eq!(
            entry.effective.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2021-12-25 07:30:00"
        );
        assert_eq!(entry.display_date, "2021-12-25 07:30:00");
    }

    #[test]
    fn date_string_only_changes_display() {
        let entry = SessionEntry::new(1, 1_640_417_400_000, 600)
            .unwrap()
            .with_date_string("2021-12-24 23:30:00");
        assert_eq!(entry.display_date, "2021-12-24 23:30:00");
        assert_eq!(entry.effective.format("%Y-%m-%d").to_string(), "2021-12-25");
    }

    #[test]
    fn date_string_with_offset_displays_wall_clock_time() {
        let entry = SessionEntry::new(1, 1_704_411_000_000, 600)
            .unwrap()
            .with_date_string("2024-01-05T00:30:00+01:00");
        assert_eq!(entry.display_date, "2024-01-05 00:30:00");
    }

    #[test]
    fn unparseable_date_string_is_shown_verbatim() {
        let entry = SessionEntry::new(1, 0, 0)
            .unwrap()
            .with_date_string("Christmas morning");
        assert_eq!(entry.display_date, "Christmas morning");
    }

    #[test]
    fn empty_notes_are_absent() {
        let entry = SessionEntry::new(1, 0, 0).unwrap().with_notes("");
        assert!(entry.notes.is_none());
    }

    #[test]
    fn elapsed_accepts_quoted_integers() {
        let raw: RawEntry =
            serde_json::from_str(r#"{"id":3,"date":0,"elapsed":"125","course":{"code":"JOL3"}}"#)
                .unwrap();
        assert_eq!(raw.elapsed, 125);
    }

    #[test]
    fn elapsed_accepts_whole_floats_only() {
        let raw: RawEntry = serde_json::from_str(r#"{"id":3,"date":0,"elapsed":600.0}"#).unwrap();
        assert_eq!(raw.elapsed, 600);
        assert!(serde_json::from_str::<RawEntry>(r#"{"id":3,"date":0,"elapsed":600.5}"#).is_err());
    }

    #[test]
    fn elapsed_rejects_negative_values() {
        let result = serde_json::from_str::<RawEntry>(r#"{"id":3,"date":0,"elapsed":-5}"#);
        assert!(result.is_err());
    }
}
