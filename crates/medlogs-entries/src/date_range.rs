//! Inclusive date ranges used to scope searches.
//!
//! The textual form is `"A,B"`. An empty `A` starts at the Unix epoch, an
//! empty `B` ends today. Each element is either an integer number of days
//! before today or a date/date-time in one of the layouts below.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::DateRangeError;

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Parse a date or date-time in any of the accepted layouts. A bare date is
/// taken as midnight. An explicit offset is dropped, keeping the wall-clock
/// time as written.
pub(crate) fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}

/// Inclusive range of calendar days. `start > end` is allowed and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse `"A,B"` relative to `today`.
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, DateRangeError> {
        let (start, end) = input
            .split_once(',')
            .filter(|(_, rest)| !rest.contains(','))
            .ok_or_else(|| DateRangeError::Malformed(input.to_string()))?;

        let element = |text: &str, default: NaiveDate| -> Result<NaiveDate, DateRangeError> {
            let text = text.trim();
            if text.is_empty() {
                return Ok(default);
            }
            parse_element(text, today).ok_or_else(|| DateRangeError::InvalidElement {
                element: text.to_string(),
                input: input.to_string(),
            })
        };

        Ok(Self {
            start: element(start, DateTime::<Utc>::UNIX_EPOCH.date_naive())?,
            end: element(end, today)?,
        })
    }

    /// True when `at` falls within `[start 00:00:00, end 23:59:59]`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.start <= day && day <= self.end
    }
}

fn parse_element(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    match text.parse::<i64>() {
        Ok(days_ago) => today.checked_sub_signed(Duration::try_days(days_ago)?),
        Err(_) => parse_datetime(text).map(|dt| dt.date()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 3, 10)
    }

    #[test]
    fn open_end_runs_to_today() {
        let range = DateRange::parse("3,", today()).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 3, 7), today()));
    }

    #[test]
    fn open_start_runs_from_epoch() {
        let range = DateRange::parse(",3", today()).unwrap();
        assert_eq!(range, DateRange::new(date(1970, 1, 1), date(2024, 3, 7)));
    }

    #[test]
    fn days_ago_on_both_ends() {
        let range = DateRange::parse("7, 3", today()).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 3, 3), date(2024, 3, 7)));
    }

    #[test]
    fn reversed_range_parses_and_contains_nothing() {
        let range = DateRange::parse("3,7", today()).unwrap();
        assert!(range.start > range.end);
        let noon = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert!(!range.contains(noon));
    }

    #[test]
    fn explicit_dates_and_datetimes() {
        let range = DateRange::parse("2019-01-01 00:00:00,Mar 1, 2020", today());
        // the second comma makes this ambiguous
        assert!(matches!(range, Err(DateRangeError::Malformed(_))));

        let range = DateRange::parse("2019-01-01 00:00:00,2020-03-01", today()).unwrap();
        assert_eq!(range, DateRange::new(date(2019, 1, 1), date(2020, 3, 1)));

        let range = DateRange::parse("Jan 5 2021,", today()).unwrap();
        assert_eq!(range.start, date(2021, 1, 5));
    }

    #[test]
    fn both_ends_empty_is_everything_until_today() {
        let range = DateRange::parse(",", today()).unwrap();
        assert_eq!(range, DateRange::new(date(1970, 1, 1), today()));
    }

    #[test]
    fn rejects_missing_comma_and_garbage() {
        assert_eq!(
            DateRange::parse("7", today()),
            Err(DateRangeError::Malformed("7".to_string()))
        );
        assert_eq!(
            DateRange::parse("yesterday,", today()),
            Err(DateRangeError::InvalidElement {
                element: "yesterday".to_string(),
                input: "yesterday,".to_string(),
            })
        );
    }

    #[test]
    fn contains_is_inclusive_at_day_granularity() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 2));
        let first = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2024, 3, 2, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        assert!(range.contains(first));
        assert!(range.contains(last));
        assert!(!range.contains(after));
    }

    #[test]
    fn offset_bounds_keep_the_written_day() {
        let input = "2024-01-05T01:00:00+05:00,2024-01-06T23:30:00-08:00";
        let range = DateRange::parse(input, today()).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 1, 5), date(2024, 1, 6)));
    }

    #[test]
    fn parses_locale_datetimes() {
        let parsed = parse_datetime("12/25/2021, 7:30:00 AM").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2021-12-25 07:30");
        assert!(parse_datetime("2021-12-25T07:30:00Z").is_some());
    }
}
