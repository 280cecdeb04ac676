use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use medlogs_entries::{format_duration, Aggregate, Report, ReportRow, SessionEntry};

/// Render a report: the title, a blank line, then a table whose last row is the total.
pub fn render_report(report: &Report) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec![report.label_header.as_str(), "Sessions", "Total Time"]);

    for row in report.rows.iter().chain(std::iter::once(&report.total)) {
        table.add_row(cells(row));
    }
    for index in [1, 2] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    format!("{}\n\n{}", report.title, table)
}

fn cells(row: &ReportRow) -> Vec<Cell> {
    vec![
        Cell::new(&row.label),
        Cell::new(row.sessions),
        Cell::new(row.total_time()),
    ]
}

/// Column header printed above [`format_entry`] blocks.
pub fn entries_header() -> String {
    format!(
        "{:^21}{:7}{:>14}{:>10}\n{}\n",
        "Date",
        "Duration",
        "Course",
        "ID",
        "-".repeat(52)
    )
}

/// One search hit: `date  duration  course  id`, then the notes, then a blank line.
pub fn format_entry(entry: &SessionEntry) -> String {
    format!(
        "{:<21}{:>7}{:>14}{:>10}\n{}\n",
        entry.display_date,
        format_duration(entry.elapsed_secs, 1),
        entry.course_code().unwrap_or("n/a"),
        entry.id,
        entry.notes.as_deref().unwrap_or_default()
    )
}

/// Session count and total duration footer for full-entry search output.
pub fn search_totals(entries: &[&SessionEntry]) -> String {
    let totals = Aggregate::of(entries.iter().copied());
    format!(
        "Sessions:  Total Duration:\n{:>8}{:>17}",
        totals.sessions,
        format_duration(totals.seconds, 1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use medlogs_entries::Course;

    fn bardo_report() -> Report {
        Report {
            title: "Bardo Courses".to_string(),
            label_header: "Course".to_string(),
            rows: vec![
                ReportRow::new("DED", Aggregate { sessions: 12, seconds: 3661 }),
                ReportRow::new("ADL", Aggregate { sessions: 3, seconds: 59 }),
            ],
            total: ReportRow::new("Total", Aggregate { sessions: 15, seconds: 3720 }),
        }
    }

    fn line_with<'a>(rendered: &'a str, label: &str) -> &'a str {
        rendered
            .lines()
            .find(|line| line.contains(label))
            .unwrap()
    }

    #[test]
    fn report_starts_with_title_and_ends_with_total() {
        let rendered = render_report(&bardo_report());
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("Bardo Courses"));
        assert_eq!(lines.next(), Some(""));

        let course = rendered.find("Course").unwrap();
        let ded = rendered.find("DED").unwrap();
        let adl = rendered.find("ADL").unwrap();
        let total = rendered.rfind("Total").unwrap();
        assert!(course < ded && ded < adl && adl < total);

        let total_row = rendered.lines().filter(|l| l.contains("Total")).last().unwrap();
        assert!(total_row.contains("15"));
        assert!(total_row.contains("1:02:00"));
    }

    #[test]
    fn numeric_columns_are_right_aligned() {
        let rendered = render_report(&bardo_report());
        let end_of = |label: &str, value: &str| {
            let line = line_with(&rendered, label);
            line.find(&format!(" {} ", value)).unwrap() + value.len() + 1
        };
        assert_eq!(end_of("DED", "12"), end_of("ADL", "3"));
        assert_eq!(end_of("DED", "1:01:01"), end_of("ADL", "0:59"));
    }

    #[test]
    fn formats_entry_block() {
        let entry = SessionEntry::new(1566145, 1_640_390_400_000, 1200)
            .unwrap()
            .with_course(Course::with_code("JOL3"))
            .with_notes("W3 - emptiness");
        let block = format_entry(&entry);
        let mut lines = block.lines();
        assert_eq!(
            lines.next(),
            Some("2021-12-25 00:00:00    20:00          JOL3   1566145")
        );
        assert_eq!(lines.next(), Some("W3 - emptiness"));
    }

    #[test]
    fn entry_without_code_shows_placeholder() {
        let entry = SessionEntry::new(7, 0, 60)
            .unwrap()
            .with_course(Course::with_name("Custom"));
        assert!(format_entry(&entry).contains("n/a"));
    }

    #[test]
    fn totals_footer() {
        let a = SessionEntry::new(1, 0, 1800).unwrap();
        let b = SessionEntry::new(2, 1000, 1861).unwrap();
        assert_eq!(
            search_totals(&[&a, &b]),
            "Sessions:  Total Duration:\n       2          1:01:01"
        );
    }
}
