/// Split whole seconds into (hours, minutes, seconds).
pub fn hours_minutes_seconds(seconds: u64) -> (u64, u64, u64) {
    let (mins, secs) = (seconds / 60, seconds % 60);
    (mins / 60, mins % 60, secs)
}

/// `H:MM:SS` when there is at least an hour, otherwise `M:SS`.
///
/// `hours_width` left-pads the hours field with spaces so columns line up; it
/// has no effect on durations under an hour.
pub fn format_duration(seconds: u64, hours_width: usize) -> String {
    let (h, m, s) = hours_minutes_seconds(seconds);
    if h > 0 {
        format!("{:>width$}:{:02}:{:02}", h, m, s, width = hours_width)
    } else {
        format!("{}:{:02}", m, s)
    }
}
