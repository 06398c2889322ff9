use chrono::DateTime;

/// Format raw epoch seconds from a log as `YYYY-MM-DD HH:MM:SS` (UTC)
///
/// Falls back to the raw number when it is out of chrono's range.
pub fn format_log_time(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}

/// Format a duration in seconds as `1h 02m 03s`, `12m 05s` or `9s`
pub fn format_duration(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.abs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}{}h {:02}m {:02}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m {:02}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}
