//! Human-readable duration formatting
//!
//! Chapter and track lengths are carried in milliseconds; these helpers
//! render them for log lines and CLI output.

/// Format selection thresholds (seconds)
const SHORT_FORMAT_MAX: u64 = 100; // < 100s → X.XXs
const MEDIUM_FORMAT_MAX: u64 = 6000; // < 100m → M:SS.Xs
                                     // >= 100m → H:MM:SS

/// Format a millisecond duration by magnitude.
///
/// - Short format (`X.XXs`): under 100 seconds
/// - Medium format (`M:SS.Xs`): under 100 minutes
/// - Long format (`H:MM:SS`): everything longer
///
/// # Examples
///
/// ```
/// use abmd_common::human_time::format_duration_ms;
///
/// assert_eq!(format_duration_ms(45_000), "45.00s");
/// assert_eq!(format_duration_ms(330_500), "5:30.5s");
/// assert_eq!(format_duration_ms(3_661_000), "1:01:01");
/// ```
pub fn format_duration_ms(millis: u64) -> String {
    let total_seconds = millis / 1000;

    if total_seconds < SHORT_FORMAT_MAX {
        format!("{:.2}s", millis as f64 / 1000.0)
    } else if total_seconds < MEDIUM_FORMAT_MAX {
        let minutes = total_seconds / 60;
        let secs = (millis % 60_000) as f64 / 1000.0;
        format!("{}:{:04.1}s", minutes, secs)
    } else {
        let hours = total_seconds / 3600;
        let mins = (total_seconds % 3600) / 60;
        let secs = total_seconds % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    }
}

/// Total of a set of millisecond durations, formatted
pub fn format_total_ms<I>(durations: I) -> String
where
    I: IntoIterator<Item = u64>,
{
    format_duration_ms(durations.into_iter().fold(0u64, u64::saturating_add))
}
