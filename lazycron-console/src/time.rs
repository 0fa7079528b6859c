use chrono::{Datelike, Local, TimeZone};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Rendered for instants whose local year does not fit in four digits.
pub const PLACEHOLDER: &str = "0000-00-00 00:00:00.000";

/// Formats epoch milliseconds as `YYYY-MM-DD HH:MM:SS.mmm` in local time.
pub fn format_millis(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(datetime) if (0..=9999).contains(&datetime.year()) => {
            datetime.format(FORMAT).to_string()
        }
        _ => PLACEHOLDER.to_string(),
    }
}
