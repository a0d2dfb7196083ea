//! Time formatting helpers
//!
//! Dashboard timestamps are rendered with pinned formats so output never
//! depends on the host locale or timezone: UTC, ISO date (`%Y-%m-%d`) and
//! 24-hour time (`%H:%M:%S`).

use chrono::{DateTime, Utc};

/// Epoch seconds → `YYYY-MM-DD` (UTC)
pub fn format_date(epoch_secs: i64) -> String {
    to_utc(epoch_secs).format("%Y-%m-%d").to_string()
}

/// Epoch seconds → `HH:MM:SS` (UTC, 24-hour)
pub fn format_time(epoch_secs: i64) -> String {
    to_utc(epoch_secs).format("%H:%M:%S").to_string()
}

/// Current time as epoch seconds
pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

fn to_utc(epoch_secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_are_pinned() {
        // 2024-03-01T13:05:09Z
        let ts = 1_709_298_309;
        assert_eq!(format_date(ts), "2024-03-01");
        assert_eq!(format_time(ts), "13:05:09");
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_epoch() {
        assert_eq!(format_date(i64::MAX), "1970-01-01");
    }
}
