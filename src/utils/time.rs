//! Timestamp helpers.

use chrono::{DateTime, Utc};

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Format a unix timestamp as `D Mon YYYY H:M:S` (UTC, no zero padding),
/// e.g. `"5 Jan 2022 9:3:7"`.
///
/// Timestamps outside chrono's range are printed as the raw number.
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%-d %b %Y %-H:%-M:%-S").to_string(),
        None => timestamp.to_string(),
    }
}
