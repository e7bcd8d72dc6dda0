//! Wayback Machine API types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the CDX index (`YYYYMMDDHHMMSS`).
pub const CDX_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Display layout for parsed timestamps, e.g. `Jun 15th, 2023 | 12:00 PM`.
/// The `th` suffix is literal for every day of the month.
const DISPLAY_FORMAT: &str = "%b %dth, %Y | %I:%M %p";

/// One archived capture of a URL, as listed by the CDX index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capture timestamp in `YYYYMMDDHHMMSS` form.
    pub timestamp: String,

    /// Human-readable rendition of `timestamp`. Equals the raw string when
    /// the timestamp does not parse.
    pub timestamp_formatted: String,

    /// The URL as originally captured.
    pub original_url: String,
}

impl Snapshot {
    /// Build a snapshot from raw CDX fields, deriving the formatted timestamp.
    pub fn from_cdx_fields(timestamp: &str, original_url: &str) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            timestamp_formatted: format_timestamp(timestamp),
            original_url: original_url.to_string(),
        }
    }
}

/// Render a CDX timestamp for humans.
///
/// Malformed timestamps are returned unchanged rather than erroring, so a
/// bad index line never poisons the whole listing.
pub fn format_timestamp(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp, CDX_TIMESTAMP_FORMAT) {
        Ok(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("20230615120000"), "Jun 15th, 2023 | 12:00 PM");
        assert_eq!(format_timestamp("20240101000000"), "Jan 01th, 2024 | 12:00 AM");
    }

    #[test]
    fn test_format_timestamp_malformed_passes_through() {
        assert_eq!(format_timestamp("notatime"), "notatime");
        assert_eq!(format_timestamp(""), "");
        assert_eq!(format_timestamp("2023"), "2023");
    }

    #[test]
    fn test_from_cdx_fields() {
        let snapshot = Snapshot::from_cdx_fields("20230615120000", "https://example.com/");
        assert_eq!(snapshot.timestamp, "20230615120000");
        assert_eq!(snapshot.timestamp_formatted, "Jun 15th, 2023 | 12:00 PM");
        assert_eq!(snapshot.original_url, "https://example.com/");
    }
}
