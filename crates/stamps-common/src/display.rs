//! Formatting of records for people to read.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use stamps_protocol::CreatedAt;

/// Number of transaction id characters kept by [`truncate_txid`]
pub const TXID_DISPLAY_CHARS: usize = 20;

/// Weekday, month, day and year, e.g. `Tue Nov 14 2023`
pub const DEFAULT_DATE_FORMAT: &str = "%a %b %d %Y";

#[derive(thiserror::Error, Debug)]
pub enum DisplayError {
    #[error("creation time out of range: {0}")]
    OutOfRange(jiff::Error),

    #[error("bad time format: {0}")]
    BadFormat(jiff::Error),
}

/// Shortens a transaction id to its first [`TXID_DISPLAY_CHARS`] characters followed by `...`.
/// Ids that already fit are returned unchanged, without the trailing `...`.
pub fn truncate_txid(txid: &str) -> String {
    match txid.char_indices().nth(TXID_DISPLAY_CHARS) {
        Some((cut, _)) => format!("{}...", &txid[..cut]),
        None => txid.to_string(),
    }
}

/// Renders a creation time in `tz` using a strftime-style `format`. The nanosecond value is
/// reduced to milliseconds before it is interpreted.
pub fn format_created_at(
    created_at: CreatedAt,
    tz: &TimeZone,
    format: &str,
) -> Result<String, DisplayError> {
    let millis = i64::try_from(created_at.as_millis()).unwrap_or(i64::MAX);
    let timestamp = Timestamp::from_millisecond(millis).map_err(DisplayError::OutOfRange)?;
    let zoned = timestamp.to_zoned(tz.clone());

    jiff::fmt::strtime::format(format, &zoned).map_err(DisplayError::BadFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_txids_are_truncated_to_twenty_chars() {
        let txid = "abc1234567890defghijklmnopqrstuvwxyz";
        let shown = truncate_txid(txid);

        assert_eq!(shown, "abc1234567890defghij...");
        assert_eq!(shown.trim_end_matches("...").chars().count(), 20);
    }

    #[test]
    fn short_txids_are_untouched() {
        assert_eq!(truncate_txid("abc123"), "abc123");
        assert_eq!(truncate_txid(&"x".repeat(20)), "x".repeat(20));
        assert_eq!(truncate_txid(&"x".repeat(21)), format!("{}...", "x".repeat(20)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let txid = "é".repeat(25);
        assert_eq!(truncate_txid(&txid), format!("{}...", "é".repeat(20)));
    }

    #[test]
    fn nanoseconds_become_a_date() {
        let at = CreatedAt::from_nanos(1_700_000_000_000_000_000);
        let shown = format_created_at(at, &TimeZone::UTC, DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(shown, "Tue Nov 14 2023");
    }

    #[test]
    fn custom_formats() {
        let at = CreatedAt::from_nanos(1_700_000_000_999_999_999);
        let shown = format_created_at(at, &TimeZone::UTC, "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(shown, "2023-11-14 22:13:20");
    }
}
