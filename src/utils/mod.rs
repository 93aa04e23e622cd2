//! Utility functions and helpers.

use chrono::{DateTime, SecondsFormat, Utc};
use unicode_segmentation::UnicodeSegmentation;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format an instant the way the feed formats `created_at`.
///
/// Local timestamps (stats samples, the last-check marker) use the same
/// shape so they compare correctly against post times as plain strings.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as a [`timestamp`].
pub fn now_timestamp() -> String {
    timestamp(Utc::now())
}

/// First `limit` grapheme clusters of `text`.
pub fn truncate_graphemes(text: &str, limit: usize) -> &str {
    match text.grapheme_indices(true).nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Prefix of at most `len` characters.
pub fn char_prefix(text: &str, len: usize) -> &str {
    match text.char_indices().nth(len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `"2024-01"` → `"Jan 2024"`; anything else is returned unchanged.
pub fn month_label(month: &str) -> String {
    let Some((year, mm)) = month.split_once('-') else {
        return month.to_string();
    };
    match mm.parse::<usize>() {
        Ok(m @ 1..=12) => format!("{} {}", MONTH_ABBR[m - 1], year),
        _ => month.to_string(),
    }
}

/// Group digits in thousands: `1234567` → `"1,234,567"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_matches_feed_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(timestamp(at), "2024-01-05T09:30:00.000Z");
    }

    #[test]
    fn test_timestamp_orders_as_string() {
        let a = timestamp(Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap());
        assert!(a.as_str() < "2024-01-05T09:30:00.001Z");
        assert!(a.as_str() > "2024-01-05T09:29:59.999Z");
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("hello", 3), "hel");
        assert_eq!(truncate_graphemes("hi", 10), "hi");
        assert_eq!(truncate_graphemes("🇺🇸🇺🇸x", 1), "🇺🇸");
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("2024-01-05T00:00", 7), "2024-01");
        assert_eq!(char_prefix("2024", 7), "2024");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2024-01"), "Jan 2024");
        assert_eq!(month_label("2023-12"), "Dec 2023");
        assert_eq!(month_label("2023-13"), "2023-13");
        assert_eq!(month_label("garbage"), "garbage");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(10_953_342), "10,953,342");
    }
}
