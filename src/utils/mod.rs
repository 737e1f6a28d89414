//! Display-ready formatting of raw API field values.

pub mod unicode;
pub mod youtube;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

pub use youtube::extract_video_id;

/// Values accepted by [`format_count`]: integers, numeric strings, JSON fields.
pub trait CountLike {
    fn as_count(&self) -> Option<i64>;
}

impl CountLike for i64 {
    fn as_count(&self) -> Option<i64> {
        Some(*self)
    }
}

impl CountLike for u64 {
    fn as_count(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl CountLike for i32 {
    fn as_count(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl CountLike for &str {
    fn as_count(&self) -> Option<i64> {
        self.trim().parse().ok()
    }
}

impl CountLike for String {
    fn as_count(&self) -> Option<i64> {
        self.as_str().as_count()
    }
}

impl CountLike for Value {
    fn as_count(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.as_str().as_count(),
            _ => None,
        }
    }
}

impl<T: CountLike> CountLike for Option<T> {
    fn as_count(&self) -> Option<i64> {
        self.as_ref().and_then(CountLike::as_count)
    }
}

impl CountLike for &Value {
    fn as_count(&self) -> Option<i64> {
        (*self).as_count()
    }
}

/// `1500` -> `1.5K`, `2_300_000` -> `2.3M`; absent, zero or garbage -> `0`.
pub fn format_count<C: CountLike>(count: C) -> String {
    let n = match count.as_count() {
        Some(n) if n != 0 => n,
        _ => return "0".to_string(),
    };
    // Tenths computed on integers: round half away from zero. Widened so
    // values near i64::MAX cannot overflow.
    let scaled = |unit: i128, suffix: &str| {
        let half = unit / 20;
        let tenths = (i128::from(n) + half) / (unit / 10);
        format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
    };
    if n >= 1_000_000 {
        scaled(1_000_000, "M")
    } else if n >= 1_000 {
        scaled(1_000, "K")
    } else {
        n.to_string()
    }
}

/// `PT1H2M3S` -> `1:02:03`, `PT5M30S` -> `5:30`.
///
/// Anything outside `PT[nH][nM][nS]` comes back unchanged.
pub fn format_duration(duration: Option<&str>) -> String {
    let Some(raw) = duration.filter(|d| !d.is_empty()) else {
        return String::new();
    };
    match parse_duration(raw) {
        Some((Some(h), m, s)) => format!("{}:{:02}:{:02}", h, m, s),
        Some((None, m, s)) => format!("{}:{:02}", m, s),
        None => raw.to_string(),
    }
}

fn parse_duration(raw: &str) -> Option<(Option<u64>, u64, u64)> {
    let mut rest = raw.strip_prefix("PT")?;
    let mut take = |marker: char| -> Option<Option<u64>> {
        match rest.split_once(marker) {
            Some((num, tail)) => {
                if num.is_empty() || !num.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                rest = tail;
                num.parse().ok().map(Some)
            }
            None => Some(None),
        }
    };
    let hours = take('H')?;
    let minutes = take('M')?;
    let seconds = take('S')?;
    if !rest.is_empty() {
        return None;
    }
    Some((hours, minutes.unwrap_or(0), seconds.unwrap_or(0)))
}

/// `2024-01-15T10:30:00Z` -> `2024-01-15`.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.filter(|d| !d.is_empty()) else {
        return String::new();
    };
    if let Some(d) = parse_date(raw) {
        return d.format("%Y-%m-%d").to_string();
    }
    if raw.chars().count() >= 10 {
        raw.chars().take(10).collect()
    } else {
        raw.to_string()
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Single-line text clipped to `max_len` characters, ending in `...` when cut.
pub fn truncate(text: Option<&str>, max_len: usize) -> String {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return String::new();
    };
    let text = text.replace('\n', " ");
    let text = text.trim();
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len < 3 {
        return ".".repeat(max_len);
    }
    let keep = max_len - 3;
    format!("{}...", &text[..unicode::char_to_byte_index(text, keep)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_small_numbers_verbatim() {
        for n in [1i64, 7, 42, 999] {
            assert_eq!(format_count(n), n.to_string());
        }
    }

    #[test]
    fn count_zero_and_absent() {
        assert_eq!(format_count(0i64), "0");
        assert_eq!(format_count(None::<i64>), "0");
        assert_eq!(format_count(""), "0");
        assert_eq!(format_count(&Value::Null), "0");
    }

    #[test]
    fn count_suffixes() {
        assert_eq!(format_count(1000i64), "1.0K");
        assert_eq!(format_count(1500i64), "1.5K");
        assert_eq!(format_count(1_000_000i64), "1.0M");
        assert_eq!(format_count(1_500_000i64), "1.5M");
        assert_eq!(format_count(1250i64), "1.3K");
        assert_eq!(format_count(1249i64), "1.2K");
    }

    #[test]
    fn count_from_strings_and_json() {
        assert_eq!(format_count("1500"), "1.5K");
        assert_eq!(format_count(&json!("2300000")), "2.3M");
        assert_eq!(format_count(&json!(12)), "12");
    }

    #[test]
    fn counts_near_the_integer_limit() {
        assert_eq!(format_count("9223372036854775807"), "9223372036854.8M");
        assert_eq!(format_count(i64::MAX), "9223372036854.8M");
    }

    #[test]
    fn duration_empty() {
        assert_eq!(format_duration(None), "");
        assert_eq!(format_duration(Some("")), "");
    }

    #[test]
    fn duration_shapes() {
        assert_eq!(format_duration(Some("PT30S")), "0:30");
        assert_eq!(format_duration(Some("PT5M30S")), "5:30");
        assert_eq!(format_duration(Some("PT1H2M3S")), "1:02:03");
        assert_eq!(format_duration(Some("PT2H")), "2:00:00");
        assert_eq!(format_duration(Some("PT10M")), "10:00");
    }

    #[test]
    fn duration_garbage_is_returned_unchanged() {
        assert_eq!(format_duration(Some("invalid")), "invalid");
        assert_eq!(format_duration(Some("P1DT2H")), "P1DT2H");
        assert_eq!(format_duration(Some("PTxM")), "PTxM");
        assert_eq!(format_duration(Some("PT5M3")), "PT5M3");
    }

    #[test]
    fn date_formats() {
        assert_eq!(format_date(Some("2024-01-15T10:30:00Z")), "2024-01-15");
        assert_eq!(format_date(Some("2024-01-15T10:30:00.123+08:00")), "2024-01-15");
        assert_eq!(format_date(Some("2024-01-15")), "2024-01-15");
        assert_eq!(format_date(None), "");
        assert_eq!(format_date(Some("2024")), "2024");
        assert_eq!(format_date(Some("not-a-date-at-all")), "not-a-date");
    }

    #[test]
    fn truncate_rules() {
        assert_eq!(truncate(None, 60), "");
        assert_eq!(truncate(Some(""), 60), "");
        assert_eq!(truncate(Some("Hello"), 60), "Hello");
        assert_eq!(truncate(Some("Hello\nWorld"), 60), "Hello World");

        let exact = "a".repeat(60);
        assert_eq!(truncate(Some(&exact), 60), exact);

        let long = "b".repeat(100);
        let cut = truncate(Some(&long), 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn truncate_never_exceeds_tiny_limits() {
        assert_eq!(truncate(Some("hello"), 2), "..");
        assert_eq!(truncate(Some("hello"), 0), "");
        assert_eq!(truncate(Some("hello"), 3), "...");
        assert_eq!(truncate(Some("hi"), 2), "hi");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "播放清單".repeat(10);
        let cut = truncate(Some(&text), 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.starts_with("播放清單播放清"));
    }
}
