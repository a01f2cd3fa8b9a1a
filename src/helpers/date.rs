//! Date helper functions
//!
//! Post dates are kept as the raw strings written in front-matter. These
//! helpers parse them on demand and hand the raw input back untouched when
//! it is not a recognizable date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an ISO 8601 style date string
///
/// Accepts RFC 3339 timestamps, naive date-times and plain dates. Naive
/// values are taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Format a date like "January 5, 2024"
pub fn format_date(s: &str) -> String {
    format_with(s, "%B %-d, %Y")
}

/// Format a date like "Jan 5, 2024"
pub fn format_date_short(s: &str) -> String {
    format_with(s, "%b %-d, %Y")
}

fn format_with(s: &str, format: &str) -> String {
    match parse_date(s) {
        Some(date) => date.format(format).to_string(),
        None => {
            tracing::warn!("Invalid date: {:?}", s);
            s.to_string()
        }
    }
}

/// Get relative time (like "3 days ago") as seen from `now`
pub fn format_date_relative(s: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_date(s) else {
        tracing::warn!("Invalid date: {:?}", s);
        return s.to_string();
    };

    let days = days_between(date, now);

    if days == 0 {
        "Today".to_string()
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

/// Whether the date lies no more than `within_days` days before `now`
pub fn is_recent(s: &str, within_days: i64, now: DateTime<Utc>) -> bool {
    match parse_date(s) {
        Some(date) => days_between(date, now) <= within_days,
        None => false,
    }
}

/// Whole days elapsed from `date` to `now`
fn days_between(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(date).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_date() {
        let d = parse_date("2024-01-15").unwrap();
        assert_eq!(d.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 00:00");

        let d = parse_date("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(d.format("%H:%M").to_string(), "08:30");

        assert!(parse_date("2024-01-15T10:30:00").is_some());
        assert!(parse_date("2024-01-15 10:30").is_some());
        assert!(parse_date("yesterday-ish").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "January 5, 2024");
        assert_eq!(format_date_short("2024-01-05"), "Jan 5, 2024");
    }

    #[test]
    fn test_invalid_date_returned_unchanged() {
        assert_eq!(format_date("not a date"), "not a date");
        assert_eq!(format_date_short(" 15/01/2024 "), " 15/01/2024 ");
        assert_eq!(format_date_relative("soon", now()), "soon");
    }

    #[test]
    fn test_relative_date() {
        assert_eq!(format_date_relative("2024-06-15", now()), "Today");
        assert_eq!(format_date_relative("2024-06-14", now()), "Yesterday");
        assert_eq!(format_date_relative("2024-06-11", now()), "4 days ago");
        assert_eq!(format_date_relative("2024-06-01", now()), "2 weeks ago");
        assert_eq!(format_date_relative("2024-03-01", now()), "3 months ago");
        assert_eq!(format_date_relative("2021-01-01", now()), "3 years ago");
    }

    #[test]
    fn test_is_recent() {
        assert!(is_recent("2024-06-10", 7, now()));
        assert!(!is_recent("2024-05-01", 7, now()));
        assert!(!is_recent("garbage", 7, now()));
    }
}
