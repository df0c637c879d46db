//! Calendar date and timestamp text conversions
//!
//! Billing dates are plain calendar dates; time-of-day is not modeled.
//! Timestamps (`recorded_at`, audit fields) are UTC instants written with
//! fixed nanosecond precision so their text form sorts chronologically.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Postgres `timestamptz` text output, e.g. `2024-03-01 10:00:00.5+00`
const PG_TIMESTAMPTZ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a calendar date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, or a full timestamp whose date part (in the
/// timestamp's own offset) is taken.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, PG_TIMESTAMPTZ_FORMAT) {
        return Some(dt.date_naive());
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

/// Serde reader for optional billing dates.
///
/// Null, `""` and `"null"` become `None`; other text goes through [`parse_date`].
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {}", value))),
    }
}

/// Format a timestamp as RFC 3339 in UTC with nanosecond precision
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a timestamp into UTC.
///
/// Accepts RFC 3339, Postgres `timestamptz` text, offset-less timestamps
/// (read as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, PG_TIMESTAMPTZ_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_parse_plain_date() {
        let date = parse_date("2024-03-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 1));
    }

    #[test]
    fn test_parse_date_from_timestamp_keeps_written_day() {
        let date = parse_date("2024-03-01T23:30:00-05:00").unwrap();
        assert_eq!(format_date(date), "2024-03-01");
    }

    #[test]
    fn test_parse_date_rejects_other_layouts() {
        assert!(parse_date("03/01/2024").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_timestamp_text_round_trip() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let text = format_timestamp(ts);
        assert_eq!(text, "2024-03-01T12:30:45.123456789Z");
        assert_eq!(parse_timestamp(&text), Some(ts));
    }

    #[test]
    fn test_parse_postgres_timestamptz() {
        let ts = parse_timestamp("2024-03-01 10:15:00.5+02").unwrap();
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.minute(), 15);
    }

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let ts = parse_timestamp("2024-03-01T10:15:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap());
    }
}
