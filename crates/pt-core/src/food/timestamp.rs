//! Lenient timestamp decoding for backend records.
//!
//! The backend may send either RFC3339 (`2025-03-01T12:00:00Z`) or a local
//! date-time without offset (`2023-01-01T12:00:00`). Offset-less values are
//! read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339_is_converted_to_utc() {
        assert_eq!(
            parse_timestamp("2025-03-01T14:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_offsetless_date_time_reads_as_utc() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2023-01-01T12:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01T12:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01 12:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-01-01T12:00"), Some(expected));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2023-01-01"), None);
    }
}
