//! User-facing epochs: Julian dates or UTC calendar timestamps.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use neo_assess::config::ObjectRecord;
use neo_core::time::jd_from_unix_seconds;
use thiserror::Error;

/// Calendar layouts accepted besides a bare Julian date. The last one is the close-approach
/// format used by small-body catalogs ("2029-Apr-13 21:46").
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%b-%d %H:%M",
];

#[derive(Debug, Error, PartialEq)]
pub enum EpochError {
    #[error("unrecognised epoch '{0}' (expected a Julian date or YYYY-MM-DD[THH:MM[:SS]])")]
    Unrecognised(String),
    #[error("object '{0}' has no parseable close-approach date")]
    NoApproachDate(String),
}

/// Julian date of a UTC timestamp.
pub fn jd_from_datetime(datetime: &NaiveDateTime) -> f64 {
    let utc = datetime.and_utc();
    let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    jd_from_unix_seconds(seconds)
}

/// Julian date of the system clock.
pub fn now_jd() -> f64 {
    jd_from_datetime(&Utc::now().naive_utc())
}

/// Parse a Julian date (`2460000.5`) or a UTC timestamp (`2024-03-01`, `2024-03-01T06:30`).
pub fn parse_epoch(text: &str) -> Result<f64, EpochError> {
    let trimmed = text.trim();
    if let Ok(jd) = trimmed.parse::<f64>() {
        if jd.is_finite() {
            return Ok(jd);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(jd_from_datetime(&datetime));
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| jd_from_datetime(&midnight))
        .ok_or_else(|| EpochError::Unrecognised(text.to_string()))
}

/// Epoch of the record's catalogued close approach.
pub fn approach_jd(record: &ObjectRecord) -> Result<f64, EpochError> {
    record
        .approach
        .as_ref()
        .and_then(|approach| approach.date.as_deref())
        .and_then(|date| parse_epoch(date).ok())
        .ok_or_else(|| EpochError::NoApproachDate(record.name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn julian_dates_pass_through() {
        assert_eq!(parse_epoch("2460000.5").unwrap(), 2_460_000.5);
        assert_eq!(parse_epoch(" 2451545 ").unwrap(), 2_451_545.0);
    }

    #[test]
    fn calendar_timestamps_convert_to_julian_dates() {
        assert_abs_diff_eq!(parse_epoch("2000-01-01T12:00:00").unwrap(), 2_451_545.0, epsilon = 1e-9);
        assert_abs_diff_eq!(parse_epoch("2024-03-01").unwrap(), 2_460_370.5, epsilon = 1e-9);
        assert_abs_diff_eq!(
            parse_epoch("2029-Apr-13 21:46").unwrap(),
            2_462_240.406_944_444,
            epsilon = 1e-8
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse_epoch("next tuesday"),
            Err(EpochError::Unrecognised("next tuesday".to_string()))
        );
        assert!(parse_epoch("inf").is_err());
    }

    #[test]
    fn clock_is_after_2020() {
        assert!(now_jd() > 2_458_849.5);
    }
}
