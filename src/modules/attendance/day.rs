//! Canonical day keys for attendance records.
//!
//! Every attendance write and read agrees on a single day-granular key so
//! that two marks for the same logical day can never produce two records,
//! no matter how the client serialized the timestamp.

use chrono::{DateTime, NaiveDate, Utc};

use crate::utils::errors::AppError;

/// Derives the canonical day key from any date input: a bare `YYYY-MM-DD`
/// string, or an RFC 3339 timestamp in any offset. The date portion is taken
/// as written; time-of-day and offset are discarded.
pub fn canonical_day(input: &str) -> Result<NaiveDate, AppError> {
    let s = input.trim();

    // Date-prefixed forms: "2025-11-20", "2025-11-20T09:30:00+05:30",
    // "2025-11-20 09:30:00". The written date IS the day key.
    if let Some(prefix) = s.get(..10) {
        if let Ok(day) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            if s.len() == 10 || matches!(s.as_bytes().get(10), Some(b'T') | Some(b' ')) {
                return Ok(day);
            }
        }
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| AppError::bad_request(format!("Invalid date '{}'", input)))
}

/// The canonical day key for "now" in the fixed reference offset (UTC).
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_date_parses() {
        let day = canonical_day("2025-11-20").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
    }

    #[test]
    fn time_of_day_is_discarded() {
        let a = canonical_day("2025-11-20").unwrap();
        let b = canonical_day("2025-11-20T00:00:00Z").unwrap();
        let c = canonical_day("2025-11-20T23:59:59+05:30").unwrap();
        let d = canonical_day("2025-11-20 08:15:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
    }

    #[test]
    fn same_written_day_different_offsets_agree() {
        let morning = canonical_day("2025-11-20T01:00:00-08:00").unwrap();
        let evening = canonical_day("2025-11-20T23:00:00+09:00").unwrap();
        assert_eq!(morning, evening);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(canonical_day("not-a-date").is_err());
        assert!(canonical_day("2025-13-01").is_err());
        assert!(canonical_day("2025-11-20X12:00:00").is_err());
        assert!(canonical_day("").is_err());
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        assert!(canonical_day(" 2025-11-20 ").is_ok());
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert!(canonical_day("２０２５年１１月").is_err());
    }
}
