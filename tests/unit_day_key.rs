use chrono::{Datelike, NaiveDate};
use classhive::modules::attendance::day::{canonical_day, today};

#[test]
fn test_bare_date() {
    let day = canonical_day("2025-11-20").unwrap();
    assert_eq!(day, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
}

#[test]
fn test_same_calendar_day_any_representation() {
    // Every serialization of the same written day must yield the same key,
    // or single and bulk marks could duplicate a day's record.
    let inputs = [
        "2025-11-20",
        "2025-11-20T00:00:00Z",
        "2025-11-20T08:30:00+05:30",
        "2025-11-20T23:59:59-08:00",
        "2025-11-20 12:00:00",
    ];

    let keys: Vec<NaiveDate> = inputs
        .iter()
        .map(|s| canonical_day(s).unwrap())
        .collect();

    assert!(keys.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_different_days_stay_different() {
    let a = canonical_day("2025-11-20T23:59:59Z").unwrap();
    let b = canonical_day("2025-11-21T00:00:00Z").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    for input in ["", "tomorrow", "20-11-2025", "2025-02-30", "2025-11-20Z"] {
        assert!(canonical_day(input).is_err(), "accepted {:?}", input);
    }
}

#[test]
fn test_today_is_a_plain_date() {
    let day = today();
    assert!(day.year() >= 2025);
}
