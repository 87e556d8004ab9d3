use chrono::Utc;
use classhive::modules::attendance::model::{Attendance, AttendanceStatus};
use classhive::modules::attendance::service::{presence_percentage, whole_percentage};
use uuid::Uuid;

fn record(status: AttendanceStatus) -> Attendance {
    let now = Utc::now();
    Attendance {
        id: Uuid::new_v4(),
        student_id: Uuid::new_v4(),
        class_id: Uuid::new_v4(),
        date: now.date_naive(),
        status,
        remarks: String::new(),
        marked_by: Uuid::new_v4(),
        marked_at: now,
        created_at: now,
        updated_at: now,
    }
}

fn records(present: usize, absent: usize) -> Vec<Attendance> {
    let mut out = Vec::new();
    out.extend((0..present).map(|_| record(AttendanceStatus::Present)));
    out.extend((0..absent).map(|_| record(AttendanceStatus::Absent)));
    out
}

#[test]
fn test_window_percentage_is_over_marked_records() {
    // 4 present of 5 marked records in the window
    assert_eq!(presence_percentage(&records(4, 1)), 80.00);
}

#[test]
fn test_window_percentage_empty_window_is_zero() {
    assert_eq!(presence_percentage(&[]), 0.0);
}

#[test]
fn test_window_percentage_all_absent() {
    assert_eq!(presence_percentage(&records(0, 3)), 0.0);
}

#[test]
fn test_window_percentage_two_decimal_rounding() {
    assert_eq!(presence_percentage(&records(1, 2)), 33.33);
    assert_eq!(presence_percentage(&records(2, 1)), 66.67);
}

#[test]
fn test_only_present_counts_toward_presence() {
    let mixed = vec![
        record(AttendanceStatus::Present),
        record(AttendanceStatus::Late),
        record(AttendanceStatus::HalfDay),
        record(AttendanceStatus::Absent),
    ];
    assert_eq!(presence_percentage(&mixed), 25.00);
}

#[test]
fn test_today_percentage_uses_headcount_base() {
    // 20 present marks, 30 enrolled: 5 absent marks and 5 unmarked students
    // both count against presence.
    assert_eq!(whole_percentage(20, 30), 67);
}

#[test]
fn test_today_percentage_zero_headcount() {
    assert_eq!(whole_percentage(0, 0), 0);
    assert_eq!(whole_percentage(3, 0), 0);
}

#[test]
fn test_today_percentage_full_house() {
    assert_eq!(whole_percentage(30, 30), 100);
}
