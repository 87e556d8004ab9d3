use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Attendance status, stored as the `attendance_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "attendance_status", rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::HalfDay => "half-day",
            AttendanceStatus::Late => "late",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "half-day" => Ok(AttendanceStatus::HalfDay),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("Invalid attendance status '{}'", other)),
        }
    }
}

/// One record per student per calendar day. `date` is the canonical day key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: String,
    pub marked_by: Uuid,
    pub marked_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Attendance joined with student identity for class listings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithStudent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub roll_number: String,
    pub class_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: String,
    pub marked_by: Uuid,
    pub marked_at: chrono::DateTime<chrono::Utc>,
}

/// Single mark. `date` stays a string so any timestamp shape reaches the
/// day-key normalizer; `status` is decoded strictly so a bad value is a 400
/// before any storage work happens.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceDto {
    pub student_id: Uuid,
    pub class_id: Uuid,
    #[validate(length(min = 1))]
    pub date: String,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// Bulk entry. `status` is kept raw and parsed per entry so one bad value
/// fails that entry alone instead of rejecting the whole batch body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceEntry {
    pub student_id: Uuid,
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkMarkDto {
    pub class_id: Uuid,
    #[validate(length(min = 1))]
    pub date: String,
    #[validate(length(min = 1))]
    pub attendance_list: Vec<BulkAttendanceEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkFailure {
    pub student_id: Uuid,
    pub reason: String,
}

/// Result of a bulk mark: entries applied plus per-entry failures.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkMarkOutcome {
    pub applied: usize,
    pub failed: Vec<BulkFailure>,
}

/// Per-status tallies for the caller's classes on the current day.
/// `total` is the active-student count, not the record count, so unmarked
/// students still widen the percentage base.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub half_day: i64,
    pub total: i64,
    pub percentage: i64,
}

/// Per-status counts over a fetched record set. Unlike [`TodaySummary`],
/// `total` here is the record count.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTally {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub half_day: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRangeParams {
    pub class_id: Uuid,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WindowParams {
    pub days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&AttendanceStatus::HalfDay).unwrap();
        assert_eq!(json, r#""half-day""#);
        let back: AttendanceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AttendanceStatus::HalfDay);
    }

    #[test]
    fn status_from_str_rejects_unknown_values() {
        assert_eq!("late".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Late));
        assert!("vacation".parse::<AttendanceStatus>().is_err());
        assert!("Present".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn mark_dto_rejects_bad_status_at_decode_time() {
        let json = r#"{"studentId":"3fa85f64-5717-4562-b3fc-2c963f66afa6",
                       "classId":"3fa85f64-5717-4562-b3fc-2c963f66afa6",
                       "date":"2025-11-20","status":"vacation"}"#;
        assert!(serde_json::from_str::<MarkAttendanceDto>(json).is_err());
    }

    #[test]
    fn today_summary_exposes_flat_camel_case_fields() {
        let summary = TodaySummary {
            date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            present: 25,
            absent: 3,
            late: 1,
            half_day: 1,
            total: 30,
            percentage: 83,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["present"], 25);
        assert_eq!(value["absent"], 3);
        assert_eq!(value["halfDay"], 1);
        assert_eq!(value["total"], 30);
        assert_eq!(value["percentage"], 83);
    }

    #[test]
    fn bulk_dto_rejects_empty_batch() {
        let dto = BulkMarkDto {
            class_id: Uuid::new_v4(),
            date: "2025-11-20".into(),
            attendance_list: vec![],
        };
        assert!(dto.validate().is_err());

        let dto = BulkMarkDto {
            attendance_list: vec![BulkAttendanceEntry {
                student_id: Uuid::new_v4(),
                status: "present".into(),
                remarks: None,
            }],
            ..dto
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn bulk_entry_keeps_status_raw() {
        let json = r#"{"studentId":"3fa85f64-5717-4562-b3fc-2c963f66afa6","status":"vacation"}"#;
        let entry: BulkAttendanceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, "vacation");
    }
}
