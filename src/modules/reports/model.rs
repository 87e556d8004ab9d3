use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::attendance::model::AttendanceStatus;

/// Roster headcounts shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub students: i64,
    pub teachers: i64,
    pub parents: i64,
    pub classes: i64,
    pub subjects: i64,
}

/// Per-class attendance tallies over a date range.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassAttendanceRow {
    pub class_id: Uuid,
    pub class_name: String,
    pub section: String,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub half_day: i64,
    pub total_records: i64,
}

/// Billed versus collected amounts per fee status.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeStatusRow {
    pub status: String,
    pub records: i64,
    pub billed: f64,
    pub collected: f64,
}

/// One (student, status) tally for the parent dashboard's month-to-date
/// attendance summary.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatusRow {
    pub student_id: Uuid,
    pub status: AttendanceStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReportParams {
    pub class_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeReportParams {
    pub academic_year: Option<String>,
}
