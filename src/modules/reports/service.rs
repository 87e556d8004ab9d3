use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::attendance::day;
use crate::modules::attendance::service::whole_percentage;
use crate::modules::reports::model::{
    ClassAttendanceRow, DashboardCounts, FeeStatusRow, StudentStatusRow,
};
use crate::utils::errors::AppError;

pub struct ReportService;

impl ReportService {
    #[instrument(skip(db))]
    pub async fn dashboard_counts(db: &PgPool) -> Result<DashboardCounts, AppError> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT
                 (SELECT COUNT(*) FROM students WHERE is_active) AS students,
                 (SELECT COUNT(*) FROM users WHERE role = 'teacher' AND is_active) AS teachers,
                 (SELECT COUNT(*) FROM users WHERE role = 'parent' AND is_active) AS parents,
                 (SELECT COUNT(*) FROM classes WHERE is_active) AS classes,
                 (SELECT COUNT(*) FROM subjects WHERE is_active) AS subjects",
        )
        .fetch_one(db)
        .await
        .context("Failed to compute dashboard counts")
        .map_err(AppError::database)
    }

    /// School-wide presence percentage for the current day: present marks
    /// over the active-student headcount.
    #[instrument(skip(db))]
    pub async fn today_presence(db: &PgPool) -> Result<i64, AppError> {
        let (present, enrolled) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT
                 (SELECT COUNT(*) FROM attendance WHERE date = $1 AND status = 'present'),
                 (SELECT COUNT(*) FROM students WHERE is_active)",
        )
        .bind(day::today())
        .fetch_one(db)
        .await
        .context("Failed to compute today's presence")
        .map_err(AppError::database)?;

        Ok(whole_percentage(present, enrolled))
    }

    #[instrument(skip(db))]
    pub async fn attendance_by_class(
        db: &PgPool,
        class_id: Option<Uuid>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<ClassAttendanceRow>, AppError> {
        sqlx::query_as::<_, ClassAttendanceRow>(
            "SELECT c.id AS class_id, c.class_name, c.section,
                    COUNT(*) FILTER (WHERE a.status = 'present') AS present,
                    COUNT(*) FILTER (WHERE a.status = 'absent') AS absent,
                    COUNT(*) FILTER (WHERE a.status = 'late') AS late,
                    COUNT(*) FILTER (WHERE a.status = 'half-day') AS half_day,
                    COUNT(*) AS total_records
             FROM attendance a
             JOIN classes c ON c.id = a.class_id
             WHERE ($1::uuid IS NULL OR a.class_id = $1)
               AND ($2::date IS NULL OR a.date >= $2)
               AND ($3::date IS NULL OR a.date <= $3)
             GROUP BY c.id, c.class_name, c.section
             ORDER BY c.class_name, c.section",
        )
        .bind(class_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
        .context("Failed to compute attendance report")
        .map_err(AppError::database)
    }

    /// Month-to-date per-status tallies for a set of students, one row per
    /// (student, status) pair that occurs.
    #[instrument(skip(db))]
    pub async fn month_attendance_by_student(
        db: &PgPool,
        student_ids: &[Uuid],
    ) -> Result<Vec<StudentStatusRow>, AppError> {
        let today = day::today();
        let month_start = today.with_day(1).unwrap_or(today);

        sqlx::query_as::<_, StudentStatusRow>(
            "SELECT student_id, status, COUNT(*) AS count
             FROM attendance
             WHERE student_id = ANY($1) AND date >= $2 AND date <= $3
             GROUP BY student_id, status
             ORDER BY student_id, status",
        )
        .bind(student_ids)
        .bind(month_start)
        .bind(today)
        .fetch_all(db)
        .await
        .context("Failed to compute month attendance summary")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn fees_by_status(
        db: &PgPool,
        academic_year: Option<String>,
    ) -> Result<Vec<FeeStatusRow>, AppError> {
        sqlx::query_as::<_, FeeStatusRow>(
            "SELECT status,
                    COUNT(*) AS records,
                    COALESCE(SUM(amount), 0) AS billed,
                    COALESCE(SUM(paid_amount), 0) AS collected
             FROM fees
             WHERE ($1::text IS NULL OR academic_year = $1)
             GROUP BY status
             ORDER BY status",
        )
        .bind(academic_year)
        .fetch_all(db)
        .await
        .context("Failed to compute fee report")
        .map_err(AppError::database)
    }
}
