use anyhow::Context;
use chrono::{Days, NaiveDate};
use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::modules::attendance::day;
use crate::modules::attendance::model::{
    Attendance, AttendanceStatus, AttendanceWithStudent, BulkAttendanceEntry, BulkFailure,
    BulkMarkDto, BulkMarkOutcome, MarkAttendanceDto, StatusTally, TodaySummary,
};
use crate::modules::students::service::StudentService;
use crate::utils::errors::AppError;

const UPSERT_ATTENDANCE: &str = "INSERT INTO attendance \
     (student_id, class_id, date, status, remarks, marked_by) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     ON CONFLICT (student_id, date) DO UPDATE \
     SET status = EXCLUDED.status, \
         remarks = EXCLUDED.remarks, \
         class_id = EXCLUDED.class_id, \
         marked_by = EXCLUDED.marked_by, \
         marked_at = now(), \
         updated_at = now() \
     RETURNING *";

pub struct AttendanceService;

impl AttendanceService {
    /// Marks one student for one day. Returns the record and whether it was
    /// created rather than overwritten. The upsert is the only write path,
    /// so a concurrent mark for the same (student, day) can never surface a
    /// duplicate-key error; the later arrival wins.
    #[instrument(skip(db, dto))]
    pub async fn mark(
        db: &PgPool,
        marked_by: Uuid,
        dto: MarkAttendanceDto,
    ) -> Result<(Attendance, bool), AppError> {
        let date = day::canonical_day(&dto.date)?;

        let existed = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM attendance WHERE student_id = $1 AND date = $2)",
        )
        .bind(dto.student_id)
        .bind(date)
        .fetch_one(db)
        .await
        .context("Failed to check for existing attendance")
        .map_err(AppError::database)?;

        let record = sqlx::query_as::<_, Attendance>(UPSERT_ATTENDANCE)
            .bind(dto.student_id)
            .bind(dto.class_id)
            .bind(date)
            .bind(dto.status)
            .bind(dto.remarks.unwrap_or_default())
            .bind(marked_by)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::not_found("Student or class not found");
                    }
                }
                AppError::database(e)
            })?;

        Ok((record, !existed))
    }

    /// Bulk mark for one class and one day. The day key is normalized once
    /// and shared by every entry; each entry is its own atomic upsert.
    /// A bad entry is reported failed while the rest still commit.
    #[instrument(skip(db, dto), fields(entries = dto.attendance_list.len()))]
    pub async fn mark_bulk(
        db: &PgPool,
        marked_by: Uuid,
        dto: BulkMarkDto,
    ) -> Result<BulkMarkOutcome, AppError> {
        let date = day::canonical_day(&dto.date)?;

        let (entries, mut failed) = parse_entries(dto.attendance_list);
        let mut applied = 0usize;

        for entry in entries {
            let result = sqlx::query(UPSERT_ATTENDANCE)
                .bind(entry.student_id)
                .bind(dto.class_id)
                .bind(date)
                .bind(entry.status)
                .bind(entry.remarks)
                .bind(marked_by)
                .execute(db)
                .await;

            match result {
                Ok(_) => applied += 1,
                Err(e) => {
                    warn!(student_id = %entry.student_id, error = %e, "Bulk entry failed");
                    let reason = if matches!(&e, sqlx::Error::Database(db_err)
                        if db_err.is_foreign_key_violation())
                    {
                        "Student or class not found".to_string()
                    } else {
                        "Storage error".to_string()
                    };
                    failed.push(BulkFailure {
                        student_id: entry.student_id,
                        reason,
                    });
                }
            }
        }

        Ok(BulkMarkOutcome { applied, failed })
    }

    /// Records for a class, optionally bounded by an inclusive day range,
    /// newest day first.
    #[instrument(skip(db))]
    pub async fn by_class(
        db: &PgPool,
        class_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceWithStudent>, AppError> {
        sqlx::query_as::<_, AttendanceWithStudent>(
            "SELECT a.id, a.student_id, s.name AS student_name, s.roll_number,
                    a.class_id, a.date, a.status, a.remarks, a.marked_by, a.marked_at
             FROM attendance a
             JOIN students s ON s.id = a.student_id
             WHERE a.class_id = $1
               AND ($2::date IS NULL OR a.date >= $2)
               AND ($3::date IS NULL OR a.date <= $3)
             ORDER BY a.date DESC, s.roll_number",
        )
        .bind(class_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
        .context("Failed to fetch class attendance")
        .map_err(AppError::database)
    }

    /// Rolling window for one student: records in `[today - days, today]`
    /// plus the presence percentage over the records in that window. An
    /// empty window yields 0, not a division error.
    #[instrument(skip(db))]
    pub async fn student_window(
        db: &PgPool,
        student_id: Uuid,
        days: i64,
    ) -> Result<(Vec<Attendance>, f64), AppError> {
        let end = day::today();
        let start = end
            .checked_sub_days(Days::new(days.max(0) as u64))
            .unwrap_or(NaiveDate::MIN);

        let records = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance
             WHERE student_id = $1 AND date >= $2 AND date <= $3
             ORDER BY date DESC",
        )
        .bind(student_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
        .context("Failed to fetch student attendance window")
        .map_err(AppError::database)?;

        let percentage = presence_percentage(&records);
        Ok((records, percentage))
    }

    /// Per-status tallies for the current day across a set of classes. The
    /// percentage base is the active-student headcount, so unmarked students
    /// count against presence rather than vanishing from the denominator.
    #[instrument(skip(db))]
    pub async fn today_summary(
        db: &PgPool,
        class_ids: &[Uuid],
    ) -> Result<TodaySummary, AppError> {
        let date = day::today();

        let rows = sqlx::query_as::<_, (AttendanceStatus, i64)>(
            "SELECT status, COUNT(*) FROM attendance
             WHERE class_id = ANY($1) AND date = $2
             GROUP BY status",
        )
        .bind(class_ids)
        .bind(date)
        .fetch_all(db)
        .await
        .context("Failed to tally today's attendance")
        .map_err(AppError::database)?;

        let mut summary = TodaySummary {
            date,
            present: 0,
            absent: 0,
            late: 0,
            half_day: 0,
            total: 0,
            percentage: 0,
        };
        for (status, count) in rows {
            match status {
                AttendanceStatus::Present => summary.present = count,
                AttendanceStatus::Absent => summary.absent = count,
                AttendanceStatus::Late => summary.late = count,
                AttendanceStatus::HalfDay => summary.half_day = count,
            }
        }

        summary.total =
            StudentService::count_active_students_in_classes(db, class_ids).await?;
        summary.percentage = whole_percentage(summary.present, summary.total);

        Ok(summary)
    }

    /// Most recent records for one student, newest first.
    #[instrument(skip(db))]
    pub async fn recent_for_student(
        db: &PgPool,
        student_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendance
             WHERE student_id = $1
             ORDER BY date DESC
             LIMIT $2",
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(db)
        .await
        .context("Failed to fetch recent attendance")
        .map_err(AppError::database)
    }
}

struct ParsedEntry {
    student_id: Uuid,
    status: AttendanceStatus,
    remarks: String,
}

/// Screens a bulk batch before any write happens. Entries with an unknown
/// status become failures and never reach the database; the rest keep their
/// batch order.
fn parse_entries(entries: Vec<BulkAttendanceEntry>) -> (Vec<ParsedEntry>, Vec<BulkFailure>) {
    let mut parsed = Vec::with_capacity(entries.len());
    let mut failed = Vec::new();

    for entry in entries {
        match entry.status.parse::<AttendanceStatus>() {
            Ok(status) => parsed.push(ParsedEntry {
                student_id: entry.student_id,
                status,
                remarks: entry.remarks.unwrap_or_default(),
            }),
            Err(reason) => failed.push(BulkFailure {
                student_id: entry.student_id,
                reason,
            }),
        }
    }

    (parsed, failed)
}

/// Per-status counts over a record set.
pub fn status_tally(records: &[Attendance]) -> StatusTally {
    let mut tally = StatusTally::default();
    for record in records {
        match record.status {
            AttendanceStatus::Present => tally.present += 1,
            AttendanceStatus::Absent => tally.absent += 1,
            AttendanceStatus::Late => tally.late += 1,
            AttendanceStatus::HalfDay => tally.half_day += 1,
        }
    }
    tally.total = records.len() as i64;
    tally
}

/// Presence percentage over a record set, rounded to two decimals. Empty
/// input yields 0.
pub fn presence_percentage(records: &[Attendance]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count() as f64;
    round2(present / records.len() as f64 * 100.0)
}

/// Whole-number percentage with a headcount denominator. Zero headcount
/// yields 0.
pub fn whole_percentage(present: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (present as f64 / total as f64 * 100.0).round() as i64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn window_percentage_four_of_five_present() {
        let records = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Absent),
        ];
        assert_eq!(presence_percentage(&records), 80.00);
    }

    #[test]
    fn window_percentage_empty_is_zero() {
        assert_eq!(presence_percentage(&[]), 0.0);
    }

    #[test]
    fn window_percentage_rounds_to_two_decimals() {
        let records = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Absent),
        ];
        // 2/3 = 66.666..., rounded to 66.67
        assert_eq!(presence_percentage(&records), 66.67);
    }

    #[test]
    fn headcount_percentage_uses_active_student_base() {
        // 20 present of 30 enrolled (5 absent, 5 unmarked) rounds to 67
        assert_eq!(whole_percentage(20, 30), 67);
    }

    #[test]
    fn headcount_percentage_zero_base_is_zero() {
        assert_eq!(whole_percentage(0, 0), 0);
        assert_eq!(whole_percentage(5, 0), 0);
    }

    #[test]
    fn bulk_batch_with_one_bad_status_keeps_the_rest() {
        let bad_student = Uuid::new_v4();
        let entries = vec![
            BulkAttendanceEntry {
                student_id: Uuid::new_v4(),
                status: "present".into(),
                remarks: None,
            },
            BulkAttendanceEntry {
                student_id: bad_student,
                status: "vacation".into(),
                remarks: None,
            },
            BulkAttendanceEntry {
                student_id: Uuid::new_v4(),
                status: "late".into(),
                remarks: Some("traffic".into()),
            },
        ];

        let (parsed, failed) = parse_entries(entries);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].status, AttendanceStatus::Present);
        assert_eq!(parsed[1].status, AttendanceStatus::Late);
        assert_eq!(parsed[1].remarks, "traffic");

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].student_id, bad_student);
        assert!(failed[0].reason.contains("vacation"));
    }

    #[test]
    fn status_tally_counts_each_status() {
        let records = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Absent),
            record(AttendanceStatus::Late),
            record(AttendanceStatus::HalfDay),
        ];

        let tally = status_tally(&records);
        assert_eq!(tally.present, 2);
        assert_eq!(tally.absent, 1);
        assert_eq!(tally.late, 1);
        assert_eq!(tally.half_day, 1);
        assert_eq!(tally.total, 5);

        let empty = status_tally(&[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.present, 0);
    }
}
