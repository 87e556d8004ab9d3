use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::timetable::model::{
    CreateTimetableEntryDto, DAYS_OF_WEEK, TimetableEntry, TimetableSlot,
};
use crate::utils::errors::AppError;

pub struct TimetableService;

impl TimetableService {
    #[instrument(skip(db, dto))]
    pub async fn create_entry(
        db: &PgPool,
        dto: CreateTimetableEntryDto,
    ) -> Result<TimetableEntry, AppError> {
        if !DAYS_OF_WEEK.contains(&dto.day_of_week.as_str()) {
            return Err(AppError::bad_request(format!(
                "Invalid day of week '{}'",
                dto.day_of_week
            )));
        }

        sqlx::query_as::<_, TimetableEntry>(
            "INSERT INTO timetable
                 (class_id, subject_id, teacher_id, day_of_week, start_time, end_time, room, academic_year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(dto.class_id)
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(&dto.day_of_week)
        .bind(&dto.start_time)
        .bind(&dto.end_time)
        .bind(&dto.room)
        .bind(&dto.academic_year)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found("Class, subject, or teacher not found");
                }
            }
            AppError::database(e)
        })
    }

    #[instrument(skip(db))]
    pub async fn list_slots(
        db: &PgPool,
        class_id: Option<Uuid>,
        day_of_week: Option<String>,
    ) -> Result<Vec<TimetableSlot>, AppError> {
        sqlx::query_as::<_, TimetableSlot>(
            "SELECT t.id, t.class_id, t.subject_id, s.name AS subject_name,
                    t.teacher_id, u.name AS teacher_name,
                    t.day_of_week, t.start_time, t.end_time, t.room, t.academic_year
             FROM timetable t
             JOIN subjects s ON s.id = t.subject_id
             JOIN users u ON u.id = t.teacher_id
             WHERE t.is_active
               AND ($1::uuid IS NULL OR t.class_id = $1)
               AND ($2::text IS NULL OR t.day_of_week = $2)
             ORDER BY t.day_of_week, t.start_time",
        )
        .bind(class_id)
        .bind(day_of_week)
        .fetch_all(db)
        .await
        .context("Failed to fetch timetable")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_entry(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM timetable WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete timetable entry")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Timetable entry not found"));
        }

        Ok(())
    }
}
