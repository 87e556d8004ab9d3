use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::subjects::model::{
    CreateSubjectDto, SUBJECT_KINDS, Subject, UpdateSubjectDto,
};
use crate::utils::errors::AppError;

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, dto))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        if let Some(kind) = &dto.kind {
            if !SUBJECT_KINDS.contains(&kind.as_str()) {
                return Err(AppError::bad_request(format!(
                    "Invalid subject kind '{}'",
                    kind
                )));
            }
        }

        sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name, code, description, kind, credits)
             VALUES ($1, $2, $3, COALESCE($4, 'core'), COALESCE($5, 1))
             RETURNING *",
        )
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(&dto.description)
        .bind(&dto.kind)
        .bind(dto.credits)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(format!(
                        "Subject code {} already exists",
                        dto.code
                    ));
                }
            }
            AppError::database(e)
        })
    }

    #[instrument(skip(db))]
    pub async fn list_subjects(db: &PgPool) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects ORDER BY name")
            .fetch_all(db)
            .await
            .context("Failed to fetch subjects")
            .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_subject(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        if let Some(kind) = &dto.kind {
            if !SUBJECT_KINDS.contains(&kind.as_str()) {
                return Err(AppError::bad_request(format!(
                    "Invalid subject kind '{}'",
                    kind
                )));
            }
        }

        sqlx::query_as::<_, Subject>(
            "UPDATE subjects
             SET name = COALESCE($1, name),
                 description = COALESCE($2, description),
                 kind = COALESCE($3, kind),
                 credits = COALESCE($4, credits),
                 is_active = COALESCE($5, is_active),
                 updated_at = now()
             WHERE id = $6
             RETURNING *",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.kind)
        .bind(dto.credits)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update subject")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Subject not found"))
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete subject")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Subject not found"));
        }

        Ok(())
    }

    /// Subjects a teacher has been assigned through teacher_subjects.
    #[instrument(skip(db))]
    pub async fn subjects_for_teacher(
        db: &PgPool,
        teacher_id: Uuid,
    ) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>(
            "SELECT s.*
             FROM subjects s
             JOIN teacher_subjects ts ON ts.subject_id = s.id
             WHERE ts.teacher_id = $1 AND s.is_active
             ORDER BY s.name",
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch teacher subjects")
        .map_err(AppError::database)
    }

    /// Replaces the teacher's subject assignments.
    #[instrument(skip(db))]
    pub async fn assign_teacher_subjects(
        db: &PgPool,
        teacher_id: Uuid,
        subject_ids: &[Uuid],
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query("DELETE FROM teacher_subjects WHERE teacher_id = $1")
            .bind(teacher_id)
            .execute(&mut *tx)
            .await
            .context("Failed to clear teacher subjects")
            .map_err(AppError::database)?;

        for subject_id in subject_ids {
            sqlx::query(
                "INSERT INTO teacher_subjects (teacher_id, subject_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(teacher_id)
            .bind(subject_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::not_found("Subject or teacher not found");
                    }
                }
                AppError::database(e)
            })?;
        }

        tx.commit().await.map_err(AppError::database)?;
        Ok(())
    }
}
