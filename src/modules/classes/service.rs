use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::model::{
    Class, ClassWithSubjects, ClassWithTeacher, CreateClassDto, SubjectRef, UpdateClassDto,
};
use crate::utils::errors::AppError;

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, dto))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(
            "INSERT INTO classes (class_name, section, class_teacher, capacity, academic_year, room)
             VALUES ($1, $2, $3, COALESCE($4, 40), $5, $6)
             RETURNING *",
        )
        .bind(&dto.class_name)
        .bind(&dto.section)
        .bind(dto.class_teacher)
        .bind(dto.capacity)
        .bind(&dto.academic_year)
        .bind(&dto.room)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(format!(
                        "Class {} {} already exists for {}",
                        dto.class_name, dto.section, dto.academic_year
                    ));
                }
            }
            AppError::database(e)
        })?;

        Self::replace_subject_links(db, class.id, &dto.subject_ids).await?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: Uuid) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch class by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Class not found"))
    }

    /// Admin listing: classes with teacher info and subject links, assembled
    /// from two queries and grouped in memory.
    #[instrument(skip(db))]
    pub async fn list_classes(db: &PgPool) -> Result<Vec<ClassWithSubjects>, AppError> {
        let classes = sqlx::query_as::<_, ClassWithTeacher>(
            "SELECT c.id, c.class_name, c.section, c.class_teacher,
                    t.name AS teacher_name, t.email AS teacher_email,
                    c.capacity, c.academic_year, c.room, c.is_active
             FROM classes c
             LEFT JOIN users t ON t.id = c.class_teacher
             ORDER BY c.class_name, c.section",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch classes")
        .map_err(AppError::database)?;

        let subject_refs = sqlx::query_as::<_, SubjectRef>(
            "SELECT cs.class_id, s.id, s.name, s.code
             FROM class_subjects cs
             JOIN subjects s ON s.id = cs.subject_id
             ORDER BY s.name",
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch class subjects")
        .map_err(AppError::database)?;

        Ok(classes
            .into_iter()
            .map(|class| {
                let subjects = subject_refs
                    .iter()
                    .filter(|sr| sr.class_id == class.id)
                    .cloned()
                    .collect();
                ClassWithSubjects { class, subjects }
            })
            .collect())
    }

    #[instrument(skip(db, dto))]
    pub async fn update_class(
        db: &PgPool,
        id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        let existing = Self::get_class(db, id).await?;

        let class_name = dto.class_name.unwrap_or(existing.class_name);
        let section = dto.section.unwrap_or(existing.section);
        let class_teacher = dto.class_teacher.or(existing.class_teacher);
        let capacity = dto.capacity.unwrap_or(existing.capacity);
        let room = dto.room.or(existing.room);
        let is_active = dto.is_active.unwrap_or(existing.is_active);

        let class = sqlx::query_as::<_, Class>(
            "UPDATE classes
             SET class_name = $1, section = $2, class_teacher = $3, capacity = $4,
                 room = $5, is_active = $6, updated_at = now()
             WHERE id = $7
             RETURNING *",
        )
        .bind(&class_name)
        .bind(&section)
        .bind(class_teacher)
        .bind(capacity)
        .bind(&room)
        .bind(is_active)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update class")
        .map_err(AppError::database)?;

        if let Some(subject_ids) = dto.subject_ids {
            Self::replace_subject_links(db, id, &subject_ids).await?;
        }

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete class")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Class not found"));
        }

        Ok(())
    }

    /// Roster-store query: classes where the given teacher is class teacher.
    #[instrument(skip(db))]
    pub async fn classes_for_teacher(
        db: &PgPool,
        teacher_id: Uuid,
    ) -> Result<Vec<Class>, AppError> {
        sqlx::query_as::<_, Class>(
            "SELECT * FROM classes
             WHERE class_teacher = $1
             ORDER BY class_name, section",
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch teacher classes")
        .map_err(AppError::database)
    }

    async fn replace_subject_links(
        db: &PgPool,
        class_id: Uuid,
        subject_ids: &[Uuid],
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query("DELETE FROM class_subjects WHERE class_id = $1")
            .bind(class_id)
            .execute(&mut *tx)
            .await
            .context("Failed to clear class subjects")
            .map_err(AppError::database)?;

        for subject_id in subject_ids {
            sqlx::query(
                "INSERT INTO class_subjects (class_id, subject_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(class_id)
            .bind(subject_id)
            .execute(&mut *tx)
            .await
            .context("Failed to link subject to class")
            .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;
        Ok(())
    }
}
