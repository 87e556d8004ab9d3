use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{
    CreateStudentDto, GENDERS, Student, StudentWithClass, StudentWithParent, UpdateStudentDto,
};
use crate::utils::errors::AppError;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        if !GENDERS.contains(&dto.gender.as_str()) {
            return Err(AppError::bad_request(format!(
                "Invalid gender: {}",
                dto.gender
            )));
        }

        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students
                 (name, roll_number, parent_id, class_id, admission_number,
                  admission_date, date_of_birth, gender, address)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE), $7, $8, $9)
             RETURNING *",
        )
        .bind(&dto.name)
        .bind(&dto.roll_number)
        .bind(dto.parent_id)
        .bind(dto.class_id)
        .bind(&dto.admission_number)
        .bind(dto.admission_date)
        .bind(dto.date_of_birth)
        .bind(&dto.gender)
        .bind(&dto.address)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(
                        "Student with this roll number or admission number already exists",
                    );
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found("Referenced class or parent does not exist");
                }
            }
            AppError::database(e)
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Student not found"))
    }

    #[instrument(skip(db))]
    pub async fn list_students(
        db: &PgPool,
        class_id: Option<Uuid>,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StudentWithClass>, i64), AppError> {
        let students = sqlx::query_as::<_, StudentWithClass>(
            "SELECT s.id, s.name, s.roll_number, s.parent_id, s.class_id,
                    c.class_name, c.section, s.admission_number, s.is_active
             FROM students s
             JOIN classes c ON c.id = s.class_id
             WHERE ($1::uuid IS NULL OR s.class_id = $1)
               AND ($2::boolean IS NULL OR s.is_active = $2)
             ORDER BY s.name
             LIMIT $3 OFFSET $4",
        )
        .bind(class_id)
        .bind(is_active)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students
             WHERE ($1::uuid IS NULL OR class_id = $1)
               AND ($2::boolean IS NULL OR is_active = $2)",
        )
        .bind(class_id)
        .bind(is_active)
        .fetch_one(db)
        .await
        .context("Failed to count students")
        .map_err(AppError::database)?;

        Ok((students, total))
    }

    /// Teacher view: active roster of a class with parent contact details.
    #[instrument(skip(db))]
    pub async fn get_class_roster(
        db: &PgPool,
        class_id: Uuid,
    ) -> Result<Vec<StudentWithParent>, AppError> {
        sqlx::query_as::<_, StudentWithParent>(
            "SELECT s.id, s.name, s.roll_number, s.class_id, s.parent_id,
                    p.name AS parent_name, p.phone AS parent_phone, p.email AS parent_email,
                    s.is_active
             FROM students s
             LEFT JOIN users p ON p.id = s.parent_id
             WHERE s.class_id = $1 AND s.is_active
             ORDER BY s.roll_number",
        )
        .bind(class_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch class roster")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let parent_id = dto.parent_id.or(existing.parent_id);
        let class_id = dto.class_id.unwrap_or(existing.class_id);
        let address = dto.address.or(existing.address);
        let is_active = dto.is_active.unwrap_or(existing.is_active);

        let student = sqlx::query_as::<_, Student>(
            "UPDATE students
             SET name = $1, parent_id = $2, class_id = $3, address = $4, is_active = $5,
                 updated_at = now()
             WHERE id = $6
             RETURNING *",
        )
        .bind(&name)
        .bind(parent_id)
        .bind(class_id)
        .bind(&address)
        .bind(is_active)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Student not found"));
        }

        Ok(())
    }

    /// Parent view: all active children of one parent, with class info.
    #[instrument(skip(db))]
    pub async fn children_of_parent(
        db: &PgPool,
        parent_id: Uuid,
    ) -> Result<Vec<StudentWithClass>, AppError> {
        sqlx::query_as::<_, StudentWithClass>(
            "SELECT s.id, s.name, s.roll_number, s.parent_id, s.class_id,
                    c.class_name, c.section, s.admission_number, s.is_active
             FROM students s
             JOIN classes c ON c.id = s.class_id
             WHERE s.parent_id = $1 AND s.is_active
             ORDER BY s.name",
        )
        .bind(parent_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch children")
        .map_err(AppError::database)
    }

    /// Roster-store query: active student count across a set of classes.
    /// Used as the denominator of the today-summary percentage.
    #[instrument(skip(db))]
    pub async fn count_active_students_in_classes(
        db: &PgPool,
        class_ids: &[Uuid],
    ) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students WHERE class_id = ANY($1) AND is_active",
        )
        .bind(class_ids)
        .fetch_one(db)
        .await
        .context("Failed to count active students")
        .map_err(AppError::database)
    }

    /// Roster-store query: does this student belong to this parent?
    #[instrument(skip(db))]
    pub async fn student_belongs_to_parent(
        db: &PgPool,
        student_id: Uuid,
        parent_id: Uuid,
    ) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM students WHERE id = $1 AND parent_id = $2)",
        )
        .bind(student_id)
        .bind(parent_id)
        .fetch_one(db)
        .await
        .context("Failed to check student ownership")
        .map_err(AppError::database)
    }

    /// Roster-store query: is the student's class one of the teacher's classes?
    #[instrument(skip(db))]
    pub async fn student_in_teacher_classes(
        db: &PgPool,
        student_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM students s
                 JOIN classes c ON c.id = s.class_id
                 WHERE s.id = $1 AND c.class_teacher = $2
             )",
        )
        .bind(student_id)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .context("Failed to check teacher assignment")
        .map_err(AppError::database)
    }
}
