use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{CreateUserDto, UpdateProfileDto, UpdateUserDto, User};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const USER_COLUMNS: &str =
    "id, email, role, name, phone, avatar, address, is_active, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password, role, name, phone, avatar, address)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(dto.role)
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(&dto.avatar)
        .bind(&dto.address)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(format!(
                        "User with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        role: Option<String>,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NULL OR role::text = $1)
               AND ($2::boolean IS NULL OR is_active = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(&role)
        .bind(is_active)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users
             WHERE ($1::text IS NULL OR role::text = $1)
               AND ($2::boolean IS NULL OR is_active = $2)",
        )
        .bind(&role)
        .bind(is_active)
        .fetch_one(db)
        .await
        .context("Failed to count users")
        .map_err(AppError::database)?;

        Ok((users, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(db: &PgPool, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        let existing = Self::get_user(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let phone = dto.phone.unwrap_or(existing.phone);
        let avatar = dto.avatar.or(existing.avatar);
        let address = dto.address.or(existing.address);
        let is_active = dto.is_active.unwrap_or(existing.is_active);
        let password = match dto.password {
            Some(p) => Some(hash_password(&p)?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = $1, phone = $2, avatar = $3, address = $4, is_active = $5,
                 password = COALESCE($6, password), updated_at = now()
             WHERE id = $7
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&name)
        .bind(&phone)
        .bind(&avatar)
        .bind(&address)
        .bind(is_active)
        .bind(&password)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update user")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let phone = dto.phone.unwrap_or(existing.phone);
        let avatar = dto.avatar.or(existing.avatar);
        let address = dto.address.or(existing.address);

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = $1, phone = $2, avatar = $3, address = $4, updated_at = now()
             WHERE id = $5
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&name)
        .bind(&phone)
        .bind(&avatar)
        .bind(&address)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update profile")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }
}
