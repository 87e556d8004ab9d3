use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequest};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(
                "User with this email already exists",
            ));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password, role, name, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, email, role, name, phone, avatar, address, is_active,
                       created_at, updated_at",
        )
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(dto.role)
        .bind(&dto.name)
        .bind(&dto.phone)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db, dto))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            email: String,
            role: UserRole,
            name: String,
            phone: String,
            avatar: Option<String>,
            address: Option<String>,
            is_active: bool,
            password: String,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, role, name, phone, avatar, address, is_active, password,
                    created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !row.is_active {
            return Err(AppError::unauthorized(
                "Account is inactive. Please contact administrator.",
            ));
        }

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = create_access_token(row.id, &row.email, row.role, jwt_config)?;

        Ok(LoginResponse {
            user: User {
                id: row.id,
                email: row.email,
                role: row.role,
                name: row.name,
                phone: row.phone,
                avatar: row.avatar,
                address: row.address,
                is_active: row.is_active,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            token,
        })
    }
}
