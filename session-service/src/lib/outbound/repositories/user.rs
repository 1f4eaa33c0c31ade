use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

/// Partial unique index over `email` for rows that are not soft-deleted.
const ACTIVE_EMAIL_CONSTRAINT: &str = "users_email_active_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, AuthError> {
    let read = |e: sqlx::Error| AuthError::DatabaseError(e.to_string());

    let phone: Option<String> = row.try_get("phone").map_err(read)?;

    Ok(User {
        id: UserId(row.try_get("id").map_err(read)?),
        email: EmailAddress::from_stored(row.try_get("email").map_err(read)?),
        password_hash: row.try_get("password_hash").map_err(read)?,
        phone: phone.map(PhoneNumber::from_stored),
        refresh_token: row.try_get("refresh_token").map_err(read)?,
        created_at: row.try_get("created_at").map_err(read)?,
        deleted_at: row.try_get("deleted_at").map_err(read)?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: NewUser) -> Result<UserId, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, phone)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.phone.as_ref().map(|p| p.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(ACTIVE_EMAIL_CONSTRAINT)
                {
                    return AuthError::AlreadyExists(user.email.to_string());
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(UserId(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, phone, refresh_token, created_at, deleted_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, phone, refresh_token, created_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn update_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL
            )
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }
}
