use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::admin_user::{AdminUser, AdminUserInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxAdminUserRepo,
};

#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn list(&self) -> Result<Vec<AdminUser>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn count_active(&self) -> Result<i64, AppError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AdminUser>, AppError>;
    async fn find_active_by_username(&self, username: &str)
        -> Result<Option<AdminUser>, AppError>;
    /// Finds an active user whose reset token matches and has not expired.
    async fn find_by_valid_reset_token(&self, token: &str)
        -> Result<Option<AdminUser>, AppError>;
    async fn username_exists(&self, username: &str, exclude: Option<Uuid>)
        -> Result<bool, AppError>;
    async fn create(&self, user: &AdminUserInsert) -> Result<AdminUser, AppError>;
    async fn update(
        &self,
        id: &Uuid,
        username: Option<String>,
        password_hash: Option<String>,
        email: Option<Option<String>>,
        is_active: Option<bool>,
    ) -> Result<Option<AdminUser>, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn touch_last_login(&self, id: &Uuid) -> Result<(), AppError>;
    async fn store_reset_token(
        &self,
        id: &Uuid,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), AppError>;
    /// Replaces the password and clears the reset token in one statement,
    /// so a token can never be redeemed twice.
    async fn redeem_reset_token(&self, id: &Uuid, password_hash: &str) -> Result<(), AppError>;
}

impl SqlxAdminUserRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxAdminUserRepo { pool }
    }
}

fn map_username_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("admin_users_username_key") {
            return AppError::Conflict("Bu kullanıcı adı zaten kullanılıyor".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl AdminUserRepository for SqlxAdminUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn list(&self) -> Result<Vec<AdminUser>, AppError> {
        let users =
            sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM admin_users WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_active_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<_, AdminUser>(
            "SELECT * FROM admin_users WHERE username = $1 AND is_active = TRUE",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_valid_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT * FROM admin_users
            WHERE reset_password_token = $1
              AND reset_password_expiry > NOW()
              AND is_active = TRUE
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn username_exists(
        &self,
        username: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM admin_users WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(username)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, user: &AdminUserInsert) -> Result<AdminUser, AppError> {
        let created = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, password_hash, email)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_username_conflict)?;

        Ok(created)
    }

    async fn update(
        &self,
        id: &Uuid,
        username: Option<String>,
        password_hash: Option<String>,
        email: Option<Option<String>>,
        is_active: Option<bool>,
    ) -> Result<Option<AdminUser>, AppError> {
        // COALESCE keeps the current value when the caller omitted the field;
        // email is two-level because "clear the address" is a valid update.
        let email_given = email.is_some();
        let updated = sqlx::query_as::<_, AdminUser>(
            r#"
            UPDATE admin_users SET
                username = COALESCE($1, username),
                password_hash = COALESCE($2, password_hash),
                email = CASE WHEN $3 THEN $4 ELSE email END,
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email_given)
        .bind(email.flatten())
        .bind(is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_username_conflict)?;

        Ok(updated)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch_last_login(&self, id: &Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE admin_users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn store_reset_token(
        &self,
        id: &Uuid,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE admin_users SET
                reset_password_token = $1,
                reset_password_expiry = $2,
                updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(token)
        .bind(expiry)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn redeem_reset_token(&self, id: &Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE admin_users SET
                password_hash = $1,
                reset_password_token = NULL,
                reset_password_expiry = NULL,
                last_login = NOW(),
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
