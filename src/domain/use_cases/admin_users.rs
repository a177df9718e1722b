use uuid::Uuid;
use validator::Validate;

use crate::entities::admin_user::{
    AdminUserInsert, AdminUserResponse, NewAdminRequest, UpdateAdminRequest,
};
use crate::errors::AppError;
use crate::infrastructure::auth::password::hash_password;
use crate::repositories::admin_user::AdminUserRepository;

/// Username and password for the very first admin, created through the
/// one-shot seed endpoint and changed right after.
const SEED_USERNAME: &str = "admin";
const SEED_PASSWORD: &str = "admin123";

pub struct AdminUserHandler<R>
where
    R: AdminUserRepository,
{
    pub user_repo: R,
}

impl<R> AdminUserHandler<R>
where
    R: AdminUserRepository,
{
    pub fn new(user_repo: R) -> Self {
        AdminUserHandler { user_repo }
    }

    pub async fn list(&self) -> Result<Vec<AdminUserResponse>, AppError> {
        let users = self.user_repo.list().await?;
        Ok(users.into_iter().map(AdminUserResponse::from).collect())
    }

    pub async fn create(&self, request: NewAdminRequest) -> Result<AdminUserResponse, AppError> {
        request.validate()?;

        let username = request.username.trim().to_lowercase();

        if self.user_repo.username_exists(&username, None).await? {
            return Err(AppError::Conflict(
                "Bu kullanıcı adı zaten kullanılıyor".into(),
            ));
        }

        let insert = AdminUserInsert {
            username,
            password_hash: hash_password(&request.password)?,
            email: request.email.filter(|e| !e.trim().is_empty()),
        };

        let created = self.user_repo.create(&insert).await?;
        tracing::info!(username = %created.username, "admin user created");

        Ok(created.into())
    }

    pub async fn update(
        &self,
        request: UpdateAdminRequest,
    ) -> Result<AdminUserResponse, AppError> {
        let username = match request.username.as_deref() {
            Some(raw) => {
                let normalized = raw.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(AppError::Validation("Kullanıcı adı boş olamaz".into()));
                }
                if self
                    .user_repo
                    .username_exists(&normalized, Some(request.id))
                    .await?
                {
                    return Err(AppError::Conflict(
                        "Bu kullanıcı adı zaten kullanılıyor".into(),
                    ));
                }
                Some(normalized)
            }
            None => None,
        };

        let password_hash = match request.password.as_deref() {
            Some(password) => {
                if password.len() < 6 {
                    return Err(AppError::Validation(
                        "Şifre en az 6 karakter olmalı".into(),
                    ));
                }
                Some(hash_password(password)?)
            }
            None => None,
        };

        // An explicit empty email clears the stored address.
        let email = request.email.map(|e| {
            if e.trim().is_empty() {
                None
            } else {
                Some(e)
            }
        });

        let updated = self
            .user_repo
            .update(&request.id, username, password_hash, email, request.is_active)
            .await?
            .ok_or_else(|| AppError::NotFound("Kullanıcı bulunamadı".into()))?;

        Ok(updated.into())
    }

    /// Deletes an admin, refusing to remove the last active one so the
    /// panel can never be locked out entirely.
    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Kullanıcı bulunamadı".into()))?;

        if user.is_active && self.user_repo.count_active().await? <= 1 {
            return Err(AppError::Validation("Son admin kullanıcı silinemez".into()));
        }

        self.user_repo.delete(id).await?;
        tracing::info!(username = %user.username, "admin user deleted");
        Ok(())
    }

    /// Bootstraps the default admin. Refuses to run once any admin exists.
    pub async fn seed(&self) -> Result<AdminUserResponse, AppError> {
        if self.user_repo.count().await? > 0 {
            return Err(AppError::Conflict("Admin kullanıcı zaten mevcut".into()));
        }

        let insert = AdminUserInsert {
            username: SEED_USERNAME.to_string(),
            password_hash: hash_password(SEED_PASSWORD)?,
            email: None,
        };

        let created = self.user_repo.create(&insert).await?;
        tracing::warn!("seed admin created, change the default password");

        Ok(created.into())
    }
}
