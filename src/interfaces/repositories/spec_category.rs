use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::spec_category::SpecCategory,
    errors::AppError,
    repositories::sqlx_repo::SqlxSpecCategoryRepo,
};

#[async_trait]
pub trait SpecCategoryRepository: Send + Sync {
    async fn list_active(&self) -> Result<Vec<SpecCategory>, AppError>;
    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<SpecCategory>, AppError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<SpecCategory>, AppError>;
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
    async fn create(
        &self,
        title: &str,
        slug: &str,
        content: &str,
        updated_by: Option<String>,
    ) -> Result<SpecCategory, AppError>;
    async fn update(
        &self,
        id: &Uuid,
        title_and_slug: Option<(String, String)>,
        content: Option<String>,
        updated_by: Option<String>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> Result<Option<SpecCategory>, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxSpecCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSpecCategoryRepo { pool }
    }
}

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("spec_categories_slug_key") {
            return AppError::Conflict("Bu başlıkta bir teknik şartname zaten mevcut".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl SpecCategoryRepository for SqlxSpecCategoryRepo {
    async fn list_active(&self) -> Result<Vec<SpecCategory>, AppError> {
        let categories = sqlx::query_as::<_, SpecCategory>(
            "SELECT * FROM spec_categories WHERE is_active = TRUE ORDER BY sort_order ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_active_by_slug(&self, slug: &str) -> Result<Option<SpecCategory>, AppError> {
        let category = sqlx::query_as::<_, SpecCategory>(
            "SELECT * FROM spec_categories WHERE slug = $1 AND is_active = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<SpecCategory>, AppError> {
        let category =
            sqlx::query_as::<_, SpecCategory>("SELECT * FROM spec_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM spec_categories WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(
        &self,
        title: &str,
        slug: &str,
        content: &str,
        updated_by: Option<String>,
    ) -> Result<SpecCategory, AppError> {
        let category = sqlx::query_as::<_, SpecCategory>(
            r#"
            INSERT INTO spec_categories (title, slug, content, updated_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(slug)
        .bind(content)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(category)
    }

    async fn update(
        &self,
        id: &Uuid,
        title_and_slug: Option<(String, String)>,
        content: Option<String>,
        updated_by: Option<String>,
        is_active: Option<bool>,
        sort_order: Option<i32>,
    ) -> Result<Option<SpecCategory>, AppError> {
        let (title, slug) = match title_and_slug {
            Some((title, slug)) => (Some(title), Some(slug)),
            None => (None, None),
        };

        let category = sqlx::query_as::<_, SpecCategory>(
            r#"
            UPDATE spec_categories SET
                title = COALESCE($1, title),
                slug = COALESCE($2, slug),
                content = COALESCE($3, content),
                updated_by = COALESCE($4, updated_by),
                is_active = COALESCE($5, is_active),
                sort_order = COALESCE($6, sort_order),
                last_updated = NOW(),
                updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(slug)
        .bind(content)
        .bind(updated_by)
        .bind(is_active)
        .bind(sort_order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(category)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM spec_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
