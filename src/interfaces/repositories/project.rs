use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectFields, ProjectInsert, ProjectStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Helper to compute OFFSET safely from 1-based `page` and `per_page`.
pub fn page_offset(page: u32, per_page: u32) -> i64 {
    let page = page.saturating_sub(1);
    (page as i64) * (per_page as i64)
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(
        &self,
        status: Option<ProjectStatus>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Project>, AppError>;
    async fn count(&self, status: Option<ProjectStatus>) -> Result<i64, AppError>;
    async fn recent_by_status(
        &self,
        status: ProjectStatus,
        limit: u32,
    ) -> Result<Vec<Project>, AppError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError>;
    async fn create(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    /// Replaces all fields. When `expected_version` is set the write is a
    /// compare-and-swap; `Ok(None)` means the row was either gone or stale.
    async fn update(
        &self,
        id: &Uuid,
        fields: &ProjectFields,
        slug: &str,
        images: &[String],
        expected_version: Option<i64>,
    ) -> Result<Option<Project>, AppError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("projects_slug_key") {
            return AppError::Conflict("Bu başlıkta bir proje zaten mevcut".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list(
        &self,
        status: Option<ProjectStatus>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects");

        if let Some(status) = status {
            builder.push(" WHERE status = ").push_bind(status);
        }

        builder.push(" ORDER BY created_at DESC");
        builder.push(" LIMIT ").push_bind(per_page as i64);
        builder.push(" OFFSET ").push_bind(page_offset(page, per_page));

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn count(&self, status: Option<ProjectStatus>) -> Result<i64, AppError> {
        // Single query with the same filter predicate as listing
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects WHERE ($1::project_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn recent_by_status(
        &self,
        status: ProjectStatus,
        limit: u32,
    ) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE status = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(status)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, slug, description, location, status, images,
                apartment_info, duplex_info, start_date, end_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&project.fields.title)
        .bind(&project.slug)
        .bind(&project.fields.description)
        .bind(&project.fields.location)
        .bind(project.fields.status)
        .bind(&project.images)
        .bind(&project.fields.apartment_info)
        .bind(&project.fields.duplex_info)
        .bind(project.fields.start_date)
        .bind(project.fields.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(created)
    }

    async fn update(
        &self,
        id: &Uuid,
        fields: &ProjectFields,
        slug: &str,
        images: &[String],
        expected_version: Option<i64>,
    ) -> Result<Option<Project>, AppError> {
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                title = $1,
                slug = $2,
                description = $3,
                location = $4,
                status = $5,
                images = $6,
                apartment_info = $7,
                duplex_info = $8,
                start_date = $9,
                end_date = $10,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $11 AND ($12::bigint IS NULL OR version = $12)
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(slug)
        .bind(&fields.description)
        .bind(&fields.location)
        .bind(fields.status)
        .bind(images)
        .bind(&fields.apartment_info)
        .bind(&fields.duplex_info)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(id)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(updated)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::page_offset;

    #[test]
    fn offset_is_zero_based_from_one_based_pages() {
        assert_eq!(page_offset(1, 12), 0);
        assert_eq!(page_offset(3, 12), 24);
    }

    #[test]
    fn page_zero_is_clamped() {
        assert_eq!(page_offset(0, 12), 0);
    }
}
