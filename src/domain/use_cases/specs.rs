use uuid::Uuid;
use validator::Validate;

use crate::entities::spec_category::{
    NewSpecCategoryRequest, SpecCategory, UpdateSpecCategoryRequest,
};
use crate::errors::AppError;
use crate::repositories::spec_category::SpecCategoryRepository;
use crate::slug::slugify;

pub struct SpecCategoryHandler<R>
where
    R: SpecCategoryRepository,
{
    pub spec_repo: R,
}

impl<R> SpecCategoryHandler<R>
where
    R: SpecCategoryRepository,
{
    pub fn new(spec_repo: R) -> Self {
        SpecCategoryHandler { spec_repo }
    }

    /// Public listing: active categories in display order.
    pub async fn list_active(&self) -> Result<Vec<SpecCategory>, AppError> {
        self.spec_repo.list_active().await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<SpecCategory, AppError> {
        self.spec_repo
            .find_active_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Teknik şartname bulunamadı".into()))
    }

    pub async fn create(
        &self,
        request: NewSpecCategoryRequest,
    ) -> Result<SpecCategory, AppError> {
        request.validate()?;

        let title = request.title.trim().to_string();
        let slug = slugify(&title);

        if self.spec_repo.slug_exists(&slug, None).await? {
            return Err(AppError::Conflict(
                "Bu başlıkta bir teknik şartname zaten mevcut".into(),
            ));
        }

        let created = self
            .spec_repo
            .create(&title, &slug, &request.content, request.updated_by)
            .await?;

        tracing::info!(slug = %created.slug, "spec category created");
        Ok(created)
    }

    /// Partial update. A title change re-derives the slug from the new title.
    pub async fn update(
        &self,
        request: UpdateSpecCategoryRequest,
    ) -> Result<SpecCategory, AppError> {
        let title_and_slug = match request.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => {
                let slug = slugify(title);
                if self.spec_repo.slug_exists(&slug, Some(request.id)).await? {
                    return Err(AppError::Conflict(
                        "Bu başlıkta bir teknik şartname zaten mevcut".into(),
                    ));
                }
                Some((title.to_string(), slug))
            }
            Some(_) => return Err(AppError::Validation("Başlık zorunludur".into())),
            None => None,
        };

        let updated = self
            .spec_repo
            .update(
                &request.id,
                title_and_slug,
                request.content,
                request.updated_by,
                request.is_active,
                request.sort_order,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Teknik şartname bulunamadı".into()))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        if !self.spec_repo.delete(id).await? {
            return Err(AppError::NotFound("Teknik şartname bulunamadı".into()));
        }
        Ok(())
    }
}
