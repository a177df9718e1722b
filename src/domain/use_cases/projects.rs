use chrono::NaiveDate;
use uuid::Uuid;

use crate::constants::{MAX_IMAGE_SIZE_BYTES, MAX_PROJECT_IMAGES};
use crate::entities::project::{
    HomepageProjects, Pagination, Project, ProjectFields, ProjectInsert, ProjectPage,
    ProjectStats, ProjectStatus, UploadedImage,
};
use crate::errors::AppError;
use crate::infrastructure::storage::s3::{object_key, ObjectStorage};
use crate::repositories::project::ProjectRepository;
use crate::slug::slugify;

const HOMEPAGE_LIMIT: u32 = 6;
const DEFAULT_PER_PAGE: u32 = 12;
const MAX_PER_PAGE: u32 = 100;

/// Unvalidated project fields as they arrive from the multipart form.
#[derive(Debug, Default, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: String,
    pub apartment_info: Option<String>,
    pub duplex_info: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ProjectDraft {
    /// Field validation happens before anything touches blob storage, so an
    /// invalid request never leaves orphaned uploads behind.
    pub fn into_fields(self) -> Result<ProjectFields, AppError> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.location.trim().is_empty()
        {
            return Err(AppError::Validation("Tüm zorunlu alanları doldurun".into()));
        }

        let status = ProjectStatus::parse(self.status.trim())
            .ok_or_else(|| AppError::Validation("Geçersiz proje durumu".into()))?;

        let start_date = match self.start_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_date(raw)?,
            _ => return Err(AppError::Validation("Başlangıç tarihi zorunludur".into())),
        };

        let end_date = match self.end_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_date(raw)?),
            _ => None,
        };

        if status == ProjectStatus::Completed && end_date.is_none() {
            return Err(AppError::Validation(
                "Tamamlanan projeler için bitiş tarihi zorunludur".into(),
            ));
        }

        if let Some(end) = end_date {
            if end < start_date {
                return Err(AppError::Validation(
                    "Bitiş tarihi başlangıç tarihinden önce olamaz".into(),
                ));
            }
        }

        Ok(ProjectFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            status,
            apartment_info: none_if_blank(self.apartment_info),
            duplex_info: none_if_blank(self.duplex_info),
            start_date,
            end_date,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Geçersiz tarih: {}", raw)))
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_image(image: &UploadedImage) -> Result<String, AppError> {
    if image.bytes.len() > MAX_IMAGE_SIZE_BYTES {
        return Err(AppError::Validation(
            "Resim boyutu 5MB'dan büyük olamaz".into(),
        ));
    }

    // Trust the sniffed type over the declared one when the bytes are
    // recognizable.
    if let Some(kind) = infer::get(&image.bytes) {
        if kind.matcher_type() == infer::MatcherType::Image {
            return Ok(kind.mime_type().to_string());
        }
        return Err(AppError::Validation(
            "Sadece resim dosyaları yüklenebilir".into(),
        ));
    }

    match image.content_type.as_deref() {
        Some(declared) if declared.starts_with("image/") => Ok(declared.to_string()),
        _ => Err(AppError::Validation(
            "Sadece resim dosyaları yüklenebilir".into(),
        )),
    }
}

pub struct ProjectHandler<R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    pub project_repo: R,
    pub storage: S,
}

impl<R, S> ProjectHandler<R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    pub fn new(project_repo: R, storage: S) -> Self {
        ProjectHandler {
            project_repo,
            storage,
        }
    }

    pub async fn list(
        &self,
        status: Option<ProjectStatus>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ProjectPage, AppError> {
        let page = page.unwrap_or(1).max(1);
        let per_page = limit.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);

        let projects = self.project_repo.list(status, page, per_page).await?;
        let total = self.project_repo.count(status).await?;

        Ok(ProjectPage {
            projects,
            pagination: Pagination::new(page, per_page, total),
        })
    }

    /// Homepage teaser: the six most recent projects per status, each
    /// stripped down to its cover image.
    pub async fn homepage(&self) -> Result<HomepageProjects, AppError> {
        let mut completed = self
            .project_repo
            .recent_by_status(ProjectStatus::Completed, HOMEPAGE_LIMIT)
            .await?;
        let mut ongoing = self
            .project_repo
            .recent_by_status(ProjectStatus::Ongoing, HOMEPAGE_LIMIT)
            .await?;

        for project in completed.iter_mut().chain(ongoing.iter_mut()) {
            project.images.truncate(1);
        }

        Ok(HomepageProjects { completed, ongoing })
    }

    pub async fn get(&self, id: &Uuid) -> Result<Project, AppError> {
        self.project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Proje bulunamadı".into()))
    }

    pub async fn stats(&self) -> Result<ProjectStats, AppError> {
        let total = self.project_repo.count(None).await?;
        let completed = self
            .project_repo
            .count(Some(ProjectStatus::Completed))
            .await?;
        let ongoing = self.project_repo.count(Some(ProjectStatus::Ongoing)).await?;

        Ok(ProjectStats {
            total_projects: total,
            completed_projects: completed,
            ongoing_projects: ongoing,
        })
    }

    pub async fn create(
        &self,
        draft: ProjectDraft,
        images: Vec<UploadedImage>,
    ) -> Result<Project, AppError> {
        let fields = draft.into_fields()?;

        if images.is_empty() {
            return Err(AppError::Validation("En az bir resim yüklemelisiniz".into()));
        }
        if images.len() > MAX_PROJECT_IMAGES {
            return Err(AppError::Validation(
                "En fazla 20 resim yükleyebilirsiniz".into(),
            ));
        }

        let slug = slugify(&fields.title);
        if self.project_repo.slug_exists(&slug, None).await? {
            return Err(AppError::Conflict(
                "Bu başlıkta bir proje zaten mevcut".into(),
            ));
        }

        let image_urls = self.upload_all(images).await?;

        let insert = ProjectInsert {
            fields,
            slug,
            images: image_urls,
        };

        match self.project_repo.create(&insert).await {
            Ok(project) => {
                tracing::info!(slug = %project.slug, "project created");
                Ok(project)
            }
            Err(e) => {
                self.delete_blobs(&insert.images).await;
                Err(e)
            }
        }
    }

    /// Full replace. `keep_images` names the existing URLs to retain, in
    /// order; anything the row held that is neither kept nor re-sent gets
    /// deleted from blob storage after the row is written.
    pub async fn update(
        &self,
        id: &Uuid,
        draft: ProjectDraft,
        keep_images: Vec<String>,
        new_images: Vec<UploadedImage>,
        expected_version: Option<i64>,
    ) -> Result<Project, AppError> {
        let fields = draft.into_fields()?;

        let existing = self
            .project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Proje bulunamadı".into()))?;

        // Only URLs the project actually owns can be kept, each at most once.
        let mut kept: Vec<String> = Vec::with_capacity(keep_images.len());
        for url in keep_images {
            if existing.images.contains(&url) && !kept.contains(&url) {
                kept.push(url);
            }
        }

        if kept.len() + new_images.len() > MAX_PROJECT_IMAGES {
            return Err(AppError::Validation("En fazla 20 resim olabilir".into()));
        }
        if kept.is_empty() && new_images.is_empty() {
            return Err(AppError::Validation("En az bir resim yüklemelisiniz".into()));
        }

        let slug = slugify(&fields.title);
        if self.project_repo.slug_exists(&slug, Some(*id)).await? {
            return Err(AppError::Conflict(
                "Bu başlıkta bir proje zaten mevcut".into(),
            ));
        }

        let uploaded = self.upload_all(new_images).await?;

        let mut final_images = kept;
        for url in uploaded.iter() {
            if !final_images.contains(url) {
                final_images.push(url.clone());
            }
        }

        let updated = match self
            .project_repo
            .update(id, &fields, &slug, &final_images, expected_version)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                self.delete_blobs(&uploaded).await;
                return Err(e);
            }
        };

        let Some(project) = updated else {
            self.delete_blobs(&uploaded).await;
            // The row existed moments ago, so a miss here means the version
            // check failed.
            if self.project_repo.find_by_id(id).await?.is_some() {
                return Err(AppError::Conflict(
                    "Proje başka bir oturumda güncellendi".into(),
                ));
            }
            return Err(AppError::NotFound("Proje bulunamadı".into()));
        };

        let orphans: Vec<String> = existing
            .images
            .iter()
            .filter(|url| !project.images.contains(url))
            .cloned()
            .collect();
        self.delete_blobs(&orphans).await;

        tracing::info!(slug = %project.slug, "project updated");
        Ok(project)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let project = self
            .project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Proje bulunamadı".into()))?;

        // Blob deletion failures are logged but never block removing the row.
        self.delete_blobs(&project.images).await;

        self.project_repo.delete(id).await?;
        tracing::info!(slug = %project.slug, "project deleted");
        Ok(())
    }

    /// Uploads every image, deleting any already-uploaded blobs when a later
    /// one fails so a failed request leaves no orphans behind.
    async fn upload_all(&self, images: Vec<UploadedImage>) -> Result<Vec<String>, AppError> {
        let mut checked = Vec::with_capacity(images.len());
        for image in &images {
            checked.push(check_image(image)?);
        }

        let mut urls: Vec<String> = Vec::with_capacity(images.len());
        for (image, content_type) in images.into_iter().zip(checked) {
            let key = object_key(&image.file_name);
            match self.storage.upload(&key, image.bytes, &content_type).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    self.delete_blobs(&urls).await;
                    return Err(AppError::Internal(format!("image upload failed: {}", e)));
                }
            }
        }

        Ok(urls)
    }

    async fn delete_blobs(&self, urls: &[String]) {
        for url in urls {
            if let Err(e) = self.storage.delete(url).await {
                tracing::warn!(url = %url, "blob delete failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{check_image, ProjectDraft};
    use crate::entities::project::{ProjectStatus, UploadedImage};

    fn draft() -> ProjectDraft {
        ProjectDraft {
            title: "Park Konakları".into(),
            description: "3+1 ve 4+1 daireler".into(),
            location: "Çekmeköy".into(),
            status: "ONGOING".into(),
            apartment_info: None,
            duplex_info: None,
            start_date: Some("2024-03-01".into()),
            end_date: None,
        }
    }

    #[test]
    fn ongoing_without_end_date_is_fine() {
        let fields = draft().into_fields().unwrap();
        assert_eq!(fields.status, ProjectStatus::Ongoing);
        assert!(fields.end_date.is_none());
    }

    #[test]
    fn completed_requires_an_end_date() {
        let mut d = draft();
        d.status = "COMPLETED".into();
        let err = d.into_fields().unwrap_err();
        assert!(err
            .to_string()
            .contains("Tamamlanan projeler için bitiş tarihi zorunludur"));
    }

    #[test]
    fn end_date_must_not_precede_start_date() {
        let mut d = draft();
        d.end_date = Some("2023-12-31".into());
        assert!(d.into_fields().is_err());
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let mut d = draft();
        d.apartment_info = Some("   ".into());
        let fields = d.into_fields().unwrap();
        assert!(fields.apartment_info.is_none());
    }

    #[test]
    fn oversized_images_are_rejected() {
        let image = UploadedImage {
            file_name: "big.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![0u8; super::MAX_IMAGE_SIZE_BYTES + 1],
        };
        assert!(check_image(&image).is_err());
    }

    #[test]
    fn sniffed_png_passes_even_with_a_wrong_declared_type() {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        bytes.extend_from_slice(&[0u8; 64]);
        let image = UploadedImage {
            file_name: "plan.png".into(),
            content_type: Some("application/octet-stream".into()),
            bytes,
        };
        assert_eq!(check_image(&image).unwrap(), "image/png");
    }

    #[test]
    fn declared_non_image_is_rejected() {
        let image = UploadedImage {
            file_name: "notes.txt".into(),
            content_type: Some("text/plain".into()),
            bytes: vec![b'h', b'i'],
        };
        assert!(check_image(&image).is_err());
    }
}
