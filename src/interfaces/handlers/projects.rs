use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm, MultipartFormConfig};
use actix_web::{delete, get, post, put, web, Responder};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::project::{ProjectStatus, UploadedImage},
    errors::AppError,
    handlers::respond,
    use_cases::{extractors::AdminClaims, projects::ProjectDraft},
    AppState,
};

/// Extractor limits sized for a full project upload: 20 image files at 5MB
/// each plus the scalar fields. The extractor's stock total limit is lower
/// than that and would reject valid requests before the handler runs.
pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(120 * 1024 * 1024)
        .memory_limit(4 * 1024 * 1024)
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub status: Option<String>,
    pub homepage: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Scalar project fields plus image files, as one multipart form. Uploads
/// above the per-file limit are validated downstream so the client gets a
/// proper Turkish message instead of a bare 400.
#[derive(Debug, MultipartForm)]
pub struct ProjectForm {
    #[multipart(limit = "20MB")]
    pub images: Vec<TempFile>,
    /// Update only.
    pub id: Option<Text<Uuid>>,
    pub title: Text<String>,
    pub description: Text<String>,
    pub location: Text<String>,
    pub status: Text<String>,
    #[multipart(rename = "apartmentInfo")]
    pub apartment_info: Option<Text<String>>,
    #[multipart(rename = "duplexInfo")]
    pub duplex_info: Option<Text<String>>,
    #[multipart(rename = "startDate")]
    pub start_date: Option<Text<String>>,
    #[multipart(rename = "endDate")]
    pub end_date: Option<Text<String>>,
    /// Update only: JSON array of already-stored image URLs to keep, in order.
    #[multipart(rename = "keepExistingImages")]
    pub keep_existing_images: Option<Text<String>>,
    /// Update only: expected row version for optimistic concurrency.
    pub version: Option<Text<i64>>,
}

impl ProjectForm {
    fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.0.clone(),
            description: self.description.0.clone(),
            location: self.location.0.clone(),
            status: self.status.0.clone(),
            apartment_info: self.apartment_info.as_ref().map(|t| t.0.clone()),
            duplex_info: self.duplex_info.as_ref().map(|t| t.0.clone()),
            start_date: self.start_date.as_ref().map(|t| t.0.clone()),
            end_date: self.end_date.as_ref().map(|t| t.0.clone()),
        }
    }

    async fn read_images(&self) -> Result<Vec<UploadedImage>, AppError> {
        let mut images = Vec::with_capacity(self.images.len());
        for file in &self.images {
            let bytes = tokio::fs::read(file.file.path())
                .await
                .map_err(|e| AppError::Internal(format!("temp file read failed: {}", e)))?;

            images.push(UploadedImage {
                file_name: file
                    .file_name
                    .clone()
                    .unwrap_or_else(|| "upload.bin".to_string()),
                content_type: file.content_type.as_ref().map(|m| m.to_string()),
                bytes,
            });
        }
        Ok(images)
    }
}

fn parse_status(raw: Option<&str>) -> Result<Option<ProjectStatus>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => ProjectStatus::parse(raw)
            .map(Some)
            .ok_or_else(|| AppError::Validation("Geçersiz proje durumu".into())),
        None => Ok(None),
    }
}

#[instrument(skip(state, query))]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    if query.homepage.unwrap_or(false) {
        let data = state.project_handler.homepage().await?;
        return Ok(respond::ok(data));
    }

    let status = parse_status(query.status.as_deref())?;
    let page = state
        .project_handler
        .list(status, query.page, query.limit)
        .await?;

    Ok(respond::paginated(page.projects, page.pagination))
}

#[instrument(skip(state))]
#[get("/stats")]
pub async fn project_stats(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let stats = state.project_handler.stats().await?;
    Ok(respond::ok(stats))
}

#[instrument(skip(state))]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get(&id).await?;
    Ok(respond::ok(project))
}

#[instrument(skip(_claims, state, form))]
#[post("/projects")]
pub async fn create_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<ProjectForm>,
) -> Result<impl Responder, AppError> {
    let images = form.read_images().await?;
    let project = state.project_handler.create(form.draft(), images).await?;

    Ok(respond::created(project, "Proje başarıyla oluşturuldu"))
}

#[instrument(skip(_claims, state, form))]
#[put("/projects")]
pub async fn update_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<ProjectForm>,
) -> Result<impl Responder, AppError> {
    let id = form
        .id
        .as_ref()
        .map(|t| t.0)
        .ok_or_else(|| AppError::Validation("Proje id gerekli".into()))?;

    let new_images = form.read_images().await?;
    let keep_images: Vec<String> = match form.keep_existing_images.as_ref() {
        Some(raw) => serde_json::from_str::<Vec<String>>(&raw.0)
            .map_err(|_| AppError::Validation("keepExistingImages geçersiz".into()))?
            .into_iter()
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
            .collect(),
        None => Vec::new(),
    };
    let expected_version = form.version.as_ref().map(|t| t.0);

    let project = state
        .project_handler
        .update(&id, form.draft(), keep_images, new_images, expected_version)
        .await?;

    Ok(respond::ok_with_message(
        project,
        "Proje başarıyla güncellendi",
    ))
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Uuid,
}

#[instrument(skip(_claims, state))]
#[delete("/projects")]
pub async fn delete_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<DeleteQuery>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete(&query.id).await?;
    Ok(respond::message("Proje başarıyla silindi"))
}
