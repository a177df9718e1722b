use actix_web::{delete, get, post, put, web, Responder};
use tracing::instrument;

use crate::{
    entities::spec_category::{NewSpecCategoryRequest, UpdateSpecCategoryRequest},
    errors::AppError,
    handlers::{projects::DeleteQuery, respond},
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
#[get("/teknik-sartname")]
pub async fn list_spec_categories(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let categories = state.spec_handler.list_active().await?;
    Ok(respond::ok(categories))
}

#[instrument(skip(state))]
#[get("/teknik-sartname/{slug}")]
pub async fn get_spec_category(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let category = state.spec_handler.get_by_slug(&slug).await?;
    Ok(respond::ok(category))
}

#[instrument(skip(claims, state, request))]
#[post("/teknik-sartname")]
pub async fn create_spec_category(
    claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<NewSpecCategoryRequest>,
) -> Result<impl Responder, AppError> {
    let mut request = request.into_inner();
    if request.updated_by.is_none() {
        request.updated_by = Some(claims.0.username.clone());
    }

    let category = state.spec_handler.create(request).await?;
    Ok(respond::created(
        category,
        "Teknik şartname başarıyla oluşturuldu",
    ))
}

#[instrument(skip(claims, state, request))]
#[put("/teknik-sartname")]
pub async fn update_spec_category(
    claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<UpdateSpecCategoryRequest>,
) -> Result<impl Responder, AppError> {
    let mut request = request.into_inner();
    if request.updated_by.is_none() {
        request.updated_by = Some(claims.0.username.clone());
    }

    let category = state.spec_handler.update(request).await?;
    Ok(respond::ok_with_message(
        category,
        "Teknik şartname başarıyla güncellendi",
    ))
}

#[instrument(skip(_claims, state))]
#[delete("/teknik-sartname")]
pub async fn delete_spec_category(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<DeleteQuery>,
) -> Result<impl Responder, AppError> {
    state.spec_handler.delete(&query.id).await?;
    Ok(respond::message("Teknik şartname başarıyla silindi"))
}
