use actix_web::{delete, get, post, put, web, Responder};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::address::NewAddressRequest,
    errors::AppError,
    handlers::respond,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddressListQuery {
    /// `all=true` includes inactive addresses (admin view).
    pub all: Option<bool>,
}

#[instrument(skip(state, query))]
#[get("/addresses")]
pub async fn list_addresses(
    state: web::Data<AppState>,
    query: web::Query<AddressListQuery>,
) -> Result<impl Responder, AppError> {
    let active_only = !query.all.unwrap_or(false);
    let addresses = state.address_handler.list(active_only).await?;
    Ok(respond::ok(addresses))
}

#[instrument(skip(state))]
#[get("/addresses/{id}")]
pub async fn get_address(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let address = state.address_handler.get(&id).await?;
    Ok(respond::ok(address))
}

#[instrument(skip(_claims, state, request))]
#[post("/addresses")]
pub async fn create_address(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<NewAddressRequest>,
) -> Result<impl Responder, AppError> {
    let address = state.address_handler.create(request.into_inner()).await?;
    Ok(respond::created(address, "Adres başarıyla oluşturuldu"))
}

#[instrument(skip(_claims, state, request))]
#[put("/addresses/{id}")]
pub async fn update_address(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<NewAddressRequest>,
) -> Result<impl Responder, AppError> {
    let address = state
        .address_handler
        .update(&id, request.into_inner())
        .await?;
    Ok(respond::ok_with_message(
        address,
        "Adres başarıyla güncellendi",
    ))
}

#[instrument(skip(_claims, state))]
#[delete("/addresses/{id}")]
pub async fn delete_address(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.address_handler.delete(&id).await?;
    Ok(respond::message("Adres başarıyla silindi"))
}
