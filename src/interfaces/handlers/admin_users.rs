use actix_web::{delete, get, post, put, web, Responder};
use tracing::instrument;

use crate::{
    entities::admin_user::{NewAdminRequest, UpdateAdminRequest},
    errors::AppError,
    handlers::{projects::DeleteQuery, respond},
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
#[get("/users")]
pub async fn list_admin_users(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let users = state.admin_handler.list().await?;
    Ok(respond::ok(users))
}

#[instrument(skip(_claims, state, request))]
#[post("/users")]
pub async fn create_admin_user(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<NewAdminRequest>,
) -> Result<impl Responder, AppError> {
    let user = state.admin_handler.create(request.into_inner()).await?;
    Ok(respond::created(user, "Kullanıcı başarıyla oluşturuldu"))
}

#[instrument(skip(_claims, state, request))]
#[put("/users")]
pub async fn update_admin_user(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<UpdateAdminRequest>,
) -> Result<impl Responder, AppError> {
    let user = state.admin_handler.update(request.into_inner()).await?;
    Ok(respond::ok_with_message(
        user,
        "Kullanıcı başarıyla güncellendi",
    ))
}

#[instrument(skip(claims, state))]
#[delete("/users")]
pub async fn delete_admin_user(
    claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<DeleteQuery>,
) -> Result<impl Responder, AppError> {
    if claims.0.sub == query.id.to_string() {
        return Err(AppError::Validation("Kendi hesabınızı silemezsiniz".into()));
    }

    state.admin_handler.delete(&query.id).await?;
    Ok(respond::message("Kullanıcı başarıyla silindi"))
}

/// One-shot bootstrap of the default admin account. Reachable without a
/// token, but refuses to run once any admin exists.
#[instrument(skip(state))]
#[post("/seed")]
pub async fn seed_admin_user(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let user = state.admin_handler.seed().await?;
    Ok(respond::created(
        user,
        "Varsayılan admin oluşturuldu, şifreyi hemen değiştirin",
    ))
}
