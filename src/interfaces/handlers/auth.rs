use actix_web::{post, web, Responder};
use tracing::instrument;

use crate::{
    entities::admin_user::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest},
    errors::AppError,
    handlers::respond,
    AppState,
};

#[instrument(skip(state, request))]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.login(request.into_inner()).await?;
    Ok(respond::ok(response))
}

#[instrument(skip(state, request))]
#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AppError> {
    let message = state
        .auth_handler
        .forgot_password(request.into_inner())
        .await?;
    Ok(respond::message(&message))
}

#[instrument(skip(state, request))]
#[post("/reset-password")]
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<impl Responder, AppError> {
    let message = state
        .auth_handler
        .reset_password(request.into_inner())
        .await?;
    Ok(respond::message(&message))
}
