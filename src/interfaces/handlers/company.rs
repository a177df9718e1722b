use actix_web::{get, route, web, Responder};
use tracing::instrument;

use crate::{
    entities::company::UpsertCompanyRequest,
    errors::AppError,
    handlers::respond,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
#[get("/company")]
pub async fn get_company(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let company = state.company_handler.get().await?;
    Ok(respond::ok(company))
}

// POST and PUT both land on the singleton upsert.
#[instrument(skip(_claims, state, request))]
#[route("/company", method = "POST", method = "PUT")]
pub async fn upsert_company(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    request: web::Json<UpsertCompanyRequest>,
) -> Result<impl Responder, AppError> {
    let company = state.company_handler.upsert(request.into_inner()).await?;
    Ok(respond::ok_with_message(
        company,
        "Firma bilgileri başarıyla kaydedildi",
    ))
}
