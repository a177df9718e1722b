use actix_web::{post, web, Responder};
use tracing::instrument;

use crate::{
    entities::contact::ContactForm, errors::AppError, handlers::respond, AppState,
};

#[instrument(skip(state, form))]
#[post("/contact")]
pub async fn submit_contact_form(
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let message = state.contact_handler.submit(form.into_inner()).await?;
    Ok(respond::message(&message))
}
