use std::{
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::{errors::AuthError, AppState};

/// Guards the admin panel and every mutating content route. Public reads
/// and the credential endpoints pass through untouched; everything else
/// needs a valid bearer token, whose claims land in request extensions.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !requires_auth(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
                tracing::error!("AppState missing in middleware");
                AuthError::MissingJwtService
            })?;

            let token = extract_token(&req).ok_or_else(|| {
                tracing::warn!(path = %req.path(), "missing or malformed Authorization header");
                AuthError::MissingCredentials
            })?;

            let decoded = state.token_service.decode_token(&token)?;

            req.extensions_mut().insert(decoded.claims);
            service.call(req).await
        })
    }
}

fn requires_auth(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return false;
    }

    if path.starts_with("/api/admin") {
        // Credential endpoints must stay reachable without a token.
        return !matches!(
            (path, method),
            ("/api/admin/login", "POST")
                | ("/api/admin/forgot-password", "POST")
                | ("/api/admin/reset-password", "POST")
                | ("/api/admin/seed", "POST")
        );
    }

    if path.starts_with("/admin") {
        return true;
    }

    // Content routes are world-readable but admin-writable.
    let mutating = matches!(method, "POST" | "PUT" | "DELETE");
    mutating && (path.starts_with("/api/projects") || path.starts_with("/api/teknik-sartname"))
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use actix_web::{dev::Service as _, test as actix_test, web, App, HttpResponse};
    use tracing_actix_web::TracingLogger;

    use super::{requires_auth, AuthMiddleware};

    // Mirrors the server's wrap order: auth registered first so it wraps the
    // plain route service, logger outside it.
    #[actix_web::test]
    async fn composes_inside_the_tracing_logger() {
        let app = actix_test::init_service(
            App::new()
                .wrap(AuthMiddleware)
                .wrap(TracingLogger::default())
                .route(
                    "/api/projects",
                    web::get().to(|| async { HttpResponse::Ok().finish() }),
                )
                .route(
                    "/api/projects",
                    web::post().to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let public = actix_test::TestRequest::get().uri("/api/projects").to_request();
        let res = actix_test::call_service(&app, public).await;
        assert!(res.status().is_success());

        let no_token = actix_test::TestRequest::post().uri("/api/projects").to_request();
        assert!(app.call(no_token).await.is_err());
    }

    #[test]
    fn public_reads_pass_without_a_token() {
        assert!(!requires_auth("/api/projects", "GET"));
        assert!(!requires_auth("/api/teknik-sartname/genel", "GET"));
        assert!(!requires_auth("/api/company", "GET"));
        assert!(!requires_auth("/api/contact", "POST"));
        assert!(!requires_auth("/", "GET"));
    }

    #[test]
    fn credential_endpoints_stay_open() {
        assert!(!requires_auth("/api/admin/login", "POST"));
        assert!(!requires_auth("/api/admin/forgot-password", "POST"));
        assert!(!requires_auth("/api/admin/reset-password", "POST"));
        assert!(!requires_auth("/api/admin/seed", "POST"));
    }

    #[test]
    fn admin_panel_and_mutations_need_a_token() {
        assert!(requires_auth("/api/admin/users", "GET"));
        assert!(requires_auth("/api/admin/company", "PUT"));
        assert!(requires_auth("/api/admin/addresses", "POST"));
        assert!(requires_auth("/api/projects", "POST"));
        assert!(requires_auth("/api/projects", "DELETE"));
        assert!(requires_auth("/api/teknik-sartname", "PUT"));
        assert!(requires_auth("/admin/health", "GET"));
    }

    #[test]
    fn preflight_is_always_public() {
        assert!(!requires_auth("/api/projects", "OPTIONS"));
    }
}
