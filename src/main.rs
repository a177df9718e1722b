use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use construction_backend::{
    db::postgres::create_pool,
    email::mailer::{Mailer, NoopMailer, SmtpMailer},
    graceful_shutdown::shutdown_signal,
    handlers::{
        addresses::{create_address, delete_address, get_address, list_addresses, update_address},
        admin_users::{
            create_admin_user, delete_admin_user, list_admin_users, seed_admin_user,
            update_admin_user,
        },
        auth::{forgot_password, login, reset_password},
        company::{get_company, upsert_company},
        contact::submit_contact_form,
        home::home,
        projects::{
            create_project, delete_project, get_project, list_projects, multipart_config,
            project_stats, update_project,
        },
        spec_categories::{
            create_spec_category, delete_spec_category, get_spec_category, list_spec_categories,
            update_spec_category,
        },
        system::health_check,
    },
    middlewares::auth::AuthMiddleware,
    settings::AppConfig,
    storage::s3::S3Storage,
    AppState,
};

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(&origin);
        }
    }

    cors
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to create database connection pool");

    let storage = S3Storage::from_config(&config).await;

    let mailer: Arc<dyn Mailer> = match SmtpMailer::from_config(&config) {
        Ok(Some(smtp)) => Arc::new(smtp),
        Ok(None) => {
            tracing::warn!("SMTP not configured, outbound mail is disabled");
            Arc::new(NoopMailer)
        }
        Err(e) => {
            tracing::error!("SMTP configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config, pool, storage, mailer));

    let server_addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let worker_count = config.worker_count;
    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(multipart_config())
            // Registration is inside-out: auth must sit inside the logger so
            // it wraps the plain route service.
            .wrap(AuthMiddleware)
            .wrap(TracingLogger::default())
            .wrap(build_cors(&cors_config))
            .wrap(NormalizePath::trim())
            .service(home)
            .service(web::scope("/admin").service(health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/admin")
                            .service(login)
                            .service(forgot_password)
                            .service(reset_password)
                            .service(seed_admin_user)
                            .service(list_admin_users)
                            .service(create_admin_user)
                            .service(update_admin_user)
                            .service(delete_admin_user)
                            .service(get_company)
                            .service(upsert_company)
                            .service(list_addresses)
                            .service(get_address)
                            .service(create_address)
                            .service(update_address)
                            .service(delete_address),
                    )
                    .service(list_projects)
                    .service(get_project)
                    .service(create_project)
                    .service(update_project)
                    .service(delete_project)
                    .service(project_stats)
                    .service(get_company)
                    .service(list_addresses)
                    .service(list_spec_categories)
                    .service(get_spec_category)
                    .service(create_spec_category)
                    .service(update_spec_category)
                    .service(delete_spec_category)
                    .service(submit_contact_form),
            )
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
