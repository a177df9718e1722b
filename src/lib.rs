use std::sync::Arc;

mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, slug, use_cases};
pub use infrastructure::{auth, db, email, storage};
pub use interfaces::{handlers, middlewares, repositories};

use auth::jwt::JwtService;
use email::mailer::Mailer;
use repositories::sqlx_repo::{
    SqlxAddressRepo, SqlxAdminUserRepo, SqlxCompanyRepo, SqlxProjectRepo, SqlxSpecCategoryRepo,
};
use storage::s3::S3Storage;
use use_cases::{
    addresses::AddressHandler, admin_users::AdminUserHandler, auth::AuthHandler,
    company::CompanyHandler, contact::ContactHandler, projects::ProjectHandler,
    specs::SpecCategoryHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxAdminUserRepo, JwtService, Arc<dyn Mailer>>;
pub type AppAdminHandler = AdminUserHandler<SqlxAdminUserRepo>;
pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo, S3Storage>;
pub type AppCompanyHandler = CompanyHandler<SqlxCompanyRepo, SqlxAddressRepo>;
pub type AppAddressHandler = AddressHandler<SqlxAddressRepo>;
pub type AppSpecHandler = SpecCategoryHandler<SqlxSpecCategoryRepo>;
pub type AppContactHandler = ContactHandler<Arc<dyn Mailer>>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub admin_handler: AppAdminHandler,
    pub project_handler: AppProjectHandler,
    pub company_handler: AppCompanyHandler,
    pub address_handler: AppAddressHandler,
    pub spec_handler: AppSpecHandler,
    pub contact_handler: AppContactHandler,
    /// Shared with the auth middleware for bearer-token validation.
    pub token_service: JwtService,
}

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        pool: sqlx::PgPool,
        storage: S3Storage,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let token_service = JwtService::new(config);

        let auth_handler = AuthHandler::new(
            SqlxAdminUserRepo::new(pool.clone()),
            token_service.clone(),
            mailer.clone(),
            config.public_base_url.clone(),
        );
        let admin_handler = AdminUserHandler::new(SqlxAdminUserRepo::new(pool.clone()));
        let project_handler =
            ProjectHandler::new(SqlxProjectRepo::new(pool.clone()), storage);
        let company_handler = CompanyHandler::new(
            SqlxCompanyRepo::new(pool.clone()),
            SqlxAddressRepo::new(pool.clone()),
        );
        let address_handler = AddressHandler::new(SqlxAddressRepo::new(pool.clone()));
        let spec_handler = SpecCategoryHandler::new(SqlxSpecCategoryRepo::new(pool.clone()));
        let contact_handler = ContactHandler::new(mailer, config.contact_recipient.clone());

        AppState {
            auth_handler,
            admin_handler,
            project_handler,
            company_handler,
            address_handler,
            spec_handler,
            contact_handler,
            token_service,
        }
    }
}
