pub mod address;
pub mod admin_user;
pub mod company;
pub mod project;
pub mod spec_category;
pub mod sqlx_repo;
pub mod token;
