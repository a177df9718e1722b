pub mod addresses;
pub mod admin_users;
pub mod auth;
pub mod company;
pub mod contact;
pub mod extractors;
pub mod projects;
pub mod specs;
