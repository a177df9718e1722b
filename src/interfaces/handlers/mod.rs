pub mod addresses;
pub mod admin_users;
pub mod auth;
pub mod company;
pub mod contact;
pub mod home;
pub mod projects;
pub mod respond;
pub mod spec_categories;
pub mod system;
