pub mod address;
pub mod admin_user;
pub mod company;
pub mod contact;
pub mod project;
pub mod spec_category;
pub mod token;
