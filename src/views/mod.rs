pub mod catalog;
pub mod admin;
