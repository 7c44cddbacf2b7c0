pub mod auth;
pub mod pagination;
