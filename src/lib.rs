pub mod auth;
pub mod config;
pub mod database;
pub mod email;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod sanitize;
pub mod types;
pub mod validation;
