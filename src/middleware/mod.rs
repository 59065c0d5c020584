pub mod auth;
pub mod response;

pub use auth::{admin_guard, AuthAdmin};
pub use response::{ApiResponse, ApiResult};
