use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::{
    clear_session_cookie, generate_jwt, session_cookie, verify_password, Claims,
};
use crate::config;
use crate::database::models::AdminInfo;
use crate::database::repositories::AdminUserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, AuthAdmin};
use crate::validation::{require_email, require_length, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub admin: AdminInfo,
    pub expires_in: u64,
}

/// POST /api/admin/session - authenticate and set the session cookie.
///
/// Unknown email and wrong password return the same 401 message so the
/// endpoint cannot be used to probe for admin accounts.
pub async fn session_login(
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), ApiError> {
    let mut errors = FieldErrors::new();
    require_email(&mut errors, "email", &payload.email);
    require_length(&mut errors, "password", &payload.password, 8, 128);
    errors.into_result()?;

    let repo = AdminUserRepository::connect().await?;
    let admin = repo
        .find_by_email(payload.email.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&payload.password, &admin.password_hash)? {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let claims = Claims::new(admin.id, admin.email.clone(), admin.display_name.clone());
    let token = generate_jwt(&claims)?;

    repo.touch_last_login(admin.id).await?;
    tracing::info!(admin = %admin.email, "admin login");

    let expires_in = config::config().security.jwt_expiry_hours * 3600;
    let jar = jar.add(session_cookie(token));

    Ok((
        jar,
        ApiResponse::success(LoginResponse { admin: AdminInfo::from(admin), expires_in }),
    ))
}

/// DELETE /api/admin/session - clear the session cookie
pub async fn session_logout(jar: CookieJar) -> (CookieJar, ApiResponse<()>) {
    (jar.add(clear_session_cookie()), ApiResponse::success(()))
}

/// GET /api/admin/me - current admin from the guard context
pub async fn session_whoami(
    Extension(admin): Extension<AuthAdmin>,
) -> Result<ApiResponse<AdminInfo>, ApiError> {
    let repo = AdminUserRepository::connect().await?;
    let record = repo
        .find_by_id(admin.admin_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Admin account no longer exists"))?;

    Ok(ApiResponse::success(AdminInfo::from(record)))
}
