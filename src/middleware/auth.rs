use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated admin context extracted from the session JWT
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub admin_id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<Claims> for AuthAdmin {
    fn from(claims: Claims) -> Self {
        Self { admin_id: claims.sub, email: claims.email, name: claims.name }
    }
}

/// Admin guard applied to every /api/admin/* route except login.
///
/// The token comes from the HTTP-only session cookie set at login; an
/// Authorization bearer header is accepted as a fallback for API clients.
/// Anything invalid or absent gets a 401 with the standard error body.
pub async fn admin_guard(
    jar: CookieJar,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&jar, &headers)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let claims = validate_jwt(&token)?;

    let auth_admin = AuthAdmin::from(claims);
    request.extensions_mut().insert(auth_admin);

    Ok(next.run(request).await)
}

fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    let cookie_name = &config::config().security.cookie_name;

    if let Some(cookie) = jar.get(cookie_name) {
        let value = cookie.value();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    // Bearer fallback for non-browser clients
    let auth_header = headers.get("authorization")?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
