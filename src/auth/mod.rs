use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

const TOKEN_ISSUER: &str = "civica-api";

/// Claims embedded in the admin session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(admin_id: Uuid, email: String, name: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: admin_id,
            email,
            name,
            iss: TOKEN_ISSUER.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("hash error: {0}")]
    Hash(String),
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

pub fn validate_jwt(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| AuthError::InvalidToken(format!("Invalid session token: {}", e)))?;

    Ok(token_data.claims)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let cost = config::config().security.bcrypt_cost;
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Hash(e.to_string()))
}

/// Build the HTTP-only session cookie carrying the JWT
pub fn session_cookie(token: String) -> Cookie<'static> {
    let security = &config::config().security;
    let max_age = time_duration_hours(security.jwt_expiry_hours);

    let mut cookie = Cookie::new(security.cookie_name.clone(), token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(security.cookie_secure);
    cookie.set_path("/");
    cookie.set_max_age(max_age);
    cookie
}

/// Build an expired cookie that clears the admin session
pub fn clear_session_cookie() -> Cookie<'static> {
    let security = &config::config().security;

    let mut cookie = Cookie::new(security.cookie_name.clone(), "");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(security.cookie_secure);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

fn time_duration_hours(hours: u64) -> time::Duration {
    time::Duration::hours(hours as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    // The config singleton reads the environment exactly once, so the test
    // environment has to be in place before the first config() call.
    static TEST_ENV: Lazy<()> = Lazy::new(|| {
        std::env::set_var("JWT_SECRET", "test-secret-for-unit-tests");
        std::env::set_var("BCRYPT_COST", "4"); // keep hashing tests fast
        let _ = config::config();
    });

    fn setup() {
        Lazy::force(&TEST_ENV);
    }

    #[test]
    fn password_hash_round_trip() {
        setup();
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn jwt_round_trip() {
        setup();
        let admin_id = Uuid::new_v4();
        let claims = Claims::new(admin_id, "admin@example.org".into(), "Admin".into());

        let token = generate_jwt(&claims).unwrap();
        let decoded = validate_jwt(&token).unwrap();

        assert_eq!(decoded.sub, admin_id);
        assert_eq!(decoded.email, "admin@example.org");
        assert_eq!(decoded.iss, TOKEN_ISSUER);
    }

    #[test]
    fn tampered_token_rejected() {
        setup();
        let claims = Claims::new(Uuid::new_v4(), "a@b.co".into(), "A".into());
        let mut token = generate_jwt(&claims).unwrap();
        token.push('x');
        assert!(validate_jwt(&token).is_err());
    }

    #[test]
    fn session_cookie_is_http_only() {
        setup();
        let cookie = session_cookie("token-value".into());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));

        let cleared = clear_session_cookie();
        assert_eq!(cleared.value(), "");
    }
}
