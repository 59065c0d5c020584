mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Every /api/admin/* route except the session endpoints requires a
// valid session cookie (or bearer token) and must answer 401 otherwise.

#[tokio::test]
async fn admin_routes_require_authentication() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/admin/me",
        "/api/admin/stats",
        "/api/admin/testimonies",
        "/api/admin/members",
        "/api/admin/pre-members",
        "/api/admin/contact-messages",
        "/api/admin/donations",
        "/api/admin/articles",
        "/api/admin/newsletter/subscribers",
    ] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} not guarded", path);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED", "unexpected body for {}: {}", path, body);
    }
    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/admin/stats", server.base_url))
        .header("authorization", "Bearer not.a.jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_validates_payload_before_lookup() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/admin/session", server.base_url))
        .json(&json!({ "email": "not-an-email", "password": "" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR", "{}", body);
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_without_authentication() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Logging out is idempotent and does not itself require a valid session
    let res = client
        .delete(format!("{}/api/admin/session", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    let cleared = res
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|c| c.starts_with("civica_admin=") && c.contains("Max-Age=0"));
    assert!(cleared, "expected an expired session cookie");
    Ok(())
}
