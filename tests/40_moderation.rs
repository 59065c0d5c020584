mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

// These tests exercise the database-backed behavior and rely on the
// server-side DATABASE_URL from .env, like the rest of the suite relies
// on the built binary.

fn unique_suffix() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos()
}

#[tokio::test]
async fn new_testimony_is_not_publicly_visible() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let content = format!("Témoignage de vérification numéro {}.", unique_suffix());
    let res = client
        .post(format!("{}/api/testimonies", server.base_url))
        .json(&json!({
            "author_name": "Jeanne Martin",
            "author_email": "jeanne@example.com",
            "author_role": "resident",
            "content": content,
            "consent": true
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED, "submission failed");

    let body = res.json::<serde_json::Value>().await?;
    let id = body["data"]["id"].as_str().expect("created id missing").to_string();
    // The public projection must not expose the author's email
    assert!(body["data"].get("author_email").is_none(), "email leaked: {}", body);
    assert!(body["data"].get("status").is_none(), "status leaked: {}", body);

    // Fresh submissions default to pending moderation and must not appear
    // in the approved-only public listing
    let res = client
        .get(format!("{}/api/testimonies?limit=200", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let listing = res.json::<serde_json::Value>().await?;
    let visible = listing["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .any(|t| t["id"].as_str() == Some(id.as_str()));
    assert!(!visible, "pending testimony {} visible publicly", id);
    Ok(())
}

#[tokio::test]
async fn duplicate_member_email_is_conflict() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let email = format!("adherent-{}@example.com", unique_suffix());
    let payload = json!({
        "first_name": "Marie",
        "last_name": "Durand",
        "email": email,
        "membership_type": "individual",
        "consent": true
    });

    let res = client
        .post(format!("{}/api/members", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "first application failed");

    let res = client
        .post(format!("{}/api/members", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT, "duplicate not rejected");

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "CONFLICT", "{}", body);
    Ok(())
}

#[tokio::test]
async fn resubscribe_keeps_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let email = format!("lettre-{}@example.com", unique_suffix());

    let first = client
        .post(format!("{}/api/newsletter/subscribe", server.base_url))
        .json(&json!({ "email": email }))
        .send()
        .await?;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = first.json::<serde_json::Value>().await?;

    let second = client
        .post(format!("{}/api/newsletter/subscribe", server.base_url))
        .json(&json!({ "email": email }))
        .send()
        .await?;
    assert_eq!(second.status(), StatusCode::CREATED);
    let second = second.json::<serde_json::Value>().await?;

    // Idempotent: previously issued unsubscribe links must stay valid
    assert_eq!(first["data"]["token"], second["data"]["token"]);
    Ok(())
}

#[tokio::test]
async fn unknown_unsubscribe_token_is_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/newsletter/unsubscribe", server.base_url))
        .json(&json!({ "token": "f6b2a2a8-9d1c-4e6f-8f55-0f4a3e1d2c0b" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "NOT_FOUND", "{}", body);
    Ok(())
}

#[tokio::test]
async fn unknown_article_slug_is_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/articles/aucun-article-{}", server.base_url, unique_suffix()))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
