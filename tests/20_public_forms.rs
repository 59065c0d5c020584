mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Public form submissions are validated before any database access,
// so these cases behave the same whether or not DATABASE_URL is set.

#[tokio::test]
async fn testimony_rejects_missing_consent() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/testimonies", server.base_url))
        .json(&json!({
            "author_name": "Jeanne Martin",
            "author_email": "jeanne@example.com",
            "author_role": "resident",
            "content": "Une très belle initiative pour le quartier.",
            "consent": false
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR", "unexpected body: {}", body);
    assert!(body["field_errors"]["consent"].is_string(), "missing consent error: {}", body);
    Ok(())
}

#[tokio::test]
async fn testimony_reports_every_invalid_field() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/testimonies", server.base_url))
        .json(&json!({
            "author_name": "J",
            "author_email": "not-an-email",
            "author_role": "president",
            "content": "court",
            "consent": false
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    for field in ["author_name", "author_email", "author_role", "content", "consent"] {
        assert!(
            body["field_errors"][field].is_string(),
            "missing error for {}: {}",
            field,
            body
        );
    }
    Ok(())
}

#[tokio::test]
async fn membership_rejects_unknown_type() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/members", server.base_url))
        .json(&json!({
            "first_name": "Paul",
            "last_name": "Durand",
            "email": "paul@example.com",
            "membership_type": "platinum",
            "consent": true
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["field_errors"]["membership_type"].is_string(), "{}", body);
    Ok(())
}

#[tokio::test]
async fn contact_rejects_short_subject() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/contact", server.base_url))
        .json(&json!({
            "name": "Paul Durand",
            "email": "paul@example.com",
            "subject": "ab",
            "body": "Bonjour, j'aurais une question sur l'association.",
            "consent": true
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["field_errors"]["subject"].is_string(), "{}", body);
    Ok(())
}

#[tokio::test]
async fn donation_rejects_out_of_range_amount() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for amount in ["0.50", "150000"] {
        let res = client
            .post(format!("{}/api/donations", server.base_url))
            .json(&json!({
                "donor_name": "Paul Durand",
                "email": "paul@example.com",
                "amount": amount,
                "consent": true
            }))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "amount {} accepted", amount);
        let body = res.json::<serde_json::Value>().await?;
        assert!(body["field_errors"]["amount"].is_string(), "{}", body);
    }
    Ok(())
}

#[tokio::test]
async fn newsletter_subscribe_rejects_bad_email() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/newsletter/subscribe", server.base_url))
        .json(&json!({ "email": "nope" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_client_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/testimonies", server.base_url))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert!(
        res.status().is_client_error(),
        "expected 4xx for malformed JSON, got {}",
        res.status()
    );
    Ok(())
}
