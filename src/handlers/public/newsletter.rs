use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::repositories::SubscriberRepository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validation::{require_email, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub token: Uuid,
}

/// What the subscriber gets back; the token feeds the unsubscribe link
#[derive(Debug, Serialize)]
pub struct SubscriptionInfo {
    pub email: String,
    pub token: Uuid,
}

/// POST /api/newsletter/subscribe - idempotent subscription
pub async fn subscribe_post(Json(payload): Json<SubscribeRequest>) -> ApiResult<SubscriptionInfo> {
    let mut errors = FieldErrors::new();
    require_email(&mut errors, "email", &payload.email);
    errors.into_result()?;

    let repo = SubscriberRepository::connect().await?;
    let subscriber = repo.subscribe(payload.email.trim()).await?;

    Ok(ApiResponse::created(SubscriptionInfo {
        email: subscriber.email,
        token: subscriber.token,
    }))
}

/// POST /api/newsletter/unsubscribe - by footer-link token
pub async fn unsubscribe_post(Json(payload): Json<UnsubscribeRequest>) -> ApiResult<()> {
    let repo = SubscriberRepository::connect().await?;
    repo.unsubscribe(payload.token).await?;

    Ok(ApiResponse::success(()))
}
