use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Donation;
use crate::database::repositories::{DonationRepository, Page};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::PaymentStatus;

// Pagination fields inlined for the same reason as TestimonyListQuery:
// numeric fields do not survive #[serde(flatten)] in query strings.
#[derive(Debug, Deserialize)]
pub struct DonationListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/admin/donations - listing with optional payment status filter
pub async fn donation_list(Query(query): Query<DonationListQuery>) -> ApiResult<Vec<Donation>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            PaymentStatus::parse(raw)
                .ok_or_else(|| ApiError::bad_request("Unknown status filter"))?,
        ),
        None => None,
    };

    let repo = DonationRepository::connect().await?;
    let donations = repo.list(status, Page::new(query.limit, query.offset)).await?;

    Ok(ApiResponse::success(donations))
}

#[derive(Debug, Deserialize)]
pub struct PaymentUpdateRequest {
    pub status: String,
}

/// PUT /api/admin/donations/:id/status - mark a pledge paid or failed
pub async fn donation_set_status(
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentUpdateRequest>,
) -> ApiResult<Donation> {
    let status = PaymentStatus::parse(&payload.status)
        .filter(|s| *s != PaymentStatus::Pending)
        .ok_or_else(|| ApiError::bad_request("Status must be 'paid' or 'failed'"))?;

    let repo = DonationRepository::connect().await?;
    let donation = repo.set_status(id, status).await?;

    Ok(ApiResponse::success(donation))
}
