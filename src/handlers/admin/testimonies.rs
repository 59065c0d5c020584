use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Testimony;
use crate::database::repositories::{Page, TestimonyRepository};
use crate::email::templates::TestimonyModerated;
use crate::email::Mailer;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::ModerationStatus;

// Pagination fields are inlined rather than flattened from PageQuery:
// serde_urlencoded cannot deserialize numeric fields through #[serde(flatten)].
#[derive(Debug, Deserialize)]
pub struct TestimonyListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/admin/testimonies - full listing with optional status filter
pub async fn testimony_list(Query(query): Query<TestimonyListQuery>) -> ApiResult<Vec<Testimony>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            ModerationStatus::parse(raw)
                .ok_or_else(|| ApiError::bad_request("Unknown status filter"))?,
        ),
        None => None,
    };

    let repo = TestimonyRepository::connect().await?;
    let testimonies = repo.list(status, Page::new(query.limit, query.offset)).await?;

    Ok(ApiResponse::success(testimonies))
}

#[derive(Debug, Deserialize)]
pub struct ModerationRequest {
    pub status: String,
}

/// PUT /api/admin/testimonies/:id/status - approve or reject.
///
/// The author is notified of the outcome; like all notifications this is
/// best-effort and never blocks the response.
pub async fn testimony_set_status(
    Path(id): Path<Uuid>,
    Json(payload): Json<ModerationRequest>,
) -> ApiResult<Testimony> {
    let status = ModerationStatus::parse(&payload.status)
        .filter(|s| *s != ModerationStatus::Pending)
        .ok_or_else(|| ApiError::bad_request("Status must be 'approved' or 'rejected'"))?;

    let repo = TestimonyRepository::connect().await?;
    let testimony = repo.set_status(id, status).await?;

    let mailer = Mailer::global();
    let notice = mailer.render(
        &TestimonyModerated {
            author_name: testimony.author_name.clone(),
            approved: status == ModerationStatus::Approved,
        },
        &testimony.author_email,
    );
    mailer.dispatch(vec![notice]);

    Ok(ApiResponse::success(testimony))
}

/// DELETE /api/admin/testimonies/:id
pub async fn testimony_delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    let repo = TestimonyRepository::connect().await?;
    repo.delete(id).await?;

    Ok(ApiResponse::success(()))
}
