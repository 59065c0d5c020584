use axum::extract::Query;

use crate::database::models::Subscriber;
use crate::database::repositories::SubscriberRepository;
use crate::handlers::PageQuery;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/admin/newsletter/subscribers - active subscribers only
pub async fn subscriber_list(Query(query): Query<PageQuery>) -> ApiResult<Vec<Subscriber>> {
    let repo = SubscriberRepository::connect().await?;
    Ok(ApiResponse::success(repo.list_active(query.page()).await?))
}
