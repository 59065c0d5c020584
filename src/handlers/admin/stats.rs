use rust_decimal::Decimal;
use serde::Serialize;

use crate::database::repositories::{
    DonationRepository, MemberRepository, SubscriberRepository, TestimonyRepository,
};
use crate::middleware::{ApiResponse, ApiResult};

/// Dashboard counters for the admin landing page
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub pending_testimonies: i64,
    pub members: i64,
    pub donations_paid_total: Decimal,
    pub newsletter_subscribers: i64,
}

/// GET /api/admin/stats
pub async fn stats_get() -> ApiResult<DashboardStats> {
    let testimonies = TestimonyRepository::connect().await?;
    let members = MemberRepository::connect().await?;
    let donations = DonationRepository::connect().await?;
    let subscribers = SubscriberRepository::connect().await?;

    let stats = DashboardStats {
        pending_testimonies: testimonies.count_pending().await?,
        members: members.count().await?,
        donations_paid_total: donations.total_paid().await?,
        newsletter_subscribers: subscribers.count_active().await?,
    };

    Ok(ApiResponse::success(stats))
}
