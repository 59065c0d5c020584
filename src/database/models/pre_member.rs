use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Supporter who registered interest before the association was legally
/// constituted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PreMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub motivation: Option<String>,
    pub consent: bool,
    pub created_at: DateTime<Utc>,
}
