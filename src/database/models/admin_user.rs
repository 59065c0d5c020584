use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Admin details safe to return to the client (no password hash)
#[derive(Debug, Clone, Serialize)]
pub struct AdminInfo {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<AdminUser> for AdminInfo {
    fn from(a: AdminUser) -> Self {
        Self {
            id: a.id,
            email: a.email,
            display_name: a.display_name,
            last_login_at: a.last_login_at,
        }
    }
}
