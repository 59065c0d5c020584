use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimony {
    pub id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub author_role: String,
    pub content: String,
    pub consent: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection served by the public listing endpoint. The author's email
/// address never leaves the admin console.
#[derive(Debug, Clone, Serialize)]
pub struct TestimonyPublic {
    pub id: Uuid,
    pub author_name: String,
    pub author_role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Testimony> for TestimonyPublic {
    fn from(t: Testimony) -> Self {
        Self {
            id: t.id,
            author_name: t.author_name,
            author_role: t.author_role,
            content: t.content,
            created_at: t.created_at,
        }
    }
}
