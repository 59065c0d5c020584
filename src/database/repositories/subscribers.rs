use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Subscriber;

use super::Page;

pub struct SubscriberRepository {
    pool: PgPool,
}

impl SubscriberRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    /// Subscribe an address. Re-subscribing is idempotent: an existing row
    /// keeps its token and gets its unsubscribed_at flag cleared.
    pub async fn subscribe(&self, email: &str) -> Result<Subscriber, DatabaseError> {
        let row = sqlx::query_as::<_, Subscriber>(
            r#"
            INSERT INTO newsletter_subscribers (email)
            VALUES (lower($1))
            ON CONFLICT (email)
            DO UPDATE SET unsubscribed_at = NULL
            RETURNING *
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn unsubscribe(&self, token: Uuid) -> Result<Subscriber, DatabaseError> {
        let row = sqlx::query_as::<_, Subscriber>(
            r#"
            UPDATE newsletter_subscribers
            SET unsubscribed_at = now()
            WHERE token = $1
            RETURNING *
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::NotFound("Unknown unsubscribe token".to_string()))
    }

    /// Active subscribers only
    pub async fn list_active(&self, page: Page) -> Result<Vec<Subscriber>, DatabaseError> {
        let rows = sqlx::query_as::<_, Subscriber>(
            r#"
            SELECT * FROM newsletter_subscribers
            WHERE unsubscribed_at IS NULL
            ORDER BY subscribed_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count_active(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM newsletter_subscribers WHERE unsubscribed_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }
}
