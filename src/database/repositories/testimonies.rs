use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Testimony;
use crate::types::{ModerationStatus, TestimonyRole};

use super::Page;

/// Sanitized testimony ready for insertion
#[derive(Debug)]
pub struct NewTestimony {
    pub author_name: String,
    pub author_email: String,
    pub author_role: TestimonyRole,
    pub content: String,
    pub consent: bool,
}

pub struct TestimonyRepository {
    pool: PgPool,
}

impl TestimonyRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    /// Insert a new submission; moderation status always starts `pending`
    pub async fn insert(&self, new: NewTestimony) -> Result<Testimony, DatabaseError> {
        let row = sqlx::query_as::<_, Testimony>(
            r#"
            INSERT INTO testimonies (author_name, author_email, author_role, content, consent, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new.author_name)
        .bind(&new.author_email)
        .bind(new.author_role.as_str())
        .bind(&new.content)
        .bind(new.consent)
        .bind(ModerationStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Approved testimonies for the public site, newest first
    pub async fn list_approved(&self, page: Page) -> Result<Vec<Testimony>, DatabaseError> {
        let rows = sqlx::query_as::<_, Testimony>(
            r#"
            SELECT * FROM testimonies
            WHERE status = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(ModerationStatus::Approved.as_str())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Admin listing, optionally filtered by moderation status
    pub async fn list(
        &self,
        status: Option<ModerationStatus>,
        page: Page,
    ) -> Result<Vec<Testimony>, DatabaseError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, Testimony>(
                    r#"
                    SELECT * FROM testimonies
                    WHERE status = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(status.as_str())
                .bind(page.limit)
                .bind(page.offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Testimony>(
                    "SELECT * FROM testimonies ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(page.limit)
                .bind(page.offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ModerationStatus,
    ) -> Result<Testimony, DatabaseError> {
        let row = sqlx::query_as::<_, Testimony>(
            r#"
            UPDATE testimonies
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::NotFound("Testimony not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM testimonies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Testimony not found".to_string()));
        }
        Ok(())
    }

    pub async fn count_pending(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM testimonies WHERE status = $1")
                .bind(ModerationStatus::Pending.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count.0)
    }
}
