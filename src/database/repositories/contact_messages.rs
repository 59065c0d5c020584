use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::ContactMessage;

use super::Page;

#[derive(Debug)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub consent: bool,
}

pub struct ContactMessageRepository {
    pool: PgPool,
}

impl ContactMessageRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    pub async fn insert(&self, new: NewContactMessage) -> Result<ContactMessage, DatabaseError> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, body, consent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.subject)
        .bind(&new.body)
        .bind(new.consent)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<ContactMessage>, DatabaseError> {
        let rows = sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Contact message not found".to_string()));
        }
        Ok(())
    }
}
