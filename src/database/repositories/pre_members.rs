use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{map_unique_violation, DatabaseError, DatabaseManager};
use crate::database::models::PreMember;

use super::Page;

#[derive(Debug)]
pub struct NewPreMember {
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub motivation: Option<String>,
    pub consent: bool,
}

pub struct PreMemberRepository {
    pool: PgPool,
}

impl PreMemberRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    pub async fn insert(&self, new: NewPreMember) -> Result<PreMember, DatabaseError> {
        let row = sqlx::query_as::<_, PreMember>(
            r#"
            INSERT INTO pre_members (name, email, city, motivation, consent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.city)
        .bind(&new.motivation)
        .bind(new.consent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email"))?;

        Ok(row)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<PreMember>, DatabaseError> {
        let rows = sqlx::query_as::<_, PreMember>(
            "SELECT * FROM pre_members ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM pre_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Pre-member not found".to_string()));
        }
        Ok(())
    }
}
