use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{map_unique_violation, DatabaseError, DatabaseManager};
use crate::database::models::Member;
use crate::types::MembershipType;

use super::Page;

/// Sanitized membership application ready for insertion
#[derive(Debug)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub membership_type: MembershipType,
    pub newsletter_opt_in: bool,
    pub consent: bool,
    pub message: Option<String>,
}

pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    pub async fn insert(&self, new: NewMember) -> Result<Member, DatabaseError> {
        let row = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (
                first_name, last_name, email, phone, street, postal_code, city,
                membership_type, newsletter_opt_in, consent, message
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.street)
        .bind(&new.postal_code)
        .bind(&new.city)
        .bind(new.membership_type.as_str())
        .bind(new.newsletter_opt_in)
        .bind(new.consent)
        .bind(&new.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "email"))?;

        Ok(row)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Member>, DatabaseError> {
        let rows = sqlx::query_as::<_, Member>(
            "SELECT * FROM members ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Member not found".to_string()));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
