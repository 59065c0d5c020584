use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Donation;
use crate::types::PaymentStatus;

use super::Page;

#[derive(Debug)]
pub struct NewDonation {
    pub donor_name: String,
    pub email: String,
    pub amount: Decimal,
    pub message: Option<String>,
}

pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    /// Insert a donation pledge; payment status always starts `pending`
    pub async fn insert(&self, new: NewDonation) -> Result<Donation, DatabaseError> {
        let row = sqlx::query_as::<_, Donation>(
            r#"
            INSERT INTO donations (donor_name, email, amount, message, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.donor_name)
        .bind(&new.email)
        .bind(new.amount)
        .bind(&new.message)
        .bind(PaymentStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list(
        &self,
        status: Option<PaymentStatus>,
        page: Page,
    ) -> Result<Vec<Donation>, DatabaseError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, Donation>(
                    r#"
                    SELECT * FROM donations
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
                sqlx::query_as::<_, Donation>(
                    "SELECT * FROM donations ORDER BY created_at DESC LIMIT $1 OFFSET $2",
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
        status: PaymentStatus,
    ) -> Result<Donation, DatabaseError> {
        let row = sqlx::query_as::<_, Donation>(
            r#"
            UPDATE donations
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::NotFound("Donation not found".to_string()))
    }

    /// Sum of donations marked paid, for the dashboard
    pub async fn total_paid(&self) -> Result<Decimal, DatabaseError> {
        let total: (Option<Decimal>,) =
            sqlx::query_as("SELECT SUM(amount) FROM donations WHERE status = $1")
                .bind(PaymentStatus::Paid.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(total.0.unwrap_or_default())
    }
}
