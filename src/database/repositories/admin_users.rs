use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::AdminUser;

pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, DatabaseError> {
        let row = sqlx::query_as::<_, AdminUser>(
            "SELECT * FROM admin_users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, DatabaseError> {
        let row = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn touch_last_login(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE admin_users SET last_login_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
