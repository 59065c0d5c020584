use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{map_unique_violation, DatabaseError, DatabaseManager};
use crate::database::models::Article;

use super::Page;

/// Sanitized article content ready for insertion
#[derive(Debug)]
pub struct NewArticle {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body_html: String,
}

/// Partial update; `None` fields are left unchanged
#[derive(Debug, Default)]
pub struct UpdateArticle {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body_html: Option<String>,
}

pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::pool().await? })
    }

    pub async fn insert(&self, new: NewArticle) -> Result<Article, DatabaseError> {
        let row = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (slug, title, summary, body_html)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&new.slug)
        .bind(&new.title)
        .bind(&new.summary)
        .bind(&new.body_html)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "slug"))?;

        Ok(row)
    }

    pub async fn update(&self, id: Uuid, update: UpdateArticle) -> Result<Article, DatabaseError> {
        let row = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                summary = COALESCE($4, summary),
                body_html = COALESCE($5, body_html),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.slug)
        .bind(&update.title)
        .bind(&update.summary)
        .bind(&update.body_html)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "slug"))?;

        row.ok_or_else(|| DatabaseError::NotFound("Article not found".to_string()))
    }

    pub async fn set_published(&self, id: Uuid, published: bool) -> Result<Article, DatabaseError> {
        let row = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET published = $2,
                published_at = CASE WHEN $2 THEN COALESCE(published_at, now()) ELSE published_at END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(published)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::NotFound("Article not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Article not found".to_string()));
        }
        Ok(())
    }

    /// Published articles for the public site, newest first
    pub async fn list_published(&self, page: Page) -> Result<Vec<Article>, DatabaseError> {
        let rows = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            WHERE published = TRUE
            ORDER BY published_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> Result<Article, DatabaseError> {
        let row = sqlx::query_as::<_, Article>(
            "SELECT * FROM articles WHERE slug = $1 AND published = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DatabaseError::NotFound("Article not found".to_string()))
    }

    /// Admin listing includes drafts
    pub async fn list_all(&self, page: Page) -> Result<Vec<Article>, DatabaseError> {
        let rows = sqlx::query_as::<_, Article>(
            "SELECT * FROM articles ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Article, DatabaseError> {
        let row = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| DatabaseError::NotFound("Article not found".to_string()))
    }
}
