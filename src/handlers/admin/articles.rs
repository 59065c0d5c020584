use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Article;
use crate::database::repositories::{ArticleRepository, NewArticle, UpdateArticle};
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sanitize;
use crate::validation::{optional_length, require_length, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct ArticleCreateRequest {
    pub title: String,
    pub summary: String,
    pub body_html: String,
    /// Optional explicit slug; derived from the title when absent
    pub slug: Option<String>,
}

impl ArticleCreateRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "title", &self.title, 3, 200);
        require_length(&mut errors, "summary", &self.summary, 10, 500);
        require_length(&mut errors, "body_html", &self.body_html, 20, 100_000);
        optional_length(&mut errors, "slug", self.slug.as_deref(), 200);
        errors.into_result()
    }
}

/// Lowercase ASCII slug: alphanumerics kept, runs of anything else
/// collapsed to single hyphens.
fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress leading hyphen

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// POST /api/admin/articles - create a draft
pub async fn article_post(Json(payload): Json<ArticleCreateRequest>) -> ApiResult<Article> {
    payload.validate()?;

    let slug = match payload.slug.as_deref() {
        Some(s) if !s.trim().is_empty() => slugify(s),
        _ => slugify(&payload.title),
    };
    if slug.is_empty() {
        return Err(ApiError::bad_request("Title does not produce a usable slug"));
    }

    let new = NewArticle {
        slug,
        title: sanitize::strip(&payload.title),
        summary: sanitize::strip(&payload.summary),
        body_html: sanitize::article(&payload.body_html),
    };

    let repo = ArticleRepository::connect().await?;
    let article = repo.insert(new).await?;

    Ok(ApiResponse::created(article))
}

#[derive(Debug, Deserialize)]
pub struct ArticleUpdateRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body_html: Option<String>,
    pub slug: Option<String>,
}

impl ArticleUpdateRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(title) = self.title.as_deref() {
            require_length(&mut errors, "title", title, 3, 200);
        }
        if let Some(summary) = self.summary.as_deref() {
            require_length(&mut errors, "summary", summary, 10, 500);
        }
        if let Some(body) = self.body_html.as_deref() {
            require_length(&mut errors, "body_html", body, 20, 100_000);
        }
        optional_length(&mut errors, "slug", self.slug.as_deref(), 200);
        errors.into_result()
    }
}

/// PUT /api/admin/articles/:id - partial update of a draft or published article
pub async fn article_put(
    Path(id): Path<Uuid>,
    Json(payload): Json<ArticleUpdateRequest>,
) -> ApiResult<Article> {
    payload.validate()?;

    let slug = match payload.slug.as_deref() {
        Some(raw) => {
            let slug = slugify(raw);
            if slug.is_empty() {
                return Err(ApiError::bad_request("Slug does not produce a usable value"));
            }
            Some(slug)
        }
        None => None,
    };

    let update = UpdateArticle {
        slug,
        title: payload.title.as_deref().map(sanitize::strip),
        summary: payload.summary.as_deref().map(sanitize::strip),
        body_html: payload.body_html.as_deref().map(sanitize::article),
    };

    let repo = ArticleRepository::connect().await?;
    let article = repo.update(id, update).await?;

    Ok(ApiResponse::success(article))
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

/// PUT /api/admin/articles/:id/publish - toggle public visibility
pub async fn article_publish(
    Path(id): Path<Uuid>,
    Json(payload): Json<PublishRequest>,
) -> ApiResult<Article> {
    let repo = ArticleRepository::connect().await?;
    let article = repo.set_published(id, payload.published).await?;

    Ok(ApiResponse::success(article))
}

/// GET /api/admin/articles - drafts included
pub async fn article_list(Query(query): Query<PageQuery>) -> ApiResult<Vec<Article>> {
    let repo = ArticleRepository::connect().await?;
    Ok(ApiResponse::success(repo.list_all(query.page()).await?))
}

/// GET /api/admin/articles/:id
pub async fn article_get(Path(id): Path<Uuid>) -> ApiResult<Article> {
    let repo = ArticleRepository::connect().await?;
    Ok(ApiResponse::success(repo.find_by_id(id).await?))
}

/// DELETE /api/admin/articles/:id
pub async fn article_delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    let repo = ArticleRepository::connect().await?;
    repo.delete(id).await?;
    Ok(ApiResponse::success(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("Fête de quartier 2025 !"), "f-te-de-quartier-2025");
        assert_eq!(slugify("Hello, World"), "hello-world");
        assert_eq!(slugify("--already--slugged--"), "already-slugged");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn create_request_validates_lengths() {
        let req = ArticleCreateRequest {
            title: "Ok".into(), // too short
            summary: "Un résumé suffisant pour l'article.".into(),
            body_html: "<p>Un corps d'article suffisamment long.</p>".into(),
            slug: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_request_allows_partial() {
        let req = ArticleUpdateRequest {
            title: None,
            summary: None,
            body_html: None,
            slug: None,
        };
        assert!(req.validate().is_ok());
    }

    // The slug check runs before any database access, so the handler can be
    // exercised directly
    #[tokio::test]
    async fn update_rejects_unusable_slug() {
        let payload = ArticleUpdateRequest {
            title: None,
            summary: None,
            body_html: None,
            slug: Some("???".into()),
        };
        let err = article_put(Path(Uuid::new_v4()), Json(payload)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
