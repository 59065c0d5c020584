use axum::extract::{Path, Query};

use crate::database::models::Article;
use crate::database::repositories::ArticleRepository;
use crate::handlers::PageQuery;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/articles - published articles, newest first
pub async fn article_list(Query(query): Query<PageQuery>) -> ApiResult<Vec<Article>> {
    let repo = ArticleRepository::connect().await?;
    let articles = repo.list_published(query.page()).await?;

    Ok(ApiResponse::success(articles))
}

/// GET /api/articles/:slug - one published article
pub async fn article_get(Path(slug): Path<String>) -> ApiResult<Article> {
    let repo = ArticleRepository::connect().await?;
    let article = repo.find_published_by_slug(&slug).await?;

    Ok(ApiResponse::success(article))
}
