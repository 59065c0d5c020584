//! Admin review endpoints for the simpler submission tables: members,
//! pre-members and contact messages are list-and-delete only.

use axum::extract::{Path, Query};
use uuid::Uuid;

use crate::database::models::{ContactMessage, Member, PreMember};
use crate::database::repositories::{
    ContactMessageRepository, MemberRepository, PreMemberRepository,
};
use crate::handlers::PageQuery;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/admin/members
pub async fn member_list(Query(query): Query<PageQuery>) -> ApiResult<Vec<Member>> {
    let repo = MemberRepository::connect().await?;
    Ok(ApiResponse::success(repo.list(query.page()).await?))
}

/// DELETE /api/admin/members/:id
pub async fn member_delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    let repo = MemberRepository::connect().await?;
    repo.delete(id).await?;
    Ok(ApiResponse::success(()))
}

/// GET /api/admin/pre-members
pub async fn pre_member_list(Query(query): Query<PageQuery>) -> ApiResult<Vec<PreMember>> {
    let repo = PreMemberRepository::connect().await?;
    Ok(ApiResponse::success(repo.list(query.page()).await?))
}

/// DELETE /api/admin/pre-members/:id
pub async fn pre_member_delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    let repo = PreMemberRepository::connect().await?;
    repo.delete(id).await?;
    Ok(ApiResponse::success(()))
}

/// GET /api/admin/contact-messages
pub async fn contact_list(Query(query): Query<PageQuery>) -> ApiResult<Vec<ContactMessage>> {
    let repo = ContactMessageRepository::connect().await?;
    Ok(ApiResponse::success(repo.list(query.page()).await?))
}

/// DELETE /api/admin/contact-messages/:id
pub async fn contact_delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    let repo = ContactMessageRepository::connect().await?;
    repo.delete(id).await?;
    Ok(ApiResponse::success(()))
}
