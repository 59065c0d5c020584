use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::database::models::TestimonyPublic;
use crate::database::repositories::{NewTestimony, TestimonyRepository};
use crate::email::templates::{TestimonyAck, TestimonyAdminAlert};
use crate::email::Mailer;
use crate::error::ApiError;
use crate::handlers::PageQuery;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sanitize;
use crate::types::TestimonyRole;
use crate::validation::{
    require_choice, require_consent, require_email, require_length, FieldErrors,
};

#[derive(Debug, Deserialize)]
pub struct TestimonyRequest {
    pub author_name: String,
    pub author_email: String,
    pub author_role: String,
    pub content: String,
    #[serde(default)]
    pub consent: bool,
}

impl TestimonyRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "author_name", &self.author_name, 2, 100);
        require_email(&mut errors, "author_email", &self.author_email);
        require_choice(
            &mut errors,
            "author_role",
            &self.author_role,
            TestimonyRole::parse,
            "resident, parent, merchant, elected, other",
        );
        // Check the sanitized value: an all-markup body would otherwise pass
        // the minimum and be persisted empty
        require_length(&mut errors, "content", &sanitize::inline(&self.content), 10, 4000);
        require_consent(&mut errors, "consent", self.consent);
        errors.into_result()
    }
}

/// POST /api/testimonies - submit a testimony for moderation
pub async fn testimony_post(Json(payload): Json<TestimonyRequest>) -> ApiResult<TestimonyPublic> {
    payload.validate()?;

    let role = TestimonyRole::parse(&payload.author_role)
        .ok_or_else(|| ApiError::bad_request("Invalid author role"))?;

    let new = NewTestimony {
        author_name: sanitize::strip(&payload.author_name),
        author_email: payload.author_email.trim().to_lowercase(),
        author_role: role,
        content: sanitize::inline(&payload.content),
        consent: payload.consent,
    };

    let repo = TestimonyRepository::connect().await?;
    let testimony = repo.insert(new).await?;

    let mailer = Mailer::global();
    let ack = mailer.render(
        &TestimonyAck { author_name: testimony.author_name.clone() },
        &testimony.author_email,
    );
    let alert = mailer.render_for_admin(&TestimonyAdminAlert {
        author_name: testimony.author_name.clone(),
        author_role: testimony.author_role.clone(),
        content: testimony.content.clone(),
    });
    mailer.dispatch(vec![ack, alert]);

    Ok(ApiResponse::created(TestimonyPublic::from(testimony)))
}

/// GET /api/testimonies - approved testimonies, newest first
pub async fn testimony_list(Query(query): Query<PageQuery>) -> ApiResult<Vec<TestimonyPublic>> {
    let repo = TestimonyRepository::connect().await?;
    let testimonies = repo.list_approved(query.page()).await?;

    Ok(ApiResponse::success(
        testimonies.into_iter().map(TestimonyPublic::from).collect(),
    ))
}
