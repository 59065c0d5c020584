use axum::Json;
use serde::Deserialize;

use crate::database::models::PreMember;
use crate::database::repositories::{NewPreMember, PreMemberRepository};
use crate::email::templates::{PreMembershipAck, PreMembershipAdminAlert};
use crate::email::Mailer;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sanitize;
use crate::validation::{
    optional_length, require_consent, require_email, require_length, FieldErrors,
};

#[derive(Debug, Deserialize)]
pub struct PreMembershipRequest {
    pub name: String,
    pub email: String,
    pub city: Option<String>,
    pub motivation: Option<String>,
    #[serde(default)]
    pub consent: bool,
}

impl PreMembershipRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "name", &self.name, 2, 100);
        require_email(&mut errors, "email", &self.email);
        optional_length(&mut errors, "city", self.city.as_deref(), 100);
        optional_length(&mut errors, "motivation", self.motivation.as_deref(), 2000);
        require_consent(&mut errors, "consent", self.consent);
        errors.into_result()
    }
}

/// POST /api/pre-members - early supporter registration
pub async fn pre_member_post(Json(payload): Json<PreMembershipRequest>) -> ApiResult<PreMember> {
    payload.validate()?;

    let new = NewPreMember {
        name: sanitize::strip(&payload.name),
        email: payload.email.trim().to_lowercase(),
        city: payload.city.as_deref().map(sanitize::strip).filter(|v| !v.is_empty()),
        motivation: payload
            .motivation
            .as_deref()
            .map(sanitize::inline)
            .filter(|v| !v.is_empty()),
        consent: payload.consent,
    };

    let repo = PreMemberRepository::connect().await?;
    let pre_member = repo.insert(new).await?;

    let mailer = Mailer::global();
    let ack = mailer.render(
        &PreMembershipAck { name: pre_member.name.clone() },
        &pre_member.email,
    );
    let alert = mailer.render_for_admin(&PreMembershipAdminAlert {
        name: pre_member.name.clone(),
        email: pre_member.email.clone(),
        city: pre_member.city.clone(),
    });
    mailer.dispatch(vec![ack, alert]);

    Ok(ApiResponse::created(pre_member))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_required() {
        let req = PreMembershipRequest {
            name: "Paul".into(),
            email: "paul@example.com".into(),
            city: None,
            motivation: None,
            consent: false,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn minimal_valid_request() {
        let req = PreMembershipRequest {
            name: "Paul".into(),
            email: "paul@example.com".into(),
            city: None,
            motivation: None,
            consent: true,
        };
        assert!(req.validate().is_ok());
    }
}
