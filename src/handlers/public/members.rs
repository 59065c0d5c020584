use axum::Json;
use serde::Deserialize;

use crate::database::models::Member;
use crate::database::repositories::{MemberRepository, NewMember};
use crate::email::templates::{MembershipAck, MembershipAdminAlert};
use crate::email::Mailer;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sanitize;
use crate::types::MembershipType;
use crate::validation::{
    optional_length, require_choice, require_consent, require_email, require_length, FieldErrors,
};

#[derive(Debug, Deserialize)]
pub struct MembershipRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub membership_type: String,
    #[serde(default)]
    pub newsletter_opt_in: bool,
    #[serde(default)]
    pub consent: bool,
    pub message: Option<String>,
}

impl MembershipRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "first_name", &self.first_name, 2, 100);
        require_length(&mut errors, "last_name", &self.last_name, 2, 100);
        require_email(&mut errors, "email", &self.email);
        optional_length(&mut errors, "phone", self.phone.as_deref(), 30);
        optional_length(&mut errors, "street", self.street.as_deref(), 200);
        optional_length(&mut errors, "postal_code", self.postal_code.as_deref(), 10);
        optional_length(&mut errors, "city", self.city.as_deref(), 100);
        require_choice(
            &mut errors,
            "membership_type",
            &self.membership_type,
            MembershipType::parse,
            "individual, family, supporter",
        );
        optional_length(&mut errors, "message", self.message.as_deref(), 2000);
        require_consent(&mut errors, "consent", self.consent);
        errors.into_result()
    }
}

fn clean_optional(value: Option<&str>) -> Option<String> {
    value.map(sanitize::strip).filter(|v| !v.is_empty())
}

/// POST /api/members - membership application
pub async fn member_post(Json(payload): Json<MembershipRequest>) -> ApiResult<Member> {
    payload.validate()?;

    let membership_type = MembershipType::parse(&payload.membership_type)
        .ok_or_else(|| ApiError::bad_request("Invalid membership type"))?;

    let new = NewMember {
        first_name: sanitize::strip(&payload.first_name),
        last_name: sanitize::strip(&payload.last_name),
        email: payload.email.trim().to_lowercase(),
        phone: clean_optional(payload.phone.as_deref()),
        street: clean_optional(payload.street.as_deref()),
        postal_code: clean_optional(payload.postal_code.as_deref()),
        city: clean_optional(payload.city.as_deref()),
        membership_type,
        newsletter_opt_in: payload.newsletter_opt_in,
        consent: payload.consent,
        message: payload.message.as_deref().map(sanitize::inline).filter(|v| !v.is_empty()),
    };

    let repo = MemberRepository::connect().await?;
    let member = repo.insert(new).await?;

    let mailer = Mailer::global();
    let ack = mailer.render(
        &MembershipAck { first_name: member.first_name.clone() },
        &member.email,
    );
    let alert = mailer.render_for_admin(&MembershipAdminAlert {
        first_name: member.first_name.clone(),
        last_name: member.last_name.clone(),
        email: member.email.clone(),
        membership_type: member.membership_type.clone(),
    });
    mailer.dispatch(vec![ack, alert]);

    Ok(ApiResponse::created(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> MembershipRequest {
        MembershipRequest {
            first_name: "Marie".into(),
            last_name: "Durand".into(),
            email: "marie@example.com".into(),
            phone: None,
            street: None,
            postal_code: None,
            city: Some("Lyon".into()),
            membership_type: "individual".into(),
            newsletter_opt_in: true,
            consent: true,
            message: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn unknown_membership_type_rejected() {
        let mut req = valid_request();
        req.membership_type = "corporate".into();
        let err = req.validate().unwrap_err();
        assert!(err.to_json()["field_errors"]["membership_type"].is_string());
    }

    #[test]
    fn overlong_optional_field_rejected() {
        let mut req = valid_request();
        req.postal_code = Some("1".repeat(11));
        assert!(req.validate().is_err());
    }

    #[test]
    fn clean_optional_drops_blank_values() {
        assert_eq!(clean_optional(Some("  ")), None);
        assert_eq!(clean_optional(Some("<b>Lyon</b>")), Some("Lyon".to_string()));
        assert_eq!(clean_optional(None), None);
    }
}
