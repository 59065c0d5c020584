use axum::Json;
use serde::Deserialize;

use crate::database::models::ContactMessage;
use crate::database::repositories::{ContactMessageRepository, NewContactMessage};
use crate::email::templates::{ContactAck, ContactAdminAlert};
use crate::email::Mailer;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sanitize;
use crate::validation::{require_consent, require_email, require_length, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub consent: bool,
}

impl ContactRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "name", &self.name, 2, 100);
        require_email(&mut errors, "email", &self.email);
        require_length(&mut errors, "subject", &self.subject, 3, 150);
        require_length(&mut errors, "body", &self.body, 10, 5000);
        require_consent(&mut errors, "consent", self.consent);
        errors.into_result()
    }
}

/// POST /api/contact - contact form submission
pub async fn contact_post(Json(payload): Json<ContactRequest>) -> ApiResult<ContactMessage> {
    payload.validate()?;

    let new = NewContactMessage {
        name: sanitize::strip(&payload.name),
        email: payload.email.trim().to_lowercase(),
        subject: sanitize::strip(&payload.subject),
        body: sanitize::inline(&payload.body),
        consent: payload.consent,
    };

    let repo = ContactMessageRepository::connect().await?;
    let message = repo.insert(new).await?;

    let mailer = Mailer::global();
    let ack = mailer.render(
        &ContactAck { name: message.name.clone(), subject_line: message.subject.clone() },
        &message.email,
    );
    let alert = mailer.render_for_admin(&ContactAdminAlert {
        name: message.name.clone(),
        email: message.email.clone(),
        subject: message.subject.clone(),
        body: message.body.clone(),
    });
    mailer.dispatch(vec![ack, alert]);

    Ok(ApiResponse::created(message))
}
