use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::database::models::Donation;
use crate::database::repositories::{DonationRepository, NewDonation};
use crate::email::templates::{DonationAck, DonationAdminAlert};
use crate::email::Mailer;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::sanitize;
use crate::validation::{
    optional_length, require_amount_range, require_email, require_length, FieldErrors,
};

const MIN_AMOUNT: Decimal = Decimal::ONE;

#[derive(Debug, Deserialize)]
pub struct DonationRequest {
    pub donor_name: String,
    pub email: String,
    pub amount: Decimal,
    pub message: Option<String>,
}

impl DonationRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "donor_name", &self.donor_name, 2, 100);
        require_email(&mut errors, "email", &self.email);
        require_amount_range(
            &mut errors,
            "amount",
            self.amount,
            MIN_AMOUNT,
            Decimal::from(100_000),
        );
        optional_length(&mut errors, "message", self.message.as_deref(), 1000);
        errors.into_result()
    }
}

/// POST /api/donations - record a donation pledge (payment settled offline)
pub async fn donation_post(Json(payload): Json<DonationRequest>) -> ApiResult<Donation> {
    payload.validate()?;

    let new = NewDonation {
        donor_name: sanitize::strip(&payload.donor_name),
        email: payload.email.trim().to_lowercase(),
        amount: payload.amount,
        message: payload.message.as_deref().map(sanitize::inline).filter(|v| !v.is_empty()),
    };

    let repo = DonationRepository::connect().await?;
    let donation = repo.insert(new).await?;

    let mailer = Mailer::global();
    let ack = mailer.render(
        &DonationAck { donor_name: donation.donor_name.clone(), amount: donation.amount },
        &donation.email,
    );
    let alert = mailer.render_for_admin(&DonationAdminAlert {
        donor_name: donation.donor_name.clone(),
        email: donation.email.clone(),
        amount: donation.amount,
        message: donation.message.clone(),
    });
    mailer.dispatch(vec![ack, alert]);

    Ok(ApiResponse::created(donation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: &str) -> DonationRequest {
        DonationRequest {
            donor_name: "Luc Bernard".into(),
            email: "luc@example.com".into(),
            amount: Decimal::from_str_exact(amount).unwrap(),
            message: None,
        }
    }

    #[test]
    fn amount_bounds() {
        assert!(request("25.50").validate().is_ok());
        assert!(request("1").validate().is_ok());
        assert!(request("0.50").validate().is_err());
        assert!(request("100001").validate().is_err());
    }
}
