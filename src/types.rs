//! Shared domain types used across the codebase

use serde::{Deserialize, Serialize};

/// Workflow state gating public visibility of a testimony.
/// Submissions always start out as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ModerationStatus::Pending),
            "approved" => Some(ModerationStatus::Approved),
            "rejected" => Some(ModerationStatus::Rejected),
            _ => None,
        }
    }
}

/// Payment state of a donation. Transitions are admin-driven; there is no
/// payment gateway callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// Membership tiers offered on the public form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Individual,
    Family,
    Supporter,
}

impl MembershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Individual => "individual",
            MembershipType::Family => "family",
            MembershipType::Supporter => "supporter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "individual" => Some(MembershipType::Individual),
            "family" => Some(MembershipType::Family),
            "supporter" => Some(MembershipType::Supporter),
            _ => None,
        }
    }
}

/// Relationship of a testimony author to the association's cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestimonyRole {
    Resident,
    Parent,
    Merchant,
    Elected,
    Other,
}

impl TestimonyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonyRole::Resident => "resident",
            TestimonyRole::Parent => "parent",
            TestimonyRole::Merchant => "merchant",
            TestimonyRole::Elected => "elected",
            TestimonyRole::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "resident" => Some(TestimonyRole::Resident),
            "parent" => Some(TestimonyRole::Parent),
            "merchant" => Some(TestimonyRole::Merchant),
            "elected" => Some(TestimonyRole::Elected),
            "other" => Some(TestimonyRole::Other),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderation_status_round_trips() {
        for s in ["pending", "approved", "rejected"] {
            assert_eq!(ModerationStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(ModerationStatus::parse("deleted").is_none());
    }

    #[test]
    fn payment_status_round_trips() {
        for s in ["pending", "paid", "failed"] {
            assert_eq!(PaymentStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(PaymentStatus::parse("refunded").is_none());
    }

    #[test]
    fn membership_type_rejects_unknown() {
        assert!(MembershipType::parse("corporate").is_none());
        assert_eq!(MembershipType::parse("family"), Some(MembershipType::Family));
    }
}
