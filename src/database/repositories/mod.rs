//! One repository per table. Each is a thin struct over the shared pool
//! with typed insert/select/update/delete methods; SQL stays here and out
//! of the handlers.

pub mod admin_users;
pub mod articles;
pub mod contact_messages;
pub mod donations;
pub mod members;
pub mod pre_members;
pub mod subscribers;
pub mod testimonies;

pub use admin_users::AdminUserRepository;
pub use articles::{ArticleRepository, NewArticle, UpdateArticle};
pub use contact_messages::{ContactMessageRepository, NewContactMessage};
pub use donations::{DonationRepository, NewDonation};
pub use members::{MemberRepository, NewMember};
pub use pre_members::{NewPreMember, PreMemberRepository};
pub use subscribers::SubscriberRepository;
pub use testimonies::{NewTestimony, TestimonyRepository};

use crate::config;

/// Pagination window computed from query parameters, clamped to the
/// configured maximum page size.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let api = &config::config().api;
        let limit = limit.unwrap_or(api.default_page_size).clamp(1, api.max_page_size);
        let offset = offset.unwrap_or(0).max(0);
        Self { limit, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_to_config() {
        let page = Page::new(Some(10_000), Some(-5));
        assert!(page.limit <= config::config().api.max_page_size);
        assert_eq!(page.offset, 0);

        let page = Page::new(None, None);
        assert_eq!(page.limit, config::config().api.default_page_size);
    }
}
