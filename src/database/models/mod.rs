pub mod admin_user;
pub mod article;
pub mod contact_message;
pub mod donation;
pub mod member;
pub mod pre_member;
pub mod subscriber;
pub mod testimony;

pub use admin_user::{AdminInfo, AdminUser};
pub use article::Article;
pub use contact_message::ContactMessage;
pub use donation::Donation;
pub use member::Member;
pub use pre_member::PreMember;
pub use subscriber::Subscriber;
pub use testimony::{Testimony, TestimonyPublic};
