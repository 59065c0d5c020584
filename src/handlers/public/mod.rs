pub mod articles;
pub mod contact;
pub mod donations;
pub mod members;
pub mod newsletter;
pub mod pre_members;
pub mod testimonies;
