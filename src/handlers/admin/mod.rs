pub mod articles;
pub mod donations;
pub mod newsletter;
pub mod session;
pub mod stats;
pub mod submissions;
pub mod testimonies;
