pub mod admin;
pub mod public;

use serde::Deserialize;

use crate::database::repositories::Page;

/// Common pagination query parameters (?limit=&offset=)
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}
