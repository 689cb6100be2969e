//! Query-string parameter types shared by handlers.

use serde::Deserialize;
use trifold_core::pagination::DEFAULT_PAGE;

/// `?page=n` on paginated trivia listings.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }
}
