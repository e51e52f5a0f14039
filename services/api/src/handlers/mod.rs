use serde::Deserialize;

use snapchef_domain::pagination::PageRequest;

pub mod auth;
pub mod comment;
pub mod health;
pub mod ingredient;
pub mod like;
pub mod moderation;
pub mod recipe;
pub mod user;

/// `?page=&limit=` accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(q: PageQuery) -> Self {
        PageRequest::new(q.page, q.limit)
    }
}
