//! Driving port for reading feedback.

use async_trait::async_trait;
use pagination::{Cursor, PageLimit};

use crate::domain::{Error, Feedback, FeedbackId, FeedbackSortKey};

/// Optional keyset paging for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPageRequest {
    pub limit: PageLimit,
    pub cursor: Option<Cursor<FeedbackSortKey>>,
}

/// A listing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackListing {
    pub items: Vec<Feedback>,
    /// Present when a paged request has further rows.
    pub next: Option<Cursor<FeedbackSortKey>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackQuery: Send + Sync {
    /// List entries newest first; the whole collection when `page` is `None`.
    async fn list_feedback(&self, page: Option<FeedbackPageRequest>)
    -> Result<FeedbackListing, Error>;

    /// Fetch one entry.
    async fn get_feedback(&self, id: FeedbackId) -> Result<Feedback, Error>;
}
