//! Port for feedback persistence.

use async_trait::async_trait;

use crate::domain::{Feedback, FeedbackChanges, FeedbackId, FeedbackSortKey, NewFeedback};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feedback repository adapters.
    pub enum FeedbackRepositoryError {
        /// No connection to the store could be obtained.
        Connection { message: String } =>
            "feedback repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "feedback repository query failed: {message}",
    }
}

/// Slice of the newest-first listing to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListWindow {
    /// Maximum number of rows; `None` reads everything.
    pub limit: Option<i64>,
    /// Only rows strictly after this position are returned.
    pub after: Option<FeedbackSortKey>,
}

impl ListWindow {
    /// Every stored row.
    pub const fn all() -> Self {
        Self {
            limit: None,
            after: None,
        }
    }
}

/// Durable storage for feedback entries.
///
/// Listings are ordered by timestamp descending, then id descending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Read rows in listing order.
    async fn list(&self, window: ListWindow) -> Result<Vec<Feedback>, FeedbackRepositoryError>;

    /// Find a row by id.
    async fn find_by_id(&self, id: FeedbackId)
    -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Insert a row and return it with its assigned id.
    async fn insert(&self, record: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError>;

    /// Replace the text fields (and the status when given) of a row.
    ///
    /// Returns `None` when no row has `id`.
    async fn update(
        &self,
        id: FeedbackId,
        changes: &FeedbackChanges,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Remove a row, reporting whether one existed.
    async fn delete(&self, id: FeedbackId) -> Result<bool, FeedbackRepositoryError>;
}
