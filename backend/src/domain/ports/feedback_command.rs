//! Driving port for feedback mutations.

use async_trait::async_trait;

use crate::domain::{Error, Feedback, FeedbackChanges, FeedbackFields, FeedbackId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Store a new `pending` entry stamped with the current time.
    async fn create_feedback(&self, fields: FeedbackFields) -> Result<Feedback, Error>;

    /// Replace an entry's text and optionally its status.
    async fn update_feedback(
        &self,
        id: FeedbackId,
        changes: FeedbackChanges,
    ) -> Result<Feedback, Error>;

    /// Remove an entry.
    async fn delete_feedback(&self, id: FeedbackId) -> Result<(), Error>;
}
