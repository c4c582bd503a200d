//! Feedback domain service.
//!
//! Implements the feedback driving ports on top of a [`FeedbackRepository`].
//! Storage failures are logged with their cause and surfaced to callers as
//! fixed, operation-specific messages.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tracing::{error, info};

use crate::domain::ports::{
    FeedbackCommand, FeedbackListing, FeedbackPageRequest, FeedbackQuery, FeedbackRepository,
    FeedbackRepositoryError, ListWindow,
};
use crate::domain::{
    Error, Feedback, FeedbackChanges, FeedbackFields, FeedbackId, FeedbackStatus, NewFeedback,
};

pub const FEEDBACK_NOT_FOUND: &str = "Feedback not found";
pub const LIST_FAILED: &str = "Database error";
pub const INSERT_FAILED: &str = "Database insert error";
pub const UPDATE_FAILED: &str = "Database update error";
pub const DELETE_FAILED: &str = "Delete error";

fn storage_error(
    operation: &'static str,
    message: &'static str,
) -> impl FnOnce(FeedbackRepositoryError) -> Error {
    move |err| {
        error!(error = %err, operation, "feedback repository failed");
        Error::internal(message)
    }
}

/// Feedback service implementing [`FeedbackCommand`] and [`FeedbackQuery`].
#[derive(Clone)]
pub struct FeedbackService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FeedbackService<R> {
    /// Create a service stamping new entries with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> FeedbackQuery for FeedbackService<R>
where
    R: FeedbackRepository,
{
    async fn list_feedback(
        &self,
        page: Option<FeedbackPageRequest>,
    ) -> Result<FeedbackListing, Error> {
        let Some(FeedbackPageRequest { limit, cursor }) = page else {
            let items = self
                .repository
                .list(ListWindow::all())
                .await
                .map_err(storage_error("list", LIST_FAILED))?;
            return Ok(FeedbackListing { items, next: None });
        };

        let window = ListWindow {
            limit: Some(limit.overfetch()),
            after: cursor.map(|cursor| cursor.into_key()),
        };
        let rows = self
            .repository
            .list(window)
            .await
            .map_err(storage_error("list", LIST_FAILED))?;
        let (items, next) = Page::from_overfetch(rows, limit, Feedback::sort_key).into_parts();
        Ok(FeedbackListing { items, next })
    }

    async fn get_feedback(&self, id: FeedbackId) -> Result<Feedback, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_error("get", LIST_FAILED))?
            .ok_or_else(|| Error::not_found(FEEDBACK_NOT_FOUND))
    }
}

#[async_trait]
impl<R> FeedbackCommand for FeedbackService<R>
where
    R: FeedbackRepository,
{
    async fn create_feedback(&self, fields: FeedbackFields) -> Result<Feedback, Error> {
        let record = NewFeedback {
            fields,
            status: FeedbackStatus::default(),
            timestamp: self.clock.utc(),
        };
        let created = self
            .repository
            .insert(&record)
            .await
            .map_err(storage_error("create", INSERT_FAILED))?;
        info!(feedback_id = %created.id(), "feedback created");
        Ok(created)
    }

    async fn update_feedback(
        &self,
        id: FeedbackId,
        changes: FeedbackChanges,
    ) -> Result<Feedback, Error> {
        self.repository
            .update(id, &changes)
            .await
            .map_err(storage_error("update", UPDATE_FAILED))?
            .ok_or_else(|| Error::not_found(FEEDBACK_NOT_FOUND))
    }

    async fn delete_feedback(&self, id: FeedbackId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(storage_error("delete", DELETE_FAILED))?;
        if !removed {
            return Err(Error::not_found(FEEDBACK_NOT_FOUND));
        }
        info!(feedback_id = %id, "feedback deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "feedback_service_tests.rs"]
mod tests;
