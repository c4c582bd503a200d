//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on domain ports
//! and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AssistantQuery, FeedbackCommand, FeedbackQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub feedback: Arc<dyn FeedbackCommand>,
    pub feedback_query: Arc<dyn FeedbackQuery>,
    pub assistant: Arc<dyn AssistantQuery>,
}

impl HttpState {
    pub fn new(
        feedback: Arc<dyn FeedbackCommand>,
        feedback_query: Arc<dyn FeedbackQuery>,
        assistant: Arc<dyn AssistantQuery>,
    ) -> Self {
        Self {
            feedback,
            feedback_query,
            assistant,
        }
    }
}
