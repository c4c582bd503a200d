//! Driving port for the AI assistant.

use async_trait::async_trait;

use crate::domain::{AssistantAnswer, Error, Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssistantQuery: Send + Sync {
    /// Forward `question` to the chat provider and wrap its answer.
    async fn ask(&self, question: Question) -> Result<AssistantAnswer, Error>;
}
