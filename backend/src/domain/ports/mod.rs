//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod assistant_query;
mod chat_completion_source;
mod feedback_command;
mod feedback_query;
mod feedback_repository;

pub use assistant_query::AssistantQuery;
#[cfg(test)]
pub use assistant_query::MockAssistantQuery;
#[cfg(test)]
pub use chat_completion_source::MockChatCompletionSource;
pub use chat_completion_source::{
    ChatCompletion, ChatCompletionSource, ChatCompletionSourceError, ChatPrompt,
};
pub use feedback_command::FeedbackCommand;
#[cfg(test)]
pub use feedback_command::MockFeedbackCommand;
#[cfg(test)]
pub use feedback_query::MockFeedbackQuery;
pub use feedback_query::{FeedbackListing, FeedbackPageRequest, FeedbackQuery};
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackRepository, FeedbackRepositoryError, ListWindow};
