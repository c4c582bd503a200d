//! Domain model and services.
//!
//! Everything here is transport agnostic: inbound adapters call the driving
//! ports in [`ports`] and outbound adapters implement the driven ones.

pub mod assistant;
pub mod error;
pub mod feedback;
pub mod feedback_service;
pub mod ports;
pub mod trace_id;

pub use self::assistant::{
    AssistantAnswer, AssistantService, CHAT_MODEL, CHAT_TEMPERATURE, Question, QuestionMissing,
};
pub use self::error::{Error, ErrorCode};
pub use self::feedback::{
    Feedback, FeedbackChanges, FeedbackFields, FeedbackId, FeedbackIdParseError, FeedbackSortKey,
    FeedbackStatus, FeedbackStatusParseError, FeedbackValidationError, NewFeedback,
};
pub use self::feedback_service::FeedbackService;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
