//! AI assistant: forwards a visitor's question to the chat provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{error, warn};

use crate::domain::Error;
use crate::domain::ports::{
    AssistantQuery, ChatCompletionSource, ChatCompletionSourceError, ChatPrompt,
};

/// Model requested from the provider and echoed to clients.
pub const CHAT_MODEL: &str = "llama3-8b-8192";
/// Sampling temperature sent with every prompt.
pub const CHAT_TEMPERATURE: f32 = 0.7;
/// Message returned for any provider failure.
pub const PROVIDER_FAILED: &str = "Failed to fetch answer from Groq API";
pub const QUESTION_REQUIRED: &str = "Question is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("question is required")]
pub struct QuestionMissing;

/// A non-empty question.
///
/// # Examples
/// ```
/// use feedback_backend::domain::Question;
///
/// assert!(Question::new(Some("  What is new?  ")).is_ok());
/// assert!(Question::new(Some("")).is_err());
/// assert!(Question::new(None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Accept any non-empty value, kept as given.
    pub fn new(raw: Option<&str>) -> Result<Self, QuestionMissing> {
        match raw {
            Some(text) if !text.is_empty() => Ok(Self(text.to_owned())),
            _ => Err(QuestionMissing),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The provider's answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantAnswer {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
    pub model: String,
}

fn log_provider_failure(err: &ChatCompletionSourceError) {
    match err {
        ChatCompletionSourceError::NotConfigured => {
            warn!(error = %err, "chat provider request skipped");
        }
        _ => error!(error = %err, "chat provider request failed"),
    }
}

/// Assistant service implementing [`AssistantQuery`].
#[derive(Clone)]
pub struct AssistantService<S: ?Sized> {
    source: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: ?Sized> AssistantService<S> {
    pub fn new(source: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }
}

#[async_trait]
impl<S> AssistantQuery for AssistantService<S>
where
    S: ChatCompletionSource + ?Sized,
{
    async fn ask(&self, question: Question) -> Result<AssistantAnswer, Error> {
        let prompt = ChatPrompt {
            model: CHAT_MODEL.to_owned(),
            question: question.as_str().to_owned(),
            temperature: CHAT_TEMPERATURE,
        };
        let completion = self.source.complete(&prompt).await.map_err(|err| {
            log_provider_failure(&err);
            Error::internal(PROVIDER_FAILED)
        })?;

        Ok(AssistantAnswer {
            question: prompt.question,
            answer: completion.content,
            timestamp: self.clock.utc(),
            model: prompt.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{ChatCompletion, MockChatCompletionSource};
    use crate::test_support::FixtureClock;
    use chrono::TimeZone;
    use rstest::rstest;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn service(source: MockChatCompletionSource) -> AssistantService<MockChatCompletionSource> {
        AssistantService::new(Arc::new(source), Arc::new(FixtureClock::new(fixed_now())))
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn missing_questions_are_rejected(#[case] raw: Option<&str>) {
        assert_eq!(Question::new(raw), Err(QuestionMissing));
    }

    #[rstest]
    fn whitespace_question_is_present() {
        let question = Question::new(Some(" \n")).expect("present question");
        assert_eq!(question.as_str(), " \n");
    }

    #[tokio::test]
    async fn sends_fixed_model_and_temperature() {
        let mut source = MockChatCompletionSource::new();
        source
            .expect_complete()
            .withf(|prompt| {
                prompt.model == CHAT_MODEL
                    && (prompt.temperature - CHAT_TEMPERATURE).abs() < f32::EPSILON
                    && prompt.question == "How do I reset?"
            })
            .times(1)
            .return_once(|_| {
                Ok(ChatCompletion {
                    content: "Open settings.".to_owned(),
                })
            });

        let question = Question::new(Some("How do I reset?")).expect("question");
        let answer = service(source).ask(question).await.expect("answer");

        assert_eq!(answer.answer, "Open settings.");
        assert_eq!(answer.question, "How do I reset?");
        assert_eq!(answer.model, CHAT_MODEL);
        assert_eq!(answer.timestamp, fixed_now());
    }

    #[rstest]
    #[case(ChatCompletionSourceError::not_configured())]
    #[case(ChatCompletionSourceError::unauthorized("bad key"))]
    #[case(ChatCompletionSourceError::rate_limited("slow down"))]
    #[case(ChatCompletionSourceError::timeout("30s elapsed"))]
    #[case(ChatCompletionSourceError::decode("no choices"))]
    #[tokio::test]
    async fn provider_failures_share_one_message(#[case] failure: ChatCompletionSourceError) {
        let mut source = MockChatCompletionSource::new();
        source.expect_complete().return_once(move |_| Err(failure));

        let question = Question::new(Some("Hi")).expect("question");
        let err = service(source).ask(question).await.expect_err("fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), PROVIDER_FAILED);
    }
}
