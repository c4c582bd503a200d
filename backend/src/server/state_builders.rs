//! Builders wiring outbound adapters into the domain services behind
//! [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use feedback_backend::domain::ports::{AssistantQuery, ChatCompletionSource};
use feedback_backend::domain::{AssistantService, FeedbackService};
use feedback_backend::inbound::http::state::HttpState;
use feedback_backend::outbound::groq::{GroqHttpSource, GroqSettings};
use feedback_backend::outbound::persistence::{DbPool, DieselFeedbackRepository};

use super::ServerConfig;

fn build_chat_source(settings: GroqSettings) -> std::io::Result<Arc<dyn ChatCompletionSource>> {
    let source = GroqHttpSource::new(settings).map_err(|err| {
        std::io::Error::other(format!("failed to build chat provider client: {err}"))
    })?;
    Ok(Arc::new(source))
}

fn build_state_with(
    pool: &DbPool,
    chat: Arc<dyn ChatCompletionSource>,
    clock: Arc<dyn Clock>,
) -> HttpState {
    let repository = Arc::new(DieselFeedbackRepository::new(pool.clone()));
    let feedback = Arc::new(FeedbackService::new(repository, clock.clone()));
    let assistant: Arc<dyn AssistantQuery> = Arc::new(AssistantService::new(chat, clock));
    HttpState::new(feedback.clone(), feedback, assistant)
}

/// Assemble the HTTP state from the server configuration.
///
/// # Errors
///
/// Fails when the chat provider's HTTP client cannot be built.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let chat = build_chat_source(config.groq.clone())?;
    Ok(web::Data::new(build_state_with(
        &config.db_pool,
        chat,
        Arc::new(DefaultClock),
    )))
}
