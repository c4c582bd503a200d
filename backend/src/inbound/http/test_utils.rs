//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{MockAssistantQuery, MockFeedbackCommand, MockFeedbackQuery};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;

/// Mock ports backing an [`HttpState`].
///
/// Every mock starts without expectations, so a handler touching a port the
/// test did not prime panics.
#[derive(Default)]
pub struct MockPorts {
    pub feedback: MockFeedbackCommand,
    pub feedback_query: MockFeedbackQuery,
    pub assistant: MockAssistantQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.feedback),
            Arc::new(self.feedback_query),
            Arc::new(self.assistant),
        )
    }
}

/// Build the `/api` application around the supplied mocks.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .configure(configure_api)
}
