//! Feedback collection service library.
//!
//! Hexagonal layout: [`domain`] holds the feedback model, services and ports;
//! [`inbound`] exposes them over HTTP; [`outbound`] implements the driven
//! ports with SQLite and the chat-completion provider.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
