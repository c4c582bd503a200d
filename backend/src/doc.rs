//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint in the inbound layer together
//! with the request, response and error schemas. Domain types are exposed
//! through the mirrors in [`crate::inbound::http::schemas`] so the domain
//! stays free of utoipa.
//!
//! Swagger UI serves the document in debug builds; `openapi-dump` prints it.

use utoipa::OpenApi;

use crate::inbound::http::assistant::{ChatAnswerBody, ChatRequest, ChatResponse};
use crate::inbound::http::feedback::{
    CreateFeedbackRequest, FeedbackBody, FeedbackItemResponse, FeedbackListResponse,
    MessageResponse, UpdateFeedbackRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feedback service API",
        description = "Feedback collection with an AI assistant proxy."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::feedback::list_feedback,
        crate::inbound::http::feedback::create_feedback,
        crate::inbound::http::feedback::get_feedback,
        crate::inbound::http::feedback::update_feedback,
        crate::inbound::http::feedback::delete_feedback,
        crate::inbound::http::assistant::chat,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateFeedbackRequest,
        UpdateFeedbackRequest,
        FeedbackBody,
        FeedbackListResponse,
        FeedbackItemResponse,
        MessageResponse,
        ChatRequest,
        ChatAnswerBody,
        ChatResponse,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "feedback", description = "Feedback entries"),
        (name = "assistant", description = "AI assistant proxy"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("/api/feedback")]
    #[case("/api/feedback/{id}")]
    #[case("/api/ai/chat")]
    #[case("/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn feedback_item_path_has_all_methods() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/feedback/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }

    #[test]
    fn error_schema_uses_camel_case_envelope() {
        let fields = schema_fields(ERROR_SCHEMA_NAME);
        for field in ["success", "code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|name| name == field), "missing {field}");
        }
    }

    #[test]
    fn list_response_documents_next_cursor() {
        let fields = schema_fields("FeedbackListResponse");
        assert!(fields.iter().any(|name| name == "nextCursor"));
    }
}
