//! HTTP inbound adapter exposing REST endpoints.

pub mod assistant;
pub mod error;
pub mod feedback;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use serde_json::json;

use crate::domain::Error;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("Invalid JSON payload")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("Invalid query parameters")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

/// Register the `/api` scope with its handlers and extractor error mapping.
///
/// Extractor failures leave as `invalid_request` envelopes rather than
/// actix's plain-text defaults.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .service(feedback::list_feedback)
            .service(feedback::create_feedback)
            .service(feedback::get_feedback)
            .service(feedback::update_feedback)
            .service(feedback::delete_feedback)
            .service(assistant::chat),
    );
}
