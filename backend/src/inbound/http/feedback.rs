//! Feedback HTTP handlers.
//!
//! ```text
//! GET    /api/feedback[?limit=&cursor=]
//! POST   /api/feedback
//! GET    /api/feedback/{id}
//! PUT    /api/feedback/{id}
//! DELETE /api/feedback/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use pagination::{Cursor, PageLimit, PageLimitError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::feedback_service::{FEEDBACK_NOT_FOUND, LIST_FAILED};
use crate::domain::ports::{FeedbackListing, FeedbackPageRequest};
use crate::domain::{
    Error, Feedback, FeedbackChanges, FeedbackFields, FeedbackId, FeedbackSortKey, FeedbackStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const MISSING_FIELDS: &str = "Missing required fields";
const INVALID_STATUS: &str = "Invalid status";

/// Body for creating an entry.
///
/// Fields are kept as raw JSON so that non-string values are reported as
/// missing rather than as malformed payloads.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateFeedbackRequest {
    #[schema(value_type = String, example = "Dark mode")]
    pub title: Option<Value>,
    #[schema(value_type = String, example = "The dashboard is too bright at night.")]
    pub content: Option<Value>,
    #[schema(value_type = String, example = "ana")]
    pub author: Option<Value>,
}

/// Body for editing an entry. Omitting `status` keeps the current one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateFeedbackRequest {
    #[schema(value_type = String)]
    pub title: Option<Value>,
    #[schema(value_type = String)]
    pub content: Option<Value>,
    #[schema(value_type = String)]
    pub author: Option<Value>,
    #[schema(value_type = Option<String>, example = "reviewed")]
    pub status: Option<Value>,
}

/// Optional keyset paging parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFeedbackParams {
    /// Page size between 1 and 100; omit to list everything.
    pub limit: Option<u32>,
    /// Opaque token from a previous page's `nextCursor`.
    pub cursor: Option<String>,
}

/// A stored entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackBody {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(format = "date-time", example = "2025-03-14T09:26:53.000Z")]
    pub timestamp: String,
}

impl From<&Feedback> for FeedbackBody {
    fn from(entry: &Feedback) -> Self {
        Self {
            id: entry.id().get(),
            title: entry.title().to_owned(),
            content: entry.content().to_owned(),
            author: entry.author().to_owned(),
            status: entry.status().to_string(),
            timestamp: entry
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListResponse {
    pub success: bool,
    pub data: Vec<FeedbackBody>,
    /// Only sent for paged requests; `null` on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub next_cursor: Option<Option<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedbackItemResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: FeedbackBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

fn parse_id(raw: &str) -> Result<FeedbackId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(FEEDBACK_NOT_FOUND).with_details(json!({ "id": raw })))
}

fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

fn parse_fields(
    title: Option<&Value>,
    content: Option<&Value>,
    author: Option<&Value>,
) -> Result<FeedbackFields, Error> {
    FeedbackFields::new(text(title), text(content), text(author)).map_err(|err| {
        Error::invalid_request(MISSING_FIELDS).with_details(json!({ "field": err.field() }))
    })
}

fn parse_status(raw: Option<&Value>) -> Result<Option<FeedbackStatus>, Error> {
    let invalid = |value: &Value| {
        Error::invalid_request(INVALID_STATUS).with_details(json!({
            "field": "status",
            "value": value,
            "allowed": FeedbackStatus::ALL.map(FeedbackStatus::as_str),
        }))
    };
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .and_then(|text| text.parse().ok())
            .map(Some)
            .ok_or_else(|| invalid(value)),
    }
}

fn parse_page(params: ListFeedbackParams) -> Result<Option<FeedbackPageRequest>, Error> {
    let ListFeedbackParams { limit, cursor } = params;
    let Some(limit) = limit else {
        if cursor.is_some() {
            return Err(Error::invalid_request("cursor requires limit")
                .with_details(json!({ "field": "cursor" })));
        }
        return Ok(None);
    };

    let limit = PageLimit::new(limit).map_err(|err: PageLimitError| {
        Error::invalid_request(format!("Invalid limit: {err}"))
            .with_details(json!({ "field": "limit" }))
    })?;
    let cursor = cursor
        .map(|token| {
            Cursor::<FeedbackSortKey>::decode(&token).map_err(|err| {
                Error::invalid_request("Invalid cursor")
                    .with_details(json!({ "field": "cursor", "reason": err.to_string() }))
            })
        })
        .transpose()?;
    Ok(Some(FeedbackPageRequest { limit, cursor }))
}

fn encode_cursor<K: Serialize>(cursor: &Cursor<K>) -> Result<String, Error> {
    cursor.encode().map_err(|err| {
        tracing::error!(error = %err, "failed to encode feedback cursor");
        Error::internal(LIST_FAILED)
    })
}

fn list_response(
    listing: FeedbackListing,
    paged: bool,
) -> Result<FeedbackListResponse, Error> {
    let next = listing.next.as_ref().map(encode_cursor).transpose()?;
    Ok(FeedbackListResponse {
        success: true,
        data: listing.items.iter().map(FeedbackBody::from).collect(),
        next_cursor: paged.then_some(next),
    })
}

/// List entries, newest first.
#[utoipa::path(
    get,
    path = "/api/feedback",
    params(ListFeedbackParams),
    responses(
        (status = 200, description = "Entries, newest first", body = FeedbackListResponse),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 500, description = "Database error", body = ErrorSchema)
    ),
    tags = ["feedback"],
    operation_id = "listFeedback"
)]
#[get("/feedback")]
pub async fn list_feedback(
    state: web::Data<HttpState>,
    params: web::Query<ListFeedbackParams>,
) -> ApiResult<web::Json<FeedbackListResponse>> {
    let page = parse_page(params.into_inner())?;
    let paged = page.is_some();
    let listing = state.feedback_query.list_feedback(page).await?;
    Ok(web::Json(list_response(listing, paged)?))
}

/// Create an entry with status `pending`.
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback added", body = FeedbackItemResponse),
        (status = 400, description = "Missing required fields", body = ErrorSchema),
        (status = 500, description = "Database insert error", body = ErrorSchema)
    ),
    tags = ["feedback"],
    operation_id = "createFeedback"
)]
#[post("/feedback")]
pub async fn create_feedback(
    state: web::Data<HttpState>,
    payload: web::Json<CreateFeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let fields = parse_fields(
        body.title.as_ref(),
        body.content.as_ref(),
        body.author.as_ref(),
    )?;

    let created = state.feedback.create_feedback(fields).await?;

    Ok(HttpResponse::Created().json(FeedbackItemResponse {
        success: true,
        message: Some("Feedback added successfully".to_owned()),
        data: FeedbackBody::from(&created),
    }))
}

/// Fetch one entry.
#[utoipa::path(
    get,
    path = "/api/feedback/{id}",
    params(("id" = i64, Path, description = "Feedback identifier")),
    responses(
        (status = 200, description = "The entry", body = FeedbackItemResponse),
        (status = 404, description = "Feedback not found", body = ErrorSchema),
        (status = 500, description = "Database error", body = ErrorSchema)
    ),
    tags = ["feedback"],
    operation_id = "getFeedback"
)]
#[get("/feedback/{id}")]
pub async fn get_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FeedbackItemResponse>> {
    let id = parse_id(&path)?;
    let entry = state.feedback_query.get_feedback(id).await?;
    Ok(web::Json(FeedbackItemResponse {
        success: true,
        message: None,
        data: FeedbackBody::from(&entry),
    }))
}

/// Replace an entry's text and optionally its status.
#[utoipa::path(
    put,
    path = "/api/feedback/{id}",
    params(("id" = i64, Path, description = "Feedback identifier")),
    request_body = UpdateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback updated", body = FeedbackItemResponse),
        (status = 400, description = "Missing required fields or invalid status", body = ErrorSchema),
        (status = 404, description = "Feedback not found", body = ErrorSchema),
        (status = 500, description = "Database update error", body = ErrorSchema)
    ),
    tags = ["feedback"],
    operation_id = "updateFeedback"
)]
#[put("/feedback/{id}")]
pub async fn update_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateFeedbackRequest>,
) -> ApiResult<web::Json<FeedbackItemResponse>> {
    let id = parse_id(&path)?;
    let body = payload.into_inner();
    let fields = parse_fields(
        body.title.as_ref(),
        body.content.as_ref(),
        body.author.as_ref(),
    )?;
    let status = parse_status(body.status.as_ref())?;

    let updated = state
        .feedback
        .update_feedback(id, FeedbackChanges { fields, status })
        .await?;

    Ok(web::Json(FeedbackItemResponse {
        success: true,
        message: Some("Feedback updated successfully".to_owned()),
        data: FeedbackBody::from(&updated),
    }))
}

/// Remove an entry.
#[utoipa::path(
    delete,
    path = "/api/feedback/{id}",
    params(("id" = i64, Path, description = "Feedback identifier")),
    responses(
        (status = 200, description = "Feedback deleted", body = MessageResponse),
        (status = 404, description = "Feedback not found", body = ErrorSchema),
        (status = 500, description = "Delete error", body = ErrorSchema)
    ),
    tags = ["feedback"],
    operation_id = "deleteFeedback"
)]
#[delete("/feedback/{id}")]
pub async fn delete_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_id(&path)?;
    state.feedback.delete_feedback(id).await?;
    Ok(web::Json(MessageResponse {
        success: true,
        message: "Feedback deleted".to_owned(),
    }))
}

#[cfg(test)]
#[path = "feedback_tests.rs"]
mod tests;
