//! AI assistant HTTP handler.
//!
//! ```text
//! POST /api/ai/chat {"question":"How do I reset my password?"}
//! ```

use actix_web::{post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::assistant::QUESTION_REQUIRED;
use crate::domain::{AssistantAnswer, Error, Question};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Question submitted to the assistant.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ChatRequest {
    #[schema(value_type = String, example = "How do I reset my password?")]
    pub question: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatAnswerBody {
    pub question: String,
    pub answer: String,
    #[schema(format = "date-time", example = "2025-03-14T09:26:53.000Z")]
    pub timestamp: String,
    #[schema(example = "llama3-8b-8192")]
    pub model: String,
}

impl From<AssistantAnswer> for ChatAnswerBody {
    fn from(answer: AssistantAnswer) -> Self {
        Self {
            timestamp: answer
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            question: answer.question,
            answer: answer.answer,
            model: answer.model,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub success: bool,
    pub data: ChatAnswerBody,
}

/// Ask the assistant a question.
#[utoipa::path(
    post,
    path = "/api/ai/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "The provider's answer", body = ChatResponse),
        (status = 400, description = "Question is required", body = ErrorSchema),
        (status = 500, description = "Provider unavailable or failed", body = ErrorSchema)
    ),
    tags = ["assistant"],
    operation_id = "askAssistant"
)]
#[post("/ai/chat")]
pub async fn chat(
    state: web::Data<HttpState>,
    payload: web::Json<ChatRequest>,
) -> ApiResult<web::Json<ChatResponse>> {
    let raw = payload.question.as_ref().and_then(Value::as_str);
    let question = Question::new(raw).map_err(|_| {
        Error::invalid_request(QUESTION_REQUIRED).with_details(json!({ "field": "question" }))
    })?;

    let answer = state.assistant.ask(question).await?;

    Ok(web::Json(ChatResponse {
        success: true,
        data: answer.into(),
    }))
}
