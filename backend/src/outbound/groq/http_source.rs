//! Reqwest-backed Groq chat-completion adapter.
//!
//! This adapter owns transport details only: bearer authentication, request
//! serialisation, HTTP error mapping, and decoding the first choice.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::config::{ApiKey, GroqSettings};
use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto};
use crate::domain::ports::{
    ChatCompletion, ChatCompletionSource, ChatCompletionSourceError, ChatPrompt,
};

/// Chat-completion source that POSTs to one OpenAI-compatible endpoint.
pub struct GroqHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Option<ApiKey>,
}

impl GroqHttpSource {
    /// Build an adapter from validated settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: GroqSettings) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint,
            api_key: settings.api_key,
        })
    }
}

#[async_trait]
impl ChatCompletionSource for GroqHttpSource {
    async fn complete(
        &self,
        prompt: &ChatPrompt,
    ) -> Result<ChatCompletion, ChatCompletionSourceError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(ChatCompletionSourceError::not_configured)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&ChatCompletionRequestDto::from(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_completion(body.as_ref())
    }
}

fn parse_completion(body: &[u8]) -> Result<ChatCompletion, ChatCompletionSourceError> {
    let decoded: ChatCompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        ChatCompletionSourceError::decode(format!("invalid completion JSON payload: {error}"))
    })?;
    decoded
        .into_completion()
        .map_err(ChatCompletionSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> ChatCompletionSourceError {
    if error.is_timeout() {
        ChatCompletionSourceError::timeout(error.to_string())
    } else {
        ChatCompletionSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ChatCompletionSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ChatCompletionSourceError::unauthorized(message)
        }
        StatusCode::TOO_MANY_REQUESTS => ChatCompletionSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ChatCompletionSourceError::timeout(message)
        }
        _ => ChatCompletionSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage; the HTTP round trip lives in `tests/groq_source.rs`.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unauthorized(StatusCode::UNAUTHORIZED)]
    #[case::forbidden(StatusCode::FORBIDDEN)]
    fn credential_statuses_map_to_unauthorized(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"error\":{\"message\":\"Invalid API Key\"}}");
        assert!(matches!(
            error,
            ChatCompletionSourceError::Unauthorized { .. }
        ));
        assert!(error.to_string().contains("Invalid API Key"));
    }

    #[rstest]
    fn too_many_requests_maps_to_rate_limited() {
        let error = map_status_error(StatusCode::TOO_MANY_REQUESTS, b"");
        assert_eq!(error, ChatCompletionSourceError::rate_limited("status 429"));
    }

    #[rstest]
    #[case(StatusCode::REQUEST_TIMEOUT)]
    #[case(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        assert!(matches!(
            map_status_error(status, b""),
            ChatCompletionSourceError::Timeout { .. }
        ));
    }

    #[rstest]
    fn server_errors_map_to_transport() {
        assert!(matches!(
            map_status_error(StatusCode::BAD_GATEWAY, b"upstream down"),
            ChatCompletionSourceError::Transport { .. }
        ));
    }

    #[rstest]
    fn parses_first_choice_content() {
        let body = br#"{
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "First" } },
                { "index": 1, "message": { "role": "assistant", "content": "Second" } }
            ]
        }"#;

        let completion = parse_completion(body).expect("decodes");
        assert_eq!(completion.content, "First");
    }

    #[rstest]
    #[case::no_choices(br#"{"choices": []}"#.as_slice())]
    #[case::no_message(br#"{"choices": [{"index": 0}]}"#.as_slice())]
    #[case::not_json(b"<html>".as_slice())]
    fn unusable_bodies_are_decode_errors(#[case] body: &[u8]) {
        assert!(matches!(
            parse_completion(body),
            Err(ChatCompletionSourceError::Decode { .. })
        ));
    }

    #[rstest]
    fn long_bodies_are_truncated_in_messages() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let source = GroqHttpSource::new(GroqSettings {
            api_key: None,
            endpoint: Url::parse("http://127.0.0.1:9/unreachable").expect("url"),
            timeout: None,
        })
        .expect("client builds");
        let prompt = ChatPrompt {
            model: "llama3-8b-8192".to_owned(),
            question: "Hi".to_owned(),
            temperature: 0.7,
        };

        let error = source.complete(&prompt).await.expect_err("no key");
        assert_eq!(error, ChatCompletionSourceError::NotConfigured);
    }
}
