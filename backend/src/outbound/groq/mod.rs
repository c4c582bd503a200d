//! Groq outbound adapters.
//!
//! A thin HTTP implementation of the `ChatCompletionSource` port against
//! Groq's OpenAI-compatible chat-completions endpoint.

mod config;
mod dto;
mod http_source;

pub use config::{
    API_KEY_ENV, API_URL_ENV, ApiKey, DEFAULT_API_URL, GroqConfigError, GroqSettings, TIMEOUT_ENV,
    groq_settings_from_env,
};
pub use http_source::GroqHttpSource;
