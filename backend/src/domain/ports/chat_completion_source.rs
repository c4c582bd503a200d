//! Port for the hosted chat-completion provider.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures reported by chat-completion adapters.
    pub enum ChatCompletionSourceError {
        /// No API key is available.
        NotConfigured => "chat provider API key is not configured",
        /// The provider rejected the credentials.
        Unauthorized { message: String } => "chat provider rejected credentials: {message}",
        /// The provider is throttling requests.
        RateLimited { message: String } => "chat provider rate limited: {message}",
        /// The request did not finish in time.
        Timeout { message: String } => "chat provider timed out: {message}",
        /// Network failure or unexpected HTTP status.
        Transport { message: String } => "chat provider transport failed: {message}",
        /// The response body had no usable answer.
        Decode { message: String } => "chat provider response invalid: {message}",
    }
}

/// A single-turn prompt sent to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub model: String,
    pub question: String,
    pub temperature: f32,
}

/// The first choice of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    pub content: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionSource: Send + Sync {
    /// Send `prompt` as one user message and return the first answer.
    async fn complete(&self, prompt: &ChatPrompt)
    -> Result<ChatCompletion, ChatCompletionSourceError>;
}
