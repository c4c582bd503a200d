//! Wire DTOs for the OpenAI-compatible chat-completions endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{ChatCompletion, ChatPrompt};

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: [ChatMessageDto<'a>; 1],
    pub(super) temperature: f32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

impl<'a> From<&'a ChatPrompt> for ChatCompletionRequestDto<'a> {
    fn from(prompt: &'a ChatPrompt) -> Self {
        Self {
            model: &prompt.model,
            messages: [ChatMessageDto {
                role: "user",
                content: &prompt.question,
            }],
            temperature: prompt.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceDto {
    pub(super) message: Option<ChoiceMessageDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceMessageDto {
    pub(super) content: Option<String>,
}

impl ChatCompletionResponseDto {
    /// Take the content of the first choice.
    pub(super) fn into_completion(self) -> Result<ChatCompletion, String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| "response contains no choices".to_owned())?;
        let content = choice
            .message
            .and_then(|message| message.content)
            .ok_or_else(|| "first choice has no message content".to_owned())?;
        Ok(ChatCompletion { content })
    }
}
