//! Wire shapes for the Anthropic Messages API.
//!
//! Only the fields this service sends or reads are modelled; unknown response
//! fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct MessagesRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) max_tokens: u32,
    pub(super) temperature: f32,
    pub(super) messages: [MessageDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct MessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessagesResponseDto {
    #[serde(default)]
    pub(super) content: Vec<ContentBlockDto>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(super) enum ContentBlockDto {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) message: String,
}

impl MessagesResponseDto {
    /// Concatenate the text blocks; `None` when there are none.
    pub(super) fn into_text(self) -> Option<String> {
        let text = self
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlockDto::Text { text } => Some(text),
                ContentBlockDto::Other => None,
            })
            .collect::<Vec<_>>();
        if text.is_empty() {
            None
        } else {
            Some(text.concat())
        }
    }
}
