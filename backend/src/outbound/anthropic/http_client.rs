//! Reqwest-backed Anthropic client.
//!
//! This adapter owns transport details only: request serialisation, the
//! per-request deadline, HTTP error mapping, and extraction of the generated
//! text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{ErrorEnvelopeDto, MessageDto, MessagesRequestDto, MessagesResponseDto};
use crate::domain::ports::{CompletionRequest, LanguageModel, LanguageModelError};

/// Production Messages API endpoint.
pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// `LanguageModel` adapter that POSTs single-turn prompts to the Messages API.
pub struct AnthropicHttpClient {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl AnthropicHttpClient {
    /// Build a client with an explicit request timeout.
    /// ```rust,ignore
    /// let client = AnthropicHttpClient::new(endpoint, api_key, Duration::from_secs(30))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl LanguageModel for AnthropicHttpClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LanguageModelError> {
        let body = request_body(request);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        let text = parse_text(bytes.as_ref())?;
        debug!(model = %request.model, chars = text.len(), "model completion received");
        Ok(text)
    }
}

fn request_body(request: &CompletionRequest) -> MessagesRequestDto<'_> {
    MessagesRequestDto {
        model: &request.model,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        messages: [MessageDto {
            role: "user",
            content: &request.prompt,
        }],
    }
}

fn parse_text(body: &[u8]) -> Result<String, LanguageModelError> {
    let decoded: MessagesResponseDto = serde_json::from_slice(body).map_err(|error| {
        LanguageModelError::decode(format!("invalid Messages API payload: {error}"))
    })?;
    decoded
        .into_text()
        .ok_or_else(|| LanguageModelError::decode("response contained no text blocks"))
}

fn map_transport_error(error: reqwest::Error) -> LanguageModelError {
    if error.is_timeout() {
        LanguageModelError::timeout(error.to_string())
    } else {
        LanguageModelError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LanguageModelError {
    let detail = serde_json::from_slice::<ErrorEnvelopeDto>(body)
        .map(|envelope| format!("{}: {}", envelope.error.kind, envelope.error.message))
        .unwrap_or_else(|_| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    match status.as_u16() {
        429 | 529 => LanguageModelError::rate_limited(message),
        408 | 504 => LanguageModelError::timeout(message),
        _ if status.is_client_error() => LanguageModelError::rejected(message),
        _ => LanguageModelError::transport(message),
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
