//! Port for the large-language-model completion API.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised by language model adapters.
    pub enum LanguageModelError {
        /// Network or server-side failure.
        Transport => "language model transport failed: {message}",
        /// The request exceeded its deadline.
        Timeout => "language model request timed out: {message}",
        /// The provider throttled the request.
        RateLimited => "language model rate limited the request: {message}",
        /// The provider refused the request (credentials, payload).
        Rejected => "language model rejected the request: {message}",
        /// The response could not be decoded into text.
        Decode => "language model response could not be decoded: {message}",
    }
}

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Full prompt text sent as the user turn.
    pub prompt: String,
    /// Provider model identifier.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Driven port for text completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete `request`, returning the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LanguageModelError>;
}
