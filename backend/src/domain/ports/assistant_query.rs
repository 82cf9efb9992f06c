//! Driving port for natural-language questions about delegated tasks.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// A question asked on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    /// User whose tasks scope the answer.
    pub user_id: UserId,
    /// Free-text question.
    pub question: String,
}

/// How an answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// Canned introduction for a greeting.
    Greeting,
    /// Templated total computed without the model.
    TotalScore,
    /// Text generated by the language model.
    Model,
    /// The model call failed; the text is an apology.
    ModelUnavailable,
    /// The user has no visible tasks.
    NoRelevantData,
}

/// Textual answer plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Text returned to the caller.
    pub text: String,
    /// How `text` was produced.
    pub source: AnswerSource,
}

impl Answer {
    /// Build an answer.
    pub fn new(text: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Use-case port answering questions.
///
/// Fails with [`crate::domain::ErrorCode::NotFound`] when the user does not
/// exist; store failures surface as `ServiceUnavailable` or `InternalError`.
/// Model failures never fail the call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssistantQuery: Send + Sync {
    /// Answer `request`.
    async fn ask(&self, request: &AskRequest) -> Result<Answer, Error>;
}
