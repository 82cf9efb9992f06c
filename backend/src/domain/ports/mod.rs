//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `TaskRepository`, `LanguageModel`,
//! `SecretsProvider`) expose strongly typed errors so adapters map their
//! failures into predictable variants. Driving ports (`AssistantQuery`,
//! `UserScoreQuery`) return the transport-agnostic domain [`Error`].
//!
//! [`Error`]: crate::domain::Error

mod macros;
pub(crate) use macros::define_port_error;

mod assistant_query;
mod language_model;
mod secrets_provider;
mod task_repository;
mod user_repository;
mod user_score_query;

#[cfg(test)]
pub use assistant_query::MockAssistantQuery;
pub use assistant_query::{Answer, AnswerSource, AskRequest, AssistantQuery};
#[cfg(test)]
pub use language_model::MockLanguageModel;
pub use language_model::{CompletionRequest, LanguageModel, LanguageModelError};
#[cfg(test)]
pub use secrets_provider::MockSecretsProvider;
pub use secrets_provider::{SecretsProvider, SecretsProviderError};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_score_query::MockUserScoreQuery;
pub use user_score_query::{UserScore, UserScoreQuery};
