//! Answer and score use-cases.
//!
//! Both operations resolve the user, normalise the role, and filter the task
//! collection down to what the user may see. `ask` then short-circuits or
//! consults the language model; `user_score` only aggregates.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    Answer, AnswerSource, AskRequest, AssistantQuery, LanguageModel, TaskPersistenceError,
    TaskRepository, UserPersistenceError, UserRepository, UserScore, UserScoreQuery,
};
use crate::domain::{Error, PromptComposer, Role, Task, User, UserId, filter_tasks_for, total_score};

/// Fixed answer when no task is visible to the user.
pub const NO_RELEVANT_DATA_ANSWER: &str = "No relevant data found for your role or prompt.";

/// Service implementing [`AssistantQuery`] and [`UserScoreQuery`].
pub struct AnswerService<U, T, M: ?Sized> {
    users: Arc<U>,
    tasks: Arc<T>,
    composer: PromptComposer<M>,
}

impl<U, T, M: ?Sized> Clone for AnswerService<U, T, M> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            tasks: Arc::clone(&self.tasks),
            composer: self.composer.clone(),
        }
    }
}

impl<U, T, M: ?Sized> AnswerService<U, T, M> {
    /// Create a service over the given store gateways and composer.
    pub fn new(users: Arc<U>, tasks: Arc<T>, composer: PromptComposer<M>) -> Self {
        Self {
            users,
            tasks,
            composer,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user lookup failed: {message}"))
        }
    }
}

fn map_task_error(error: TaskPersistenceError) -> Error {
    match error {
        TaskPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("task store unavailable: {message}"))
        }
        TaskPersistenceError::Query { message } => {
            Error::internal(format!("task scan failed: {message}"))
        }
    }
}

impl<U, T, M> AnswerService<U, T, M>
where
    U: UserRepository,
    T: TaskRepository,
    M: LanguageModel + ?Sized,
{
    async fn resolve_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn visible_tasks(&self, user_id: &UserId, role: Role) -> Result<Vec<Task>, Error> {
        let all = self.tasks.find_all().await.map_err(map_task_error)?;
        let total = all.len();
        let visible = filter_tasks_for(all, user_id, role);
        debug!(%user_id, %role, total, visible = visible.len(), "filtered tasks");
        Ok(visible)
    }
}

#[async_trait]
impl<U, T, M> AssistantQuery for AnswerService<U, T, M>
where
    U: UserRepository,
    T: TaskRepository,
    M: LanguageModel + ?Sized,
{
    async fn ask(&self, request: &AskRequest) -> Result<Answer, Error> {
        let user = self.resolve_user(&request.user_id).await?;
        let role = user.role();
        let tasks = self.visible_tasks(user.id(), role).await?;

        let answer = if tasks.is_empty() {
            Answer::new(NO_RELEVANT_DATA_ANSWER, AnswerSource::NoRelevantData)
        } else {
            self.composer.answer(&request.question, role, &tasks).await
        };
        info!(user_id = %user.id(), source = ?answer.source, "answered question");
        Ok(answer)
    }
}

#[async_trait]
impl<U, T, M> UserScoreQuery for AnswerService<U, T, M>
where
    U: UserRepository,
    T: TaskRepository,
    M: LanguageModel + ?Sized,
{
    async fn user_score(&self, user_id: &UserId) -> Result<UserScore, Error> {
        let user = self.resolve_user(user_id).await?;
        let tasks = self.visible_tasks(user.id(), user.role()).await?;
        Ok(UserScore {
            user_id: user_id.clone(),
            name: user.name().to_owned(),
            role: user.role(),
            total_score: total_score(&tasks),
        })
    }
}

#[cfg(test)]
#[path = "answer_service_tests.rs"]
mod tests;
