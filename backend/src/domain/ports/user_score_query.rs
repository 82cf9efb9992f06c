//! Driving port for the aggregate score of a user's visible tasks.

use async_trait::async_trait;

use crate::domain::{Error, Role, UserId};

/// Score summary for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserScore {
    /// Identifier as requested.
    pub user_id: UserId,
    /// Display name from the store.
    pub name: String,
    /// Normalised role.
    pub role: Role,
    /// Sum of numeric scores over the tasks visible to the user.
    pub total_score: f64,
}

/// Use-case port computing score summaries without the language model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserScoreQuery: Send + Sync {
    /// Summarise the scores visible to `user_id`.
    async fn user_score(&self, user_id: &UserId) -> Result<UserScore, Error>;
}
