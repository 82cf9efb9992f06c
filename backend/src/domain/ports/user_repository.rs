//! Port abstraction for reading users from the external store.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection => "user repository connection failed: {message}",
        /// The lookup failed while executing.
        Query => "user repository query failed: {message}",
    }
}

/// Read-only access to user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier; `Ok(None)` when no record matches.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
