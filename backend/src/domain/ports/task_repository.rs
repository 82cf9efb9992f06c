//! Port abstraction for reading the task collection.

use async_trait::async_trait;

use crate::domain::Task;

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// The store could not be reached.
        Connection => "task repository connection failed: {message}",
        /// The scan failed while executing.
        Query => "task repository query failed: {message}",
    }
}

/// Read-only access to task records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fetch every task in store order. An empty collection is not an error.
    async fn find_all(&self) -> Result<Vec<Task>, TaskPersistenceError>;
}
