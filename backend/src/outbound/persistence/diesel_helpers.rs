//! Error classification shared by the Diesel repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{TaskPersistenceError, UserPersistenceError};

use super::pool::PoolError;

/// Store failure reduced to the two outcomes the domain distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The store could not be reached.
    Connection(String),
    /// The store answered but the operation failed.
    Query(String),
}

/// Every pool failure means no connection was obtained.
pub(crate) fn classify_pool_error(error: PoolError) -> StoreFailure {
    debug!(error = %error, "connection pool failure");
    StoreFailure::Connection(error.message().to_owned())
}

/// Split Diesel errors into connection loss and query failure.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error = %error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection closed".to_owned())
        }
        DieselError::DeserializationError(_) => {
            StoreFailure::Query(format!("{operation}: unreadable row"))
        }
        _ => StoreFailure::Query(format!("{operation}: database error")),
    }
}

impl From<StoreFailure> for UserPersistenceError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Connection(message) => Self::connection(message),
            StoreFailure::Query(message) => Self::query(message),
        }
    }
}

impl From<StoreFailure> for TaskPersistenceError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Connection(message) => Self::connection(message),
            StoreFailure::Query(message) => Self::query(message),
        }
    }
}
