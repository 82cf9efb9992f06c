//! Connectivity probe used by the `store-check` binary.
//!
//! Counts both tables and pulls a handful of rows through the same
//! conversions the repositories use, so a successful probe also shows that
//! stored documents normalise cleanly.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::{Task, User};

use super::diesel_helpers::{StoreFailure, classify_diesel_error, classify_pool_error};
use super::diesel_task_repository::row_to_task;
use super::diesel_user_repository::row_to_user;
use super::models::{TaskRow, UserRow};
use super::pool::DbPool;
use super::schema::{tasks, users};

/// Error raised when the probe cannot complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreProbeError {
    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Connection(String),
    /// A probe query failed.
    #[error("store query failed: {0}")]
    Query(String),
}

impl From<StoreFailure> for StoreProbeError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Connection(message) => Self::Connection(message),
            StoreFailure::Query(message) => Self::Query(message),
        }
    }
}

/// Counts and sample records read by a probe.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSummary {
    /// Rows in `users`.
    pub user_count: i64,
    /// Rows in `tasks`.
    pub task_count: i64,
    /// Leading users, in identifier order.
    pub sample_users: Vec<User>,
    /// Leading tasks, in identifier order.
    pub sample_tasks: Vec<Task>,
}

/// Read-only store probe.
#[derive(Clone)]
pub struct StoreProbe {
    pool: DbPool,
}

impl StoreProbe {
    /// Create a probe over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Count both tables and read up to `sample_size` rows from each.
    ///
    /// # Errors
    ///
    /// Returns [`StoreProbeError::Connection`] when no connection can be
    /// obtained and [`StoreProbeError::Query`] when a read fails.
    pub async fn summarise(&self, sample_size: i64) -> Result<StoreSummary, StoreProbeError> {
        let mut conn = self.pool.get().await.map_err(classify_pool_error)?;

        let user_count: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, "count users"))?;
        let task_count: i64 = tasks::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, "count tasks"))?;

        let user_rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .limit(sample_size)
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, "sample users"))?;
        let task_rows: Vec<TaskRow> = tasks::table
            .order(tasks::id.asc())
            .limit(sample_size)
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, "sample tasks"))?;

        let sample_users = user_rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreProbeError::Query(err.to_string()))?;

        Ok(StoreSummary {
            user_count,
            task_count,
            sample_users,
            sample_tasks: task_rows.into_iter().map(row_to_task).collect(),
        })
    }
}
