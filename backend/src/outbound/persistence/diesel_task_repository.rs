//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Reads the whole task table in a stable order; visibility filtering happens
//! in the domain so the rules stay in one place.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::Task;
use crate::domain::ports::{TaskPersistenceError, TaskRepository};

use super::diesel_helpers::{classify_diesel_error, classify_pool_error};
use super::document_values;
use super::models::TaskRow;
use super::pool::DbPool;
use super::schema::tasks;

/// Diesel-backed implementation of the `TaskRepository` port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(super) fn row_to_task(row: TaskRow) -> Task {
    Task {
        title: row.task_title,
        status: row.task_status,
        target_date: document_values::target_date(row.target_date.as_ref()),
        score: document_values::score(row.task_score.as_ref()),
        delegatees: document_values::user_refs(row.delegatee_ids.as_ref()),
        delegator: row.delegator_id.as_ref().and_then(document_values::user_ref),
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn find_all(&self) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(classify_pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .order(tasks::id.asc())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| classify_diesel_error(err, "load tasks"))?;

        debug!(count = rows.len(), "loaded task rows");
        Ok(rows.into_iter().map(row_to_task).collect())
    }
}
