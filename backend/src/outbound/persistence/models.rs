//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain snapshots.

use diesel::prelude::*;
use serde_json::Value;

use super::schema::{tasks, users};

/// Row read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Row read from the `tasks` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub task_title: Option<String>,
    pub task_status: Option<String>,
    pub target_date: Option<Value>,
    pub task_score: Option<Value>,
    pub delegatee_ids: Option<Value>,
    pub delegator_id: Option<Value>,
}
