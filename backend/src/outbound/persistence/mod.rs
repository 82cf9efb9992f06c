//! PostgreSQL adapters for the user and task stores.
//!
//! Repositories are thin: they check out a pooled connection, run a single
//! read, and convert Diesel rows into domain snapshots. Row structs and table
//! definitions stay private to this module. The store is read-only from this
//! service's point of view.

mod diesel_helpers;
mod diesel_task_repository;
mod diesel_user_repository;
mod document_values;
mod models;
mod pool;
mod schema;
mod store_probe;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use store_probe::{StoreProbe, StoreProbeError, StoreSummary};
