//! HTTP inbound adapter exposing the REST endpoints.

pub mod ask;
pub mod docs_access;
pub mod error;
pub mod health;
pub mod state;
pub mod user_score;
mod validation;

pub use error::ApiResult;
