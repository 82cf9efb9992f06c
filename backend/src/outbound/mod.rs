//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user and task repositories (Diesel)
//! - **anthropic**: Messages API client implementing `LanguageModel`
//! - **secrets**: mounted-file `SecretsProvider`
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod anthropic;
pub mod persistence;
pub mod secrets;
