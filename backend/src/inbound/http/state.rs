//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AssistantQuery, UserScoreQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub assistant: Arc<dyn AssistantQuery>,
    pub user_scores: Arc<dyn UserScoreQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(assistant: Arc<dyn AssistantQuery>, user_scores: Arc<dyn UserScoreQuery>) -> Self {
        Self {
            assistant,
            user_scores,
        }
    }
}
