//! Builders wiring adapters into the driving ports used by handlers.

use std::sync::Arc;

use actix_web::web;

use delegation_backend::domain::ports::LanguageModel;
use delegation_backend::domain::{AnswerService, ModelSettings, PromptComposer};
use delegation_backend::inbound::http::state::HttpState;
use delegation_backend::outbound::persistence::{
    DbPool, DieselTaskRepository, DieselUserRepository,
};

/// Build the handler state from the store pool and the model client.
pub(super) fn build_http_state(
    pool: &DbPool,
    model: Arc<dyn LanguageModel>,
    model_settings: ModelSettings,
) -> web::Data<HttpState> {
    let service = Arc::new(AnswerService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselTaskRepository::new(pool.clone())),
        PromptComposer::new(model, model_settings),
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}
