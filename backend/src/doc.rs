//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the request, response, and
//! error schemas they use. The document is served at `/openapi.json` behind
//! the docs credential gate and exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::ask::{AskRequestBody, AskResponseBody};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::user_score::{UserScoreRequestBody, UserScoreResponseBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Delegation assistant API",
        description = "Answers questions about delegated tasks, scoped to the caller's role."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::ask::ask,
        crate::inbound::http::user_score::user_score,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AskRequestBody,
        AskResponseBody,
        UserScoreRequestBody,
        UserScoreResponseBody,
        HealthStatus,
        Error,
        ErrorCode
    )),
    tags(
        (name = "assistant", description = "Task questions and score summaries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
