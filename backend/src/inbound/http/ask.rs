//! Question answering endpoint.
//!
//! ```text
//! POST /ask {"user_id":"64b7f0c2e1a4","prompt":"What is due this week?"}
//! ```
//!
//! This is the always-answer boundary: apart from an unknown user (404), every
//! failure, including a blank `user_id`, is logged and replaced by a textual
//! apology carrying the request trace identifier.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::AskRequest;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Request body for `POST /ask`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AskRequestBody {
    #[schema(example = "64b7f0c2e1a4")]
    pub user_id: String,
    #[schema(example = "Which of my tasks are overdue?")]
    pub prompt: String,
}

/// Response body for `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AskResponseBody {
    pub answer: String,
}

fn fallback_answer(trace_id: Option<&str>) -> String {
    let base = "Something went wrong while processing your request. Please try again later.";
    match trace_id {
        Some(id) => format!("{base} (reference: {id})"),
        None => base.to_owned(),
    }
}

fn absorb(error: Error) -> ApiResult<web::Json<AskResponseBody>> {
    match error.code() {
        ErrorCode::NotFound => Err(error),
        code => {
            error!(
                ?code,
                message = error.message(),
                trace_id = error.trace_id(),
                "ask failed; answering with fallback"
            );
            Ok(web::Json(AskResponseBody {
                answer: fallback_answer(error.trace_id()),
            }))
        }
    }
}

/// Answer a question about the caller's delegated tasks.
#[utoipa::path(
    post,
    path = "/ask",
    request_body = AskRequestBody,
    responses(
        (status = 200, description = "Answer, short-circuit reply, or apology", body = AskResponseBody),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["assistant"],
    operation_id = "ask"
)]
#[post("/ask")]
pub async fn ask(
    state: web::Data<HttpState>,
    payload: web::Json<AskRequestBody>,
) -> ApiResult<web::Json<AskResponseBody>> {
    let AskRequestBody { user_id, prompt } = payload.into_inner();
    let outcome = match parse_user_id(&user_id) {
        Ok(user_id) => {
            let request = AskRequest {
                user_id,
                question: prompt,
            };
            state.assistant.ask(&request).await
        }
        Err(error) => Err(error),
    };

    match outcome {
        Ok(answer) => Ok(web::Json(AskResponseBody {
            answer: answer.text,
        })),
        Err(error) => absorb(error),
    }
}
