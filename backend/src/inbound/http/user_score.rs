//! User score endpoint.
//!
//! ```text
//! POST /user-score {"user_id":"64b7f0c2e1a4"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UserScore;
use crate::domain::{Error, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Request body for `POST /user-score`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserScoreRequestBody {
    #[schema(example = "64b7f0c2e1a4")]
    pub user_id: String,
}

/// Response body for `POST /user-score`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserScoreResponseBody {
    #[schema(example = "64b7f0c2e1a4")]
    pub user_id: String,
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(value_type = String, example = "Boss")]
    pub role: String,
    #[schema(example = 42.5)]
    pub total_score: f64,
}

impl From<UserScore> for UserScoreResponseBody {
    fn from(score: UserScore) -> Self {
        Self {
            user_id: score.user_id.into(),
            name: score.name,
            role: score.role.as_str().to_owned(),
            total_score: score.total_score,
        }
    }
}

/// Report a user's identity, normalised role, and total visible score.
#[utoipa::path(
    post,
    path = "/user-score",
    request_body = UserScoreRequestBody,
    responses(
        (status = 200, description = "Score summary", body = UserScoreResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["assistant"],
    operation_id = "userScore"
)]
#[post("/user-score")]
pub async fn user_score(
    state: web::Data<HttpState>,
    payload: web::Json<UserScoreRequestBody>,
) -> ApiResult<web::Json<UserScoreResponseBody>> {
    let user_id = parse_user_id(&payload.user_id)?;
    let score = state.user_scores.user_score(&user_id).await?;
    Ok(web::Json(score.into()))
}
