//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, UserId, UserValidationError};

/// Parse the `user_id` body field, rejecting blank values with a 400.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| match err {
        UserValidationError::EmptyId => Error::invalid_request("user_id must not be empty")
            .with_details(json!({ "field": "user_id", "code": "empty_user_id" })),
    })
}
