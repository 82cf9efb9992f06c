//! User data model.
//!
//! Users are owned by the external store; this service only reads them. The
//! identifier is opaque: it may be a hex object id, a UUID, or a stringified
//! number depending on how the store was populated.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display name reported when the store has none for a user.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty or only whitespace.
    #[error("user id must not be empty")]
    EmptyId,
}

/// Opaque user identifier in its canonical string form.
///
/// Kept verbatim, surrounding whitespace included, and compared byte for byte
/// against task references. Only blank values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use delegation_backend::domain::UserId;
    ///
    /// let id = UserId::new("64b7f0c2e1a4").expect("valid id");
    /// assert_eq!(id.as_ref(), "64b7f0c2e1a4");
    /// assert_eq!(UserId::new(" 7 ").expect("valid id").as_ref(), " 7 ");
    /// assert!(UserId::new("   ").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role deciding which tasks a user may ask about.
///
/// Parsing is case-insensitive. Missing or unrecognised roles resolve to
/// [`Role::Delegatee`], the narrowest visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Sees tasks they delegated and tasks delegated to them.
    Boss,
    /// Sees tasks they delegated.
    Delegator,
    /// Sees tasks delegated to them.
    #[default]
    Delegatee,
}

impl Role {
    /// Normalise a raw role value from the store.
    ///
    /// # Examples
    /// ```
    /// use delegation_backend::domain::Role;
    ///
    /// assert_eq!(Role::from_raw(Some(" BOSS ")), Role::Boss);
    /// assert_eq!(Role::from_raw(Some("manager")), Role::Delegatee);
    /// assert_eq!(Role::from_raw(None), Role::Delegatee);
    /// ```
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("boss") => Self::Boss,
            Some("delegator") => Self::Delegator,
            _ => Self::Delegatee,
        }
    }

    /// Canonical capitalised name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boss => "Boss",
            Self::Delegator => "Delegator",
            Self::Delegatee => "Delegatee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    role: Role,
}

impl User {
    /// Build a user snapshot. A blank name is replaced by
    /// [`UNKNOWN_USER_NAME`].
    pub fn new(id: UserId, name: Option<String>, role: Role) -> Self {
        let name = name
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_USER_NAME.to_owned());
        Self { id, name, role }
    }

    /// Identifier of the user.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name of the user.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Normalised role of the user.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("boss", Role::Boss)]
    #[case("Boss", Role::Boss)]
    #[case("DELEGATOR", Role::Delegator)]
    #[case("delegatee", Role::Delegatee)]
    #[case("  Delegator\n", Role::Delegator)]
    #[case("manager", Role::Delegatee)]
    #[case("", Role::Delegatee)]
    fn role_parsing_is_case_insensitive_with_delegatee_default(
        #[case] raw: &str,
        #[case] expected: Role,
    ) {
        assert_eq!(Role::from_raw(Some(raw)), expected);
    }

    #[rstest]
    fn missing_role_defaults_to_delegatee() {
        assert_eq!(Role::from_raw(None), Role::Delegatee);
    }

    #[rstest]
    #[case(Role::Boss, "Boss")]
    #[case(Role::Delegator, "Delegator")]
    #[case(Role::Delegatee, "Delegatee")]
    fn role_displays_canonical_name(#[case] role: Role, #[case] expected: &str) {
        assert_eq!(role.to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(" \t ")]
    fn user_id_rejects_blank_values(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(UserValidationError::EmptyId));
    }

    #[rstest]
    fn user_id_keeps_surrounding_whitespace() {
        let padded = UserId::new(" 42 ").expect("valid id");
        assert_eq!(padded.as_ref(), " 42 ");
        assert_ne!(padded, UserId::new("42").expect("valid id"));
    }

    #[rstest]
    fn user_id_deserialises_through_validation() {
        let id: UserId = serde_json::from_str("\"42\"").expect("valid id");
        assert_eq!(id.as_ref(), "42");
        assert!(serde_json::from_str::<UserId>("\"  \"").is_err());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  ".to_owned()))]
    fn blank_names_fall_back_to_unknown(#[case] name: Option<String>) {
        let user = User::new(UserId::new("u1").expect("id"), name, Role::Boss);
        assert_eq!(user.name(), UNKNOWN_USER_NAME);
    }
}
