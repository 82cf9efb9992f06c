//! Task snapshots read from the external store.
//!
//! Task documents are loosely typed at the source: scores may be missing or
//! non-numeric, target dates may be free text, and user references may be
//! numbers, strings, or native object ids. Adapters normalise those shapes
//! into the types below before the domain sees them.

use std::fmt;

use chrono::NaiveDate;

use super::UserId;

/// A reference to a user held by a task, normalised to string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserRef(String);

impl UserRef {
    /// Wrap an already-stringified reference.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the reference text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this reference points at `user`.
    pub fn refers_to(&self, user: &UserId) -> bool {
        self.0 == user.as_ref()
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Score recorded against a task.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Score {
    /// No score recorded.
    #[default]
    Missing,
    /// A numeric score; the only kind that counts towards totals.
    Numeric(f64),
    /// A non-numeric value kept verbatim for display.
    Other(String),
}

impl Score {
    /// Contribution of this score to an aggregate.
    #[must_use]
    pub fn numeric_value(&self) -> f64 {
        match self {
            Self::Numeric(value) if value.is_finite() => *value,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("n/a"),
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Target date of a task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetDate {
    /// No date recorded.
    #[default]
    Missing,
    /// A calendar date.
    Date(NaiveDate),
    /// A value that is not a recognisable date, kept verbatim.
    Text(String),
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("n/a"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Text(raw) => f.write_str(raw),
        }
    }
}

/// Read-only snapshot of a task record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Task {
    /// Task title.
    pub title: Option<String>,
    /// Free-form status label.
    pub status: Option<String>,
    /// Target completion date.
    pub target_date: TargetDate,
    /// Score awarded for the task.
    pub score: Score,
    /// Users the task is delegated to; may be empty.
    pub delegatees: Vec<UserRef>,
    /// User who delegated the task; unset only in degenerate data.
    pub delegator: Option<UserRef>,
}

impl Task {
    /// Whether `user` is among the delegatees.
    #[must_use]
    pub fn is_delegated_to(&self, user: &UserId) -> bool {
        self.delegatees.iter().any(|delegatee| delegatee.refers_to(user))
    }

    /// Whether `user` is the delegator.
    #[must_use]
    pub fn is_delegated_by(&self, user: &UserId) -> bool {
        self.delegator
            .as_ref()
            .is_some_and(|delegator| delegator.refers_to(user))
    }
}
