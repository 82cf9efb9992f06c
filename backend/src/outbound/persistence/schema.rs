//! Diesel table definitions for the externally managed store.
//!
//! The tables are owned by the systems that create users and tasks; this
//! service never migrates them. Task fields whose shape varies between
//! writers (scores, target dates, user references) are `jsonb` so the adapter
//! can normalise them instead of failing to load the row.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Opaque identifier (object id hex, UUID, or stringified number).
        id -> Text,
        /// Display name.
        name -> Nullable<Text>,
        /// Role label, compared case-insensitively.
        role -> Nullable<Text>,
    }
}

diesel::table! {
    /// Delegated tasks.
    tasks (id) {
        /// Opaque identifier, used only for stable ordering.
        id -> Text,
        /// Task title.
        task_title -> Nullable<Text>,
        /// Status label.
        task_status -> Nullable<Text>,
        /// Date string, timestamp string, or free text.
        target_date -> Nullable<Jsonb>,
        /// Number, or any other JSON value for ungraded tasks.
        task_score -> Nullable<Jsonb>,
        /// Array of user references.
        delegatee_ids -> Nullable<Jsonb>,
        /// Single user reference.
        delegator_id -> Nullable<Jsonb>,
    }
}
