//! Domain primitives, pure task logic, ports, and use-case services.
//!
//! Purpose: keep the role-scoped task pipeline independent of HTTP, the
//! database driver, and the model provider. Adapters depend on this module;
//! it depends on none of them.
//!
//! Public surface:
//! - `User`, `UserId`, `Role`: read-only user snapshot and role normalisation.
//! - `Task`, `Score`, `TargetDate`, `UserRef`: read-only task snapshot.
//! - `filter_tasks_for`, `total_score`: role-scoped filtering and aggregation.
//! - `PromptComposer`: short-circuit answers and model prompt rendering.
//! - `AnswerService`: implementation of the driving ports.
//! - `Error`, `ErrorCode`: transport-agnostic failures.

pub mod answer_service;
pub mod error;
pub mod ports;
pub mod prompt_composer;
pub mod task;
pub mod task_filter;
pub mod trace_id;
pub mod user;

pub use self::answer_service::{AnswerService, NO_RELEVANT_DATA_ANSWER};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::prompt_composer::{
    GREETING_ANSWER, MODEL_UNAVAILABLE_ANSWER, ModelSettings, PromptComposer, ShortCircuit,
    detect_short_circuit, render_prompt, render_task_line, total_score_answer,
};
pub use self::task::{Score, TargetDate, Task, UserRef};
pub use self::task_filter::{filter_tasks_for, total_score};
pub use self::trace_id::TraceId;
pub use self::user::{Role, UNKNOWN_USER_NAME, User, UserId, UserValidationError};
