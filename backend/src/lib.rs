//! Delegation assistant backend.
//!
//! Answers natural-language questions about delegated tasks. Each request
//! resolves the caller, filters the task collection to what their role may
//! see, and either short-circuits or asks a language model to answer from
//! that data alone.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
