//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside individual handlers:
//! trace correlation and the documentation credential gate.

pub mod docs_guard;
pub mod trace;

pub use docs_guard::DocsGuard;
pub use trace::{TRACE_ID_HEADER, Trace};
