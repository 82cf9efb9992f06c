//! Anthropic Messages API adapter.
//!
//! This module provides a thin HTTP implementation of the `LanguageModel`
//! port.

mod dto;
mod http_client;

pub use http_client::{ANTHROPIC_MESSAGES_URL, AnthropicHttpClient};
