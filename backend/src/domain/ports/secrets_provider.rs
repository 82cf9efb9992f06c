//! Port for startup-time secret retrieval.

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::define_port_error;

define_port_error! {
    /// Failures raised by secrets provider adapters.
    pub enum SecretsProviderError {
        /// The secret source could not be read.
        Unavailable => "secret source unavailable: {message}",
        /// The source holds no value under the requested name.
        Missing => "secret not found: {message}",
        /// The source or the value has an unexpected shape.
        Malformed => "secret source malformed: {message}",
    }
}

/// Supplies named credential values. Consulted once during startup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretsProvider: Send + Sync {
    /// Fetch the secret stored under `name`.
    async fn fetch_secret(&self, name: &str) -> Result<Zeroizing<String>, SecretsProviderError>;
}
