//! Credentials gating the API documentation.
//!
//! The docs are protected by a single fixed username and a password equal to
//! a named secret. The secret is resolved once at startup into an immutable
//! [`DocsAccess`] which is handed to [`crate::middleware::DocsGuard`].

use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{SecretsProvider, SecretsProviderError};

/// Username accepted for documentation access.
pub const DOCS_USERNAME: &str = "Admin";
const DEV_DOCS_SECRET: &str = "default_jwt_secret";

/// Build mode for credential resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to a development secret with a warning.
    Debug,
    /// Release builds refuse to start without the secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// ```rust
    /// use delegation_backend::inbound::http::docs_access::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while resolving documentation credentials.
#[derive(Debug, thiserror::Error)]
pub enum DocsConfigError {
    /// The secret could not be obtained in a release build.
    #[error("docs secret {name} unavailable: {source}")]
    Secret {
        name: String,
        #[source]
        source: SecretsProviderError,
    },
}

/// Immutable documentation credential.
///
/// Only a SHA-256 digest of the secret is retained, and candidate passwords
/// are compared digest to digest.
#[derive(Clone, PartialEq, Eq)]
pub struct DocsAccess {
    password_digest: [u8; 32],
}

impl DocsAccess {
    /// Build a credential whose password is `secret`.
    ///
    /// ```rust
    /// use delegation_backend::inbound::http::docs_access::DocsAccess;
    ///
    /// let access = DocsAccess::new("s3cret");
    /// assert!(access.verify("Admin", "s3cret"));
    /// assert!(!access.verify("admin", "s3cret"));
    /// ```
    pub fn new(secret: &str) -> Self {
        Self {
            password_digest: digest(secret),
        }
    }

    /// Whether `username`/`password` grant access.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let password_ok = digest(password) == self.password_digest;
        username == DOCS_USERNAME && password_ok
    }
}

impl std::fmt::Debug for DocsAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsAccess").finish_non_exhaustive()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Resolve the docs credential from `secret_name`.
///
/// # Errors
///
/// Returns [`DocsConfigError::Secret`] in release builds when the provider
/// fails. Debug builds log a warning and use a development secret instead.
pub async fn resolve_docs_access<P>(
    provider: &P,
    secret_name: &str,
    mode: BuildMode,
) -> Result<DocsAccess, DocsConfigError>
where
    P: SecretsProvider + ?Sized,
{
    match provider.fetch_secret(secret_name).await {
        Ok(secret) => Ok(DocsAccess::new(secret.as_str())),
        Err(error) if mode == BuildMode::Debug => {
            warn!(%error, secret = secret_name, "docs secret unavailable; using development secret");
            let fallback = Zeroizing::new(DEV_DOCS_SECRET.to_owned());
            Ok(DocsAccess::new(fallback.as_str()))
        }
        Err(source) => Err(DocsConfigError::Secret {
            name: secret_name.to_owned(),
            source,
        }),
    }
}
