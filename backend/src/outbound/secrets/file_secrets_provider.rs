//! `SecretsProvider` backed by a mounted JSON document.
//!
//! Secret managers commonly project a secret bundle into the container as a
//! JSON object of name/value pairs. The file is read on every call; callers
//! fetch once at startup.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{SecretsProvider, SecretsProviderError};

/// Reads named string secrets from a JSON object file.
#[derive(Debug, Clone)]
pub struct FileSecretsProvider {
    path: PathBuf,
}

impl FileSecretsProvider {
    /// Create a provider reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the secrets document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn lookup(document: &[u8], name: &str) -> Result<Zeroizing<String>, SecretsProviderError> {
    let parsed: Value = serde_json::from_slice(document)
        .map_err(|err| SecretsProviderError::malformed(format!("invalid JSON: {err}")))?;
    let Value::Object(mut entries) = parsed else {
        return Err(SecretsProviderError::malformed(
            "secrets document must be a JSON object",
        ));
    };
    take_string(&mut entries, name)
}

fn take_string(
    entries: &mut Map<String, Value>,
    name: &str,
) -> Result<Zeroizing<String>, SecretsProviderError> {
    match entries.remove(name) {
        None | Some(Value::Null) => Err(SecretsProviderError::missing(name)),
        Some(Value::String(value)) if value.is_empty() => Err(SecretsProviderError::missing(name)),
        Some(Value::String(value)) => Ok(Zeroizing::new(value)),
        Some(_) => Err(SecretsProviderError::malformed(format!(
            "{name} is not a string"
        ))),
    }
}

#[async_trait]
impl SecretsProvider for FileSecretsProvider {
    async fn fetch_secret(&self, name: &str) -> Result<Zeroizing<String>, SecretsProviderError> {
        let document = Zeroizing::new(tokio::fs::read(&self.path).await.map_err(|err| {
            SecretsProviderError::unavailable(format!("{}: {err}", self.path.display()))
        })?);
        debug!(path = %self.path.display(), %name, "reading secret");
        lookup(&document, name)
    }
}
