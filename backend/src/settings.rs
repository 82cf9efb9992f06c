//! Application settings loaded via OrthoConfig.
//!
//! The port carries a declared default so an empty environment still merges
//! into a document; the remaining fields are optional and their accessors
//! supply defaults, so a bare environment yields a runnable development
//! configuration.
//! Environment variables use the `ASSISTANT_` prefix, for example
//! `ASSISTANT_DATABASE_URL` or `ASSISTANT_MODEL_TIMEOUT_SECS`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::ModelSettings;
use crate::outbound::anthropic::ANTHROPIC_MESSAGES_URL;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/delegation";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SECRETS_FILE: &str = "/var/run/secrets/assistant.json";
const DEFAULT_DOCS_SECRET_NAME: &str = "JWT_SECRET";
const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Settings for the HTTP server, store, model client, and docs credential.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASSISTANT")]
pub struct AppSettings {
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string for the user and task store.
    pub database_url: Option<String>,
    /// Maximum pooled store connections.
    pub db_pool_size: Option<u32>,
    /// Messages API key.
    pub anthropic_api_key: Option<String>,
    /// Messages API endpoint override.
    pub anthropic_url: Option<String>,
    /// Model identifier.
    pub model: Option<String>,
    /// Completion token limit.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Model request deadline in seconds.
    pub model_timeout_secs: Option<u64>,
    /// JSON document holding named secrets.
    pub secrets_file: Option<PathBuf>,
    /// Name of the secret used as the docs password.
    pub docs_secret_name: Option<String>,
}

impl AppSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }

    /// Store connection string.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Pool size, at least one.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE).max(1)
    }

    /// API key, if configured, in a zeroising buffer.
    pub fn anthropic_api_key(&self) -> Option<Zeroizing<String>> {
        self.anthropic_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    /// Messages API endpoint.
    pub fn anthropic_url(&self) -> &str {
        self.anthropic_url.as_deref().unwrap_or(ANTHROPIC_MESSAGES_URL)
    }

    /// Model parameters used for every completion.
    pub fn model_settings(&self) -> ModelSettings {
        let defaults = ModelSettings::default();
        ModelSettings {
            model: self.model.clone().unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
        }
    }

    /// Model request deadline; zero is raised to one second.
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(
            self.model_timeout_secs
                .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Secrets document location.
    pub fn secrets_file(&self) -> PathBuf {
        self.secrets_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRETS_FILE))
    }

    /// Docs secret name.
    pub fn docs_secret_name(&self) -> &str {
        self.docs_secret_name
            .as_deref()
            .unwrap_or(DEFAULT_DOCS_SECRET_NAME)
    }
}
