//! HTTP server configuration resolved once at startup.

use std::net::SocketAddr;
use std::sync::Arc;

use delegation_backend::domain::ModelSettings;
use delegation_backend::domain::ports::LanguageModel;
use delegation_backend::inbound::http::docs_access::{
    BuildMode, DocsAccess, DocsConfigError, resolve_docs_access,
};
use delegation_backend::outbound::anthropic::AnthropicHttpClient;
use delegation_backend::outbound::persistence::{DbPool, PoolConfig, PoolError};
use delegation_backend::outbound::secrets::FileSecretsProvider;
use delegation_backend::settings::AppSettings;
use reqwest::Url;
use tracing::{info, warn};
use zeroize::Zeroizing;

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The store pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The model endpoint is not a valid URL.
    #[error("invalid model endpoint {url}: {source}")]
    ModelUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client for the model could not be built.
    #[error("failed to build model client: {0}")]
    ModelClient(#[from] reqwest::Error),
    /// The docs credential could not be resolved.
    #[error(transparent)]
    Docs(#[from] DocsConfigError),
}

/// Immutable configuration handed to [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) model: Arc<dyn LanguageModel>,
    pub(crate) model_settings: ModelSettings,
    pub(crate) docs_access: DocsAccess,
}

impl ServerConfig {
    /// Build every adapter the server needs from `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when an adapter cannot be constructed or, in
    /// release builds, when the docs secret is unavailable.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, StartupError> {
        let db_pool = DbPool::new(
            PoolConfig::new(settings.database_url()).with_max_size(settings.db_pool_size()),
        )
        .await?;

        let endpoint =
            Url::parse(settings.anthropic_url()).map_err(|source| StartupError::ModelUrl {
                url: settings.anthropic_url().to_owned(),
                source,
            })?;
        let api_key = settings.anthropic_api_key().unwrap_or_else(|| {
            warn!("no model API key configured; model-backed answers will degrade to apologies");
            Zeroizing::new(String::new())
        });
        let model = AnthropicHttpClient::new(endpoint, api_key, settings.model_timeout())?;

        let secrets = FileSecretsProvider::new(settings.secrets_file());
        let docs_access = resolve_docs_access(
            &secrets,
            settings.docs_secret_name(),
            BuildMode::from_debug_assertions(),
        )
        .await?;

        let model_settings = settings.model_settings();
        info!(
            bind_addr = %settings.bind_addr(),
            model = %model_settings.model,
            secrets_file = %secrets.path().display(),
            "server configuration resolved"
        );

        Ok(Self {
            bind_addr: settings.bind_addr(),
            db_pool,
            model: Arc::new(model),
            model_settings,
            docs_access,
        })
    }
}
