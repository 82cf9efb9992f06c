//! Secrets provider adapters.

mod file_secrets_provider;

pub use file_secrets_provider::FileSecretsProvider;
