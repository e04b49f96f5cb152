// src/infra/errors.rs — Error types for Kaizen

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KaizenError {
    // External completion errors (always recovered locally by the chat service)
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("Provider '{provider}' timed out after {timeout_ms}ms")]
    ProviderTimeout { provider: String, timeout_ms: u64 },

    #[error("No credential for provider '{provider}'. Set {env}.")]
    MissingCredential { provider: String, env: String },

    // Storage
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid stored record '{id}': {message}")]
    InvalidRecord { id: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KaizenError {
    /// Errors that the chat turn absorbs by answering from local templates.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            KaizenError::Provider { .. }
                | KaizenError::ProviderTimeout { .. }
                | KaizenError::MissingCredential { .. }
        )
    }
}
