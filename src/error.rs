//! Error types for fit-assist.

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("Invalid message format: {0}")]
    InvalidMessage(String),
}

/// External gateway errors (weather, food database).
///
/// Both variants are recoverable by contract; no gateway failure may
/// reach the transport layer as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{service} gateway unavailable: {reason}")]
    Unavailable { service: String, reason: String },

    #[error("no result found for {query:?}")]
    NotFound { query: String },
}

impl GatewayError {
    pub fn unavailable(service: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unavailable {
            service: service.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }
}

/// Result type alias for the assistant.
pub type Result<T> = std::result::Result<T, Error>;
