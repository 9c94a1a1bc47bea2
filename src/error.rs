//! Error types for Talentra.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} returned status {status}: {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Stream from {provider} interrupted: {reason}")]
    StreamInterrupted { provider: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wizard controller errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("{operation} submission failed: {reason}")]
    Submission { operation: String, reason: String },
}

/// Chat session errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("A reply is already in flight for this session")]
    ReplyInFlight,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
