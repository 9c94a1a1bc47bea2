//! Server configuration, read from the environment.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Configuration for the onboarding server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// API key for the model provider.
    pub api_key: SecretString,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Base URL of the chat-completions endpoint.
    pub provider_base_url: String,
}

impl ServerConfig {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Build config from environment variables.
    ///
    /// Required: `OPENAI_API_KEY`.
    /// Optional: `TALENTRA_MODEL`, `TALENTRA_PORT`, `TALENTRA_PROVIDER_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model =
            std::env::var("TALENTRA_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let port = match std::env::var("TALENTRA_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TALENTRA_PORT".to_string(),
                message: format!("not a valid port number: {raw}"),
            })?,
            Err(_) => Self::DEFAULT_PORT,
        };

        let provider_base_url = std::env::var("TALENTRA_PROVIDER_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            model,
            port,
            provider_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(ServerConfig::DEFAULT_MODEL, "gpt-4o");
        assert_eq!(ServerConfig::DEFAULT_PORT, 8080);
    }
}
