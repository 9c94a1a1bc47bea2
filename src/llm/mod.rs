//! LLM integration.
//!
//! The assistant talks to an OpenAI-compatible chat-completions endpoint
//! through the `LlmProvider` trait, so handlers and tests can substitute
//! deterministic fakes.

pub mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::{
    ChatMessage, CompletionRequest, CompletionResponse, LlmProvider, Role, TextStream,
};

use std::sync::Arc;

use crate::config::ServerConfig;

/// Create the production LLM provider from server configuration.
pub fn create_provider(config: &ServerConfig) -> Arc<dyn LlmProvider> {
    tracing::info!("Using chat-completions provider (model: {})", config.model);
    Arc::new(OpenAiProvider::new(
        config.api_key.clone(),
        config.model.clone(),
        config.provider_base_url.clone(),
    ))
}
