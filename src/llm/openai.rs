//! OpenAI-compatible chat-completions client over reqwest.
//!
//! Speaks the `/chat/completions` wire format, including SSE streaming
//! (`data: {...}` lines terminated by `data: [DONE]`).

use async_trait::async_trait;
use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::LlmError;

use super::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, LlmProvider, TextStream,
};

const PROVIDER_NAME: &str = "openai";

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    fn request_body(&self, request: &CompletionRequest, stream: bool) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|m| json!({ "role": role_str(m), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "stream": stream,
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    async fn send(&self, body: &serde_json::Value) -> Result<reqwest::Response, LlmError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::HttpStatus {
                provider: PROVIDER_NAME.to_string(),
                status,
                body,
            });
        }
        Ok(response)
    }
}

fn role_str(message: &ChatMessage) -> &'static str {
    use super::provider::Role;
    match message.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.request_body(&request, false);
        let response = self.send(&body).await?;

        let value: serde_json::Value =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let content = value["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER_NAME.to_string(),
                reason: "missing choices[0].message.content".to_string(),
            })?
            .to_string();

        Ok(CompletionResponse { content })
    }

    async fn complete_stream(&self, request: CompletionRequest) -> Result<TextStream, LlmError> {
        let body = self.request_body(&request, true);
        let response = self.send(&body).await?;

        let (tx, rx) = mpsc::channel::<Result<String, LlmError>>(64);

        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            // Carries any incomplete SSE line across byte chunks.
            let mut pending = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = tx
                            .send(Err(LlmError::StreamInterrupted {
                                provider: PROVIDER_NAME.to_string(),
                                reason: e.to_string(),
                            }))
                            .await;
                        return;
                    }
                };

                pending.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = pending.find('\n') {
                    let line: String = pending.drain(..=newline).collect();
                    let line = line.trim();
                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    if data == "[DONE]" {
                        return;
                    }
                    if let Ok(value) = serde_json::from_str::<serde_json::Value>(data) {
                        if let Some(delta) = value["choices"][0]["delta"]["content"].as_str() {
                            if !delta.is_empty() && tx.send(Ok(delta.to_string())).await.is_err() {
                                // Subscriber dropped the stream
                                return;
                            }
                        }
                    }
                }
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}
