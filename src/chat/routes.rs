//! REST endpoint for the chat assistant.
//!
//! `POST /api/assistant/chat` takes the transcript plus context metadata,
//! builds the system instruction server-side, and relays the provider's
//! streamed reply as SSE events in arrival order. The system instruction is
//! never exposed to the caller.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{stream, Stream, StreamExt};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::prompt::{self, ChatContext};

/// Shared state for the assistant routes.
#[derive(Clone)]
pub struct AssistantState {
    pub llm: Arc<dyn LlmProvider>,
}

/// One transcript message on the wire.
#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/assistant/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub current_step: Option<usize>,
}

/// Build the outbound conversation: server-derived system instruction
/// first, then the caller's transcript. Caller-supplied system messages are
/// dropped — clients cannot inject instructions.
fn build_messages(request: &ChatRequest) -> Vec<ChatMessage> {
    let context: ChatContext = request
        .context
        .as_deref()
        .unwrap_or_default()
        .parse()
        .unwrap_or_default();

    let mut messages = vec![ChatMessage::system(prompt::system_prompt(
        context,
        request.current_step,
    ))];

    for msg in &request.messages {
        match msg.role.as_str() {
            "user" => messages.push(ChatMessage::user(&msg.content)),
            "assistant" => messages.push(ChatMessage::assistant(&msg.content)),
            other => {
                tracing::debug!(role = other, "Dropping message with unsupported role");
            }
        }
    }

    messages
}

type EventStream = Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>>;

async fn chat(
    State(state): State<AssistantState>,
    Json(request): Json<ChatRequest>,
) -> Sse<EventStream> {
    let messages = build_messages(&request);
    tracing::debug!(
        context = %request.context.as_deref().unwrap_or("general"),
        step = ?request.current_step,
        messages = messages.len(),
        "Assistant chat request"
    );

    let outbound = CompletionRequest::new(messages);
    let stream: EventStream = match state.llm.complete_stream(outbound).await {
        Ok(chunks) => Box::pin(chunks.map(|item| {
            Ok(match item {
                Ok(text) => Event::default().data(text),
                Err(e) => Event::default().event("error").data(e.to_string()),
            })
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Assistant request failed");
            Box::pin(stream::once(async move {
                Ok(Event::default().event("error").data(e.to_string()))
            }))
        }
    };

    Sse::new(stream)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the assistant REST routes.
pub fn assistant_routes(state: AssistantState) -> Router {
    Router::new()
        .route("/api/assistant/chat", post(chat))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
