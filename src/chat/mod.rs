//! Chat assistant — floating-widget sessions and the server-side relay.
//!
//! A `ChatSession` owns one transcript and enforces the single in-flight
//! reply rule; `prompt` selects greetings and system instructions per
//! context; `routes` exposes the HTTP endpoint that builds the system
//! instruction and relays the provider's stream.

pub mod prompt;
pub mod routes;
pub mod session;

pub use prompt::{greeting, system_prompt, ChatContext};
pub use routes::{assistant_routes, AssistantState, ChatRequest, WireMessage};
pub use session::{ChatSession, ReplySubscription, SessionState, TranscriptMessage};
