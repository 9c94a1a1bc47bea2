//! Chat session — transcript, reply streaming, and the
//! closed/idle/awaiting-reply state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::Serialize;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::error::{ChatError, LlmError};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider, Role};

use super::prompt::{self, ChatContext};

/// One message in a session transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TranscriptMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Idle,
    AwaitingReply,
}

/// Subscription to one in-flight reply.
///
/// Yields ordered text increments; the stream ending means the reply
/// completed, an `Err` item is terminal. Dropping the subscription does NOT
/// cancel the reply — it keeps appending to the session transcript
/// (let-it-complete). Cancellation is the explicit `cancel()` operation.
#[derive(Debug)]
pub struct ReplySubscription {
    rx: mpsc::Receiver<Result<String, LlmError>>,
    handle: tokio::task::JoinHandle<()>,
    in_flight: Arc<AtomicBool>,
}

impl ReplySubscription {
    /// Next text increment, in arrival order. `None` when the reply is done.
    pub async fn next_chunk(&mut self) -> Option<Result<String, LlmError>> {
        self.rx.recv().await
    }

    /// Drain the subscription into the full reply text.
    pub async fn collect_text(mut self) -> Result<String, LlmError> {
        let mut text = String::new();
        while let Some(chunk) = self.next_chunk().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }

    /// Abort the in-flight reply. The partial assistant message already in
    /// the transcript is kept; the session returns to idle.
    pub fn cancel(self) {
        self.handle.abort();
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// One floating-widget chat session.
///
/// The transcript is append-only, in-memory only, and survives the widget
/// being closed and reopened; it is discarded with the session. At most one
/// reply may be in flight at a time.
pub struct ChatSession {
    context: ChatContext,
    step: Option<usize>,
    llm: Arc<dyn LlmProvider>,
    transcript: Arc<RwLock<Vec<TranscriptMessage>>>,
    in_flight: Arc<AtomicBool>,
    open: bool,
    greeted: bool,
}

impl ChatSession {
    pub fn new(context: ChatContext, step: Option<usize>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            context,
            step,
            llm,
            transcript: Arc::new(RwLock::new(Vec::new())),
            in_flight: Arc::new(AtomicBool::new(false)),
            open: false,
            greeted: false,
        }
    }

    pub fn context(&self) -> ChatContext {
        self.context
    }

    /// Update the wizard step the widget is embedded next to. Affects
    /// future outbound calls, not the already-seeded greeting.
    pub fn set_step(&mut self, step: Option<usize>) {
        self.step = step;
    }

    pub fn state(&self) -> SessionState {
        if !self.open {
            SessionState::Closed
        } else if self.in_flight.load(Ordering::SeqCst) {
            SessionState::AwaitingReply
        } else {
            SessionState::Idle
        }
    }

    /// Open the widget. The first open seeds exactly one assistant
    /// greeting; reopening shows prior history unchanged.
    pub async fn open(&mut self) {
        self.open = true;
        if !self.greeted {
            self.greeted = true;
            let text = prompt::greeting(self.context, self.step);
            self.transcript
                .write()
                .await
                .push(TranscriptMessage::new(Role::Assistant, text));
        }
    }

    /// Close the widget. The transcript stays in memory and any in-flight
    /// reply runs to completion, appending to the hidden transcript.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Snapshot of the transcript.
    pub async fn transcript(&self) -> Vec<TranscriptMessage> {
        self.transcript.read().await.clone()
    }

    /// Submit user input and start streaming the reply.
    ///
    /// Rejected without any state change when the input is blank or a reply
    /// is already in flight — exactly one outstanding request per session.
    pub async fn submit(&self, input: &str) -> Result<ReplySubscription, ChatError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ChatError::ReplyInFlight);
        }

        // Append the user message, then snapshot the whole transcript for
        // the outbound call.
        let messages = {
            let mut transcript = self.transcript.write().await;
            transcript.push(TranscriptMessage::new(Role::User, input));
            let mut messages =
                vec![ChatMessage::system(prompt::system_prompt(self.context, self.step))];
            messages.extend(
                transcript
                    .iter()
                    .map(|m| ChatMessage {
                        role: m.role,
                        content: m.content.clone(),
                    }),
            );
            messages
        };

        let (tx, rx) = mpsc::channel::<Result<String, LlmError>>(64);
        let llm = Arc::clone(&self.llm);
        let transcript = Arc::clone(&self.transcript);
        let in_flight = Arc::clone(&self.in_flight);

        let handle = tokio::spawn(async move {
            let mut stream = match llm.complete_stream(CompletionRequest::new(messages)).await {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(error = %e, "Assistant request failed");
                    in_flight.store(false, Ordering::SeqCst);
                    let _ = tx.send(Err(e)).await;
                    return;
                }
            };

            // The assistant message is created on the first chunk and grows
            // in place as further chunks arrive.
            let mut reply_id: Option<Uuid> = None;

            while let Some(item) = stream.next().await {
                match item {
                    Ok(chunk) => {
                        let mut transcript = transcript.write().await;
                        match reply_id {
                            Some(id) => {
                                if let Some(msg) =
                                    transcript.iter_mut().find(|m| m.id == id)
                                {
                                    msg.content.push_str(&chunk);
                                }
                            }
                            None => {
                                let msg = TranscriptMessage::new(Role::Assistant, chunk.clone());
                                reply_id = Some(msg.id);
                                transcript.push(msg);
                            }
                        }
                        drop(transcript);
                        // Subscriber may be gone (widget closed) — the reply
                        // still runs to completion.
                        let _ = tx.send(Ok(chunk)).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Assistant reply interrupted");
                        in_flight.store(false, Ordering::SeqCst);
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                }
            }

            in_flight.store(false, Ordering::SeqCst);
        });

        Ok(ReplySubscription {
            rx,
            handle,
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}
