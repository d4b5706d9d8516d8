//! Chat transcript
//!
//! The server stores each user message together with the bot's reply.
//! The transcript flattens those exchanges into alternating lines and
//! only ever grows: a send appends one user line and one bot line.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ViewContext;
use crate::api::{ChatExchange, ChatRequest};

pub const HISTORY_FAILED: &str = "Please login again.";
pub const SEND_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One rendered transcript line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Append-only list of chat lines
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    lines: Vec<ChatMessage>,
}

impl Transcript {
    pub fn from_history(history: Vec<ChatExchange>) -> Self {
        let mut transcript = Self::default();
        for exchange in history {
            let timestamp = exchange.timestamp;
            transcript.push(Sender::User, exchange.message, timestamp);
            transcript.push(Sender::Bot, exchange.response, timestamp);
        }
        transcript
    }

    pub fn lines(&self) -> &[ChatMessage] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, sender: Sender, text: String, timestamp: Option<DateTime<Utc>>) {
        self.lines.push(ChatMessage { sender, text, timestamp });
    }
}

/// Result of a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing sent
    Ignored,
    /// Two lines were appended
    Sent,
    Failed { message: String },
}

pub struct ChatView {
    context: ViewContext,
    transcript: Transcript,
    error: Option<String>,
}

impl ChatView {
    pub fn new(context: ViewContext) -> Self {
        Self {
            context,
            transcript: Transcript::default(),
            error: None,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the transcript with the stored history
    pub async fn load_history(&mut self) {
        match self.context.backend.chat_history().await {
            Ok(history) => {
                tracing::debug!(exchanges = history.len(), "Chat history loaded");
                self.transcript = Transcript::from_history(history);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat history fetch failed");
                self.context.forget_rejected_token(&e);
                self.error = Some(HISTORY_FAILED.to_string());
            }
        }
    }

    /// Send `text`; on success append the user line and the bot's reply.
    /// A failure leaves the transcript untouched.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        let sent_at = Utc::now();
        let request = ChatRequest { message: text.to_string() };

        match self.context.backend.send_chat(&request).await {
            Ok(reply) => {
                self.transcript.push(Sender::User, text.to_string(), Some(sent_at));
                let replied_at = reply.timestamp.unwrap_or_else(Utc::now);
                self.transcript.push(Sender::Bot, reply.response, Some(replied_at));
                SendOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat send failed");
                self.context.forget_rejected_token(&e);
                self.error = Some(SEND_FAILED.to_string());
                SendOutcome::Failed { message: SEND_FAILED.to_string() }
            }
        }
    }
}
