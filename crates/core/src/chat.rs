//! Chat transcript and its idle/awaiting state machine.
//!
//! A conversation alternates between `Idle` and `AwaitingResponse`. Only one
//! message can be in flight; the transcript only grows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    /// The assistant.
    Model,
}

/// One entry in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Set on fallback replies so they can be styled as errors.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            is_error: true,
        }
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// Whether a reply is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Reasons a submitted message is not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a reply is already pending")]
    AwaitingResponse,
}

/// A visitor's chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    #[serde(default)]
    state: ChatState,
}

impl Conversation {
    /// Start a conversation with the assistant's greeting.
    #[must_use]
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(greeting)],
            state: ChatState::Idle,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn state(&self) -> ChatState {
        self.state
    }

    #[must_use]
    pub fn is_awaiting(&self) -> bool {
        self.state == ChatState::AwaitingResponse
    }

    /// Record a user message and move to `AwaitingResponse`.
    ///
    /// Returns the text to send to the assistant, exactly as typed.
    ///
    /// # Errors
    ///
    /// - `ChatError::EmptyMessage` if the input is blank
    /// - `ChatError::AwaitingResponse` if a reply is still pending
    ///
    /// The transcript is unchanged on error.
    pub fn begin_turn(&mut self, input: &str) -> Result<String, ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.is_awaiting() {
            return Err(ChatError::AwaitingResponse);
        }

        self.messages.push(ChatMessage::user(input));
        self.state = ChatState::AwaitingResponse;
        Ok(input.to_string())
    }

    /// Append the assistant's reply and return to `Idle`.
    pub fn complete_turn(&mut self, reply: ChatMessage) {
        self.messages.push(reply);
        self.state = ChatState::Idle;
    }
}
