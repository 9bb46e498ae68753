//! Claude API integration for the shopping assistant.
//!
//! One non-streaming Messages API call per chat turn: a system prompt plus
//! the visitor's latest message. There is no tool use, no retry and no
//! conversation history.

mod client;
mod error;
mod types;

pub use client::ClaudeClient;
pub use error::ClaudeError;
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message, Role, StopReason, Usage};
