//! Chat widget route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use rapidkeys_core::{ChatError, ChatMessage, Conversation};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{Instrument, instrument};

use crate::error::{AppError, Result};
use crate::models::session;
use crate::state::AppState;

/// One transcript bubble.
#[derive(Clone)]
pub struct ChatMessageView {
    pub text: String,
    pub is_user: bool,
    pub is_error: bool,
}

impl From<&ChatMessage> for ChatMessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            text: message.text.clone(),
            is_user: message.is_user(),
            is_error: message.is_error,
        }
    }
}

/// Transcript display data.
#[derive(Clone)]
pub struct ChatView {
    pub messages: Vec<ChatMessageView>,
    pub awaiting: bool,
}

impl From<&Conversation> for ChatView {
    fn from(conversation: &Conversation) -> Self {
        Self {
            messages: conversation.messages().iter().map(ChatMessageView::from).collect(),
            awaiting: conversation.is_awaiting(),
        }
    }
}

/// Chat input form.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

/// Transcript fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/chat_messages.html")]
pub struct ChatMessagesTemplate {
    pub chat: ChatView,
}

/// Transcript fragment.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<ChatMessagesTemplate> {
    let conversation = session::load_conversation(&session).await?;
    Ok(ChatMessagesTemplate {
        chat: ChatView::from(&conversation),
    })
}

/// Send a message to the assistant and return the updated transcript.
///
/// Blank input, or input sent while a reply is still pending, leaves the
/// transcript untouched. The pending state is saved before the assistant is
/// called, and the call runs on its own task, so the turn is completed and
/// saved even if this request is dropped.
#[instrument(skip(state, session, form))]
pub async fn send(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChatForm>,
) -> Result<ChatMessagesTemplate> {
    let mut conversation = session::load_conversation(&session).await?;

    let message = match conversation.begin_turn(&form.message) {
        Ok(message) => message,
        Err(ChatError::EmptyMessage) => {
            return Ok(ChatMessagesTemplate {
                chat: ChatView::from(&conversation),
            });
        }
        Err(e @ ChatError::AwaitingResponse) => {
            tracing::debug!(error = %e, "Chat message refused");
            return Ok(ChatMessagesTemplate {
                chat: ChatView::from(&conversation),
            });
        }
    };
    session::save_conversation(&session, &conversation).await?;

    let turn = tokio::spawn(
        finish_turn(state, session, message, conversation.messages().len()).in_current_span(),
    );
    let conversation = turn
        .await
        .map_err(|e| AppError::Internal(format!("chat task failed: {e}")))??;

    Ok(ChatMessagesTemplate {
        chat: ChatView::from(&conversation),
    })
}

/// Ask the assistant and record its reply.
///
/// The reply is only appended if the saved transcript is still the one
/// waiting on it (`pending_len` messages, awaiting). A page load in the
/// meantime starts a fresh transcript, and the late reply is dropped.
async fn finish_turn(
    state: AppState,
    session: Session,
    message: String,
    pending_len: usize,
) -> Result<Conversation> {
    let reply = state.assistant().respond(&message).await;

    // The handle caches the record it read at request start; re-read it so a
    // reset from another request is seen.
    session.load().await?;
    let mut conversation = session::load_conversation(&session).await?;
    if conversation.is_awaiting() && conversation.messages().len() == pending_len {
        conversation.complete_turn(reply);
        session::save_conversation(&session, &conversation)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to save chat reply"))?;
    } else {
        tracing::debug!("Transcript was reset while awaiting a reply, dropping it");
    }
    Ok(conversation)
}
