//! Session-stored visitor state.
//!
//! The cart (including whether its drawer is open) lives in the visitor's
//! session until it expires. The chat transcript is only kept between the
//! fragment requests of one page: every full page load starts it over.

use rapidkeys_core::{Cart, Conversation};
use tower_sessions::Session;

use crate::services::assistant::GREETING;

/// Session keys.
pub mod keys {
    /// The visitor's cart.
    pub const CART: &str = "cart";

    /// The visitor's chat transcript.
    pub const CHAT: &str = "chat";
}

/// Load the cart, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Store the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be serialized into the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Load the chat transcript, or a fresh one that opens with the greeting.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_conversation(
    session: &Session,
) -> Result<Conversation, tower_sessions::session::Error> {
    Ok(session
        .get::<Conversation>(keys::CHAT)
        .await?
        .unwrap_or_else(|| Conversation::new(GREETING)))
}

/// Replace the transcript with a fresh one that opens with the greeting.
///
/// Called on full page loads. This also drops any pending turn.
///
/// # Errors
///
/// Returns an error if the transcript cannot be serialized into the session.
pub async fn reset_conversation(
    session: &Session,
) -> Result<Conversation, tower_sessions::session::Error> {
    let conversation = Conversation::new(GREETING);
    session.insert(keys::CHAT, &conversation).await?;
    Ok(conversation)
}

/// Store the chat transcript and persist the session immediately, so a
/// concurrent request from the same visitor sees a pending reply.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn save_conversation(
    session: &Session,
    conversation: &Conversation,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CHAT, conversation).await?;
    session.save().await
}
