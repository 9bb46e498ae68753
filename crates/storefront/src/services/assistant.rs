//! RapidBot, the shopping assistant.
//!
//! Every chat turn sends the visitor's latest message alone, together with a
//! fixed system instruction that carries the persona, the house rules and the
//! full catalog. Faults never reach the visitor: they get a fixed apology and
//! the error goes to the logs and Sentry.

use std::fmt::Write as _;

use rapidkeys_core::{ChatMessage, Product};
use secrecy::SecretString;

use crate::claude::{ClaudeClient, ClaudeError};
use crate::config::ClaudeConfig;

/// First message of every conversation.
pub const GREETING: &str = "Ayubowan! I'm your Rapidkeys AI assistant. Looking for a gaming keyboard or need budget-friendly student gear? Ask me anything!";

/// Shown when no API key is configured.
pub const MISSING_KEY_REPLY: &str = "Error: API Key is missing. Please check configuration.";

/// Shown when the model answers with no text.
pub const EMPTY_REPLY: &str = "Sorry, I didn't catch that. Could you try again?";

/// Shown on any API, network or parse failure.
pub const FAULT_REPLY: &str =
    "My circuits are a bit busy right now (API Error). Try again in a moment!";

const RULES: &str = "\
Rules:
1. Recommend specific products from the list above when asked.
2. Keep responses concise, friendly, and energetic.
3. If asked about shipping, say we offer \"Island-wide delivery via Courier within 2-3 days\".
4. If the user asks for something we don't have, suggest the closest alternative or say we'll stock it soon.
5. Use local context if appropriate (e.g., \"Perfect for Campus work\", \"Good for gaming at cafes\").
6. Do NOT invent products that are not in the list.";

/// One catalog line for the prompt, e.g.
/// `- Viper Wireless Mouse (mouse): 3200 LKR. Ultra-lightweight ... [New]`.
#[must_use]
pub fn product_line(product: &Product) -> String {
    let mut line = format!(
        "- {} ({}): {} {}. {}",
        product.name,
        product.category,
        product.price.plain_amount(),
        product.price.currency_code.code(),
        product.description,
    );
    if let Some(badge) = &product.badge {
        let _ = write!(line, " [{badge}]");
    }
    line
}

/// Build the system instruction for `products`.
#[must_use]
pub fn system_instruction(products: &[Product]) -> String {
    let inventory = products
        .iter()
        .map(product_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are \"RapidBot\", a helpful and cool AI sales assistant for \"Rapidkeys\", a tech store in Sri Lanka.\n\
         Your target audience is Sri Lankan students and gamers.\n\
         Currency is LKR (Sri Lankan Rupees).\n\
         \n\
         Here is our current product inventory:\n\
         {inventory}\n\
         \n\
         {RULES}\n"
    )
}

/// The assistant: an optional Claude client plus the prepared instruction.
#[derive(Debug, Clone)]
pub struct ShoppingAssistant {
    client: Option<ClaudeClient>,
    system: String,
}

impl ShoppingAssistant {
    /// Create an assistant that talks to `client`, or one that only ever
    /// reports the missing key when `client` is `None`.
    #[must_use]
    pub fn new(client: Option<ClaudeClient>, products: &[Product]) -> Self {
        Self {
            client,
            system: system_instruction(products),
        }
    }

    /// Build the assistant from configuration.
    ///
    /// A key the HTTP client cannot use is logged and treated as missing.
    #[must_use]
    pub fn from_config(config: &ClaudeConfig, products: &[Product]) -> Self {
        let client = config
            .api_key
            .as_ref()
            .and_then(|key| build_client(key, config));
        Self::new(client, products)
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system
    }

    /// Answer one visitor message. Never fails; faults become a flagged
    /// apology.
    pub async fn respond(&self, message: &str) -> ChatMessage {
        let Some(client) = &self.client else {
            return ChatMessage::assistant_error(MISSING_KEY_REPLY);
        };

        match client.complete(&self.system, message).await {
            Ok(text) if text.trim().is_empty() => ChatMessage::assistant(EMPTY_REPLY),
            Ok(text) => ChatMessage::assistant(text),
            Err(e) => {
                report_fault(&e);
                ChatMessage::assistant_error(FAULT_REPLY)
            }
        }
    }
}

fn build_client(key: &SecretString, config: &ClaudeConfig) -> Option<ClaudeClient> {
    match ClaudeClient::new(key, config.model.clone(), config.api_url.clone()) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(error = %e, "Claude client unavailable, chat will report a missing key");
            None
        }
    }
}

fn report_fault(error: &ClaudeError) {
    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        sentry_event_id = %event_id,
        "Assistant request failed"
    );
}
