//! `rk-cli prompt` and `rk-cli chat` - exercise the shopping assistant
//! outside the browser.

use rapidkeys_storefront::catalog;
use rapidkeys_storefront::config::StorefrontConfig;
use rapidkeys_storefront::services::ShoppingAssistant;
use rapidkeys_storefront::services::assistant::system_instruction;

use super::CommandError;

/// Print the system instruction the assistant is given.
#[allow(clippy::print_stdout)]
pub fn prompt() {
    println!("{}", system_instruction(&catalog::products()));
}

/// Send a single message and print the reply.
///
/// A missing key or API fault is not an error here either: the assistant's
/// reply text says what went wrong, and it goes to stderr.
///
/// # Errors
///
/// Returns `CommandError::Config` if the environment is invalid.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub async fn send(message: &str) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;
    let assistant = ShoppingAssistant::from_config(&config.claude, &catalog::products());
    if !assistant.is_configured() {
        tracing::warn!("CLAUDE_API_KEY is not set");
    }

    let reply = assistant.respond(message).await;
    if reply.is_error {
        eprintln!("{}", reply.text);
    } else {
        println!("{}", reply.text);
    }
    Ok(())
}
