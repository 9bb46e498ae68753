//! Rapidkeys CLI - Catalog, review store and assistant tools.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, optionally filtered and sorted
//! rk-cli catalog --category Keyboard --sort price-low
//!
//! # Print the assistant's system instruction
//! rk-cli prompt
//!
//! # Show or wipe stored reviews
//! rk-cli reviews list 2
//! rk-cli reviews clear
//!
//! # Ask the assistant a single question
//! rk-cli chat "Which mouse is best for FPS?"
//! ```
//!
//! Configuration is read from the same environment as the storefront
//! (`STOREFRONT_DATA_DIR`, `CLAUDE_API_KEY`, ...).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "rk-cli")]
#[command(author, version, about = "Rapidkeys CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Case-insensitive text matched against name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category (`All`, `Keyboard`, `Mouse`, `Headset`, `Laptop`, `Accessories`)
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Sort order (`popularity`, `price-low`, `price-high`, `name`)
        #[arg(long, default_value = "popularity")]
        sort: String,
    },
    /// Print the assistant system instruction
    Prompt,
    /// Inspect or reset stored reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },
    /// Send one message to the shopping assistant
    Chat {
        /// Message text
        message: String,
    },
}

#[derive(Subcommand)]
enum ReviewsAction {
    /// List reviews for a product, newest first
    List {
        /// Product ID
        product_id: String,
    },
    /// Delete every stored review
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rapidkeys_storefront=warn,rapidkeys_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Catalog {
            search,
            category,
            sort,
        } => commands::catalog::list(&search, &category, &sort)?,
        Commands::Prompt => commands::chat::prompt(),
        Commands::Reviews { action } => match action {
            ReviewsAction::List { product_id } => commands::reviews::list(&product_id)?,
            ReviewsAction::Clear => commands::reviews::clear()?,
        },
        Commands::Chat { message } => commands::chat::send(&message).await?,
    }
    Ok(())
}
