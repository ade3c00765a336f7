//! # leadtrack
//!
//! The main binary for the leadtrack lead register.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/leadtrack (THE BINARY)      │
//! │                                               │
//! │  ┌─────────────┐   ┌─────────────────────┐   │
//! │  │   CLI       │──►│  Shell (per line)   │   │
//! │  │  (clap)     │   │  + OverdueAlert     │   │
//! │  └─────────────┘   └──────────┬──────────┘   │
//! │                               ▼              │
//! │                    ┌────────────────────┐    │
//! │                    │  leadtrack-core    │    │
//! │                    │  (THE REGISTER)    │    │
//! │                    └────────────────────┘    │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! leadtrack                       # interactive shell
//! leadtrack --today 2024-06-01    # evaluate reminders as of a fixed date
//! leadtrack stages --json-mode
//! ```

use clap::Parser;
use leadtrack::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — LEADTRACK_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr; stdout belongs to the shell.
    let log_format = std::env::var("LEADTRACK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "leadtrack=info,leadtrack_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
