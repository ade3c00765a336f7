//! # CLI Command Implementations
//!
//! Each command builds what it needs and writes to stdout. Logs go to stderr.

use crate::config::Config;
use crate::shell::Shell;
use chrono::NaiveDate;
use leadtrack_core::{FixedClock, LeadError, LeadStore, Stage};
use std::io::Write;
use std::path::Path;

// =============================================================================
// SHELL COMMAND
// =============================================================================

/// Run an interactive session on stdin/stdout.
pub fn cmd_shell(
    config_path: Option<&Path>,
    today: Option<NaiveDate>,
    quiet: bool,
    json_mode: bool,
) -> Result<(), LeadError> {
    let config = Config::load(config_path)?;

    let store = match today {
        Some(date) => {
            tracing::info!("Evaluating reminders as of {}", date);
            LeadStore::with_clock(FixedClock(date))
        }
        None => LeadStore::new(),
    };

    if !quiet && config.banner {
        print_banner();
    }

    tracing::info!(
        overdue_alerts = config.overdue_alerts,
        json_mode,
        "Session started"
    );

    let mut shell = Shell::new(store, config, json_mode);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    shell.run(stdin.lock(), &mut out)?;

    tracing::info!(leads = shell.store().len(), "Session ended");
    Ok(())
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// Print the pipeline stages.
pub fn cmd_stages(json_mode: bool) -> Result<(), LeadError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let text = if json_mode {
        let names: Vec<&str> = Stage::ALL.iter().map(Stage::name).collect();
        serde_json::to_string_pretty(&names)
            .map_err(|e| LeadError::SerializationError(e.to_string()))?
    } else {
        Stage::ALL
            .iter()
            .map(|stage| format!("{}. {}", stage.position() + 1, stage))
            .collect::<Vec<_>>()
            .join("\n")
    };

    writeln!(out, "{}", text).map_err(|e| LeadError::IoError(format!("Write output: {}", e)))
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Print the leadtrack startup banner.
fn print_banner() {
    println!(
        r#"
  leadtrack v{}

  Messaging > Calling > Meeting > Onboarding > Servicing > Lost
  Type `help` for commands, `quit` to leave.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
