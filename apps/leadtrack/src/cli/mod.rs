//! # leadtrack CLI Module
//!
//! This module implements the command-line entry for leadtrack.
//!
//! ## Available Commands
//!
//! - `shell` - Start an interactive session (default)
//! - `stages` - Print the pipeline stages

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use leadtrack_core::LeadError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// leadtrack - single-user sales lead tracker
///
/// Records leads, moves them through a fixed pipeline, and flags follow-ups
/// that have come due. All data lives in memory for one session.
#[derive(Parser, Debug)]
#[command(name = "leadtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML config file (overrides LEADTRACK_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate reminders against this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session
    Shell,

    /// Print the pipeline stages
    Stages,
}

fn parse_today(text: &str) -> Result<NaiveDate, LeadError> {
    leadtrack_core::parse_reminder_strict(text)?
        .ok_or_else(|| LeadError::InvalidDate(text.to_string()))
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), LeadError> {
    match cli.command {
        Some(Commands::Stages) => cmd_stages(cli.json_mode),
        Some(Commands::Shell) | None => cmd_shell(
            cli.config.as_deref(),
            cli.today,
            cli.quiet,
            cli.json_mode,
        ),
    }
}
