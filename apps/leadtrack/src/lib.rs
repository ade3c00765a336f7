//! # leadtrack
//!
//! Application layer over `leadtrack-core`: command-line parsing, the
//! interactive shell, configuration, and the overdue alert hook.

pub mod alert;
pub mod cli;
pub mod config;
pub mod shell;
