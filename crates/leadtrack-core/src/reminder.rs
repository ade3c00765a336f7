//! # Reminder Evaluator
//!
//! Follow-up reminders are calendar dates. A lead is due once its reminder
//! date is today or earlier, compared as dates in the caller's local
//! calendar, never as timestamps.
//!
//! Text only appears at the boundary (`YYYY-MM-DD`):
//! - [`parse_reminder`] is lenient: empty or malformed text means "no reminder"
//! - [`parse_reminder_strict`] reports malformed text so input can be corrected

use crate::LeadError;
use chrono::NaiveDate;

/// Text format of a reminder date.
pub const REMINDER_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// CLOCK
// =============================================================================

/// Source of "today" for due evaluation.
pub trait Clock {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// =============================================================================
// DUE EVALUATION
// =============================================================================

/// Whether a reminder has arrived: present and on or before `today`.
#[must_use]
pub fn is_due(reminder: Option<NaiveDate>, today: NaiveDate) -> bool {
    reminder.is_some_and(|date| date <= today)
}

/// Due evaluation straight from boundary text. Malformed text is never due.
#[must_use]
pub fn is_due_text(reminder: &str, today: NaiveDate) -> bool {
    is_due(parse_reminder(reminder), today)
}

// =============================================================================
// TEXT BOUNDARY
// =============================================================================

/// Lenient parse: empty or malformed text yields `None`.
#[must_use]
pub fn parse_reminder(text: &str) -> Option<NaiveDate> {
    parse_reminder_strict(text).ok().flatten()
}

/// Strict parse: empty text is `Ok(None)`, malformed text is an error.
pub fn parse_reminder_strict(text: &str) -> Result<Option<NaiveDate>, LeadError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, REMINDER_FORMAT)
        .map(Some)
        .map_err(|_| LeadError::InvalidDate(text.to_string()))
}

/// Render a reminder for display; `-` when absent.
#[must_use]
pub fn format_reminder(reminder: Option<NaiveDate>) -> String {
    reminder
        .map(|date| date.format(REMINDER_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

// =============================================================================
// TESTS
// =============================================================================
