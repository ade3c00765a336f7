//! # Overdue Alerts
//!
//! A change hook that logs overdue follow-ups through `tracing` whenever a
//! write leaves at least one lead due.

use leadtrack_core::{ChangeEvent, ChangeHook};

/// Logs overdue leads after every store change.
#[derive(Debug, Default)]
pub struct OverdueAlert;

impl OverdueAlert {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// One-line summary of the overdue set, or `None` when nothing is due.
    #[must_use]
    pub fn describe(event: &ChangeEvent<'_>) -> Option<String> {
        if event.overdue.is_empty() {
            return None;
        }
        let names: Vec<String> = event
            .overdue
            .iter()
            .map(|lead| format!("#{} {} ({})", lead.id, lead.name(), lead.company()))
            .collect();
        Some(format!(
            "{} overdue reminder(s) as of {}: {}",
            event.overdue.len(),
            event.today,
            names.join(", ")
        ))
    }
}

impl ChangeHook for OverdueAlert {
    fn leads_changed(&mut self, event: &ChangeEvent<'_>) {
        tracing::debug!(kind = %event.kind, id = %event.id, total = event.total, "Register changed");

        if let Some(summary) = Self::describe(event) {
            tracing::warn!(
                kind = %event.kind,
                overdue = event.overdue.len(),
                "Overdue reminders: {}",
                summary
            );
        }
    }
}
