//! # Change Notification
//!
//! After every successful write the store recomputes the overdue set and
//! hands it to each subscribed [`ChangeHook`], synchronously and in
//! subscription order. Rejected writes notify nobody.
//!
//! The register never delivers notifications itself. Hooks decide what an
//! overdue lead means (a log line, an alert, nothing).

use crate::{Lead, LeadId};
use chrono::NaiveDate;

/// The kind of write that triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    StageChanged,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChangeKind::Created => "created",
            ChangeKind::Updated => "updated",
            ChangeKind::StageChanged => "stage_changed",
        })
    }
}

/// Snapshot handed to hooks after a write completes.
#[derive(Debug, Clone)]
pub struct ChangeEvent<'a> {
    pub kind: ChangeKind,
    /// The lead that was written.
    pub id: LeadId,
    /// Lead count after the write.
    pub total: usize,
    /// The date overdue leads were evaluated against.
    pub today: NaiveDate,
    /// Leads whose reminder is due, in insertion order.
    pub overdue: Vec<&'a Lead>,
}

/// Receiver of store change events.
pub trait ChangeHook {
    fn leads_changed(&mut self, event: &ChangeEvent<'_>);
}
