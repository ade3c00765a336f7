//! # Core Type Definitions
//!
//! This module contains the record types of the lead register:
//! - Lead identifiers (`LeadId`)
//! - The editable field set (`LeadFields`)
//! - Stored records (`Lead`)
//! - Error types (`LeadError`)
//!
//! ## Record Guarantees
//!
//! - A `Lead` is only ever built by the store, after `LeadFields::is_valid`
//! - `LeadId` values are handed out monotonically and never reused
//! - Reminders are calendar dates (`NaiveDate`), never timestamps

use crate::system::Stage;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// LEAD IDENTIFIER
// =============================================================================

/// Opaque identifier of a lead, assigned by the store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeadId(pub u64);

impl LeadId {
    /// The id that follows this one, or `None` once the id space is used up.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LeadId {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse::<u64>()
            .map(LeadId)
            .map_err(|_| LeadError::InvalidId(s.to_string()))
    }
}

// =============================================================================
// LEAD FIELDS (the editable field set)
// =============================================================================

/// The full, editable field set of a lead.
///
/// Writes always carry a complete `LeadFields`; an update replaces every
/// field of the target lead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadFields {
    pub name: String,
    pub company: String,
    pub contact: String,
    pub source: String,
    pub stage: Stage,
    pub notes: String,
    pub reminder: Option<NaiveDate>,
    pub activity: String,
}

impl LeadFields {
    /// Field set with the two required fields filled and everything else defaulted.
    #[must_use]
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn with_reminder(mut self, reminder: NaiveDate) -> Self {
        self.reminder = Some(reminder);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Presence check: `name` and `company` must be non-empty after trimming.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.company.trim().is_empty()
    }
}

// =============================================================================
// LEAD (stored record)
// =============================================================================

/// A stored lead: an id plus its current field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    #[serde(flatten)]
    pub fields: LeadFields,
}

impl Lead {
    pub(crate) fn new(id: LeadId, fields: LeadFields) -> Self {
        Self { id, fields }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.fields.name
    }

    #[must_use]
    pub fn company(&self) -> &str {
        &self.fields.company
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.fields.stage
    }

    #[must_use]
    pub fn reminder(&self) -> Option<NaiveDate> {
        self.fields.reminder
    }

    /// Whether the caller-maintained activity log has any content.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        !self.fields.activity.trim().is_empty()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur at the boundaries of the lead register.
///
/// Store mutations and queries never fail; invalid writes are silent no-ops.
/// These variants cover text parsing, lookups that require an existing lead,
/// and the deferred persistence boundary.
#[derive(Debug, Error)]
pub enum LeadError {
    /// The text does not name a pipeline stage.
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// The text is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// No lead with this id exists in the store.
    #[error("Lead not found: {0}")]
    LeadNotFound(LeadId),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Text that is not a lead id.
    #[error("Not a lead id: {0}")]
    InvalidId(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// A shell command could not be parsed.
    #[error("{0}")]
    CommandError(String),
}

// =============================================================================
// TESTS
// =============================================================================
