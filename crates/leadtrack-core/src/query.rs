//! # Query Module
//!
//! Read-only projections over the lead collection.
//!
//! - Views are recomputed on every call, never cached
//! - Insertion order is preserved in every list view
//! - Nothing here mutates a lead

use crate::reminder::is_due;
use crate::system::{Stage, StageFilter};
use crate::Lead;
use chrono::NaiveDate;

// =============================================================================
// LEAD QUERY
// =============================================================================

/// Filter parameters for a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
    /// Stage selector (`All` or one stage).
    pub stage: StageFilter,
    /// Case-insensitive substring matched against name and company.
    pub search: String,
}

impl LeadQuery {
    /// Query matching every lead.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a query from both parameters.
    #[must_use]
    pub fn new(stage: StageFilter, search: impl Into<String>) -> Self {
        Self {
            stage,
            search: search.into(),
        }
    }

    /// Stage-only helper.
    #[must_use]
    pub fn stage(stage: Stage) -> Self {
        Self::new(StageFilter::Only(stage), "")
    }

    /// Search-only helper.
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self::new(StageFilter::All, text)
    }

    /// Whether `lead` passes both the stage filter and the search text.
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        self.stage.matches(lead.stage()) && matches_search(lead, &self.search.to_lowercase())
    }
}

/// `needle` must already be lowercased.
fn matches_search(lead: &Lead, needle: &str) -> bool {
    needle.is_empty()
        || lead.name().to_lowercase().contains(needle)
        || lead.company().to_lowercase().contains(needle)
}

// =============================================================================
// PROJECTIONS
// =============================================================================

/// Leads passing `query`, in insertion order.
#[must_use]
pub fn filtered_leads<'a>(leads: &'a [Lead], query: &LeadQuery) -> Vec<&'a Lead> {
    let needle = query.search.to_lowercase();
    leads
        .iter()
        .filter(|lead| query.stage.matches(lead.stage()) && matches_search(lead, &needle))
        .collect()
}

/// Per-stage lead counts, in pipeline order.
#[must_use]
pub fn counts_by_stage(leads: &[Lead]) -> StageCounts {
    let mut counts = StageCounts::default();
    for lead in leads {
        counts.increment(lead.stage());
    }
    counts
}

/// Leads whose reminder is due on `today`, in insertion order.
#[must_use]
pub fn overdue_leads(leads: &[Lead], today: NaiveDate) -> Vec<&Lead> {
    leads
        .iter()
        .filter(|lead| is_due(lead.reminder(), today))
        .collect()
}

// =============================================================================
// STAGE COUNTS
// =============================================================================

/// Lead count per stage. Stages partition the register, so the counts sum
/// to the total number of leads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts([usize; Stage::ALL.len()]);

impl StageCounts {
    fn increment(&mut self, stage: Stage) {
        let slot = &mut self.0[stage.position()];
        *slot = slot.saturating_add(1);
    }

    /// Count for one stage.
    #[must_use]
    pub fn get(&self, stage: Stage) -> usize {
        self.0[stage.position()]
    }

    /// Sum over all stages.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(stage, count)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, usize)> + '_ {
        Stage::ALL.into_iter().map(|stage| (stage, self.get(stage)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
