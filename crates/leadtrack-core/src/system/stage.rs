//! # Pipeline Stages
//!
//! The fixed, ordered sales pipeline every lead moves through.
//!
//! | Position | Stage      |
//! |----------|------------|
//! | 0        | Messaging  |
//! | 1        | Calling    |
//! | 2        | Meeting    |
//! | 3        | Onboarding |
//! | 4        | Servicing  |
//! | 5        | Lost       |
//!
//! Order is display order only. No stage carries a weight, and any stage may
//! be set from any other.

use crate::LeadError;
use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE ENUM
// =============================================================================

/// A pipeline stage. `Messaging` is the entry stage and the default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Stage {
    #[default]
    Messaging,
    Calling,
    Meeting,
    Onboarding,
    Servicing,
    Lost,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 6] = [
        Stage::Messaging,
        Stage::Calling,
        Stage::Meeting,
        Stage::Onboarding,
        Stage::Servicing,
        Stage::Lost,
    ];

    /// Get the stage label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Messaging => "Messaging",
            Stage::Calling => "Calling",
            Stage::Meeting => "Meeting",
            Stage::Onboarding => "Onboarding",
            Stage::Servicing => "Servicing",
            Stage::Lost => "Lost",
        }
    }

    /// Zero-based position in the pipeline.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Stage::Messaging => 0,
            Stage::Calling => 1,
            Stage::Meeting => 2,
            Stage::Onboarding => 3,
            Stage::Servicing => 4,
            Stage::Lost => 5,
        }
    }

    /// The first stage of the pipeline.
    #[must_use]
    pub const fn first() -> Stage {
        Stage::Messaging
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Stage {
    type Err = LeadError;

    /// Case-insensitive match on the stage label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LeadError::UnknownStage(wanted.to_string()))
    }
}

// =============================================================================
// STAGE FILTER
// =============================================================================

/// Stage selector for list views: every stage, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StageFilter {
    #[default]
    All,
    Only(Stage),
}

impl StageFilter {
    /// Whether a lead in `stage` passes this filter.
    #[must_use]
    pub fn matches(&self, stage: Stage) -> bool {
        match self {
            StageFilter::All => true,
            StageFilter::Only(wanted) => *wanted == stage,
        }
    }
}

impl From<Stage> for StageFilter {
    fn from(stage: Stage) -> Self {
        StageFilter::Only(stage)
    }
}

impl std::fmt::Display for StageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageFilter::All => f.write_str("All"),
            StageFilter::Only(stage) => write!(f, "{}", stage),
        }
    }
}

impl std::str::FromStr for StageFilter {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StageFilter::All)
        } else {
            s.parse::<Stage>().map(StageFilter::Only)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
