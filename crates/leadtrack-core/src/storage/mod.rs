//! # Storage Boundary
//!
//! The register keeps everything in memory. Durable storage is left to a
//! caller-provided [`LeadRepository`]; the store only ever hands it a
//! complete, ordered snapshot (`save_all`) or takes one back (`load_all`).
//!
//! [`MemoryRepository`] is the only implementation shipped here. It keeps
//! the snapshot in process memory, which is enough to exercise the boundary
//! and to carry leads between two stores in one session.

use crate::{Lead, LeadError};

/// Persistence collaborator for the lead register.
///
/// Implementations must return leads in the order they were saved.
pub trait LeadRepository {
    /// Load every saved lead, in saved order.
    fn load_all(&self) -> Result<Vec<Lead>, LeadError>;

    /// Replace the saved snapshot with `leads`.
    fn save_all(&mut self, leads: &[Lead]) -> Result<(), LeadError>;
}

/// Snapshot repository held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    snapshot: Vec<Lead>,
    saves: usize,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed `save_all` calls.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LeadRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<Lead>, LeadError> {
        Ok(self.snapshot.clone())
    }

    fn save_all(&mut self, leads: &[Lead]) -> Result<(), LeadError> {
        self.snapshot = leads.to_vec();
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
