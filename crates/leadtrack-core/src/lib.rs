//! # leadtrack-core
//!
//! The in-memory lead register for leadtrack - THE REGISTER.
//!
//! This crate records sales leads, moves them through a fixed pipeline of
//! stages, and derives the views a presentation layer needs: filtered lists,
//! per-stage counts, and leads whose follow-up reminder has come due.
//!
//! ## Architecture
//!
//! ```text
//!  system::Stage ──► store::LeadStore ──► query (filtered / counts / overdue)
//!                        │    ▲                    ▲
//!                        │    └── form::LeadForm   │
//!                        ▼                         │
//!                 notify::ChangeHook ◄── reminder::is_due
//! ```
//!
//! ## Architectural Constraints
//!
//! - All state lives in one `LeadStore`, owned by one thread
//! - Mutations run to completion; hooks are called synchronously afterwards
//! - Invalid writes are silent no-ops; the register never panics
//! - NO async, NO network, NO file I/O (persistence is a caller boundary)

// =============================================================================
// MODULES
// =============================================================================

pub mod form;
pub mod notify;
pub mod query;
pub mod reminder;
pub mod storage;
pub mod store;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Lead, LeadError, LeadFields, LeadId};

// =============================================================================
// RE-EXPORTS: Register
// =============================================================================

pub use form::{FormField, LeadForm};
pub use notify::{ChangeEvent, ChangeHook, ChangeKind};
pub use query::{LeadQuery, StageCounts, counts_by_stage, filtered_leads, overdue_leads};
pub use reminder::{
    Clock, FixedClock, REMINDER_FORMAT, SystemClock, format_reminder, is_due, is_due_text,
    parse_reminder, parse_reminder_strict,
};
pub use storage::{LeadRepository, MemoryRepository};
pub use store::LeadStore;

// =============================================================================
// RE-EXPORTS: System (from system module)
// =============================================================================

pub use system::{Stage, StageFilter};
