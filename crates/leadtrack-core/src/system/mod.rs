//! # System Module
//!
//! The sales pipeline definition: stages and stage filters.
//!
//! Stages are a closed set. Every lead holds exactly one, so per-stage
//! counts always partition the register.

mod stage;

pub use stage::*;
