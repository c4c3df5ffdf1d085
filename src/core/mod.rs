//! Core business logic - framework-agnostic reconciliation operations.
//!
//! Everything here takes the database connection, the immutable config, and
//! the caller's identity explicitly; no ambient state. The presentation layer
//! drives these four surfaces: save, unlock, read, and report.

/// Demo-mode transition and rehearsal-data wipe
pub mod demo;
/// Pure derivation of the two per-entry totals
pub mod derivation;
/// Persistence operations for entries
pub mod entry;
/// The save/lock/unlock state machine
pub mod lifecycle;
/// Per-date aggregation and grand totals
pub mod report;

pub use derivation::EntryInput;
pub use lifecycle::Identity;
