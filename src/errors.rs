//! Unified error types and result handling.
//!
//! Every rejection the lifecycle can produce is a variant here. None of them
//! is fatal to the process; only `Config` aborts startup.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Save attempted outside the permitted data-entry or edit window.
    #[error("editing is closed for {date}")]
    WindowClosed {
        /// The business date that was targeted
        date: chrono::NaiveDate,
    },

    /// Save attempted on an entry that is locked and has not been unlocked.
    #[error("entry for {worker} on {date} is locked")]
    AlreadyLocked {
        /// The business date of the locked entry
        date: chrono::NaiveDate,
        /// The worker owning the locked entry
        worker: String,
    },

    /// Unlock attempted with a wrong credential, or an edit attempted by an
    /// identity that may not edit. Deliberately carries no detail about which
    /// credential would have been correct.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Unlock attempted on a (date, worker) pair with no saved entry.
    #[error("no entry for {worker} on {date}")]
    EntryNotFound {
        /// The business date that was targeted
        date: chrono::NaiveDate,
        /// The worker that was targeted
        worker: String,
    },

    /// A worker identity that is not on the configured roster.
    #[error("unknown worker: {name}")]
    UnknownWorker {
        /// The rejected worker name
        name: String,
    },

    /// Malformed or missing configuration; startup-only.
    #[error("configuration error: {message}")]
    Config {
        /// Description of what was wrong
        message: String,
    },

    /// Database error from the ORM layer.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error during export.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
