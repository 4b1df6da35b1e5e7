//! Error taxonomy for session, store, and surface operations.
//!
//! Lookup failures are recoverable by design: the host loop polls
//! continuously and must keep running, so `get`/`set`/`navigate_to` report
//! typed failures instead of aborting. Re-declaring an existing widget is
//! *not* an error — it is a silent no-op, observable only through
//! idempotence.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All failures the public API can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The path or value key does not exist.
    #[error("path not found: {0}")]
    NotFound(String),

    /// The label was empty or could not be split into a path and leaf name.
    #[error("invalid label: {0:?}")]
    InvalidLabel(String),

    /// A typed read or write did not match the cell's declared variant.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The session has been shut down; data operations fail softly.
    #[error("session is closed")]
    Closed,

    /// Terminal backend failure.
    #[error("terminal io: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
