//! Typed error taxonomy for the taskboard core.
//!
//! Every operation surfaces a variant callers can discriminate on; the
//! not-found variants carry distinct messages on purpose (a missing source
//! project in a move is reported differently from a missing destination).
//! `kind()` classifies each failure as client- or server-caused.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Task not found")]
    TaskNotFound,

    #[error("Project not found")]
    ProjectNotFound,

    #[error("From project not found")]
    FromProjectNotFound,

    #[error("From project does not have this task")]
    FromProjectTaskNotFound,

    /// Input failed a shape check (id length, hex digits, ...). The message
    /// is propagated verbatim to the caller.
    #[error("{0}")]
    Validation(String),

    /// The store did not acknowledge a write that should have succeeded.
    #[error("The write was not acknowledged by the store")]
    WriteUnacknowledged,

    #[error("Database query failed: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Coarse failure classification, used by callers to map errors onto
/// response envelopes (4xx vs 5xx in the original HTTP layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Client,
    Server,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TaskNotFound
            | Error::ProjectNotFound
            | Error::FromProjectNotFound
            | Error::FromProjectTaskNotFound
            | Error::Validation(_) => ErrorKind::Client,
            Error::WriteUnacknowledged | Error::Store(_) => ErrorKind::Server,
        }
    }
}
