//! Error types shared by the store, the repository and the session.
//!
//! Persistence failures and validation failures are kept apart: the first
//! group comes from the embedded store, the second never reaches it.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while opening the store or running a transaction against it.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to open task store at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("task store is closed")]
    Closed,

    #[error("task store transaction failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("task store directory is not accessible: {0}")]
    Io(#[from] std::io::Error),

    #[error("task store worker stopped: {0}")]
    Worker(String),
}

/// A submitted form that must not be written to the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("hour {0} is outside 1-12")]
    HourOutOfRange(u32),

    #[error("minute {0} is outside 0-59")]
    MinuteOutOfRange(u32),

    #[error("{year}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("unknown month '{0}'")]
    UnknownMonth(String),

    #[error("expected AM or PM, got '{0}'")]
    UnknownMeridiem(String),

    #[error("due time {0} has already passed")]
    Expired(NaiveDateTime),
}

/// Any failure a session operation can report.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl TaskError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }
}
