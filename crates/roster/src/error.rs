//! Top-level error type for collection runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::github::GitHubError;

/// Errors that can abort a collection run.
///
/// There is no partial-success mode: the first error encountered is
/// returned as-is and any items gathered before it are discarded.
#[derive(Debug, Error)]
pub enum Error {
    /// Remote call failure (page fetch, hydration, or listing).
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// A date argument that does not parse as `YYYY-MM-DD`.
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The user-list file could not be read.
    #[error("failed to read user list {path}")]
    UserList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user-list line whose first field is not a numeric identifier.
    #[error("invalid user id {field:?} on line {line} of {path}")]
    InvalidUserId {
        path: PathBuf,
        line: usize,
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, Error>;
