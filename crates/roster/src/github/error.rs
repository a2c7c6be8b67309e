//! GitHub API error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when interacting with the GitHub API.
///
/// All variants are fatal to the collection run that hit them; callers
/// decide whether to log and exit.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Error surfaced by the octocrab client.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Non-success status from a raw listing request.
    #[error("GitHub API returned {status}: {message}")]
    Http { status: u16, message: String },

    /// Primary rate limit exhausted (403/429).
    #[error("rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    /// Resource does not exist (repo, user, org).
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Transport-level failure before a status was received.
    #[error("network error: {message}")]
    Network { message: String },
}

impl GitHubError {
    /// Create an HTTP status error.
    #[inline]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a not-found error.
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Whether this error is a rate limit error.
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
