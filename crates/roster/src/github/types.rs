//! GitHub API wire types for the listing endpoints.
//!
//! List endpoints embed sparse user stubs; those deserialize straight into
//! [`Actor`] with most fields unset. Records we never consume (commit
//! payloads, issue bodies) are not modeled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;

/// One entry from `GET /repos/{owner}/{repo}/commits`.
///
/// `author` is the linked GitHub account and is null when the commit email
/// does not map to one.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRecord {
    /// Commit SHA.
    pub sha: String,
    /// Linked GitHub account of the commit author, if any.
    pub author: Option<Actor>,
}

/// One entry from `GET /repos/{owner}/{repo}/forks`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForkRecord {
    /// Fork creation time.
    pub created_at: DateTime<Utc>,
    /// Owner of the fork.
    pub owner: Actor,
}

/// One entry from `GET /repos/{owner}/{repo}/stargazers` under the
/// `application/vnd.github.star+json` media type, which adds `starred_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct StarRecord {
    /// When the star was given.
    pub starred_at: DateTime<Utc>,
    /// The starring user.
    pub user: Actor,
}

/// One entry from `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    /// Issue number.
    pub number: u64,
    /// The reporting user.
    pub user: Actor,
}

/// One entry from `GET /orgs/{org}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    /// Repository name (without the owner prefix).
    pub name: String,
}

/// A single rate limit resource entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResource {
    /// Maximum requests allowed per period.
    pub limit: usize,
    /// Requests used in the current period.
    pub used: usize,
    /// Remaining requests in the current period.
    pub remaining: usize,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
}

impl RateLimitResource {
    /// The reset time as a DateTime.
    #[must_use]
    pub fn reset_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.reset as i64, 0).unwrap_or_else(Utc::now)
    }
}

/// Rate limit resources relevant to this tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimits {
    /// Core API rate limit (all the listing and user endpoints).
    pub core: RateLimitResource,
    /// Search API rate limit.
    pub search: RateLimitResource,
}

/// Response body of `GET /rate_limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResponse {
    /// All rate limit resources.
    pub resources: RateLimits,
}
