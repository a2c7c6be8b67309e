//! GitHub API client creation and request plumbing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::pagination::next_page;
use super::types::RateLimitResponse;
use crate::actor::Actor;
use crate::collect::Page;

/// Base URL for all raw listing requests.
const API_BASE: &str = "https://api.github.com";

/// Default media type for API requests.
pub const ACCEPT_DEFAULT: &str = "application/vnd.github+json";

/// Media type that makes stargazer listings include `starred_at`.
pub const ACCEPT_STAR: &str = "application/vnd.github.star+json";

/// Create an authenticated Octocrab instance from a personal access token.
pub fn create_client(token: &str) -> Result<Octocrab, GitHubError> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(GitHubError::Api)
}

/// GitHub API client.
///
/// Wraps an `Octocrab` instance for typed single-entity lookups and keeps
/// a shared `reqwest` client for listing requests, where the `Link`
/// response header is needed to drive pagination.
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    /// The token, kept for raw listing requests.
    token: Arc<String>,
    /// Shared HTTP client for listing requests (connection pool reuse).
    http_client: reqwest::Client,
}

impl GitHubClient {
    /// Create a new client from an authentication token.
    pub fn new(token: &str) -> Result<Self, GitHubError> {
        let client = create_client(token)?;
        Ok(Self {
            inner: Arc::new(client),
            token: Arc::new(token.to_string()),
            http_client: reqwest::Client::new(),
        })
    }

    /// Get a reference to the inner Octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.inner
    }

    /// Fetch one listing page and the cursor to the next one.
    ///
    /// `route` must already carry the `per_page` and `page` query
    /// parameters; the next-page cursor comes from the `Link` response
    /// header, and its absence means the listing is exhausted.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        route: &str,
        accept: Option<&str>,
    ) -> Result<Page<T>, GitHubError> {
        let url = format!("{API_BASE}{route}");

        let response = self
            .http_client
            .get(&url)
            .header("Accept", accept.unwrap_or(ACCEPT_DEFAULT))
            .header("User-Agent", "roster")
            .header("Authorization", format!("Bearer {}", self.token.as_str()))
            .send()
            .await
            .map_err(|e| GitHubError::network(format!("request to {route} failed: {e}")))?;

        let status = response.status();
        let headers = response.headers().clone();

        match status {
            StatusCode::OK => {
                let next = headers
                    .get("link")
                    .and_then(|v| v.to_str().ok())
                    .and_then(next_page);

                let items: Vec<T> = response.json().await.map_err(|e| {
                    GitHubError::network(format!("invalid response body from {route}: {e}"))
                })?;

                Ok(Page { items, next })
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(GitHubError::RateLimited {
                reset_at: rate_limit_reset(&headers),
            }),
            StatusCode::NOT_FOUND => Err(GitHubError::not_found(route)),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(GitHubError::http(status.as_u16(), message))
            }
        }
    }

    /// Fetch a fully populated profile by numeric id (`GET /user/{id}`).
    ///
    /// This is the hydration call that upgrades a listing stub into a
    /// complete [`Actor`].
    pub async fn user_by_id(&self, id: u64) -> Result<Actor, GitHubError> {
        self.inner
            .get(format!("/user/{id}"), None::<&()>)
            .await
            .map_err(|e| match status_of(&e) {
                Some(404) => GitHubError::not_found(format!("user {id}")),
                _ => GitHubError::Api(e),
            })
    }

    /// Fetch the current rate limit status (`GET /rate_limit`).
    pub async fn rate_limits(&self) -> Result<RateLimitResponse, GitHubError> {
        self.inner
            .get("/rate_limit", None::<&()>)
            .await
            .map_err(GitHubError::Api)
    }
}

/// Extract the HTTP status of an octocrab error, if it carries one.
fn status_of(e: &octocrab::Error) -> Option<u16> {
    match e {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// Read the reset time from GitHub's rate limit headers.
fn rate_limit_reset(headers: &reqwest::header::HeaderMap) -> DateTime<Utc> {
    headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_header_parses() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-ratelimit-reset", "1700000000".parse().unwrap());

        assert_eq!(rate_limit_reset(&headers).timestamp(), 1700000000);
    }

    #[test]
    fn missing_reset_header_falls_back_to_now() {
        let headers = reqwest::header::HeaderMap::new();
        let before = Utc::now();

        assert!(rate_limit_reset(&headers) >= before);
    }
}
