//! GitHub API client and the concrete data-source bindings.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Wire records for the listing endpoints
//! - [`client`] - Client creation, listing requests, hydration lookups
//! - [`pagination`] - `Link` header cursor extraction
//! - [`sources`] - One [`crate::collect::ActorSource`] binding per data source
//! - [`repo`] - Repository name listing
//!
//! # Collecting
//!
//! Sources plug into the engine in [`crate::collect`]:
//!
//! ```ignore
//! use roster::collect::collect;
//! use roster::github::{GitHubClient, Stargazers};
//!
//! let client = GitHubClient::new(&token)?;
//! let source = Stargazers::new(&client, "pingcap", "tidb").only_id(true);
//! let collection = collect(&source, window.as_ref()).await?;
//! ```

mod client;
mod error;
mod pagination;
mod repo;
mod sources;
mod types;

pub use client::{ACCEPT_DEFAULT, ACCEPT_STAR, GitHubClient, create_client};
pub use error::GitHubError;
pub use pagination::next_page;
pub use repo::{list_public_repos, sorted_names};
pub use sources::{
    CommitAuthors, ForkCreators, IssueReporters, Stargazers, UserList, Watchers, read_user_ids,
};
pub use types::{
    CommitRecord, ForkRecord, IssueRecord, RateLimitResource, RateLimitResponse, RateLimits,
    RepoRecord, StarRecord,
};
