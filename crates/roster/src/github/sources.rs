//! The concrete [`ActorSource`] bindings, one per data source.
//!
//! Each binding differs only in which endpoint it walks and which filter,
//! dedup, and resolution policy it plugs into the engine:
//!
//! | source          | endpoint              | window | dedup | resolve          |
//! |-----------------|-----------------------|--------|-------|------------------|
//! | commit authors  | `/commits`            | no     | yes   | listing stub     |
//! | fork creators   | `/forks`              | yes    | no    | hydrate          |
//! | watchers        | `/subscribers`        | no     | no    | hydrate          |
//! | stargazers      | `/stargazers`         | yes    | no    | hydrate or stub  |
//! | issue reporters | `/issues`             | no     | yes   | hydrate          |
//! | user list       | local file            | no     | no    | hydrate          |

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::{ACCEPT_STAR, GitHubClient};
use super::types::{CommitRecord, ForkRecord, IssueRecord, StarRecord};
use crate::actor::Actor;
use crate::collect::{ActorSource, PER_PAGE, Page};
use crate::error::{Error, Result};

/// Commit authors of a repository.
///
/// The listing's embedded author stub is reused as-is; commits whose
/// author has no linked GitHub account are dropped at the edge.
pub struct CommitAuthors {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl CommitAuthors {
    pub fn new(client: &GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client: client.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn route(&self, page: u32) -> String {
        format!(
            "/repos/{}/{}/commits?per_page={PER_PAGE}&page={page}",
            self.owner, self.repo
        )
    }
}

#[async_trait]
impl ActorSource for CommitAuthors {
    type Item = Actor;

    async fn fetch_page(&self, page: u32) -> Result<Page<Actor>> {
        let fetched: Page<CommitRecord> = self.client.get_page(&self.route(page), None).await?;

        let items = fetched
            .items
            .into_iter()
            .filter_map(|commit| commit.author)
            .collect();

        Ok(Page {
            items,
            next: fetched.next,
        })
    }

    fn identity(&self, item: &Actor) -> Option<u64> {
        Some(item.id)
    }

    async fn resolve(&self, item: Actor) -> Result<Actor> {
        Ok(item)
    }
}

/// Creators of forks, hydrated to full profiles.
pub struct ForkCreators {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl ForkCreators {
    pub fn new(client: &GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client: client.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn route(&self, page: u32) -> String {
        format!(
            "/repos/{}/{}/forks?per_page={PER_PAGE}&page={page}",
            self.owner, self.repo
        )
    }
}

#[async_trait]
impl ActorSource for ForkCreators {
    type Item = ForkRecord;

    async fn fetch_page(&self, page: u32) -> Result<Page<ForkRecord>> {
        self.client
            .get_page(&self.route(page), None)
            .await
            .map_err(Error::from)
    }

    fn event_time(&self, item: &ForkRecord) -> Option<DateTime<Utc>> {
        Some(item.created_at)
    }

    async fn resolve(&self, item: ForkRecord) -> Result<Actor> {
        Ok(self.client.user_by_id(item.owner.id).await?)
    }
}

/// Watchers (subscribers) of a repository, hydrated to full profiles.
///
/// The subscription listing carries no event timestamp.
pub struct Watchers {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl Watchers {
    pub fn new(client: &GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client: client.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn route(&self, page: u32) -> String {
        format!(
            "/repos/{}/{}/subscribers?per_page={PER_PAGE}&page={page}",
            self.owner, self.repo
        )
    }
}

#[async_trait]
impl ActorSource for Watchers {
    type Item = Actor;

    async fn fetch_page(&self, page: u32) -> Result<Page<Actor>> {
        self.client
            .get_page(&self.route(page), None)
            .await
            .map_err(Error::from)
    }

    async fn resolve(&self, item: Actor) -> Result<Actor> {
        Ok(self.client.user_by_id(item.id).await?)
    }
}

/// Stargazers of a repository.
///
/// By default each stargazer is hydrated into a full profile; `only_id`
/// opts into reusing the embedded listing stub instead, saving one lookup
/// per star when only the identifier matters.
pub struct Stargazers {
    client: GitHubClient,
    owner: String,
    repo: String,
    only_id: bool,
}

impl Stargazers {
    pub fn new(client: &GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client: client.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            only_id: false,
        }
    }

    /// Skip hydration and keep the listing stubs.
    #[must_use]
    pub fn only_id(mut self, only_id: bool) -> Self {
        self.only_id = only_id;
        self
    }

    fn route(&self, page: u32) -> String {
        format!(
            "/repos/{}/{}/stargazers?per_page={PER_PAGE}&page={page}",
            self.owner, self.repo
        )
    }
}

#[async_trait]
impl ActorSource for Stargazers {
    type Item = StarRecord;

    async fn fetch_page(&self, page: u32) -> Result<Page<StarRecord>> {
        // The star media type is required for starred_at to be present.
        self.client
            .get_page(&self.route(page), Some(ACCEPT_STAR))
            .await
            .map_err(Error::from)
    }

    fn event_time(&self, item: &StarRecord) -> Option<DateTime<Utc>> {
        Some(item.starred_at)
    }

    async fn resolve(&self, item: StarRecord) -> Result<Actor> {
        if self.only_id {
            return Ok(item.user);
        }

        Ok(self.client.user_by_id(item.user.id).await?)
    }
}

/// Reporters of issues, deduplicated before hydration.
///
/// A reporter with many issues is looked up once; the dedup key is checked
/// before the hydration call is made.
pub struct IssueReporters {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl IssueReporters {
    pub fn new(client: &GitHubClient, owner: &str, repo: &str) -> Self {
        Self {
            client: client.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn route(&self, page: u32) -> String {
        format!(
            "/repos/{}/{}/issues?per_page={PER_PAGE}&page={page}",
            self.owner, self.repo
        )
    }
}

#[async_trait]
impl ActorSource for IssueReporters {
    type Item = Actor;

    async fn fetch_page(&self, page: u32) -> Result<Page<Actor>> {
        let fetched: Page<IssueRecord> = self.client.get_page(&self.route(page), None).await?;

        let items = fetched.items.into_iter().map(|issue| issue.user).collect();

        Ok(Page {
            items,
            next: fetched.next,
        })
    }

    fn identity(&self, item: &Actor) -> Option<u64> {
        Some(item.id)
    }

    async fn resolve(&self, item: Actor) -> Result<Actor> {
        Ok(self.client.user_by_id(item.id).await?)
    }
}

/// A file-driven list of user ids, hydrated one by one.
///
/// The file is read line by line; the first whitespace-delimited field on
/// each line is the numeric identifier, anything after it is ignored.
/// Blank lines are skipped; a non-numeric field aborts the run. The whole
/// file is modeled as a single listing page.
pub struct UserList {
    client: GitHubClient,
    path: PathBuf,
}

impl UserList {
    pub fn new(client: &GitHubClient, path: impl Into<PathBuf>) -> Self {
        Self {
            client: client.clone(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl ActorSource for UserList {
    type Item = u64;

    async fn fetch_page(&self, _page: u32) -> Result<Page<u64>> {
        Ok(Page::last(read_user_ids(&self.path)?))
    }

    async fn resolve(&self, id: u64) -> Result<Actor> {
        Ok(self.client.user_by_id(id).await?)
    }
}

/// Parse the numeric ids out of a user-list file.
pub fn read_user_ids(path: &Path) -> Result<Vec<u64>> {
    let content = fs::read_to_string(path).map_err(|source| Error::UserList {
        path: path.to_path_buf(),
        source,
    })?;

    let mut ids = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let Some(field) = line.split_whitespace().next() else {
            continue;
        };

        let id = field.parse().map_err(|source| Error::InvalidUserId {
            path: path.to_path_buf(),
            line: index + 1,
            field: field.to_string(),
            source,
        })?;
        ids.push(id);
    }

    Ok(ids)
}
