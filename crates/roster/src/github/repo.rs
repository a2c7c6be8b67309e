//! Repository name listing.

use super::client::GitHubClient;
use super::error::GitHubError;
use super::types::RepoRecord;

/// List an organization's public repositories.
pub async fn list_public_repos(
    client: &GitHubClient,
    org: &str,
) -> Result<Vec<RepoRecord>, GitHubError> {
    client
        .inner()
        .get(format!("/orgs/{org}/repos?type=public"), None::<&()>)
        .await
        .map_err(|e| match e {
            octocrab::Error::GitHub { ref source, .. } if source.status_code.as_u16() == 404 => {
                GitHubError::not_found(format!("org {org}"))
            }
            other => GitHubError::Api(other),
        })
}

/// Plain repository names, sorted lexicographically.
///
/// The remote listing is unordered; this is the one place ordering is
/// imposed rather than preserved.
#[must_use]
pub fn sorted_names(repos: &[RepoRecord]) -> Vec<String> {
    let mut names: Vec<String> = repos.iter().map(|repo| repo.name.clone()).collect();
    names.sort();
    names
}
