//! The collection commands: six near-identical call sites that bind one
//! data source each and hand the result to the output sink.

use std::io;

use roster::Collection;
use roster::collect::collect;
use roster::github::{
    CommitAuthors, ForkCreators, GitHubClient, IssueReporters, Stargazers, UserList, Watchers,
    list_public_repos, sorted_names,
};
use roster::window::TimeWindow;

use crate::config::Config;
use crate::output::{self, Projection};
use crate::{Commands, OutputOptions, RepoTarget, WindowOptions};

pub(crate) async fn run(
    command: Commands,
    token_flag: Option<String>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = github_client(token_flag, config)?;

    match command {
        Commands::Commits { target, out } => {
            let source = CommitAuthors::new(&client, &target.owner, &target.repo);
            let collection = collect(&source, None).await?;
            report(&target, &collection, &out)?;
        }
        Commands::Forks {
            target,
            window,
            out,
        } => {
            let window = parse_window(&window)?;
            let source = ForkCreators::new(&client, &target.owner, &target.repo);
            let collection = collect(&source, window.as_ref()).await?;
            report(&target, &collection, &out)?;
        }
        Commands::Watchers { target, out } => {
            let source = Watchers::new(&client, &target.owner, &target.repo);
            let collection = collect(&source, None).await?;
            report(&target, &collection, &out)?;
        }
        Commands::Stargazers {
            target,
            window,
            out,
            only_id,
        } => {
            let window = parse_window(&window)?;
            let source = Stargazers::new(&client, &target.owner, &target.repo).only_id(only_id);
            let collection = collect(&source, window.as_ref()).await?;
            report(&target, &collection, &out)?;
        }
        Commands::Issues { target, out } => {
            let source = IssueReporters::new(&client, &target.owner, &target.repo);
            let collection = collect(&source, None).await?;
            report(&target, &collection, &out)?;
        }
        Commands::Users { file, out } => {
            let source = UserList::new(&client, file);
            let collection = collect(&source, None).await?;
            // No owner/repo prefix: the list is not bound to a repository.
            write_out(None, &collection, out.format)?;
        }
        Commands::Repos { org } => {
            let repos = list_public_repos(&client, &org).await?;
            let names = sorted_names(&repos);
            tracing::info!(org = %org, count = names.len(), "listed public repositories");
            output::write_repo_names(&mut io::stdout().lock(), &names)?;
        }
        Commands::Limits { output } => {
            super::limits::handle_limits(&client, output).await?;
        }
        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

/// Build the authenticated client, failing before any remote call when no
/// token is configured.
fn github_client(
    token_flag: Option<String>,
    config: &Config,
) -> Result<GitHubClient, Box<dyn std::error::Error>> {
    let Some(token) = token_flag.or_else(|| config.github_token()) else {
        return Err(Box::new(io::Error::other(
            "no GitHub token configured; pass --token, set ROSTER_GITHUB_TOKEN, \
             or add [github] token to the config file",
        )));
    };

    Ok(GitHubClient::new(&token)?)
}

fn parse_window(window: &WindowOptions) -> roster::Result<Option<TimeWindow>> {
    TimeWindow::from_optional_dates(window.from.as_deref(), window.to.as_deref())
}

fn report(
    target: &RepoTarget,
    collection: &Collection,
    out: &OutputOptions,
) -> io::Result<()> {
    tracing::info!(
        repo = %format!("{}/{}", target.owner, target.repo),
        count = collection.len(),
        "collected actors"
    );
    write_out(Some((&target.owner, &target.repo)), collection, out.format)
}

fn write_out(
    prefix: Option<(&str, &str)>,
    collection: &Collection,
    projection: Projection,
) -> io::Result<()> {
    output::write_report(io::stdout().lock(), prefix, collection, projection)
}
