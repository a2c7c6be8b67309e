//! Roster CLI - command-line interface for the repository actor collector.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::limits::OutputFormat;
use crate::output::Projection;

#[derive(Parser)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Collect the people around a GitHub repository")]
#[command(
    long_about = "Roster walks GitHub's listing endpoints and reports the actors associated \
with a repository: commit authors, fork creators, watchers, stargazers, \
issue reporters, or an explicit id list read from a file. Reports are \
tab-separated rows on stdout; logs go to stderr."
)]
#[command(after_long_help = r#"EXAMPLES
    Commit authors of a repository:
        $ roster commits -o pingcap -r tidb

    Fork creators within a date range, full profiles:
        $ roster forks -o pingcap -r tidb --from 2024-01-01 --to 2024-06-30

    Stargazer ids only, skipping profile hydration:
        $ roster stargazers -o pingcap -r tidb --only-id -f ids

    Hydrate an explicit id list (first field per line):
        $ roster users ids.txt

    Sorted public repository names of an organization:
        $ roster repos pingcap

    Check remaining API quota before a big run:
        $ roster limits

CONFIGURATION
    Roster reads configuration from:
      1. ~/.config/roster/config.toml (or $XDG_CONFIG_HOME/roster/config.toml)
      2. ./roster.toml
      3. Environment variables (ROSTER_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    ROSTER_GITHUB_TOKEN    GitHub personal access token
"#)]
struct Cli {
    /// GitHub personal access token (overrides config and environment)
    #[arg(short, long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit authors of a repository
    Commits {
        #[command(flatten)]
        target: RepoTarget,

        #[command(flatten)]
        out: OutputOptions,
    },
    /// Fork creators, hydrated to full profiles
    Forks {
        #[command(flatten)]
        target: RepoTarget,

        #[command(flatten)]
        window: WindowOptions,

        #[command(flatten)]
        out: OutputOptions,
    },
    /// Watchers (subscribers) of a repository
    Watchers {
        #[command(flatten)]
        target: RepoTarget,

        #[command(flatten)]
        out: OutputOptions,
    },
    /// Stargazers of a repository
    Stargazers {
        #[command(flatten)]
        target: RepoTarget,

        #[command(flatten)]
        window: WindowOptions,

        #[command(flatten)]
        out: OutputOptions,

        /// Keep the listing stubs instead of hydrating full profiles
        #[arg(long)]
        only_id: bool,
    },
    /// Issue reporters, deduplicated before hydration
    Issues {
        #[command(flatten)]
        target: RepoTarget,

        #[command(flatten)]
        out: OutputOptions,
    },
    /// Hydrate an explicit user-id list from a file
    Users {
        /// Path to the id list; the first whitespace-delimited field on
        /// each line is the numeric id
        file: PathBuf,

        #[command(flatten)]
        out: OutputOptions,
    },
    /// Sorted public repository names of an organization
    Repos {
        /// Organization name
        org: String,
    },
    /// Show current rate limit status
    Limits {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// The repository a report is about.
#[derive(Debug, Clone, clap::Args)]
struct RepoTarget {
    /// Repository owner (user or organization)
    #[arg(short, long)]
    owner: String,

    /// Repository name
    #[arg(short, long)]
    repo: String,
}

/// Optional event-time window. Filtering only happens when both bounds
/// are given; a lone bound applies no filter.
#[derive(Debug, Clone, clap::Args)]
struct WindowOptions {
    /// Start date, YYYY-MM-DD (midnight UTC, inclusive)
    #[arg(long)]
    from: Option<String>,

    /// End date, YYYY-MM-DD (inclusive at midnight UTC; later events on
    /// that date are excluded)
    #[arg(long)]
    to: Option<String>,
}

/// Report shape options shared by all collection commands.
#[derive(Debug, Clone, clap::Args)]
struct OutputOptions {
    /// Output projection
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Projection::Full)]
    format: Projection,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is reserved for report rows.
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("roster=info,roster_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::load();
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        commands::meta::handle_completions(*shell);
        return Ok(());
    }

    commands::report::run(cli.command, cli.token, &config).await
}
