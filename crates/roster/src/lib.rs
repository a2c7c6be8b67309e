//! Roster - collect the people around a GitHub repository.
//!
//! This library walks GitHub's paginated listing endpoints and produces
//! the actors associated with a repository: commit authors, fork creators,
//! watchers, stargazers, issue reporters, or an explicit id list read from
//! a file.
//!
//! The core is the collection engine in [`collect`]: page-by-page
//! retrieval driven by the `Link` header cursor, an optional inclusive
//! time window over event timestamps, deduplication by actor id, and
//! optional hydration of listing stubs into full profiles. Concrete
//! endpoint bindings live in [`github`].
//!
//! # Example
//!
//! ```ignore
//! use roster::collect::collect;
//! use roster::github::{ForkCreators, GitHubClient};
//! use roster::window::TimeWindow;
//!
//! let client = GitHubClient::new(&token)?;
//! let window = TimeWindow::from_dates("2024-01-01", "2024-06-30")?;
//! let source = ForkCreators::new(&client, "pingcap", "tidb");
//!
//! let collection = collect(&source, Some(&window)).await?;
//! for (actor, time) in collection.actors.iter().zip(&collection.times) {
//!     println!("{:?} forked at {}", actor.login, time);
//! }
//! ```

pub mod actor;
pub mod collect;
pub mod error;
pub mod github;
pub mod window;

pub use actor::{Actor, Collection};
pub use collect::{ActorSource, PER_PAGE, Page, collect};
pub use error::{Error, Result};
pub use window::TimeWindow;
