//! The actor record and the collection result it accumulates into.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A GitHub user identity.
///
/// The numeric `id` is the stable identity key; every other field is
/// optional because list endpoints embed sparse user stubs while
/// `/user/{id}` returns the full profile. Two actors with the same `id`
/// are the same entity regardless of which fields are populated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Actor {
    /// Stable numeric identifier. Required; used as the dedup key.
    pub id: u64,
    /// Login handle.
    pub login: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Public email address.
    pub email: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Company affiliation.
    pub company: Option<String>,
    /// Blog or website URL.
    pub blog: Option<String>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Count of public repositories.
    pub public_repos: Option<u32>,
    /// Count of accounts this actor follows.
    pub following: Option<u32>,
    /// Count of followers.
    pub followers: Option<u32>,
    /// Web profile URL.
    pub html_url: Option<String>,
}

/// The result of one collection run.
///
/// `times` is either empty (untimestamped source) or exactly as long as
/// `actors`, with `times[i]` the event timestamp of `actors[i]`. The two
/// vectors are only ever appended to together.
#[derive(Debug, Default)]
pub struct Collection {
    /// Resolved actors in first-seen order.
    pub actors: Vec<Actor>,
    /// Event timestamps parallel to `actors`, when the source tracks them.
    pub times: Vec<DateTime<Utc>>,
}

impl Collection {
    /// Whether this collection carries per-actor event timestamps.
    #[must_use]
    pub fn is_timestamped(&self) -> bool {
        !self.times.is_empty()
    }

    /// Number of collected actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True when nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
