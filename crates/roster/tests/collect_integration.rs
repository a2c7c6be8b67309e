//! Integration tests for the collection engine.
//!
//! These exercise the engine through the public API with synthetic
//! sources, covering the interaction between pagination, the time window,
//! deduplication, and hydration that unit tests cover in isolation.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster::collect::{ActorSource, Page, collect};
use roster::error::Result;
use roster::github::GitHubError;
use roster::window::TimeWindow;
use roster::{Actor, Error};

/// A synthetic timestamped record.
#[derive(Debug, Clone)]
struct Event {
    id: u64,
    at: DateTime<Utc>,
}

fn event(id: u64, at: &str) -> Event {
    Event {
        id,
        at: at.parse().unwrap(),
    }
}

/// A source that pages over events and counts fetch and resolve calls.
struct EventSource {
    pages: Vec<Vec<Event>>,
    dedup: bool,
    fail_resolve_for: Option<u64>,
    fetches: AtomicUsize,
    resolutions: AtomicUsize,
}

impl EventSource {
    fn new(events: Vec<Event>, page_size: usize) -> Self {
        let pages = if events.is_empty() {
            vec![Vec::new()]
        } else {
            events.chunks(page_size).map(<[Event]>::to_vec).collect()
        };
        Self {
            pages,
            dedup: false,
            fail_resolve_for: None,
            fetches: AtomicUsize::new(0),
            resolutions: AtomicUsize::new(0),
        }
    }

    fn with_dedup(mut self) -> Self {
        self.dedup = true;
        self
    }

    fn failing_resolve_for(mut self, id: u64) -> Self {
        self.fail_resolve_for = Some(id);
        self
    }
}

#[async_trait]
impl ActorSource for EventSource {
    type Item = Event;

    async fn fetch_page(&self, page: u32) -> Result<Page<Event>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let index = (page - 1) as usize;
        let items = self.pages[index].clone();
        let next = (index + 1 < self.pages.len()).then(|| page + 1);
        Ok(Page { items, next })
    }

    fn event_time(&self, item: &Event) -> Option<DateTime<Utc>> {
        Some(item.at)
    }

    fn identity(&self, item: &Event) -> Option<u64> {
        self.dedup.then_some(item.id)
    }

    async fn resolve(&self, item: Event) -> Result<Actor> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);

        if self.fail_resolve_for == Some(item.id) {
            return Err(Error::GitHub(GitHubError::not_found(format!(
                "user {}",
                item.id
            ))));
        }

        // Hydration: the resolved record carries more than the stub did.
        Ok(Actor {
            id: item.id,
            login: Some(format!("user-{}", item.id)),
            ..Actor::default()
        })
    }
}

fn ids(actors: &[Actor]) -> Vec<u64> {
    actors.iter().map(|a| a.id).collect()
}

#[tokio::test]
async fn page_boundaries_do_not_change_the_result() {
    let events: Vec<Event> = (0..250)
        .map(|i| event(i, "2024-06-01T12:00:00Z"))
        .collect();

    let baseline = {
        let source = EventSource::new(events.clone(), 250);
        collect(&source, None).await.unwrap()
    };

    for page_size in [1, 7, 100, 249] {
        let source = EventSource::new(events.clone(), page_size);
        let collection = collect(&source, None).await.unwrap();

        assert_eq!(ids(&collection.actors), ids(&baseline.actors));
        assert_eq!(collection.times, baseline.times);
    }
}

#[tokio::test]
async fn dedup_suppresses_duplicate_hydration_calls() {
    // Id 1 appears on three pages; it must be hydrated exactly once.
    let events = vec![
        event(1, "2024-06-01T00:00:00Z"),
        event(2, "2024-06-02T00:00:00Z"),
        event(1, "2024-06-03T00:00:00Z"),
        event(3, "2024-06-04T00:00:00Z"),
        event(1, "2024-06-05T00:00:00Z"),
        event(2, "2024-06-06T00:00:00Z"),
    ];
    let source = EventSource::new(events, 2).with_dedup();

    let collection = collect(&source, None).await.unwrap();

    assert_eq!(ids(&collection.actors), vec![1, 2, 3]);
    assert_eq!(source.resolutions.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn window_and_dedup_compose() {
    let window = TimeWindow::from_dates("2024-06-01", "2024-06-30").unwrap();
    let events = vec![
        event(1, "2024-05-20T00:00:00Z"), // outside: filtered before dedup
        event(1, "2024-06-10T00:00:00Z"), // first in-window sighting of 1
        event(2, "2024-06-15T00:00:00Z"),
        event(1, "2024-06-20T00:00:00Z"), // duplicate
        event(2, "2024-07-05T00:00:00Z"), // outside
    ];
    let source = EventSource::new(events, 2).with_dedup();

    let collection = collect(&source, Some(&window)).await.unwrap();

    assert_eq!(ids(&collection.actors), vec![1, 2]);
    assert_eq!(
        collection.times[0],
        "2024-06-10T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[tokio::test]
async fn hydration_failure_aborts_the_run() {
    let events = vec![
        event(1, "2024-06-01T00:00:00Z"),
        event(2, "2024-06-02T00:00:00Z"),
        event(3, "2024-06-03T00:00:00Z"),
    ];
    let source = EventSource::new(events, 1).failing_resolve_for(2);

    let result = collect(&source, None).await;

    assert!(result.is_err());
    // Page 3 is never requested once hydration fails on page 2.
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn resolved_actors_carry_hydrated_fields() {
    let source = EventSource::new(vec![event(42, "2024-06-01T00:00:00Z")], 100);

    let collection = collect(&source, None).await.unwrap();

    assert_eq!(collection.actors[0].login.as_deref(), Some("user-42"));
    assert!(collection.is_timestamped());
}

#[tokio::test]
async fn empty_listing_yields_empty_collection() {
    let source = EventSource::new(Vec::new(), 100);

    let collection = collect(&source, None).await.unwrap();

    assert!(collection.is_empty());
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}
