//! The paginated collection engine.
//!
//! [`collect`] walks a cursor-based listing to completion and produces the
//! deduplicated, time-filtered, optionally hydrated sequence of actors the
//! listing would yield across all pages, in first-seen order. Everything
//! endpoint-specific is injected through the [`ActorSource`] trait, so the
//! engine depends only on the abstraction and never on a concrete source.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::actor::{Actor, Collection};
use crate::error::Result;
use crate::window::TimeWindow;

/// Request size for each listing page. Large to minimize round trips.
pub const PER_PAGE: u32 = 100;

/// One bounded chunk of a listing plus the cursor for the next chunk.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page, in listing order.
    pub items: Vec<T>,
    /// Next page number; `None` is the "no more pages" sentinel.
    pub next: Option<u32>,
}

impl<T> Page<T> {
    /// A final page with no successor.
    #[must_use]
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// One data source bound to a remote listing endpoint.
///
/// A source decides four things the engine stays generic over: how to
/// fetch a page, which event timestamp (if any) an item carries, which
/// identity key (if any) to deduplicate on, and how to resolve a raw item
/// into an [`Actor`]: either a secondary profile lookup or reuse of the
/// listing record as-is.
#[async_trait]
pub trait ActorSource {
    /// Raw record type produced by one listing page.
    type Item: Send + Sync;

    /// Fetch one page of the listing.
    async fn fetch_page(&self, page: u32) -> Result<Page<Self::Item>>;

    /// Event timestamp for window filtering and timestamped output.
    ///
    /// `None` marks an untimestamped source: its items are never filtered
    /// by a time window and the collection carries no timestamps.
    fn event_time(&self, _item: &Self::Item) -> Option<DateTime<Utc>> {
        None
    }

    /// Dedup key for this item; `None` disables deduplication.
    fn identity(&self, _item: &Self::Item) -> Option<u64> {
        None
    }

    /// Resolve a raw item into an actor.
    ///
    /// Sources that hydrate perform the single-entity lookup here; sources
    /// that reuse the listing record return it directly.
    async fn resolve(&self, item: Self::Item) -> Result<Actor>;
}

/// Collect the complete actor sequence from `source`.
///
/// Pages are fetched sequentially starting at 1, following the cursor each
/// page returns until the sentinel. Per item: the window filter runs first
/// (items outside `window` are skipped), then deduplication (an identity
/// key already seen this run is skipped before any hydration call), then
/// resolution. Any fetch or resolution failure aborts the whole run and
/// no partial results are returned.
pub async fn collect<S: ActorSource>(
    source: &S,
    window: Option<&TimeWindow>,
) -> Result<Collection> {
    let mut collection = Collection::default();
    let mut seen: HashSet<u64> = HashSet::new();
    let mut page = 1u32;

    loop {
        let fetched = source.fetch_page(page).await?;
        let count = fetched.items.len();

        for item in fetched.items {
            let event_time = source.event_time(&item);

            if let (Some(window), Some(t)) = (window, event_time)
                && !window.contains(t)
            {
                continue;
            }

            if let Some(key) = source.identity(&item)
                && !seen.insert(key)
            {
                continue;
            }

            let actor = source.resolve(item).await?;
            collection.actors.push(actor);
            if let Some(t) = event_time {
                collection.times.push(t);
            }
        }

        tracing::debug!(page, count, total_so_far = collection.len(), "fetched page");

        match fetched.next {
            Some(next) => page = next,
            None => break,
        }
    }

    tracing::debug!(total = collection.len(), "collection complete");

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::Error;
    use crate::github::GitHubError;

    /// A synthetic record: an id and an optional event time.
    #[derive(Debug, Clone)]
    struct Rec {
        id: u64,
        at: Option<DateTime<Utc>>,
    }

    fn rec(id: u64) -> Rec {
        Rec { id, at: None }
    }

    fn rec_at(id: u64, at: &str) -> Rec {
        Rec {
            id,
            at: Some(at.parse().unwrap()),
        }
    }

    /// In-memory source with configurable dedup, a failure page, and a
    /// fetch-call counter.
    struct FakeSource {
        pages: Vec<Vec<Rec>>,
        dedup: bool,
        fail_on: Option<u32>,
        fetches: AtomicUsize,
    }

    impl FakeSource {
        fn new(pages: Vec<Vec<Rec>>) -> Self {
            Self {
                pages,
                dedup: false,
                fail_on: None,
                fetches: AtomicUsize::new(0),
            }
        }

        fn with_dedup(mut self) -> Self {
            self.dedup = true;
            self
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_on = Some(page);
            self
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ActorSource for FakeSource {
        type Item = Rec;

        async fn fetch_page(&self, page: u32) -> Result<Page<Rec>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);

            if self.fail_on == Some(page) {
                return Err(Error::GitHub(GitHubError::network("connection reset")));
            }

            let index = (page - 1) as usize;
            let items = self.pages[index].clone();
            let next = if index + 1 < self.pages.len() {
                Some(page + 1)
            } else {
                None
            };
            Ok(Page { items, next })
        }

        fn event_time(&self, item: &Rec) -> Option<DateTime<Utc>> {
            item.at
        }

        fn identity(&self, item: &Rec) -> Option<u64> {
            self.dedup.then_some(item.id)
        }

        async fn resolve(&self, item: Rec) -> Result<Actor> {
            Ok(Actor {
                id: item.id,
                ..Actor::default()
            })
        }
    }

    fn ids(collection: &Collection) -> Vec<u64> {
        collection.actors.iter().map(|a| a.id).collect()
    }

    /// Split `items` into pages of the given sizes.
    fn paged(items: Vec<Rec>, sizes: &[usize]) -> Vec<Vec<Rec>> {
        let mut remaining = items;
        sizes
            .iter()
            .map(|&size| remaining.drain(..size).collect())
            .collect()
    }

    #[tokio::test]
    async fn union_of_pages_in_first_seen_order() {
        let items: Vec<Rec> = (0..250).map(rec).collect();
        let expected: Vec<u64> = (0..250).collect();

        for sizes in [&[100, 100, 50][..], &[1, 248, 1][..], &[250][..]] {
            let source = FakeSource::new(paged(items.clone(), sizes));
            let collection = collect(&source, None).await.unwrap();
            assert_eq!(ids(&collection), expected, "page split {sizes:?}");
        }
    }

    #[tokio::test]
    async fn dedup_spans_pages() {
        let source = FakeSource::new(vec![
            vec![rec(1), rec(2), rec(1)],
            vec![rec(2), rec(3)],
            vec![rec(1), rec(4)],
        ])
        .with_dedup();

        let collection = collect(&source, None).await.unwrap();
        assert_eq!(ids(&collection), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn no_dedup_without_identity() {
        let source = FakeSource::new(vec![vec![rec(1), rec(1)], vec![rec(1)]]);

        let collection = collect(&source, None).await.unwrap();
        assert_eq!(ids(&collection), vec![1, 1, 1]);
    }

    #[tokio::test]
    async fn window_keeps_exactly_in_range_records() {
        let window = TimeWindow::from_dates("2024-01-01", "2024-01-31").unwrap();
        let source = FakeSource::new(vec![vec![
            rec_at(1, "2023-12-31T23:59:59Z"),
            rec_at(2, "2024-01-01T00:00:00Z"),
            rec_at(3, "2024-01-15T08:00:00Z"),
            rec_at(4, "2024-01-31T00:00:00Z"),
            rec_at(5, "2024-01-31T00:00:01Z"),
            rec_at(6, "2024-02-02T00:00:00Z"),
        ]]);

        let collection = collect(&source, Some(&window)).await.unwrap();
        assert_eq!(ids(&collection), vec![2, 3, 4]);
        assert_eq!(collection.times.len(), 3);
    }

    #[tokio::test]
    async fn window_ignored_for_untimestamped_source() {
        let window = TimeWindow::from_dates("2024-01-01", "2024-01-31").unwrap();
        let source = FakeSource::new(vec![vec![rec(1), rec(2)]]);

        let collection = collect(&source, Some(&window)).await.unwrap();
        assert_eq!(ids(&collection), vec![1, 2]);
        assert!(!collection.is_timestamped());
    }

    #[tokio::test]
    async fn fetch_failure_aborts_without_partial_results() {
        let source = FakeSource::new(vec![vec![rec(1)], vec![rec(2)], vec![rec(3)]]).failing_on(2);

        let result = collect(&source, None).await;
        assert!(result.is_err());
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn stops_on_sentinel_after_exactly_two_fetches() {
        let source = FakeSource::new(vec![vec![rec(1)], vec![rec(2)]]);

        let collection = collect(&source, None).await.unwrap();
        assert_eq!(ids(&collection), vec![1, 2]);
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn times_stay_aligned_with_actors() {
        let source = FakeSource::new(vec![
            vec![rec_at(1, "2024-01-01T00:00:00Z"), rec_at(2, "2024-01-02T00:00:00Z")],
            vec![rec_at(3, "2024-01-03T00:00:00Z")],
        ]);

        let collection = collect(&source, None).await.unwrap();
        assert_eq!(collection.actors.len(), collection.times.len());
        for (actor, time) in collection.actors.iter().zip(&collection.times) {
            let day = actor.id as u32;
            assert_eq!(time.to_rfc3339(), format!("2024-01-0{day}T00:00:00+00:00"));
        }
    }
}
