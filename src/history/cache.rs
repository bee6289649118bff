use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use super::client::HistoryClient;
use crate::error::RelayError;
use crate::model::history::{HistoryEntry, HistoryPageResponse};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Time source for TTL checks, injectable so expiry is testable.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// One cached page of history. Replaced atomically on refresh; never
/// partially written.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub page_number: u32,
    pub entries: Vec<HistoryEntry>,
    pub total_pages: u32,
    pub total_count: u64,
    pub fetched_at: Instant,
}

/// Paginated view over the History Store with per-page TTL caching and an
/// append-only "load more" mode.
///
/// At most one fetch is in flight per instance; the `loading` flag gates
/// both load paths so page advances are never duplicated.
pub struct HistoryCache<C: Clock = SystemClock> {
    client: HistoryClient,
    clock: C,
    page_size: u32,
    ttl: Duration,
    pages: HashMap<u32, HistoryPage>,
    current_page: u32,
    total_pages: u32,
    total_count: u64,
    loading: bool,
}

impl HistoryCache<SystemClock> {
    pub fn new(client: HistoryClient, page_size: u32, ttl: Duration) -> Self {
        Self::with_clock(client, page_size, ttl, SystemClock)
    }
}

impl<C: Clock> HistoryCache<C> {
    pub fn with_clock(client: HistoryClient, page_size: u32, ttl: Duration, clock: C) -> Self {
        Self {
            client,
            clock,
            page_size,
            ttl,
            pages: HashMap::new(),
            current_page: 0,
            total_pages: 0,
            total_count: 0,
            loading: false,
        }
    }

    /// Return `page`, from cache when fresh, otherwise from the store.
    ///
    /// `force_refresh` bypasses the TTL check. A failed query leaves the
    /// cache untouched and propagates once. While another load is in
    /// flight, a cached copy of any age is served if present.
    pub async fn load_page(
        &mut self,
        page: u32,
        force_refresh: bool,
    ) -> Result<HistoryPage, RelayError> {
        if !force_refresh {
            if let Some(cached) = self.pages.get(&page) {
                if self.clock.now().duration_since(cached.fetched_at) < self.ttl {
                    debug!(page, "history cache hit");
                    return Ok(cached.clone());
                }
            }
        }

        if self.loading {
            if let Some(cached) = self.pages.get(&page) {
                return Ok(cached.clone());
            }
            return Err(RelayError::History(
                "a history fetch is already in flight".to_string(),
            ));
        }

        self.loading = true;
        let result = self.client.fetch_page(page, self.page_size).await;
        self.loading = false;

        let fetched = self.store(page, result?);
        debug!(page, total_count = self.total_count, "history page refreshed");
        Ok(fetched)
    }

    /// Fetch the page after `current_page` for appending. No-op (`None`)
    /// when already on the last page or a load is in flight. Always goes to
    /// the store: appended pages must not reuse possibly-evicted cache
    /// entries. The caller concatenates the returned entries.
    pub async fn load_more(&mut self) -> Result<Option<HistoryPage>, RelayError> {
        if self.loading || self.current_page >= self.total_pages {
            return Ok(None);
        }
        let next = self.current_page + 1;

        self.loading = true;
        let result = self.client.fetch_page(next, self.page_size).await;
        self.loading = false;

        let fetched = self.store(next, result?);
        debug!(page = next, "history page appended");
        Ok(Some(fetched))
    }

    /// Drop every cached page. Totals and the current page survive.
    pub fn invalidate(&mut self) {
        self.pages.clear();
    }

    fn store(&mut self, page: u32, response: HistoryPageResponse) -> HistoryPage {
        let entry = HistoryPage {
            page_number: response.page,
            entries: response.data,
            total_pages: response.total_pages,
            total_count: response.total_count,
            fetched_at: self.clock.now(),
        };
        self.total_pages = response.total_pages;
        self.total_count = response.total_count;
        self.current_page = page;
        self.pages.insert(page, entry.clone());
        entry
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The cached copy of `page` regardless of freshness, if any.
    pub fn cached(&self, page: u32) -> Option<&HistoryPage> {
        self.pages.get(&page)
    }
}
