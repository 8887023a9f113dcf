use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use agora_client::ApiError;

use crate::source::{Identified, PageSource};

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Paging flags of a collection, cheap to copy out for trigger checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingFlags {
    /// Page number of the last successful load (1 before the first one).
    pub cursor: u32,
    pub has_more: bool,
    pub loading: bool,
    pub reloading: bool,
}

impl PagingFlags {
    /// True while a page fetch (append or reset) is in flight.
    pub fn busy(&self) -> bool {
        self.loading || self.reloading
    }

    /// True when a load-more request would be accepted.
    pub fn can_advance(&self) -> bool {
        !self.busy() && self.has_more
    }
}

/// Owned snapshot of a collection for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView<T: Identified> {
    pub items: Vec<T>,
    pub flags: PagingFlags,
    /// Items with a mutation in flight.
    pub updating: Vec<T::Id>,
}

impl<T: Identified> CollectionView<T> {
    pub fn is_updating(&self, id: &T::Id) -> bool {
        self.updating.contains(id)
    }
}

impl<T: Identified> Default for CollectionView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            flags: PagingFlags { cursor: 1, has_more: false, loading: false, reloading: false },
            updating: Vec::new(),
        }
    }
}

/// Result of a page request.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Page merged; `added` counts identifiers new to the collection.
    Applied { page: u32, added: usize },
    /// Another fetch was in flight, or there is nothing more to load.
    Skipped,
    /// The collection was detached while the fetch was in flight.
    Discarded,
    Failed(ApiError),
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, LoadOutcome::Skipped)
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, LoadOutcome::Discarded)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

pub(crate) struct Inner<T: Identified> {
    pub(crate) items: Vec<T>,
    pub(crate) cursor: u32,
    pub(crate) has_more: bool,
    pub(crate) loading: bool,
    pub(crate) reloading: bool,
    pub(crate) updating: HashSet<T::Id>,
    /// Bumped on detach; fetches started under an older value are dropped.
    pub(crate) generation: u64,
}

impl<T: Identified> Inner<T> {
    fn empty(generation: u64) -> Self {
        Self {
            items: Vec::new(),
            cursor: 1,
            has_more: false,
            loading: false,
            reloading: false,
            updating: HashSet::new(),
            generation,
        }
    }

    pub(crate) fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| &item.id() == id)
    }
}

struct Ticket {
    generation: u64,
    page: u32,
    reset: bool,
}

/// Ordered, paginated, deduplicated shadow of a remote list.
///
/// At most one page fetch runs at a time: `loading` guards appends,
/// `reloading` guards full resets, and either one turns further load
/// requests into no-ops. The lock is only held across synchronous
/// sections, never across a network call.
pub struct PagedCollection<T: Identified> {
    pub(crate) inner: Mutex<Inner<T>>,
    page_size: u32,
}

impl<T: Identified + Clone> PagedCollection<T> {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            inner: Mutex::new(Inner::empty(0)),
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn flags(&self) -> PagingFlags {
        let st = self.state();
        PagingFlags {
            cursor: st.cursor,
            has_more: st.has_more,
            loading: st.loading,
            reloading: st.reloading,
        }
    }

    pub fn snapshot(&self) -> CollectionView<T> {
        let st = self.state();
        CollectionView {
            items: st.items.clone(),
            flags: PagingFlags {
                cursor: st.cursor,
                has_more: st.has_more,
                loading: st.loading,
                reloading: st.reloading,
            },
            updating: st.updating.iter().cloned().collect(),
        }
    }

    pub fn items(&self) -> Vec<T> {
        self.state().items.clone()
    }

    pub fn get(&self, id: &T::Id) -> Option<T> {
        let st = self.state();
        st.position(id).map(|i| st.items[i].clone())
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_updating(&self, id: &T::Id) -> bool {
        self.state().updating.contains(id)
    }

    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    // ── Paging ──────────────────────────────────────────────────────

    /// Load the current cursor page (append) or page 1 (reset).
    ///
    /// A reset replaces the collection and puts the cursor back to 1.
    /// No-op while another fetch is in flight.
    pub async fn load_page<S>(&self, reset: bool, source: &S) -> LoadOutcome
    where
        S: PageSource<T> + ?Sized,
    {
        let ticket = {
            let mut st = self.state();
            if st.loading || st.reloading {
                return LoadOutcome::Skipped;
            }
            let page = if reset {
                st.reloading = true;
                1
            } else {
                st.loading = true;
                st.cursor
            };
            Ticket { generation: st.generation, page, reset }
        };
        self.fetch(ticket, source).await
    }

    /// Full refresh from page 1.
    pub async fn reset<S>(&self, source: &S) -> LoadOutcome
    where
        S: PageSource<T> + ?Sized,
    {
        self.load_page(true, source).await
    }

    /// Load the page after the cursor. The cursor moves only when the
    /// page arrives, so a failed load-more is retried on the same page.
    pub async fn advance_page<S>(&self, source: &S) -> LoadOutcome
    where
        S: PageSource<T> + ?Sized,
    {
        let ticket = {
            let mut st = self.state();
            if st.loading || st.reloading || !st.has_more {
                return LoadOutcome::Skipped;
            }
            st.loading = true;
            Ticket { generation: st.generation, page: st.cursor + 1, reset: false }
        };
        self.fetch(ticket, source).await
    }

    async fn fetch<S>(&self, ticket: Ticket, source: &S) -> LoadOutcome
    where
        S: PageSource<T> + ?Sized,
    {
        tracing::debug!(page = ticket.page, reset = ticket.reset, "fetching page");
        let result = source.fetch_page(ticket.page, self.page_size).await;

        let mut st = self.state();
        if st.generation != ticket.generation {
            tracing::debug!(page = ticket.page, "dropping page for detached collection");
            return LoadOutcome::Discarded;
        }
        if ticket.reset {
            st.reloading = false;
        } else {
            st.loading = false;
        }

        match result {
            Ok(page) => {
                if ticket.reset {
                    st.items.clear();
                }
                let added = merge(&mut st.items, page.items);
                st.has_more = page.has_next_page;
                st.cursor = ticket.page;
                LoadOutcome::Applied { page: ticket.page, added }
            }
            Err(e) => {
                tracing::warn!(page = ticket.page, error = %e, "page fetch failed");
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Drop everything and start a new generation. Fetches and mutations
    /// still in flight complete, but their results are discarded.
    pub fn detach(&self) {
        let mut st = self.state();
        let next = st.generation + 1;
        *st = Inner::empty(next);
    }
}

impl<T: Identified + Clone> Default for PagedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge `incoming` into `items` by identity.
///
/// An identifier already present keeps its position and takes the incoming
/// version; duplicates within `incoming` resolve to the last one seen.
/// Returns how many identifiers were new.
pub fn merge<T: Identified>(items: &mut Vec<T>, incoming: Vec<T>) -> usize {
    let mut index: HashMap<T::Id, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id(), i))
        .collect();
    let before = items.len();

    for item in incoming {
        let id = item.id();
        match index.get(&id) {
            Some(&i) => items[i] = item,
            None => {
                index.insert(id, items.len());
                items.push(item);
            }
        }
    }

    items.len() - before
}
