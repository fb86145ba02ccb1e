//! Paginated subscription boundary
//!
//! The continuity store does not fetch anything itself. A provider yields the
//! current snapshot of a live paginated query on every tick; this module
//! defines that seam and a manually driven in-memory provider.

use crate::snapshot::{ErrorDetail, LoadMore, PageStatus, Snapshot};
use parking_lot::Mutex;
use std::sync::Arc;

/// A live paginated data source.
pub trait PaginatedSubscription<T> {
    /// Current observable state of the subscription.
    fn current(&self) -> Snapshot<T>;
}

struct MemoryState<T> {
    status: PageStatus,
    items: Vec<T>,
    error: Option<ErrorDetail>,
    requested: Vec<usize>,
}

/// In-memory subscription driven by explicit calls.
///
/// Starts in `LoadingFirstPage`. Its load handle records the requested count
/// and moves a `CanLoadMore` subscription to `LoadingMore`; the next
/// `settle_page` appends items and settles it again.
pub struct MemorySubscription<T> {
    state: Arc<Mutex<MemoryState<T>>>,
}

impl<T> Clone for MemorySubscription<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Send + 'static> Default for MemorySubscription<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> MemorySubscription<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                status: PageStatus::LoadingFirstPage,
                items: Vec::new(),
                error: None,
                requested: Vec::new(),
            })),
        }
    }

    pub fn status(&self) -> PageStatus {
        self.state.lock().status
    }

    /// Append a page of items and settle.
    pub fn settle_page(&self, items: impl IntoIterator<Item = T>, exhausted: bool) {
        let mut state = self.state.lock();
        state.items.extend(items);
        state.error = None;
        state.status = if exhausted {
            PageStatus::Exhausted
        } else {
            PageStatus::CanLoadMore
        };
    }

    /// Settle with an error, keeping items loaded so far.
    pub fn fail(&self, error: ErrorDetail) {
        let mut state = self.state.lock();
        state.error = Some(error);
        state.status = PageStatus::Error;
    }

    /// Drop all items and go back to loading the first page.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.items.clear();
        state.error = None;
        state.status = PageStatus::LoadingFirstPage;
    }

    /// Counts passed to the load handle, in call order.
    pub fn requested(&self) -> Vec<usize> {
        self.state.lock().requested.clone()
    }

    fn load_more_handle(&self) -> LoadMore {
        let state = Arc::clone(&self.state);
        LoadMore::new(move |count| {
            let mut state = state.lock();
            state.requested.push(count);
            if state.status == PageStatus::CanLoadMore {
                state.status = PageStatus::LoadingMore;
            }
        })
    }
}

impl<T: Clone + Send + 'static> PaginatedSubscription<T> for MemorySubscription<T> {
    fn current(&self) -> Snapshot<T> {
        let load_more = self.load_more_handle();
        let state = self.state.lock();
        Snapshot {
            status: state.status,
            items: state.items.clone(),
            load_more,
            error: state.error.clone(),
        }
    }
}
