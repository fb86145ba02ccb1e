//! Paginated snapshots
//!
//! The observable state of one paginated subscription at one point in time,
//! and the blended view the continuity store hands back to consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Status of a paginated subscription.
///
/// `LoadingFirstPage` and `LoadingMore` are transient; the rest are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageStatus {
    LoadingFirstPage,
    LoadingMore,
    CanLoadMore,
    Exhausted,
    Error,
}

impl PageStatus {
    /// True for statuses that represent a completed fetch cycle.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            PageStatus::CanLoadMore | PageStatus::Exhausted | PageStatus::Error
        )
    }

    pub fn is_transient(self) -> bool {
        !self.is_settled()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::LoadingFirstPage => "LoadingFirstPage",
            PageStatus::LoadingMore => "LoadingMore",
            PageStatus::CanLoadMore => "CanLoadMore",
            PageStatus::Exhausted => "Exhausted",
            PageStatus::Error => "Error",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure details carried by an `Error`-status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

type LoadMoreFn = dyn Fn(usize) + Send + Sync;

/// Handle that asks the underlying subscription for `count` more items.
#[derive(Clone, Default)]
pub struct LoadMore(Option<Arc<LoadMoreFn>>);

impl LoadMore {
    pub fn new(f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        let f: Arc<LoadMoreFn> = Arc::new(f);
        LoadMore(Some(f))
    }

    /// A handle that does nothing.
    pub fn noop() -> Self {
        LoadMore(None)
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    pub fn call(&self, count: usize) {
        if let Some(f) = &self.0 {
            f(count);
        }
    }
}

impl fmt::Debug for LoadMore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            f.write_str("LoadMore(noop)")
        } else {
            f.write_str("LoadMore(..)")
        }
    }
}

/// Full observable result of a paginated query at a point in time.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub status: PageStatus,
    /// Items in server-assigned order
    pub items: Vec<T>,
    pub load_more: LoadMore,
    pub error: Option<ErrorDetail>,
}

impl<T> Snapshot<T> {
    pub fn new(status: PageStatus, items: Vec<T>, load_more: LoadMore) -> Self {
        Self {
            status,
            items,
            load_more,
            error: None,
        }
    }

    /// Settled-but-failed snapshot.
    pub fn failed(items: Vec<T>, error: ErrorDetail, load_more: LoadMore) -> Self {
        Self {
            status: PageStatus::Error,
            items,
            load_more,
            error: Some(error),
        }
    }

    /// Empty first-page placeholder with a no-op load handle.
    pub fn placeholder() -> Self {
        Self::new(PageStatus::LoadingFirstPage, Vec::new(), LoadMore::noop())
    }

    pub fn is_settled(&self) -> bool {
        self.status.is_settled()
    }
}

impl<T: PartialEq> Snapshot<T> {
    /// Observable equality: status, items and error. Load handles are not compared.
    pub fn same_content(&self, other: &Snapshot<T>) -> bool {
        self.status == other.status && self.items == other.items && self.error == other.error
    }
}

/// Where an observed snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    /// The live snapshot, passed through verbatim (`LoadingMore`)
    Live,
    /// The snapshot recorded for the observed identity
    Recorded,
    /// The most recent snapshot of another identity of the same query
    Fallback,
    /// The empty placeholder; nothing is recorded for this query yet
    Placeholder,
}

impl SnapshotOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotOrigin::Live => "live",
            SnapshotOrigin::Recorded => "recorded",
            SnapshotOrigin::Fallback => "fallback",
            SnapshotOrigin::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for SnapshotOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Continuity-aware view returned by `ContinuityStore::observe`.
#[derive(Debug, Clone)]
pub struct Observation<T> {
    pub snapshot: Arc<Snapshot<T>>,
    /// True while the live subscription is still loading its first page,
    /// even when stale items are being shown.
    pub loading_first_page: bool,
    pub origin: SnapshotOrigin,
}

impl<T> Observation<T> {
    pub fn status(&self) -> PageStatus {
        self.snapshot.status
    }

    pub fn items(&self) -> &[T] {
        &self.snapshot.items
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        self.snapshot.error.as_ref()
    }

    /// Request more items; forwards to the effective snapshot's load handle.
    pub fn load_more(&self, count: usize) {
        self.snapshot.load_more.call(count);
    }
}
