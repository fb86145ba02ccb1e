//! Continuity Store
//!
//! Process-scoped record of the last settled snapshot of every paginated query
//! identity ever observed, and a read path that blends it with live state so a
//! consumer never flashes back to an empty list while a new identity loads.
//!
//! The store is constructed explicitly and shared as `Arc<ContinuityStore<T>>`.
//! It grows without bound for the life of the process: one slot per distinct
//! (query name, arguments) combination.

mod bucket;
mod listener;

pub use listener::{ListenerId, RecordedWrite};

use crate::identity::{QueryIdentity, QueryName};
use crate::snapshot::{Observation, PageStatus, Snapshot, SnapshotOrigin};
use bucket::QueryBucket;
use listener::ListenerRegistry;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Counts of recorded state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Query names with at least one recorded snapshot
    pub queries: usize,
    /// Recorded snapshots across all query names
    pub snapshots: usize,
}

/// QueryName -> QueryBucket, behind one store-wide lock
pub struct ContinuityStore<T> {
    buckets: Mutex<HashMap<QueryName, QueryBucket<T>>>,
    listeners: ListenerRegistry,
}

impl<T> Default for ContinuityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ContinuityStore<T> {
    pub fn new() -> Self {
        ContinuityStore {
            buckets: Mutex::new(HashMap::new()),
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a listener called after every write that changed the store.
    pub fn subscribe(
        &self,
        listener: impl Fn(&RecordedWrite) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn stats(&self) -> StoreStats {
        let buckets = self.buckets.lock();
        StoreStats {
            queries: buckets.len(),
            snapshots: buckets.values().map(QueryBucket::len).sum(),
        }
    }

    /// Identity of the last settled snapshot recorded for `query`.
    pub fn most_recent_identity(&self, query: &QueryName) -> Option<QueryIdentity> {
        self.buckets
            .lock()
            .get(query)
            .and_then(|bucket| bucket.most_recent().cloned())
    }

    /// Snapshot recorded for exactly this identity, without any fallback.
    pub fn recorded(
        &self,
        query: &QueryName,
        identity: &QueryIdentity,
    ) -> Option<Arc<Snapshot<T>>> {
        self.buckets
            .lock()
            .get(query)
            .and_then(|bucket| bucket.get(identity).cloned())
    }
}

impl<T: PartialEq> ContinuityStore<T> {
    /// Continuity-aware read of a live snapshot.
    ///
    /// 1. A settled live snapshot is recorded for `identity` and becomes the
    ///    query's most recent snapshot.
    /// 2. `LoadingMore` is returned verbatim. Otherwise the snapshot recorded
    ///    for `identity` is returned, else the query's most recent snapshot,
    ///    else an empty `LoadingFirstPage` placeholder.
    /// 3. `loading_first_page` reports the live status, whatever is shown.
    pub fn observe(
        &self,
        query: &QueryName,
        identity: &QueryIdentity,
        live: Snapshot<T>,
    ) -> Observation<T> {
        let live_status = live.status;
        let loading_first_page = live_status == PageStatus::LoadingFirstPage;
        let live = Arc::new(live);

        let mut write = None;
        let (snapshot, origin) = {
            let mut buckets = self.buckets.lock();

            if live_status.is_settled() {
                let bucket = buckets.entry(query.clone()).or_default();
                if bucket.record(identity, Arc::clone(&live)) {
                    write = Some(RecordedWrite {
                        query: query.clone(),
                        identity: identity.clone(),
                        status: live_status,
                        item_count: live.items.len(),
                    });
                }
            }

            if live_status == PageStatus::LoadingMore {
                (live, SnapshotOrigin::Live)
            } else {
                select(buckets.get(query), identity)
            }
        };

        trace!(
            query = %query,
            identity = %identity.digest(),
            live_status = %live_status,
            effective_status = %snapshot.status,
            origin = %origin,
            "Observed paginated query"
        );

        if let Some(write) = write {
            debug!(
                query = %write.query,
                identity = %write.identity.digest(),
                status = %write.status,
                items = write.item_count,
                "Recorded settled snapshot"
            );
            self.listeners.notify(&write);
        }

        Observation {
            snapshot,
            loading_first_page,
            origin,
        }
    }
}

fn select<T>(
    bucket: Option<&QueryBucket<T>>,
    identity: &QueryIdentity,
) -> (Arc<Snapshot<T>>, SnapshotOrigin) {
    let Some(bucket) = bucket else {
        return (Arc::new(Snapshot::placeholder()), SnapshotOrigin::Placeholder);
    };
    if let Some(recorded) = bucket.get(identity) {
        return (Arc::clone(recorded), SnapshotOrigin::Recorded);
    }
    match bucket.latest() {
        Some(latest) => (Arc::clone(latest), SnapshotOrigin::Fallback),
        None => (Arc::new(Snapshot::placeholder()), SnapshotOrigin::Placeholder),
    }
}
