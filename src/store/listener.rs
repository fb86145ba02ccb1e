//! In-process listener registry for recorded writes.
//!
//! Listeners run synchronously on the writing thread, after the store has
//! released its lock, so they may read from (or write to) the store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::identity::{QueryIdentity, QueryName};
use crate::snapshot::PageStatus;

/// Handle returned by `ContinuityStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A write that changed the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedWrite {
    pub query: QueryName,
    pub identity: QueryIdentity,
    pub status: PageStatus,
    pub item_count: usize,
}

type ListenerFn = dyn Fn(&RecordedWrite) + Send + Sync;

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(ListenerId, Arc<ListenerFn>)>>,
}

impl ListenerRegistry {
    pub fn subscribe(&self, listener: impl Fn(&RecordedWrite) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let listener: Arc<ListenerFn> = Arc::new(listener);
        self.listeners.write().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Call every listener in registration order.
    pub fn notify(&self, write: &RecordedWrite) {
        // Snapshot the list so listeners can (un)subscribe while being notified
        let listeners: Vec<Arc<ListenerFn>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, f)| Arc::clone(f))
            .collect();
        for listener in listeners {
            listener(write);
        }
    }
}
