//! Query Buckets
//!
//! Per-query-name record of settled snapshots, keyed by identity, plus the
//! identity of the last settled snapshot written.

use crate::identity::QueryIdentity;
use crate::snapshot::Snapshot;
use std::collections::HashMap;
use std::sync::Arc;

/// QueryIdentity -> most recent settled snapshot, with a most-recent pointer
pub(crate) struct QueryBucket<T> {
    snapshots: HashMap<QueryIdentity, Arc<Snapshot<T>>>,
    most_recent: Option<QueryIdentity>,
}

impl<T> Default for QueryBucket<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryBucket<T> {
    pub fn new() -> Self {
        QueryBucket {
            snapshots: HashMap::new(),
            most_recent: None,
        }
    }

    pub fn get(&self, identity: &QueryIdentity) -> Option<&Arc<Snapshot<T>>> {
        self.snapshots.get(identity)
    }

    pub fn most_recent(&self) -> Option<&QueryIdentity> {
        self.most_recent.as_ref()
    }

    /// Snapshot of the most recently recorded identity, if any.
    pub fn latest(&self) -> Option<&Arc<Snapshot<T>>> {
        self.most_recent
            .as_ref()
            .and_then(|identity| self.snapshots.get(identity))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}

impl<T: PartialEq> QueryBucket<T> {
    /// Record a settled snapshot for `identity` and point `most_recent` at it.
    ///
    /// Last write wins. Returns whether the write changed anything observable:
    /// a new slot, different content, or a moved most-recent pointer.
    pub fn record(&mut self, identity: &QueryIdentity, snapshot: Arc<Snapshot<T>>) -> bool {
        debug_assert!(snapshot.is_settled());

        let pointer_moved = self.most_recent.as_ref() != Some(identity);
        let content_changed = self
            .snapshots
            .insert(identity.clone(), Arc::clone(&snapshot))
            .map_or(true, |previous| !previous.same_content(&snapshot));
        if pointer_moved {
            self.most_recent = Some(identity.clone());
        }

        pointer_moved || content_changed
    }
}
