//! Cached paginated query handle
//!
//! Consumer-side handle for one paginated query: it keeps the identity of the
//! current arguments, routes every live snapshot through the shared
//! continuity store, and forwards load-more requests.

use crate::config::PaginationConfig;
use crate::error::IdentityError;
use crate::identity::{resolve, QueryArgs, QueryIdentity, QueryName};
use crate::snapshot::{Observation, Snapshot};
use crate::store::ContinuityStore;
use crate::subscription::PaginatedSubscription;
use std::sync::Arc;
use tracing::debug;

pub struct CachedPaginatedQuery<T> {
    store: Arc<ContinuityStore<T>>,
    query: QueryName,
    args: QueryArgs,
    identity: QueryIdentity,
    pagination: PaginationConfig,
}

impl<T: PartialEq> CachedPaginatedQuery<T> {
    pub fn new(
        store: Arc<ContinuityStore<T>>,
        query: impl Into<QueryName>,
        args: QueryArgs,
    ) -> Result<Self, IdentityError> {
        let query = query.into();
        let identity = resolve(&query, &args)?;
        Ok(Self {
            store,
            query,
            args,
            identity,
            pagination: PaginationConfig::default(),
        })
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn query(&self) -> &QueryName {
        &self.query
    }

    pub fn args(&self) -> &QueryArgs {
        &self.args
    }

    pub fn identity(&self) -> &QueryIdentity {
        &self.identity
    }

    /// Page size a provider should use for the first page.
    pub fn initial_num_items(&self) -> usize {
        self.pagination.initial_num_items
    }

    /// Replace the arguments. Returns whether the identity changed.
    ///
    /// On error the previous arguments and identity are kept.
    pub fn set_args(&mut self, args: QueryArgs) -> Result<bool, IdentityError> {
        let identity = resolve(&self.query, &args)?;
        let changed = identity != self.identity;
        if changed {
            debug!(
                query = %self.query,
                from = %self.identity.digest(),
                to = %identity.digest(),
                "Query arguments changed"
            );
        }
        self.args = args;
        self.identity = identity;
        Ok(changed)
    }

    pub fn observe(&self, live: Snapshot<T>) -> Observation<T> {
        self.store.observe(&self.query, &self.identity, live)
    }

    /// Pull the subscription's current snapshot and observe it.
    pub fn poll<S>(&self, subscription: &S) -> Observation<T>
    where
        S: PaginatedSubscription<T> + ?Sized,
    {
        self.observe(subscription.current())
    }

    /// Request the configured number of additional items.
    pub fn load_more(&self, observation: &Observation<T>) {
        observation.load_more(self.pagination.load_more_count);
    }
}
