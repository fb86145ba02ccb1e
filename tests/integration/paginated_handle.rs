//! Cached paginated query handle driven by in-memory subscriptions.

use super::test_utils::{city_args, listings, Listing};
use pagehold::config::PaginationConfig;
use pagehold::{
    CachedPaginatedQuery, ContinuityStore, MemorySubscription, PageStatus, PaginatedSubscription,
    SnapshotOrigin,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_filter_edit_with_subscriptions() {
    let store = ContinuityStore::<Listing>::shared();
    let mut query = CachedPaginatedQuery::new(Arc::clone(&store), "listings", city_args("berlin")).unwrap();

    let berlin = MemorySubscription::<Listing>::new();
    berlin.settle_page(listings("berlin", 20), false);
    let obs = query.poll(&berlin);
    assert_eq!(obs.items().len(), 20);

    assert!(query.set_args(city_args("munich")).unwrap());
    let munich = MemorySubscription::<Listing>::new();
    let obs = query.poll(&munich);
    assert!(obs.loading_first_page);
    assert_eq!(obs.items().len(), 20);
    assert_eq!(obs.origin, SnapshotOrigin::Fallback);

    munich.settle_page(listings("munich", 12), true);
    let obs = query.poll(&munich);
    assert_eq!(obs.items().len(), 12);
    assert_eq!(obs.status(), PageStatus::Exhausted);
    assert!(!obs.loading_first_page);
}

#[test]
fn test_load_more_reaches_current_subscription() {
    let store = ContinuityStore::<Listing>::shared();
    let query = CachedPaginatedQuery::new(store, "listings", city_args("berlin"))
        .unwrap()
        .with_pagination(PaginationConfig {
            initial_num_items: 20,
            load_more_count: 10,
        });

    let sub = MemorySubscription::<Listing>::new();
    sub.settle_page(listings("berlin", 20), false);
    let obs = query.poll(&sub);
    query.load_more(&obs);
    obs.load_more(3);
    assert_eq!(sub.requested(), vec![10, 3]);

    let obs = query.poll(&sub);
    assert_eq!(obs.status(), PageStatus::LoadingMore);
    assert_eq!(obs.items().len(), 20);
}

#[test]
fn test_remount_shows_own_record() {
    let store = ContinuityStore::<Listing>::shared();
    let query = CachedPaginatedQuery::new(store, "listings", city_args("berlin")).unwrap();

    let sub = MemorySubscription::<Listing>::new();
    sub.settle_page(listings("berlin", 5), false);
    query.poll(&sub);

    sub.reset();
    let obs = query.poll(&sub);
    assert_eq!(obs.origin, SnapshotOrigin::Recorded);
    assert_eq!(obs.items().len(), 5);
    assert!(obs.loading_first_page);
}

#[test]
fn test_listener_drives_rerender() {
    let store = ContinuityStore::<Listing>::shared();
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);
    let id = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let query = CachedPaginatedQuery::new(Arc::clone(&store), "listings", city_args("berlin")).unwrap();
    let sub = MemorySubscription::<Listing>::new();
    query.poll(&sub);
    assert_eq!(renders.load(Ordering::SeqCst), 0);

    sub.settle_page(listings("berlin", 2), false);
    query.poll(&sub);
    query.poll(&sub);
    assert_eq!(renders.load(Ordering::SeqCst), 1);

    assert!(store.unsubscribe(id));
    sub.settle_page(listings("berlin", 1), true);
    query.poll(&sub);
    assert_eq!(renders.load(Ordering::SeqCst), 1);
}

struct FixedSubscription(Vec<u8>);

impl PaginatedSubscription<u8> for FixedSubscription {
    fn current(&self) -> pagehold::Snapshot<u8> {
        pagehold::Snapshot::new(PageStatus::Exhausted, self.0.clone(), pagehold::LoadMore::noop())
    }
}

#[test]
fn test_custom_subscription_provider() {
    let store = ContinuityStore::<u8>::shared();
    let query = CachedPaginatedQuery::new(store, "matches", pagehold::QueryArgs::new()).unwrap();
    let dyn_sub: &dyn PaginatedSubscription<u8> = &FixedSubscription(vec![9, 8]);
    let obs = query.poll(dyn_sub);
    assert_eq!(obs.items(), &[9, 8]);
}
