//! Shared-store access from several threads.

use super::test_utils::{city_identity, listings, listings_query, live, Listing};
use pagehold::{ContinuityStore, PageStatus};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_observers_share_one_store() {
    let store = ContinuityStore::<Listing>::shared();
    let writes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&writes);
    store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let cities: [&'static str; 4] = ["berlin", "munich", "hamburg", "cologne"];
    let handles: Vec<_> = cities
        .iter()
        .map(|&city| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let query = listings_query();
                let identity = city_identity(city);
                for _ in 0..50 {
                    store.observe(&query, &identity, live(PageStatus::LoadingFirstPage, vec![]));
                    store.observe(&query, &identity, live(PageStatus::CanLoadMore, listings(city, 10)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = store.stats();
    assert_eq!(stats.queries, 1);
    assert_eq!(stats.snapshots, cities.len());

    let most_recent = store.most_recent_identity(&listings_query()).unwrap();
    assert!(cities.iter().any(|c| city_identity(c) == most_recent));
    for city in cities {
        let recorded = store.recorded(&listings_query(), &city_identity(city)).unwrap();
        assert_eq!(recorded.items, listings(city, 10));
    }
    // Every city wrote at least once; interleaving can only add pointer moves
    assert!(writes.load(Ordering::SeqCst) >= cities.len());
}

#[test]
fn test_store_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContinuityStore<Listing>>();
    assert_send_sync::<Arc<ContinuityStore<String>>>();
}
