//! Property-based tests for the continuity store read path

use pagehold::{
    resolve, ContinuityStore, LoadMore, PageStatus, QueryArgs, QueryName, Snapshot, SnapshotOrigin,
};
use proptest::prelude::*;

fn status() -> impl Strategy<Value = PageStatus> {
    prop_oneof![
        Just(PageStatus::LoadingFirstPage),
        Just(PageStatus::LoadingMore),
        Just(PageStatus::CanLoadMore),
        Just(PageStatus::Exhausted),
        Just(PageStatus::Error),
    ]
}

/// (identity index, status, items) ticks over a small identity space
fn ticks() -> impl Strategy<Value = Vec<(u8, PageStatus, Vec<u16>)>> {
    prop::collection::vec((0u8..4, status(), prop::collection::vec(any::<u16>(), 0..5)), 1..40)
}

proptest! {
    /// Replaying any tick sequence matches a simple reference model
    #[test]
    fn test_observe_matches_reference_model(ticks in ticks()) {
        let query = QueryName::from("listings");
        let identities: Vec<_> = (0..4)
            .map(|i| resolve(&query, &QueryArgs::new().with("page", i)).unwrap())
            .collect();
        let store = ContinuityStore::new();

        let mut recorded: Vec<Option<(PageStatus, Vec<u16>)>> = vec![None; 4];
        let mut most_recent: Option<usize> = None;

        for (idx, status, items) in ticks {
            let idx = idx as usize;
            let obs = store.observe(
                &query,
                &identities[idx],
                Snapshot::new(status, items.clone(), LoadMore::noop()),
            );

            if status.is_settled() {
                recorded[idx] = Some((status, items.clone()));
                most_recent = Some(idx);
            }

            prop_assert_eq!(obs.loading_first_page, status == PageStatus::LoadingFirstPage);
            let expected = if status == PageStatus::LoadingMore {
                (SnapshotOrigin::Live, status, items)
            } else if let Some((s, i)) = recorded[idx].clone() {
                (SnapshotOrigin::Recorded, s, i)
            } else if let Some((s, i)) = most_recent.and_then(|m| recorded[m].clone()) {
                (SnapshotOrigin::Fallback, s, i)
            } else {
                (SnapshotOrigin::Placeholder, PageStatus::LoadingFirstPage, vec![])
            };

            prop_assert_eq!(obs.origin, expected.0);
            prop_assert_eq!(obs.status(), expected.1);
            prop_assert_eq!(obs.items(), expected.2.as_slice());
            prop_assert_eq!(
                store.most_recent_identity(&query),
                most_recent.map(|m| identities[m].clone())
            );
        }
    }

    /// Observing the same settled snapshot twice changes nothing
    #[test]
    fn test_repeat_settled_observe_is_idempotent(items in prop::collection::vec(any::<u16>(), 0..10)) {
        let query = QueryName::from("listings");
        let identity = resolve(&query, &QueryArgs::new()).unwrap();
        let store = ContinuityStore::new();

        let first = store.observe(&query, &identity, Snapshot::new(PageStatus::Exhausted, items.clone(), LoadMore::noop()));
        let pointer = store.most_recent_identity(&query);
        let second = store.observe(&query, &identity, Snapshot::new(PageStatus::Exhausted, items, LoadMore::noop()));

        prop_assert_eq!(first.items(), second.items());
        prop_assert_eq!(first.status(), second.status());
        prop_assert_eq!(store.most_recent_identity(&query), pointer);
    }
}
