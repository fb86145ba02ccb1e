//! Property-based tests for identity determinism

use pagehold::{resolve, ArgValue, QueryArgs, QueryName};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn arg_value() -> impl Strategy<Value = ArgValue> {
    let leaf = prop_oneof![
        Just(ArgValue::Null),
        any::<bool>().prop_map(ArgValue::Bool),
        any::<i64>().prop_map(ArgValue::Int),
        (-1.0e9f64..1.0e9f64).prop_map(ArgValue::Float),
        "[a-z ]{0,8}".prop_map(ArgValue::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ArgValue::List),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(ArgValue::Map),
        ]
    })
}

fn entries() -> impl Strategy<Value = Vec<(String, ArgValue)>> {
    prop::collection::vec(("[a-z]{1,6}", arg_value()), 0..6)
}

proptest! {
    /// Insertion order of keys never affects the identity
    #[test]
    fn test_identity_independent_of_insertion_order(entries in entries()) {
        let name = QueryName::from("listings");
        // Later duplicates win in both orders only if we dedup first
        let deduped: BTreeMap<String, ArgValue> = entries.into_iter().collect();

        let forward: QueryArgs = deduped.clone().into_iter().collect();
        let reverse: QueryArgs = deduped.into_iter().rev().collect();

        prop_assert_eq!(
            resolve(&name, &forward).unwrap(),
            resolve(&name, &reverse).unwrap()
        );
    }

    /// Deeply equal arguments resolve equal; unequal arguments resolve unequal
    #[test]
    fn test_identity_equality_matches_argument_equality(a in entries(), b in entries()) {
        let name = QueryName::from("listings");
        let a: QueryArgs = a.into_iter().collect();
        let b: QueryArgs = b.into_iter().collect();

        let id_a = resolve(&name, &a).unwrap();
        let id_b = resolve(&name, &b).unwrap();
        let a_json = serde_json::to_value(&a).unwrap();
        let b_json = serde_json::to_value(&b).unwrap();

        if a_json == b_json {
            prop_assert_eq!(id_a, id_b);
        } else {
            prop_assert_ne!(id_a, id_b);
        }
    }

    /// Resolution is a pure function of its inputs
    #[test]
    fn test_identity_repeatable(entries in entries(), name in "[a-z]{1,10}") {
        let name = QueryName::from(name);
        let args: QueryArgs = entries.into_iter().collect();
        prop_assert_eq!(resolve(&name, &args).unwrap(), resolve(&name, &args.clone()).unwrap());
    }
}
