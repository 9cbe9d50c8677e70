//! Cache key determinism

use proptest::prelude::*;
use serde_json::Value;
use sgw_client::api::cache_key;
use sgw_client::http::Query;

fn param() -> impl Strategy<Value = (String, Value)> {
    (
        "[a-zA-Z][a-zA-Z0-9_]{0,8}",
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[ -~]{0,12}".prop_map(Value::from),
        ],
    )
}

proptest! {
    #[test]
    fn key_is_stable_across_insertion_order(
        uri in "[a-z/]{1,24}",
        params in proptest::collection::vec(param(), 0..6),
    ) {
        let forward: Query = params.into_iter().collect();
        let reversed: Query = forward.clone().into_iter().rev().collect();

        prop_assert_eq!(cache_key(&uri, &forward), cache_key(&uri, &forward));
        prop_assert_eq!(cache_key(&uri, &forward), cache_key(&uri, &reversed));
    }

    #[test]
    fn key_is_lowercase_hex_sha256(uri in "[ -~]{0,40}") {
        let key = cache_key(&uri, &Query::new());
        prop_assert_eq!(key.len(), 64);
        prop_assert!(key.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
