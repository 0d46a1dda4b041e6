//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for generating valid collection names.
pub fn collection_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,31}").expect("Invalid regex")
}

/// Strategy for generating scalar JSON values.
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
    ]
}

/// Strategy for generating flat JSON objects (scalar fields only).
///
/// Useful for documents and partial-match patterns.
pub fn flat_object_strategy() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,8}", scalar_strategy(), 0..6)
        .prop_map(|fields| Value::Object(Map::from_iter(fields)))
}

/// Strategy for generating arbitrary JSON values with bounded depth.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|fields| Value::Object(Map::from_iter(fields))),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotdb_core::matches;

    proptest! {
        #[test]
        fn generated_names_are_nonempty(name in collection_name_strategy()) {
            prop_assert!(!name.is_empty());
        }

        #[test]
        fn flat_objects_are_objects(value in flat_object_strategy()) {
            prop_assert!(value.is_object());
        }

        // A one-field subset of a generated object always matches it.
        #[test]
        fn subset_patterns_match(value in flat_object_strategy()) {
            if let Some((key, field)) = value.as_object().and_then(|o| o.iter().next()) {
                let mut pattern = Map::new();
                pattern.insert(key.clone(), field.clone());
                prop_assert!(matches(&Value::Object(pattern), &value));
            }
        }

        #[test]
        fn arbitrary_values_match_themselves(value in value_strategy()) {
            prop_assert!(matches(&value, &value));
        }
    }
}
