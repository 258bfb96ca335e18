// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Object Paths
//!
//! Rendering then parsing a path yields an equal path, and equality ignores
//! case consistently with hashing.

use cim_provider::domain::{CimValue, ObjectPath};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// ============================================================================
// Strategies
// ============================================================================

fn class_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}"
}

fn namespace() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}(/[A-Za-z0-9_]{1,8}){0,2}"
}

fn host() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z][a-z0-9-]{0,10}(\\.[a-z]{2,6})?(:[0-9]{2,5})?",
    ]
}

/// Key values that survive rendering: strings (with quotes and
/// backslashes), integers of both signs, and booleans
fn key_value() -> impl Strategy<Value = CimValue> {
    prop_oneof![
        "[A-Za-z0-9 _.:,\"\\\\-]{0,16}".prop_map(CimValue::from),
        any::<u32>().prop_map(CimValue::from),
        (i64::MIN..0i64).prop_map(CimValue::from),
        any::<bool>().prop_map(CimValue::from),
    ]
}

fn object_path() -> impl Strategy<Value = ObjectPath> {
    (
        host(),
        namespace(),
        class_name(),
        prop::collection::vec(key_value(), 0..4),
    )
        .prop_map(|(host, namespace, class_name, values)| {
            let mut path = ObjectPath::new(class_name)
                .with_namespace(namespace)
                .with_host(host);
            for (index, value) in values.into_iter().enumerate() {
                path.add_key(format!("Key{}", index), value).unwrap();
            }
            path
        })
}

fn hash_of(path: &ObjectPath) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: parse(render(path)) == path
    #[test]
    fn prop_render_then_parse(path in object_path()) {
        let rendered = path.to_string();
        let parsed: ObjectPath = rendered.parse().unwrap();

        prop_assert_eq!(&parsed, &path);
        prop_assert_eq!(parsed.to_string(), rendered);
    }

    /// Property: equality ignores case and is symmetric
    #[test]
    fn prop_case_insensitive_equality(path in object_path()) {
        let shouted: ObjectPath = path.to_string().to_uppercase().parse().unwrap();

        prop_assert_eq!(&shouted, &path);
        prop_assert_eq!(&path, &shouted);
        prop_assert_eq!(hash_of(&shouted), hash_of(&path));
    }

    /// Property: localizing drops the host and pins the namespace
    #[test]
    fn prop_localized_ignores_origin(path in object_path(), other in namespace()) {
        let local = path.localized(&other);

        prop_assert_eq!(local.host(), "");
        prop_assert_eq!(local.namespace(), other.as_str());
        prop_assert_eq!(local.localized(&other), local.clone());
        prop_assert_eq!(local.keys().len(), path.keys().len());
    }
}
