//! End-to-end scenarios for transform dispatch
//!
//! These tests drive the public API the way a host build tool would.

use proptransform_core::{
    Error, HostPropertyStore, Locale, PropertySet, PropertyStore, TransformDispatcher,
    TransformMode, TransformRegistry,
};
use std::sync::Arc;

fn dispatcher() -> TransformDispatcher {
    TransformDispatcher::new(TransformRegistry::shared())
}

#[test]
fn test_upper_single_value() {
    let mut store = PropertyStore::new();
    let outcome = dispatcher()
        .type_id("upper")
        .property("out")
        .value("abc")
        .execute(&mut store)
        .expect("upper should succeed");

    assert_eq!(store.get("out"), Some("ABC"));
    assert_eq!(outcome.mode, TransformMode::Single);
}

#[test]
fn test_lower_property_set_with_prefix() {
    let set: PropertySet = vec![("foo", "BAR")].into_iter().collect();
    let mut store = PropertyStore::new();
    dispatcher()
        .type_id("lower")
        .prefix("pre")
        .property_set(Arc::new(set))
        .execute(&mut store)
        .expect("lower should succeed");

    assert_eq!(store.get("pre.foo"), Some("bar"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_bogus_type_lists_known_ids() {
    let mut store = PropertyStore::new();
    let err = dispatcher()
        .type_id("bogus")
        .property("out")
        .value("abc")
        .execute(&mut store)
        .unwrap_err();

    assert!(matches!(err, Error::UnknownTransformerType { .. }));
    assert_eq!(
        err.to_string(),
        "Type \"bogus\" not supported. Please choose: identity, lower, upper"
    );
}

#[test]
fn test_single_without_value() {
    let mut store = PropertyStore::new();
    let err = dispatcher()
        .type_id("upper")
        .property("out")
        .execute(&mut store)
        .unwrap_err();

    assert!(matches!(err, Error::MissingValue));
    assert!(store.get("out").is_none());
}

#[test]
fn test_bulk_without_prefix() {
    let mut store = PropertyStore::new();
    let err = dispatcher()
        .type_id("identity")
        .property("")
        .value("")
        .prefix("")
        .execute(&mut store)
        .unwrap_err();

    assert!(matches!(err, Error::MissingPrefix));
}

#[test]
fn test_repeated_single_keeps_first_value() {
    let mut store = PropertyStore::new();
    for value in ["first", "second"] {
        dispatcher()
            .type_id("upper")
            .property("out")
            .value(value)
            .execute(&mut store)
            .expect("upper should succeed");
    }
    let expected = Locale::current().to_upper("first");
    assert_eq!(store.get("out"), Some(expected.as_str()));
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = TransformRegistry::shared();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let mut store = PropertyStore::new();
                TransformDispatcher::new(registry)
                    .type_id("identity")
                    .property(format!("out{}", i))
                    .value("v")
                    .execute(&mut store)
                    .map(|outcome| outcome.applied_count())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }
}
