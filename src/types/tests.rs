use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use num_bigint::BigInt;
use sha1::{Digest, Sha1};

use super::*;

fn text_list(items: &[&str]) -> List {
    items.iter().map(|s| Value::from(*s)).collect()
}

#[test]
fn test_scalar_encoding_lengths() {
    assert_eq!(Value::Null.encoding_length(), 1);
    assert_eq!(Value::from(true).encoding_length(), 1);
    assert_eq!(Value::from(0).encoding_length(), 3);
    assert_eq!(Value::from(-456).encoding_length(), 6);
    assert_eq!(Value::from(&b"hello"[..]).encoding_length(), 7);
    assert_eq!(Value::from("你好").encoding_length(), 9);
    assert_eq!(Value::from(vec![0u8; 10]).encoding_length(), 13);
}

#[test]
fn test_big_integer_encoding_length() {
    let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
    assert_eq!(Value::from(big).encoding_length(), 2 + 31);
}

#[test]
fn test_container_encoding_lengths() {
    assert_eq!(List::new().encoding_length(), 2);
    assert_eq!(text_list(&["a", "b"]).encoding_length(), 10);

    let dict = Dictionary::new().insert("a", 1).insert(&b"b"[..], 2);
    // d + u1:a + i1e + 1:b + i2e + e
    assert_eq!(dict.encoding_length(), 1 + 4 + 3 + 3 + 3 + 1);
}

#[test]
fn test_key_order_binary_before_text() {
    let mut keys = vec![
        Key::from("a"),
        Key::from(&b"b"[..]),
        Key::from("B"),
        Key::from(&b"ab"[..]),
        Key::from(&b"a"[..]),
        Key::from(""),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            Key::from(&b"a"[..]),
            Key::from(&b"ab"[..]),
            Key::from(&b"b"[..]),
            Key::from(""),
            Key::from("B"),
            Key::from("a"),
        ]
    );
}

#[test]
fn test_dictionary_order_independent_of_insertion() {
    let ab = Dictionary::new().insert("a", 1).insert("b", 2);
    let ba = Dictionary::new().insert("b", 2).insert("a", 1);
    assert_eq!(ab.fingerprint(), ba.fingerprint());
    assert_eq!(ab, ba);

    let keys: Vec<_> = ba.keys().filter_map(Key::as_str).collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn test_dictionary_operations_leave_original_unchanged() {
    let base = Dictionary::new().insert("a", 1);
    let grown = base.insert("b", 2);
    let replaced = grown.insert("a", "x");
    let shrunk = replaced.remove("b");

    assert_eq!(base.len(), 1);
    assert_eq!(grown.len(), 2);
    assert_eq!(replaced.get("a").unwrap().and_then(Value::as_str), Some("x"));
    assert_eq!(grown.get("a").unwrap().and_then(Value::as_i64), Some(1));
    assert!(!shrunk.contains_key("b"));
    assert!(grown.contains_key("b"));
}

#[test]
fn test_list_push_is_persistent() {
    let base = text_list(&["a"]);
    let pushed = base.push("b");
    assert_eq!(base.len(), 1);
    assert_eq!(pushed, text_list(&["a", "b"]));
    assert_eq!(pushed.get(1).unwrap().and_then(Value::as_str), Some("b"));
    assert_eq!(pushed.get(2).unwrap(), None);
}

#[test]
fn test_scalar_fingerprints() {
    let null = Value::Null.fingerprint();
    assert_eq!(null.kind(), ValueKind::Null);
    assert!(null.digest().is_empty());

    assert_ne!(Value::from(true).fingerprint(), Value::from(false).fingerprint());

    let short = Value::from(&b"hello"[..]).fingerprint();
    assert_eq!(short.digest(), b"hello");
    assert_eq!(short.encoding_length(), 7);

    let payload = vec![0xabu8; 21];
    let long = Value::from(payload.clone()).fingerprint();
    assert_eq!(long.digest(), Sha1::digest(&payload).as_slice());

    // Same payload, different kind.
    assert_ne!(
        Value::from("hello").fingerprint(),
        Value::from(&b"hello"[..]).fingerprint()
    );
}

#[test]
fn test_list_fingerprint_hashes_child_fingerprints() {
    let list = text_list(&["a", "b"]);
    let mut hasher = Sha1::new();
    hasher.update(Value::from("a").fingerprint().serialize());
    hasher.update(Value::from("b").fingerprint().serialize());

    let fp = list.fingerprint();
    assert_eq!(fp.kind(), ValueKind::List);
    assert_eq!(fp.encoding_length(), 10);
    assert_eq!(fp.digest(), hasher.finalize().as_slice());
}

#[test]
fn test_list_order_matters() {
    assert_ne!(text_list(&["a", "b"]), text_list(&["b", "a"]));
}

#[test]
fn test_fingerprint_serialization() {
    let fp = text_list(&["x"]).fingerprint();
    let bytes = fp.serialize();
    assert_eq!(bytes.len(), 9 + 20);
    assert_eq!(bytes[0], ValueKind::List as u8);
    assert_eq!(Fingerprint::deserialize(&bytes).unwrap(), fp);

    assert_eq!(
        Fingerprint::deserialize(&bytes[..8]),
        Err(FingerprintError::TooShort(8))
    );

    let mut bad = bytes.clone();
    bad[0] = 7;
    assert_eq!(
        Fingerprint::deserialize(&bad),
        Err(FingerprintError::UnknownKind(7))
    );
}

#[test]
fn test_fingerprint_display() {
    let fp = Value::from(&b"xyz"[..]).fingerprint();
    assert_eq!(fp.to_string(), "binary:5:78797a");
}

#[test]
fn test_deferred_slot_equals_loaded_value() {
    let value = Value::from(text_list(&["nested"]));
    let loaded = List::from(vec![value.clone()]);
    let deferred = List::from_indirect(vec![IndirectValue::deferred(value.fingerprint())], None);

    assert!(!deferred.is_fully_loaded());
    assert_eq!(deferred.encoding_length(), loaded.encoding_length());
    assert_eq!(deferred, loaded);
}

#[test]
fn test_deferred_slot_without_loader() {
    let fp = Value::from(1).fingerprint();
    let list = List::from_indirect(vec![IndirectValue::deferred(fp.clone())], None);
    assert_eq!(list.get(0), Err(LoadError::NoLoader(fp)));
}

#[test]
fn test_deferred_slot_loads_once() {
    let value = Value::from("offloaded");
    let fp = value.fingerprint();
    let calls = Arc::new(AtomicUsize::new(0));

    let loader: Arc<dyn Loader> = {
        let value = value.clone();
        let calls = calls.clone();
        Arc::new(move |requested: &Fingerprint| {
            calls.fetch_add(1, Ordering::SeqCst);
            (requested == &value.fingerprint()).then(|| value.clone())
        })
    };

    let list = List::from_indirect(vec![IndirectValue::deferred(fp)], Some(loader));
    assert_eq!(list.get(0).unwrap(), Some(&value));
    assert_eq!(list.get(0).unwrap(), Some(&value));
    assert!(list.is_fully_loaded());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_deferred_slot_loads_once_across_threads() {
    let value = Value::from(vec![1u8; 64]);
    let fp = value.fingerprint();
    let calls = Arc::new(AtomicUsize::new(0));

    let loader: Arc<dyn Loader> = {
        let value = value.clone();
        let calls = calls.clone();
        Arc::new(move |_: &Fingerprint| {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(value.clone())
        })
    };
    let list = List::from_indirect(vec![IndirectValue::deferred(fp)], Some(loader));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                assert_eq!(list.get(0).unwrap(), Some(&value));
            });
        }
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_loader_fingerprint_mismatch() {
    let expected = Value::from(1).fingerprint();
    let loader: Arc<dyn Loader> = Arc::new(|_: &Fingerprint| Some(Value::from(2)));
    let mut entries = BTreeMap::new();
    entries.insert(Key::from("k"), IndirectValue::deferred(expected.clone()));
    let dict = Dictionary::from_indirect(entries, Some(loader));

    match dict.get("k") {
        Err(LoadError::FingerprintMismatch { expected: e, actual }) => {
            assert_eq!(e, expected);
            assert_eq!(actual, Value::from(2).fingerprint());
        }
        other => panic!("expected mismatch, got {:?}", other),
    }
    assert!(!dict.is_fully_loaded());
}

#[test]
fn test_loader_not_found() {
    let fp = Value::from(1).fingerprint();
    let loader: Arc<dyn Loader> = Arc::new(|_: &Fingerprint| None);
    let list = List::from_indirect(vec![IndirectValue::deferred(fp.clone())], Some(loader));
    assert_eq!(list.get(0), Err(LoadError::NotFound(fp)));
    assert_eq!(list.iter().filter(Result::is_err).count(), 1);
}

#[test]
fn test_cloned_deferred_slot_keeps_loaded_value() {
    let value = Value::from("cached");
    let calls = Arc::new(AtomicUsize::new(0));
    let loader: Arc<dyn Loader> = {
        let value = value.clone();
        let calls = calls.clone();
        Arc::new(move |_: &Fingerprint| {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(value.clone())
        })
    };

    let slot = IndirectValue::deferred(value.fingerprint());
    let unloaded = slot.clone();
    assert_eq!(slot.get_value(Some(loader.as_ref())).unwrap(), &value);

    let copy = slot.clone();
    assert_eq!(copy.loaded_value(), Some(&value));
    assert_eq!(copy.deferred_fingerprint(), Some(&value.fingerprint()));
    assert!(!unloaded.is_loaded());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_container_length_overflow() {
    let huge = Fingerprint::new(ValueKind::Binary, u64::MAX, vec![0u8; 20]);
    let slots = vec![IndirectValue::deferred(huge.clone())];
    assert!(List::try_from_indirect(slots.clone(), None).is_none());
    assert_eq!(List::from_indirect(slots, None).encoding_length(), u64::MAX);

    let mut entries = BTreeMap::new();
    entries.insert(Key::from("k"), IndirectValue::deferred(huge));
    assert!(Dictionary::try_from_indirect(entries.clone(), None).is_none());
    assert_eq!(Dictionary::from_indirect(entries, None).encoding_length(), u64::MAX);

    let fits = List::try_from_indirect(vec![IndirectValue::loaded(Value::Null)], None).unwrap();
    assert_eq!(fits.encoding_length(), 3);
}

#[test]
fn test_inspect_scalars() {
    assert_eq!(Value::Null.inspect(false), "null");
    assert_eq!(Value::from(false).inspect(false), "false");
    assert_eq!(Value::from(-7).inspect(false), "-7");
    assert_eq!(Value::from(&b"\x00\xff"[..]).inspect(false), "b\"\\x00\\xff\"");
    assert_eq!(Value::from("say \"hi\"").inspect(false), "\"say \\\"hi\\\"\"");
    assert_eq!(Value::from(List::new()).inspect(false), "[]");
    assert_eq!(Value::from(Dictionary::new()).inspect(false), "{}");
}

#[test]
fn test_inspect_nested() {
    let dict = Dictionary::new().insert("k", Value::from(vec![Value::from(true)]));
    assert_eq!(
        Value::from(dict).to_string(),
        "{\n  \"k\": [\n    true,\n  ],\n}"
    );
}

#[test]
fn test_inspect_deferred() {
    let hidden = Value::from(&b"xyz"[..]);
    let slots = vec![
        IndirectValue::loaded(Value::from(1)),
        IndirectValue::deferred(hidden.fingerprint()),
    ];

    let unloadable = Value::from(List::from_indirect(slots.clone(), None));
    let expected = "[\n  1,\n  <binary:5:78797a>,\n]";
    assert_eq!(unloadable.inspect(false), expected);
    assert_eq!(unloadable.inspect(true), expected);

    let loader: Arc<dyn Loader> = {
        let hidden = hidden.clone();
        Arc::new(move |_: &Fingerprint| Some(hidden.clone()))
    };
    let loadable = Value::from(List::from_indirect(slots, Some(loader)));
    assert_eq!(loadable.inspect(false), expected);
    assert_eq!(loadable.inspect(true), "[\n  1,\n  b\"\\x78\\x79\\x7a\",\n]");
}

#[test]
fn test_value_accessors() {
    let value = Value::from(42);
    assert_eq!(value.as_i64(), Some(42));
    assert!(value.as_bytes().is_none());

    let value = Value::from("test");
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::from(List::new());
    assert!(value.as_list().is_some());
    assert!(value.as_dictionary().is_none());

    let value = Value::from(Dictionary::new().insert("a", Value::Null));
    assert!(value.get("a").unwrap().is_null());
    assert!(value.get("b").is_none());
    assert_eq!(value.into_dictionary().map(|d| d.len()), Some(1));
}

#[test]
fn test_integer_beyond_i64() {
    let big: BigInt = BigInt::from(i64::MAX) * 4;
    let value = Value::from(big.clone());
    assert_eq!(value.as_i64(), None);
    assert_eq!(value.as_integer().map(Integer::value), Some(&big));
}
