// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::{json, Value};

fn doc() -> Value {
    json!({
        "title": "X",
        "summary": "old",
        "ui": {"timezone": "UTC", "gutters": {"top": 72, "bottom": 106, "side": 24}},
        "sections": [
            {"id": "s1", "cards": [{"id": "c1", "title": "Card"}]},
            {"id": "s2", "cards": []}
        ],
        "odd~key": 1,
        "odd/key": 2
    })
}

// =============================================================================
// read
// =============================================================================

#[test]
fn read_root_returns_whole_document() {
    let d = doc();
    assert_eq!(read(&d, "").unwrap(), &d);
}

#[test]
fn read_object_keys_and_array_indices() {
    let d = doc();
    assert_eq!(read(&d, "/summary").unwrap(), "old");
    assert_eq!(read(&d, "/ui/timezone").unwrap(), "UTC");
    assert_eq!(read(&d, "/sections/0/cards/0/title").unwrap(), "Card");
    assert_eq!(read(&d, "/ui/gutters/bottom").unwrap(), 106);
}

#[test]
fn read_decodes_escaped_tokens() {
    let d = doc();
    assert_eq!(read(&d, "/odd~0key").unwrap(), 1);
    assert_eq!(read(&d, "/odd~1key").unwrap(), 2);
}

#[test]
fn read_missing_key_is_not_found() {
    let d = doc();
    let err = read(&d, "/sections/0/cards/0/unknown").unwrap_err();
    assert!(matches!(err, PointerError::NotFound { .. }));
    assert!(err.to_string().contains("pointer path not found"));
}

#[test]
fn read_out_of_range_index_is_not_found() {
    let d = doc();
    assert!(matches!(read(&d, "/sections/9"), Err(PointerError::NotFound { .. })));
}

#[test]
fn read_non_numeric_token_against_array_is_invalid() {
    let d = doc();
    assert!(matches!(read(&d, "/sections/first"), Err(PointerError::Invalid { .. })));
}

#[test]
fn read_leading_zero_index_is_invalid() {
    let d = json!({"items": [1, 2, 3]});
    assert!(matches!(read(&d, "/items/01"), Err(PointerError::Invalid { .. })));
}

#[test]
fn read_descending_into_scalar_is_invalid() {
    let d = doc();
    assert!(matches!(read(&d, "/title/0"), Err(PointerError::Invalid { .. })));
}

#[test]
fn read_pointer_without_leading_slash_is_invalid() {
    let d = doc();
    assert!(matches!(read(&d, "summary"), Err(PointerError::Invalid { .. })));
}

// =============================================================================
// write
// =============================================================================

#[test]
fn write_replaces_existing_key() {
    let mut d = doc();
    write(&mut d, "/summary", json!("new")).unwrap();
    assert_eq!(read(&d, "/summary").unwrap(), "new");
}

#[test]
fn write_replaces_existing_array_element() {
    let mut d = doc();
    write(&mut d, "/sections/1", json!({"id": "s2b", "cards": []})).unwrap();
    assert_eq!(read(&d, "/sections/1/id").unwrap(), "s2b");
}

#[test]
fn write_never_creates_keys() {
    let mut d = doc();
    let err = write(&mut d, "/brand_new", json!(1)).unwrap_err();
    assert!(matches!(err, PointerError::NotFound { .. }));
    assert_eq!(d, doc());
}

#[test]
fn write_never_extends_arrays() {
    let mut d = doc();
    let err = write(&mut d, "/sections/2", json!({})).unwrap_err();
    assert!(matches!(err, PointerError::NotFound { .. }));
    assert_eq!(d, doc());
}

#[test]
fn write_at_root_is_rejected() {
    let mut d = doc();
    assert!(matches!(write(&mut d, "", json!({})), Err(PointerError::Invalid { .. })));
}

#[test]
fn write_deep_nested_value() {
    let mut d = doc();
    write(&mut d, "/ui/gutters/top", json!(80)).unwrap();
    assert_eq!(read(&d, "/ui/gutters/top").unwrap(), 80);
}

// =============================================================================
// properties
// =============================================================================

/// Enumerate every pointer in a document.
fn all_pointers(value: &Value, prefix: &str, out: &mut Vec<String>) {
    out.push(prefix.to_string());
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let token = key.replace('~', "~0").replace('/', "~1");
                all_pointers(child, &format!("{prefix}/{token}"), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                all_pointers(child, &format!("{prefix}/{i}"), out);
            }
        }
        _ => {}
    }
}

proptest! {
    /// Writing back the value read at any non-root pointer leaves the
    /// document unchanged.
    #[test]
    fn read_write_round_trip_is_identity(seed in 0usize..64) {
        let original = doc();
        let mut pointers = Vec::new();
        all_pointers(&original, "", &mut pointers);
        let pointer = &pointers[seed % pointers.len()];
        if !pointer.is_empty() {
            let mut copy = original.clone();
            let value = read(&original, pointer).unwrap().clone();
            write(&mut copy, pointer, value).unwrap();
            prop_assert_eq!(copy, original);
        }
    }
}
