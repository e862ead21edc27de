// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RFC 6901 JSON pointer resolution over `serde_json` values.
//!
//! Writes are replacement-only: the final token must name an existing
//! object key or an in-range array index. The base document's shape is
//! authoritative, so writes never create keys or extend arrays.

use serde_json::Value;
use thiserror::Error;

/// Errors from pointer resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    #[error("pointer path not found: {pointer} (missing {token:?})")]
    NotFound { pointer: String, token: String },
    #[error("pointer invalid: {pointer} ({reason})")]
    Invalid { pointer: String, reason: String },
}

/// Decode one reference token: `~1` → `/`, `~0` → `~` (in that order).
fn decode_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Split a pointer into decoded tokens. The empty pointer is the whole
/// document (zero tokens); anything else must start with `/`.
fn tokens(pointer: &str) -> Result<Vec<String>, PointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer.strip_prefix('/').ok_or_else(|| PointerError::Invalid {
        pointer: pointer.to_string(),
        reason: "must start with '/'".to_string(),
    })?;
    Ok(rest.split('/').map(decode_token).collect())
}

/// Parse an array index token. RFC 6901 forbids leading zeros and signs.
fn array_index(token: &str) -> Option<usize> {
    if token == "0" {
        return Some(0);
    }
    if token.starts_with('0') || token.is_empty() {
        return None;
    }
    token.parse().ok()
}

fn not_found(pointer: &str, token: &str) -> PointerError {
    PointerError::NotFound { pointer: pointer.to_string(), token: token.to_string() }
}

fn invalid(pointer: &str, reason: String) -> PointerError {
    PointerError::Invalid { pointer: pointer.to_string(), reason }
}

fn descend<'a>(current: &'a Value, token: &str, pointer: &str) -> Result<&'a Value, PointerError> {
    match current {
        Value::Object(map) => map.get(token).ok_or_else(|| not_found(pointer, token)),
        Value::Array(items) => {
            let idx = array_index(token).ok_or_else(|| {
                invalid(pointer, format!("non-numeric token {token:?} against array"))
            })?;
            items.get(idx).ok_or_else(|| not_found(pointer, token))
        }
        _ => Err(invalid(pointer, format!("token {token:?} descends into a scalar"))),
    }
}

fn descend_mut<'a>(
    current: &'a mut Value,
    token: &str,
    pointer: &str,
) -> Result<&'a mut Value, PointerError> {
    match current {
        Value::Object(map) => map.get_mut(token).ok_or_else(|| not_found(pointer, token)),
        Value::Array(items) => {
            let idx = array_index(token).ok_or_else(|| {
                invalid(pointer, format!("non-numeric token {token:?} against array"))
            })?;
            items.get_mut(idx).ok_or_else(|| not_found(pointer, token))
        }
        _ => Err(invalid(pointer, format!("token {token:?} descends into a scalar"))),
    }
}

/// Resolve `pointer` within `doc`.
pub fn read<'a>(doc: &'a Value, pointer: &str) -> Result<&'a Value, PointerError> {
    let mut current = doc;
    for token in tokens(pointer)? {
        current = descend(current, &token, pointer)?;
    }
    Ok(current)
}

/// Replace the value at `pointer` within `doc`.
///
/// The final token must resolve to an existing key or in-range index.
/// Writing at the document root is rejected.
pub fn write(doc: &mut Value, pointer: &str, value: Value) -> Result<(), PointerError> {
    let toks = tokens(pointer)?;
    let Some((last, parents)) = toks.split_last() else {
        return Err(invalid(pointer, "cannot write at the document root".to_string()));
    };

    let mut current = doc;
    for token in parents {
        current = descend_mut(current, token, pointer)?;
    }

    match current {
        Value::Object(map) => {
            if !map.contains_key(last.as_str()) {
                return Err(not_found(pointer, last));
            }
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(items) => {
            let idx = array_index(last).ok_or_else(|| {
                invalid(pointer, format!("non-numeric token {last:?} against array"))
            })?;
            let slot = items.get_mut(idx).ok_or_else(|| not_found(pointer, last))?;
            *slot = value;
            Ok(())
        }
        _ => Err(invalid(pointer, format!("token {last:?} descends into a scalar"))),
    }
}

#[cfg(test)]
#[path = "pointer_tests.rs"]
mod tests;
