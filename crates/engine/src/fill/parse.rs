// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tolerant extraction of a fill payload from provider stdout.
//!
//! Providers emit anything from a bare JSON object to a fenced code
//! block to a chat-style envelope with the payload nested inside. The
//! extractor recursively unwraps until it finds an object carrying a
//! `values` object, bounded at depth 10.

use serde_json::Value;

const MAX_EXTRACT_DEPTH: u32 = 10;

/// Extract the first JSON object containing a `values` object.
pub fn extract_fill_json(text: &str) -> Option<Value> {
    extract_from_text(text, 0)
}

fn extract_from_text(text: &str, depth: u32) -> Option<Value> {
    if depth > MAX_EXTRACT_DEPTH {
        return None;
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return extract_from_value(value, depth + 1);
    }

    if let Some(inner) = strip_fences(trimmed) {
        return extract_from_text(inner, depth + 1);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    let candidate = &trimmed[start..=end];
    if candidate.len() == trimmed.len() {
        // Already tried this exact text as JSON above.
        return None;
    }
    extract_from_text(candidate, depth + 1)
}

/// Drop the first and last lines of a triple-backtick block.
fn strip_fences(text: &str) -> Option<&str> {
    if !text.starts_with("```") {
        return None;
    }
    let after_open = text.find('\n')? + 1;
    let close = text.rfind("```")?;
    if close < after_open {
        return None;
    }
    Some(&text[after_open..close])
}

fn extract_from_value(value: Value, depth: u32) -> Option<Value> {
    if depth > MAX_EXTRACT_DEPTH {
        return None;
    }
    match value {
        Value::String(s) => extract_from_text(&s, depth + 1),
        Value::Array(items) => {
            items.into_iter().find_map(|item| extract_from_value(item, depth + 1))
        }
        Value::Object(map) => {
            if map.get("values").map(Value::is_object).unwrap_or(false) {
                return Some(Value::Object(map));
            }
            map.into_iter().find_map(|(_, v)| extract_from_value(v, depth + 1))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
