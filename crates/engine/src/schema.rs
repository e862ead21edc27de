// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shape validators for templates and fill responses.
//!
//! Both walkers accumulate human-readable, path-qualified messages; an
//! empty list means the document is structurally valid. Pointer
//! resolution and publishability are separate, later gates.

use plash_core::is_valid_template_id;
use serde_json::Value;

const FIELD_TYPES: [&str; 4] = ["string", "number", "boolean", "array"];
const TEMPLATE_KEYS: [&str; 8] =
    ["id", "name", "enabled", "schedule", "base_dashboard", "fields", "context", "run"];
const FIELD_KEYS: [&str; 6] = ["id", "pointer", "type", "prompt", "required", "constraints"];
const CONSTRAINT_KEYS: [&str; 6] = ["max_len", "min", "max", "min_items", "max_items", "enum"];

/// Validate the shape of a template document.
pub fn validate_template_value(value: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    let Some(root) = value.as_object() else {
        return vec!["template must be an object".to_string()];
    };

    match root.get("id").and_then(Value::as_str) {
        Some(id) if is_valid_template_id(id) => {}
        Some(id) => errors.push(format!("id invalid: {id:?}")),
        None => errors.push("id must be a string".to_string()),
    }

    match root.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => errors.push("name must be a non-empty string".to_string()),
    }

    if let Some(enabled) = root.get("enabled") {
        if !enabled.is_boolean() {
            errors.push("enabled must be a boolean".to_string());
        }
    }

    validate_schedule(root.get("schedule"), &mut errors);

    if !root.get("base_dashboard").map(Value::is_object).unwrap_or(false) {
        errors.push("base_dashboard must be an object".to_string());
    }

    match root.get("fields") {
        None => {}
        Some(Value::Array(fields)) => {
            for (i, field) in fields.iter().enumerate() {
                validate_field(field, &format!("fields[{i}]"), &mut errors);
            }
        }
        Some(_) => errors.push("fields must be a list".to_string()),
    }

    if let Some(run) = root.get("run") {
        validate_run_params(run, &mut errors);
    }

    for key in root.keys() {
        if !TEMPLATE_KEYS.contains(&key.as_str()) {
            errors.push(format!("{key} is not supported"));
        }
    }

    errors
}

fn validate_schedule(value: Option<&Value>, errors: &mut Vec<String>) {
    let Some(schedule) = value.and_then(Value::as_object) else {
        errors.push("schedule must be an object".to_string());
        return;
    };

    match schedule.get("mode").and_then(Value::as_str) {
        Some("interval") => {}
        Some(other) => errors.push(format!("schedule.mode invalid: {other}")),
        None => errors.push("schedule.mode must be a string".to_string()),
    }

    match schedule.get("every_minutes").and_then(Value::as_u64) {
        Some(minutes) if minutes >= 1 => {}
        _ => errors.push("schedule.every_minutes must be an integer >= 1".to_string()),
    }

    match schedule.get("timezone").and_then(Value::as_str) {
        Some(tz) if !tz.trim().is_empty() => {}
        _ => errors.push("schedule.timezone must be a non-empty string".to_string()),
    }
}

fn validate_field(value: &Value, path: &str, errors: &mut Vec<String>) {
    let Some(field) = value.as_object() else {
        errors.push(format!("{path} must be an object"));
        return;
    };

    match field.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => {}
        _ => errors.push(format!("{path}.id must be a non-empty string")),
    }

    match field.get("pointer").and_then(Value::as_str) {
        Some(ptr) if ptr.starts_with('/') => {}
        _ => errors.push(format!("{path}.pointer must be a string starting with '/'")),
    }

    match field.get("type").and_then(Value::as_str) {
        Some(ty) if FIELD_TYPES.contains(&ty) => {}
        Some(ty) => errors.push(format!("{path}.type invalid: {ty}")),
        None => errors.push(format!("{path}.type must be a string")),
    }

    match field.get("prompt").and_then(Value::as_str) {
        Some(prompt) if !prompt.trim().is_empty() => {}
        _ => errors.push(format!("{path}.prompt must be a non-empty string")),
    }

    if let Some(required) = field.get("required") {
        if !required.is_boolean() {
            errors.push(format!("{path}.required must be a boolean"));
        }
    }

    if let Some(constraints) = field.get("constraints") {
        validate_constraints(constraints, &format!("{path}.constraints"), errors);
    }

    for key in field.keys() {
        if !FIELD_KEYS.contains(&key.as_str()) {
            errors.push(format!("{path}.{key} is not supported"));
        }
    }
}

fn validate_constraints(value: &Value, path: &str, errors: &mut Vec<String>) {
    let Some(constraints) = value.as_object() else {
        errors.push(format!("{path} must be an object"));
        return;
    };

    for key in ["max_len", "min_items", "max_items"] {
        if let Some(v) = constraints.get(key) {
            if v.as_u64().is_none() {
                errors.push(format!("{path}.{key} must be a non-negative integer"));
            }
        }
    }
    for key in ["min", "max"] {
        if let Some(v) = constraints.get(key) {
            if v.as_f64().is_none() {
                errors.push(format!("{path}.{key} must be a number"));
            }
        }
    }
    if let Some(v) = constraints.get("enum") {
        match v.as_array() {
            Some(items) if !items.is_empty() => {}
            _ => errors.push(format!("{path}.enum must be a non-empty list")),
        }
    }

    for key in constraints.keys() {
        if !CONSTRAINT_KEYS.contains(&key.as_str()) {
            errors.push(format!("{path}.{key} is not supported"));
        }
    }
}

fn validate_run_params(value: &Value, errors: &mut Vec<String>) {
    let Some(run) = value.as_object() else {
        errors.push("run must be an object".to_string());
        return;
    };
    for key in ["retry_count", "repair_attempts"] {
        if let Some(v) = run.get(key) {
            if v.as_u64().is_none() {
                errors.push(format!("run.{key} must be a non-negative integer"));
            }
        }
    }
    for key in run.keys() {
        if key != "retry_count" && key != "repair_attempts" {
            errors.push(format!("run.{key} is not supported"));
        }
    }
}

/// Validate the shape of a fill response: an object whose single
/// recognized key is `values`, mapping field ids to scalars or arrays.
pub fn validate_fill_response_value(value: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    let Some(root) = value.as_object() else {
        return vec!["fill response must be an object".to_string()];
    };

    let Some(values) = root.get("values") else {
        return vec!["fill response missing key: values".to_string()];
    };

    for key in root.keys() {
        if key != "values" {
            errors.push(format!("{key} is not supported"));
        }
    }

    match values.as_object() {
        Some(map) => {
            for (field_id, v) in map {
                if v.is_object() {
                    errors.push(format!("values.{field_id} must be a scalar or array"));
                }
            }
        }
        None => errors.push("values must be an object".to_string()),
    }

    errors
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
