// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merge engine: type-check fill values and splice them into a cloned
//! base document at their field pointers.

use plash_core::{pointer, DashboardTemplate, FieldSpec, FieldType, PointerError};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from field validation and merging
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("template invalid: {0}")]
    TemplateInvalid(String),
    #[error("unknown field id: {0}")]
    UnknownFieldId(String),
    #[error("missing required field: {0}")]
    MissingRequired(String),
    #[error("field {field}: expected {expected}, got {got}")]
    TypeMismatch { field: String, expected: FieldType, got: &'static str },
    #[error("field {field}: {reason}")]
    ConstraintViolation { field: String, reason: String },
    #[error(transparent)]
    Pointer(#[from] PointerError),
}

/// Check that field ids and pointers are unique and every pointer
/// resolves in the base document.
pub fn validate_field_pointers(template: &DashboardTemplate) -> Result<(), MergeError> {
    let mut ids = HashSet::new();
    let mut pointers = HashSet::new();

    for field in &template.fields {
        if !ids.insert(field.id.as_str()) {
            return Err(MergeError::TemplateInvalid(format!("duplicate field id: {}", field.id)));
        }
        if !pointers.insert(field.pointer.as_str()) {
            return Err(MergeError::TemplateInvalid(format!(
                "duplicate field pointer: {}",
                field.pointer
            )));
        }
        if let Err(err) = pointer::read(&template.base_dashboard, &field.pointer) {
            return Err(MergeError::TemplateInvalid(format!("field {}: {err}", field.id)));
        }
    }
    Ok(())
}

/// Current value at each field pointer, keyed by field id. Used as
/// `current_value` hints in the fill prompt.
pub fn collect_current_values(template: &DashboardTemplate) -> Result<Map<String, Value>, MergeError> {
    let mut values = Map::new();
    for field in &template.fields {
        let value = pointer::read(&template.base_dashboard, &field.pointer)?;
        values.insert(field.id.clone(), value.clone());
    }
    Ok(values)
}

/// Splice `values` into a deep clone of the base document.
///
/// Keys outside the field set are rejected. A required field must be
/// present and non-null; an optional field that is absent or null keeps
/// the skeleton's value. The base document itself is never mutated.
pub fn merge(
    template: &DashboardTemplate,
    values: &Map<String, Value>,
) -> Result<Value, MergeError> {
    for key in values.keys() {
        if !template.fields.iter().any(|f| &f.id == key) {
            return Err(MergeError::UnknownFieldId(key.clone()));
        }
    }

    let mut doc = template.base_dashboard.clone();
    for field in &template.fields {
        let value = values.get(&field.id).filter(|v| !v.is_null());
        let Some(value) = value else {
            if field.required {
                return Err(MergeError::MissingRequired(field.id.clone()));
            }
            continue;
        };
        check_value(field, value)?;
        pointer::write(&mut doc, &field.pointer, value.clone())?;
    }
    Ok(doc)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(field: &FieldSpec, value: &Value) -> MergeError {
    MergeError::TypeMismatch {
        field: field.id.clone(),
        expected: field.field_type,
        got: type_name(value),
    }
}

fn violation(field: &FieldSpec, reason: String) -> MergeError {
    MergeError::ConstraintViolation { field: field.id.clone(), reason }
}

fn check_enum_member(field: &FieldSpec, value: &Value) -> Result<(), MergeError> {
    let Some(allowed) = field.constraints.as_ref().and_then(|c| c.enum_values.as_ref()) else {
        return Ok(());
    };
    if allowed.contains(value) {
        Ok(())
    } else {
        Err(violation(field, format!("value {value} not in enum")))
    }
}

fn check_value(field: &FieldSpec, value: &Value) -> Result<(), MergeError> {
    let constraints = field.constraints.as_ref();
    match field.field_type {
        FieldType::String => {
            let s = value.as_str().ok_or_else(|| mismatch(field, value))?;
            if let Some(max_len) = constraints.and_then(|c| c.max_len) {
                let len = s.chars().count();
                if len > max_len {
                    return Err(violation(field, format!("length {len} exceeds max_len {max_len}")));
                }
            }
            check_enum_member(field, value)
        }
        FieldType::Number => {
            let n = value.as_f64().ok_or_else(|| mismatch(field, value))?;
            if let Some(min) = constraints.and_then(|c| c.min) {
                if n < min {
                    return Err(violation(field, format!("value {n} below min {min}")));
                }
            }
            if let Some(max) = constraints.and_then(|c| c.max) {
                if n > max {
                    return Err(violation(field, format!("value {n} above max {max}")));
                }
            }
            check_enum_member(field, value)
        }
        FieldType::Boolean => {
            value.as_bool().ok_or_else(|| mismatch(field, value))?;
            check_enum_member(field, value)
        }
        FieldType::Array => {
            let items = value.as_array().ok_or_else(|| mismatch(field, value))?;
            if let Some(min_items) = constraints.and_then(|c| c.min_items) {
                if items.len() < min_items {
                    return Err(violation(
                        field,
                        format!("{} items below min_items {min_items}", items.len()),
                    ));
                }
            }
            if let Some(max_items) = constraints.and_then(|c| c.max_items) {
                if items.len() > max_items {
                    return Err(violation(
                        field,
                        format!("{} items above max_items {max_items}", items.len()),
                    ));
                }
            }
            for item in items {
                check_enum_member(field, item)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
