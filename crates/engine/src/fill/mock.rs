// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mock fill provider: deterministic values, never fails

use super::{FillContext, FillError, FillRunner};
use async_trait::async_trait;
use plash_core::{iso_from_epoch_ms, Clock, FieldSpec, FieldType, SystemClock};
use serde_json::{json, Map, Value};

/// Provider that echoes current values back, substituting type-default
/// placeholders where the current value does not fit the declared type.
#[derive(Debug, Clone, Default)]
pub struct MockRunner;

impl MockRunner {
    fn placeholder(field: &FieldSpec, now_iso: &str) -> Value {
        if let Some(first) =
            field.constraints.as_ref().and_then(|c| c.enum_values.as_ref()).and_then(|e| e.first())
        {
            return first.clone();
        }
        match field.field_type {
            FieldType::String => json!(format!("{} (updated {})", field.id, now_iso)),
            FieldType::Number => json!(0),
            FieldType::Boolean => json!(false),
            FieldType::Array => json!([]),
        }
    }

    fn type_compatible(field_type: FieldType, value: &Value) -> bool {
        match field_type {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Array => value.is_array(),
        }
    }
}

#[async_trait]
impl FillRunner for MockRunner {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn run(&self, ctx: &FillContext<'_>) -> Result<Value, FillError> {
        let now_iso = iso_from_epoch_ms(SystemClock.epoch_ms());
        let mut values = Map::new();
        for field in &ctx.template.fields {
            let value = match ctx.current_values.get(&field.id) {
                Some(current) if Self::type_compatible(field.field_type, current) => {
                    current.clone()
                }
                _ => Self::placeholder(field, &now_iso),
            };
            values.insert(field.id.clone(), value);
        }
        Ok(json!({ "values": values }))
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
