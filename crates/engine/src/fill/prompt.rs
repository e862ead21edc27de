// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic fill prompt construction

use super::FillContext;
use serde_json::{json, Value};

/// Instructions included in every fill prompt.
pub const FILL_INSTRUCTIONS: &str = "Produce a value for every field listed below. \
Respect each field's declared type and constraints. \
Respond with a single JSON object of the form {\"values\": {\"<field_id>\": <value>, ...}} \
and nothing else.";

/// Build the prompt payload handed to command and agent providers.
///
/// The key set is fixed; `error_hint` appears only on repair iterations
/// so first-attempt prompts stay byte-stable for a given template.
pub fn build_prompt(ctx: &FillContext<'_>) -> Value {
    let fields: Vec<Value> = ctx
        .template
        .fields
        .iter()
        .map(|field| {
            json!({
                "id": field.id,
                "type": field.field_type.to_string(),
                "prompt": field.prompt,
                "required": field.required,
                "constraints": field
                    .constraints
                    .as_ref()
                    .map(|c| serde_json::to_value(c).unwrap_or(Value::Null))
                    .unwrap_or(Value::Null),
                "current_value": ctx.current_values.get(&field.id).cloned().unwrap_or(Value::Null),
            })
        })
        .collect();

    let mut prompt = json!({
        "instructions": FILL_INSTRUCTIONS,
        "template": {
            "id": ctx.template.id,
            "name": ctx.template.name,
            "context": ctx.template.context.clone().unwrap_or(Value::Null),
        },
        "fields": fields,
        "expected_response_schema": {
            "type": "object",
            "required": ["values"],
            "properties": {
                "values": {"type": "object"}
            }
        },
    });

    if let Some(hint) = &ctx.error_hint {
        prompt["error_hint"] = json!(hint);
    }
    prompt
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
