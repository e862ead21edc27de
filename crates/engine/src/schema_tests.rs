// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn valid_template() -> serde_json::Value {
    json!({
        "id": "ops",
        "name": "Ops Board",
        "enabled": true,
        "schedule": {"mode": "interval", "every_minutes": 30, "timezone": "UTC"},
        "base_dashboard": {"title": "X", "summary": "old"},
        "fields": [
            {
                "id": "summary",
                "pointer": "/summary",
                "type": "string",
                "prompt": "Summarize the day",
                "constraints": {"max_len": 280}
            }
        ],
        "context": {"team": "infra"},
        "run": {"retry_count": 1, "repair_attempts": 1}
    })
}

// =============================================================================
// template shape
// =============================================================================

#[test]
fn valid_template_has_no_errors() {
    assert!(validate_template_value(&valid_template()).is_empty());
}

#[test]
fn non_object_template_rejected() {
    assert_eq!(validate_template_value(&json!([])), vec!["template must be an object"]);
}

#[test]
fn bad_id_reported() {
    let mut t = valid_template();
    t["id"] = json!("Bad Id");
    let errors = validate_template_value(&t);
    assert!(errors.iter().any(|e| e.contains("id invalid")));
}

#[test]
fn missing_schedule_reported() {
    let mut t = valid_template();
    t.as_object_mut().unwrap().remove("schedule");
    let errors = validate_template_value(&t);
    assert!(errors.iter().any(|e| e == "schedule must be an object"));
}

#[test]
fn zero_interval_reported() {
    let mut t = valid_template();
    t["schedule"]["every_minutes"] = json!(0);
    let errors = validate_template_value(&t);
    assert!(errors.iter().any(|e| e.contains("every_minutes")));
}

#[test]
fn bad_field_type_reported_with_path() {
    let mut t = valid_template();
    t["fields"][0]["type"] = json!("integer");
    let errors = validate_template_value(&t);
    assert!(errors.iter().any(|e| e == "fields[0].type invalid: integer"));
}

#[test]
fn pointer_without_slash_reported() {
    let mut t = valid_template();
    t["fields"][0]["pointer"] = json!("summary");
    let errors = validate_template_value(&t);
    assert!(errors.iter().any(|e| e.contains("fields[0].pointer")));
}

#[test]
fn unknown_keys_reported() {
    let mut t = valid_template();
    t["surprise"] = json!(1);
    t["fields"][0]["extra"] = json!(1);
    t["fields"][0]["constraints"]["zot"] = json!(1);
    let errors = validate_template_value(&t);
    assert!(errors.contains(&"surprise is not supported".to_string()));
    assert!(errors.contains(&"fields[0].extra is not supported".to_string()));
    assert!(errors.contains(&"fields[0].constraints.zot is not supported".to_string()));
}

#[test]
fn empty_enum_reported() {
    let mut t = valid_template();
    t["fields"][0]["constraints"] = json!({"enum": []});
    let errors = validate_template_value(&t);
    assert!(errors.iter().any(|e| e.contains("enum must be a non-empty list")));
}

#[test]
fn base_dashboard_must_be_object() {
    let mut t = valid_template();
    t["base_dashboard"] = json!("nope");
    let errors = validate_template_value(&t);
    assert!(errors.iter().any(|e| e == "base_dashboard must be an object"));
}

// =============================================================================
// fill response shape
// =============================================================================

#[test]
fn valid_fill_response_accepted() {
    let response = json!({"values": {"summary": "fine", "count": 3, "tags": ["a"]}});
    assert!(validate_fill_response_value(&response).is_empty());
}

#[test]
fn empty_values_accepted() {
    assert!(validate_fill_response_value(&json!({"values": {}})).is_empty());
}

#[test]
fn missing_values_key_rejected() {
    let errors = validate_fill_response_value(&json!({"data": {}}));
    assert_eq!(errors, vec!["fill response missing key: values"]);
}

#[test]
fn extra_keys_rejected() {
    let errors = validate_fill_response_value(&json!({"values": {}, "meta": 1}));
    assert_eq!(errors, vec!["meta is not supported"]);
}

#[test]
fn object_values_rejected() {
    let errors = validate_fill_response_value(&json!({"values": {"summary": {"nested": 1}}}));
    assert_eq!(errors, vec!["values.summary must be a scalar or array"]);
}

#[test]
fn non_object_response_rejected() {
    assert_eq!(
        validate_fill_response_value(&json!("values")),
        vec!["fill response must be an object"]
    );
}
