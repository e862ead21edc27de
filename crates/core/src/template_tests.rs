// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn id_pattern_accepts_typical_ids() {
    assert!(is_valid_template_id("ops"));
    assert!(is_valid_template_id("ops-copy"));
    assert!(is_valid_template_id("a"));
    assert!(is_valid_template_id("0dash_board-2"));
}

#[test]
fn id_pattern_rejects_bad_ids() {
    assert!(!is_valid_template_id(""));
    assert!(!is_valid_template_id("Ops"));
    assert!(!is_valid_template_id("-leading-dash"));
    assert!(!is_valid_template_id("_leading_underscore"));
    assert!(!is_valid_template_id("has space"));
    assert!(!is_valid_template_id(&"x".repeat(65)));
}

#[test]
fn id_pattern_accepts_max_length() {
    assert!(is_valid_template_id(&"x".repeat(64)));
}

#[test]
fn template_deserializes_with_defaults() {
    let tpl: DashboardTemplate = serde_json::from_value(json!({
        "id": "ops",
        "name": "Ops Board",
        "schedule": {"mode": "interval", "every_minutes": 30, "timezone": "UTC"},
        "base_dashboard": {"title": "X"},
    }))
    .unwrap();
    assert!(tpl.enabled);
    assert!(tpl.fields.is_empty());
    assert!(tpl.context.is_none());
    assert_eq!(tpl.schedule.mode, ScheduleMode::Interval);
}

#[test]
fn field_defaults_required_true() {
    let field: FieldSpec = serde_json::from_value(json!({
        "id": "summary",
        "pointer": "/summary",
        "type": "string",
        "prompt": "Summarize the day",
    }))
    .unwrap();
    assert!(field.required);
    assert!(field.constraints.is_none());
    assert_eq!(field.field_type, FieldType::String);
}

#[test]
fn constraints_enum_key_round_trips() {
    let c: FieldConstraints =
        serde_json::from_value(json!({"enum": ["a", "b"], "max_len": 10})).unwrap();
    assert_eq!(c.enum_values.as_ref().unwrap().len(), 2);
    let back = serde_json::to_value(&c).unwrap();
    assert!(back.get("enum").is_some());
    assert!(back.get("enum_values").is_none());
}

#[test]
fn run_params_fall_back_to_defaults() {
    let tpl: DashboardTemplate = serde_json::from_value(json!({
        "id": "ops",
        "name": "Ops",
        "schedule": {"mode": "interval", "every_minutes": 5, "timezone": "UTC"},
        "base_dashboard": {},
    }))
    .unwrap();
    assert_eq!(tpl.retry_count(2), 2);
    assert_eq!(tpl.repair_attempts(), 1);
}

#[test]
fn run_params_override_defaults() {
    let tpl: DashboardTemplate = serde_json::from_value(json!({
        "id": "ops",
        "name": "Ops",
        "schedule": {"mode": "interval", "every_minutes": 5, "timezone": "UTC"},
        "base_dashboard": {},
        "run": {"retry_count": 0, "repair_attempts": 3},
    }))
    .unwrap();
    assert_eq!(tpl.retry_count(2), 0);
    assert_eq!(tpl.repair_attempts(), 3);
}

#[test]
fn unknown_schedule_mode_rejected() {
    let result: Result<Schedule, _> =
        serde_json::from_value(json!({"mode": "cron", "every_minutes": 5, "timezone": "UTC"}));
    assert!(result.is_err());
}
