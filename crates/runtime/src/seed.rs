// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starter-template seeding from a pre-existing live dashboard

use plash_core::DashboardTemplate;
use serde_json::{json, Value};
use std::path::Path;

/// Template id used for the auto-seeded starter.
pub const STARTER_TEMPLATE_ID: &str = "starter";

/// Build a starter template whose skeleton is the current live dashboard.
///
/// Returns `None` when the live file is absent, unreadable, or not an
/// object. A `summary` field is included only when the live document
/// carries a string at `/summary`; otherwise the template runs with no
/// fields and republishes the skeleton as-is.
pub fn starter_template(live_path: &Path) -> Option<DashboardTemplate> {
    let text = std::fs::read_to_string(live_path).ok()?;
    let doc: Value = serde_json::from_str(&text).ok()?;
    if !doc.is_object() {
        return None;
    }

    let mut fields = Vec::new();
    if doc.get("summary").map(Value::is_string).unwrap_or(false) {
        fields.push(json!({
            "id": "summary",
            "pointer": "/summary",
            "type": "string",
            "prompt": "One-line summary of the current dashboard state.",
            "constraints": {"max_len": 280},
        }));
    }

    serde_json::from_value(json!({
        "id": STARTER_TEMPLATE_ID,
        "name": "Starter Dashboard",
        "enabled": true,
        "schedule": {"mode": "interval", "every_minutes": 30, "timezone": "UTC"},
        "base_dashboard": doc,
        "fields": fields,
    }))
    .ok()
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;
