// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard template and field-spec records

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Pattern for stable template ids
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
pub static TEMPLATE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("constant regex pattern is valid")
});

/// Check a candidate template id against the id pattern.
pub fn is_valid_template_id(id: &str) -> bool {
    TEMPLATE_ID_PATTERN.is_match(id)
}

/// A dashboard recipe: base document skeleton plus the fields filled per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardTemplate {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub schedule: Schedule,
    /// Opaque document skeleton; the pipeline touches it only through
    /// field pointers.
    pub base_dashboard: Value,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Free-form context forwarded verbatim to the fill runner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<RunParams>,
}

impl DashboardTemplate {
    /// Effective retry count, falling back to the runtime default.
    pub fn retry_count(&self, default: u32) -> u32 {
        self.run.as_ref().and_then(|r| r.retry_count).unwrap_or(default)
    }

    /// Effective repair attempts (default 1).
    pub fn repair_attempts(&self) -> u32 {
        self.run.as_ref().and_then(|r| r.repair_attempts).unwrap_or(1)
    }
}

/// Interval schedule for a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub mode: ScheduleMode,
    pub every_minutes: u32,
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    Interval,
}

/// Per-template run policy overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_attempts: Option<u32>,
}

/// A named hole in the base document, addressed by a JSON pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub pointer: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub prompt: String,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<FieldConstraints>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Array => write!(f, "array"),
        }
    }
}

/// Optional value constraints on a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
