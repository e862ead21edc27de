// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted runtime state: active template, per-template run history heads

use crate::time_fmt::parse_iso_ms;
use crate::DisplayProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current state schema version
pub const STATE_VERSION: u32 = 1;

/// The single runtime-state document for a data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub active_template_id: Option<String>,
    #[serde(default)]
    pub template_runs: HashMap<String, RunState>,
    /// Overrides the configured display profile when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_profile: Option<DisplayProfile>,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            active_template_id: None,
            template_runs: HashMap::new(),
            display_profile: None,
        }
    }
}

impl RuntimeState {
    /// Run state for a template, creating the empty record when absent.
    pub fn run_state_mut(&mut self, template_id: &str) -> &mut RunState {
        self.template_runs.entry(template_id.to_string()).or_default()
    }
}

/// Outcome head for one template's most recent run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<RunStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl RunState {
    /// Epoch ms of the most recent attempt or success, whichever parses
    /// later. `None` when both are missing or unparseable.
    pub fn last_attempt_at_ms(&self) -> Option<u64> {
        let attempt = self.last_attempt_at.as_deref().and_then(parse_iso_ms);
        let success = self.last_success_at.as_deref().and_then(parse_iso_ms);
        match (attempt, success) {
            (Some(a), Some(s)) => Some(a.max(s)),
            (Some(a), None) => Some(a),
            (None, Some(s)) => Some(s),
            (None, None) => None,
        }
    }
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

fn default_version() -> u32 {
    STATE_VERSION
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
