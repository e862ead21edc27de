// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable record of one pipeline run

use crate::state::RunStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What caused a run to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunTrigger {
    Schedule,
    Manual,
}

impl std::fmt::Display for RunTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunTrigger::Schedule => write!(f, "schedule"),
            RunTrigger::Manual => write!(f, "manual"),
        }
    }
}

/// Per-invocation run record, written exactly once at pipeline end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArtifact {
    pub template_id: String,
    pub trigger: RunTrigger,
    pub status: RunStatus,
    pub started_at: String,
    pub finished_at: String,
    pub duration_ms: u64,
    pub attempt_count: u32,
    pub published: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    /// Raw fill response from the last provider invocation, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_response: Option<Value>,
}

impl RunArtifact {
    /// Filesystem-safe file stem: the start timestamp with `:` replaced
    /// by `-`.
    pub fn file_stem(&self) -> String {
        self.started_at.replace(':', "-")
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
