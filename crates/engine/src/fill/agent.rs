// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Openclaw agent fill provider

use super::parse::extract_fill_json;
use super::prompt::build_prompt;
use super::{FillContext, FillError, FillRunner};
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::process::Command;

/// Grace period on top of the agent's own timeout before the outer kill.
const OUTER_TIMEOUT_GRACE_SECS: u64 = 30;

/// Provider that delegates to an openclaw agent invocation.
#[derive(Debug, Clone)]
pub struct OpenclawRunner {
    bin: String,
    agent_id: String,
    timeout_secs: u64,
}

impl OpenclawRunner {
    pub fn new(bin: String, agent_id: String, timeout_secs: u64) -> Self {
        Self { bin, agent_id, timeout_secs }
    }
}

#[async_trait]
impl FillRunner for OpenclawRunner {
    fn provider_name(&self) -> &'static str {
        "openclaw"
    }

    async fn run(&self, ctx: &FillContext<'_>) -> Result<Value, FillError> {
        let prompt = build_prompt(ctx);
        let prompt_json = serde_json::to_string(&prompt).map_err(|err| FillError::Provider {
            provider: "openclaw",
            message: format!("prompt serialization failed: {err}"),
        })?;
        let message =
            format!("Fill the dashboard template fields. Respond with JSON only.\n\n{prompt_json}");

        tracing::info!(
            template_id = %ctx.template.id,
            agent = %self.agent_id,
            attempt = ctx.attempt,
            "invoking fill agent"
        );

        let mut cmd = Command::new(&self.bin);
        cmd.arg("--agent")
            .arg(&self.agent_id)
            .arg("--message")
            .arg(&message)
            .arg("--json")
            .arg("--timeout")
            .arg(self.timeout_secs.to_string());

        let outer = Duration::from_secs(self.timeout_secs + OUTER_TIMEOUT_GRACE_SECS);
        let output = run_with_timeout(cmd, outer, "fill agent").await.map_err(|err| {
            FillError::Provider { provider: "openclaw", message: err.to_string() }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FillError::Provider {
                provider: "openclaw",
                message: format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_fill_json(&stdout).ok_or(FillError::Parse { provider: "openclaw" })
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
