// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External command fill provider

use super::parse::extract_fill_json;
use super::prompt::build_prompt;
use super::{FillContext, FillError, FillRunner};
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::process::Command;

/// Environment variable carrying the serialized fill prompt.
pub const PROMPT_ENV_VAR: &str = "PLASHBOARD_PROMPT_JSON";

/// Provider that shells out to a configured command.
///
/// The prompt travels in `PLASHBOARD_PROMPT_JSON`; the command must exit
/// zero and print a JSON object (or an extractable envelope) containing
/// `{"values": {...}}`.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    command: String,
    timeout: Duration,
    allowed: bool,
}

impl CommandRunner {
    pub fn new(command: String, timeout: Duration, allowed: bool) -> Self {
        Self { command, timeout, allowed }
    }
}

#[async_trait]
impl FillRunner for CommandRunner {
    fn provider_name(&self) -> &'static str {
        "command"
    }

    async fn run(&self, ctx: &FillContext<'_>) -> Result<Value, FillError> {
        if !self.allowed {
            return Err(FillError::Disabled);
        }

        let prompt = build_prompt(ctx);
        let prompt_json = serde_json::to_string(&prompt).map_err(|err| FillError::Provider {
            provider: "command",
            message: format!("prompt serialization failed: {err}"),
        })?;

        tracing::info!(
            template_id = %ctx.template.id,
            attempt = ctx.attempt,
            "invoking fill command"
        );

        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg(&self.command).env(PROMPT_ENV_VAR, prompt_json);

        let output = run_with_timeout(cmd, self.timeout, "fill command").await.map_err(|err| {
            FillError::Provider { provider: "command", message: err.to_string() }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FillError::Provider {
                provider: "command",
                message: format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_fill_json(&stdout).ok_or(FillError::Parse { provider: "command" })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
