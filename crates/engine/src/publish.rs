// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validator/publisher: wraps the external dashboard writer.
//!
//! The writer owns the dashboard contract and the layout budget; this
//! module owns getting payloads to it safely and classifying its
//! verdicts. Publish-mode atomic replacement of the live file is the
//! writer's job.

use crate::subprocess::run_with_timeout;
use plash_core::DisplayProfile;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

use thiserror::Error;

/// Floor for the writer subprocess timeout.
const MIN_WRITER_TIMEOUT: Duration = Duration::from_secs(15);

/// Marker the writer prints when the layout budget is the reason.
const LAYOUT_BUDGET_MARKER: &str = "layout budget exceeded";

/// Errors from writer invocations
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("layout budget exceeded: {0}")]
    LayoutBudget(String),
    #[error("dashboard payload rejected: {0}")]
    SchemaRejected(String),
    #[error("dashboard writer failed: {0}")]
    Writer(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How to reach the external writer.
#[derive(Debug, Clone)]
pub struct WriterSettings {
    pub python_bin: PathBuf,
    pub script: PathBuf,
    pub live_path: PathBuf,
    pub overflow_tolerance_px: u32,
    pub session_timeout: Duration,
}

enum Mode {
    ValidateOnly,
    Publish,
}

/// Wraps the out-of-process writer for validation and publishing.
#[derive(Debug, Clone)]
pub struct Publisher {
    settings: WriterSettings,
}

impl Publisher {
    pub fn new(settings: WriterSettings) -> Self {
        Self { settings }
    }

    pub fn live_path(&self) -> &PathBuf {
        &self.settings.live_path
    }

    /// Run the writer's contract and layout-budget checks without
    /// touching the live file.
    pub async fn validate_only(
        &self,
        payload: &Value,
        profile: &DisplayProfile,
    ) -> Result<(), PublishError> {
        self.invoke(payload, profile, Mode::ValidateOnly).await
    }

    /// Validate and atomically replace the live dashboard file.
    pub async fn publish(
        &self,
        payload: &Value,
        profile: &DisplayProfile,
    ) -> Result<(), PublishError> {
        self.invoke(payload, profile, Mode::Publish).await
    }

    async fn invoke(
        &self,
        payload: &Value,
        profile: &DisplayProfile,
        mode: Mode,
    ) -> Result<(), PublishError> {
        let live_path = &self.settings.live_path;
        let parent = live_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "live path has no parent"))?;
        fs::create_dir_all(parent)?;

        // Sibling temp dir keeps the payload on the writer's filesystem.
        let tmp_dir = tempfile::Builder::new().prefix(".plash-writer-").tempdir_in(parent)?;
        let input_path = tmp_dir.path().join("payload.json");
        let mut text = serde_json::to_string_pretty(payload)?;
        text.push('\n');
        fs::write(&input_path, text)?;

        let mut cmd = Command::new(&self.settings.python_bin);
        cmd.arg(&self.settings.script).arg("--input").arg(&input_path);
        match mode {
            Mode::ValidateOnly => {
                cmd.arg("--validate-only");
            }
            Mode::Publish => {
                cmd.arg("--output").arg(live_path).arg("--touch-generated-at");
            }
        }
        cmd.env("PLASH_TARGET_VIEWPORT_HEIGHT", profile.height_px.to_string())
            .env("PLASH_LAYOUT_SAFETY_MARGIN", profile.layout_safety_margin_px.to_string())
            .env(
                "PLASH_LAYOUT_OVERFLOW_TOLERANCE",
                self.settings.overflow_tolerance_px.to_string(),
            )
            .env("PLASH_FRAME_TOP", profile.safe_top_px.to_string())
            .env("PLASH_FRAME_BOTTOM", profile.safe_bottom_px.to_string());

        let timeout = self.settings.session_timeout.max(MIN_WRITER_TIMEOUT);
        let output = run_with_timeout(cmd, timeout, "dashboard writer")
            .await
            .map_err(|err| PublishError::Writer(err.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.to_lowercase().contains(LAYOUT_BUDGET_MARKER) {
            Err(PublishError::LayoutBudget(stderr))
        } else {
            Err(PublishError::SchemaRejected(stderr))
        }
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
