// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration: defaults, JSON config file, environment overrides

use crate::RuntimeError;
use plash_core::DisplayProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which fill provider the scheduler holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillProvider {
    Mock,
    Command,
    Openclaw,
}

/// Resolved runtime configuration.
///
/// Unknown keys are rejected so a typo'd config fails loudly instead of
/// silently running with defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Live artifact path; `<data_dir>/dashboard.json` when unset.
    pub dashboard_output_path: Option<PathBuf>,
    pub scheduler_tick_seconds: u64,
    pub max_parallel_runs: usize,
    pub default_retry_count: u32,
    pub retry_backoff_seconds: u64,
    pub session_timeout_seconds: u64,
    pub auto_seed_template: bool,
    pub fill_provider: FillProvider,
    pub fill_command: Option<String>,
    pub allow_fill_command: bool,
    pub openclaw_bin: String,
    pub openclaw_fill_agent_id: String,
    pub writer_python_bin: PathBuf,
    /// Writer script path; `<data_dir>/scripts/dashboard_write.py` when unset.
    pub writer_script: Option<PathBuf>,
    pub display_profile: DisplayProfile,
    pub layout_overflow_tolerance_px: u32,
    pub keep_runs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("/var/lib/openclaw/plash-data"),
            dashboard_output_path: None,
            scheduler_tick_seconds: 30,
            max_parallel_runs: 1,
            default_retry_count: 1,
            retry_backoff_seconds: 20,
            session_timeout_seconds: 90,
            auto_seed_template: true,
            fill_provider: FillProvider::Openclaw,
            fill_command: None,
            allow_fill_command: false,
            openclaw_bin: "openclaw".to_string(),
            openclaw_fill_agent_id: "main".to_string(),
            writer_python_bin: PathBuf::from("python3"),
            writer_script: None,
            display_profile: DisplayProfile::default(),
            layout_overflow_tolerance_px: 40,
            keep_runs: 50,
        }
    }
}

impl Config {
    /// Resolve configuration: defaults, then the `PLASH_CONFIG` file when
    /// set, then the `PLASH_DATA_DIR` override.
    pub fn load() -> Result<Self, RuntimeError> {
        let mut config = match std::env::var_os("PLASH_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(dir) = std::env::var_os("PLASH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config.normalized())
    }

    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, RuntimeError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            RuntimeError::ConfigInvalid(format!("cannot read {}: {err}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|err| {
            RuntimeError::ConfigInvalid(format!("cannot parse {}: {err}", path.display()))
        })?;
        Ok(config.normalized())
    }

    /// Clamp values to their documented minimums.
    pub fn normalized(mut self) -> Self {
        self.scheduler_tick_seconds = self.scheduler_tick_seconds.max(5);
        self.max_parallel_runs = self.max_parallel_runs.max(1);
        self.retry_backoff_seconds = self.retry_backoff_seconds.max(1);
        self.session_timeout_seconds = self.session_timeout_seconds.max(10);
        self.keep_runs = self.keep_runs.max(1);
        self
    }

    pub fn dashboard_output_path(&self) -> PathBuf {
        self.dashboard_output_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("dashboard.json"))
    }

    pub fn writer_script(&self) -> PathBuf {
        self.writer_script
            .clone()
            .unwrap_or_else(|| self.data_dir.join("scripts/dashboard_write.py"))
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_seconds)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
