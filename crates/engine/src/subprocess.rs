// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with a hard timeout

use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Errors from timed subprocess execution
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("{label} failed to spawn: {source}")]
    Spawn { label: String, source: std::io::Error },
    #[error("{label} timed out after {seconds}s")]
    Timeout { label: String, seconds: u64 },
    #[error("{label} IO error: {source}")]
    Io { label: String, source: std::io::Error },
}

/// Run a command to completion, capturing stdout/stderr, killing the
/// child when `timeout` expires.
///
/// The child is spawned with `kill_on_drop`, so dropping the wait future
/// on the timeout path force-kills the process.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    label: &str,
) -> Result<Output, SubprocessError> {
    cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped()).kill_on_drop(true);

    let child = cmd
        .spawn()
        .map_err(|source| SubprocessError::Spawn { label: label.to_string(), source })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(SubprocessError::Io { label: label.to_string(), source }),
        Err(_) => {
            tracing::warn!(label, seconds = timeout.as_secs(), "subprocess timed out, killed");
            Err(SubprocessError::Timeout { label: label.to_string(), seconds: timeout.as_secs() })
        }
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
