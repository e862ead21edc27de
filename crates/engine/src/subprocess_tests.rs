// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn captures_stdout_on_success() {
    let mut cmd = Command::new("bash");
    cmd.arg("-c").arg("echo hello");
    let output = run_with_timeout(cmd, Duration::from_secs(5), "test").await.unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[tokio::test]
async fn captures_stderr_and_exit_code() {
    let mut cmd = Command::new("bash");
    cmd.arg("-c").arg("echo oops >&2; exit 3");
    let output = run_with_timeout(cmd, Duration::from_secs(5), "test").await.unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(String::from_utf8_lossy(&output.stderr).trim(), "oops");
}

#[tokio::test]
async fn kills_child_on_timeout() {
    let mut cmd = Command::new("bash");
    cmd.arg("-c").arg("sleep 30");
    let start = std::time::Instant::now();
    let err = run_with_timeout(cmd, Duration::from_millis(200), "slow").await.unwrap_err();
    assert!(matches!(err, SubprocessError::Timeout { .. }));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn missing_binary_is_spawn_error() {
    let cmd = Command::new("/nonexistent/definitely-not-a-binary");
    let err = run_with_timeout(cmd, Duration::from_secs(1), "ghost").await.unwrap_err();
    assert!(matches!(err, SubprocessError::Spawn { .. }));
}
