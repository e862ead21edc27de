// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

#[cfg(unix)]
fn write_stub(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("writer-stub.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Stub that validates nothing and copies the input on publish.
/// Args: <script> --input <path> (--validate-only | --output <live> ...)
const PASSING_WRITER: &str = r#"
input="$3"
mode="$4"
if [ "$mode" = "--validate-only" ]; then
    exit 0
fi
cp "$input" "$5"
"#;

#[cfg(unix)]
fn publisher(dir: &TempDir, stub_body: &str) -> Publisher {
    let python_bin = write_stub(dir.path(), stub_body);
    Publisher::new(WriterSettings {
        python_bin,
        script: dir.path().join("dashboard_write.py"),
        live_path: dir.path().join("live/dashboard.json"),
        overflow_tolerance_px: 40,
        session_timeout: Duration::from_secs(90),
    })
}

fn payload() -> Value {
    json!({"version": "3.0", "title": "X", "summary": "hello", "ui": {}, "sections": []})
}

#[cfg(unix)]
#[tokio::test]
async fn validate_only_does_not_touch_live_file() {
    let dir = TempDir::new().unwrap();
    let publisher = publisher(&dir, PASSING_WRITER);
    publisher.validate_only(&payload(), &plash_core::DisplayProfile::default()).await.unwrap();
    assert!(!publisher.live_path().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn publish_writes_live_file_via_writer() {
    let dir = TempDir::new().unwrap();
    let publisher = publisher(&dir, PASSING_WRITER);
    publisher.publish(&payload(), &plash_core::DisplayProfile::default()).await.unwrap();

    let live: Value =
        serde_json::from_str(&std::fs::read_to_string(publisher.live_path()).unwrap()).unwrap();
    assert_eq!(live, payload());
}

#[cfg(unix)]
#[tokio::test]
async fn layout_budget_stderr_is_classified() {
    let dir = TempDir::new().unwrap();
    let publisher = publisher(
        &dir,
        r#"echo "validation failed: layout budget exceeded by 120px (required=900px, available=780px)" >&2
exit 1"#,
    );
    let err = publisher
        .validate_only(&payload(), &plash_core::DisplayProfile::default())
        .await
        .unwrap_err();
    match err {
        PublishError::LayoutBudget(msg) => assert!(msg.contains("120px")),
        other => panic!("expected layout budget error, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn other_writer_rejection_is_schema_invalid() {
    let dir = TempDir::new().unwrap();
    let publisher = publisher(
        &dir,
        r#"echo "validation failed: title must be a non-empty string" >&2
exit 1"#,
    );
    let err = publisher
        .validate_only(&payload(), &plash_core::DisplayProfile::default())
        .await
        .unwrap_err();
    match err {
        PublishError::SchemaRejected(msg) => assert!(msg.contains("title")),
        other => panic!("expected schema rejection, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn profile_reaches_writer_environment() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join("env.txt");
    let publisher = publisher(
        &dir,
        &format!(
            r#"echo "$PLASH_TARGET_VIEWPORT_HEIGHT $PLASH_LAYOUT_SAFETY_MARGIN $PLASH_LAYOUT_OVERFLOW_TOLERANCE $PLASH_FRAME_TOP $PLASH_FRAME_BOTTOM" > {}
exit 0"#,
            env_file.display()
        ),
    );

    let profile = plash_core::DisplayProfile {
        height_px: 720,
        layout_safety_margin_px: 30,
        safe_top_px: 50,
        safe_bottom_px: 60,
        ..plash_core::DisplayProfile::default()
    };
    publisher.validate_only(&payload(), &profile).await.unwrap();

    let env = std::fs::read_to_string(&env_file).unwrap();
    assert_eq!(env.trim(), "720 30 40 50 60");
}

#[cfg(unix)]
#[tokio::test]
async fn missing_writer_binary_is_writer_error() {
    let dir = TempDir::new().unwrap();
    let publisher = Publisher::new(WriterSettings {
        python_bin: PathBuf::from("/nonexistent/python3"),
        script: dir.path().join("dashboard_write.py"),
        live_path: dir.path().join("dashboard.json"),
        overflow_tolerance_px: 40,
        session_timeout: Duration::from_secs(90),
    });
    let err = publisher
        .validate_only(&payload(), &plash_core::DisplayProfile::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Writer(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn no_writer_temp_dirs_left_behind() {
    let dir = TempDir::new().unwrap();
    let publisher = publisher(&dir, PASSING_WRITER);
    publisher.publish(&payload(), &plash_core::DisplayProfile::default()).await.unwrap();

    let live_parent = publisher.live_path().parent().unwrap().to_path_buf();
    let leftovers: Vec<_> = std::fs::read_dir(live_parent)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(".plash-writer-"))
        .collect();
    assert!(leftovers.is_empty());
}
