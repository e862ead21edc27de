// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

#[test]
fn layout_paths_hang_off_root() {
    let paths = DataPaths::new("/var/lib/openclaw/plash-data");
    assert_eq!(paths.state_file(), Path::new("/var/lib/openclaw/plash-data/state.json"));
    assert_eq!(
        paths.template_file("ops"),
        Path::new("/var/lib/openclaw/plash-data/templates/ops.json")
    );
    assert_eq!(
        paths.run_file("ops", "2024-05-01T12-30-45Z"),
        Path::new("/var/lib/openclaw/plash-data/runs/ops/2024-05-01T12-30-45Z.json")
    );
    assert_eq!(
        paths.rendered_latest("ops"),
        Path::new("/var/lib/openclaw/plash-data/rendered/ops/latest.json")
    );
}

#[test]
fn ensure_layout_creates_directories() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path().join("data"));
    paths.ensure_layout().unwrap();
    assert!(paths.templates_dir().is_dir());
    assert!(paths.runs_dir().is_dir());
    assert!(paths.rendered_dir().is_dir());
}

#[test]
fn ensure_layout_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path().join("data"));
    paths.ensure_layout().unwrap();
    paths.ensure_layout().unwrap();
    assert!(paths.root().is_dir());
}
