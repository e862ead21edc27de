// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use plash_core::{RunStatus, RunTrigger};
use tempfile::TempDir;

fn artifact(template_id: &str, started_at: &str) -> RunArtifact {
    RunArtifact {
        template_id: template_id.to_string(),
        trigger: RunTrigger::Schedule,
        status: RunStatus::Success,
        started_at: started_at.to_string(),
        finished_at: started_at.to_string(),
        duration_ms: 1_000,
        attempt_count: 1,
        published: false,
        errors: Vec::new(),
        fill_response: None,
    }
}

fn store(dir: &TempDir) -> RunStore {
    RunStore::new(DataPaths::new(dir.path().join("data")))
}

#[test]
fn append_writes_timestamp_named_file() {
    let dir = TempDir::new().unwrap();
    let path = store(&dir).append(&artifact("ops", "2024-05-01T12:30:45Z")).unwrap();
    assert!(path.ends_with("runs/ops/2024-05-01T12-30-45Z.json"));
    assert!(path.exists());
}

#[test]
fn latest_returns_most_recent_first() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    for ts in ["2024-05-01T10:00:00Z", "2024-05-01T12:00:00Z", "2024-05-01T11:00:00Z"] {
        store.append(&artifact("ops", ts)).unwrap();
    }

    let latest = store.latest("ops", 2).unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].started_at, "2024-05-01T12:00:00Z");
    assert_eq!(latest[1].started_at, "2024-05-01T11:00:00Z");
}

#[test]
fn latest_for_unknown_template_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(store(&dir).latest("absent", 5).unwrap().is_empty());
}

#[test]
fn prune_keeps_newest_artifacts() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    for hour in 10..15 {
        store.append(&artifact("ops", &format!("2024-05-01T{hour}:00:00Z"))).unwrap();
    }

    let removed = store.prune("ops", 2).unwrap();
    assert_eq!(removed, 3);

    let left = store.latest("ops", 10).unwrap();
    assert_eq!(left.len(), 2);
    assert_eq!(left[0].started_at, "2024-05-01T14:00:00Z");
    assert_eq!(left[1].started_at, "2024-05-01T13:00:00Z");
}

#[test]
fn prune_under_limit_removes_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.append(&artifact("ops", "2024-05-01T10:00:00Z")).unwrap();
    assert_eq!(store.prune("ops", 5).unwrap(), 0);
}

#[test]
fn remove_all_clears_run_history() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    store.append(&artifact("ops", "2024-05-01T10:00:00Z")).unwrap();
    store.remove_all("ops").unwrap();
    store.remove_all("ops").unwrap();
    assert!(store.latest("ops", 5).unwrap().is_empty());
}
