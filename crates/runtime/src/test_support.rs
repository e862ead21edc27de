// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for runtime tests

use crate::config::{Config, FillProvider};
use crate::runtime::Runtime;
use async_trait::async_trait;
use parking_lot::Mutex;
use plash_core::FakeClock;
use plash_engine::{FillContext, FillError, FillRunner, MockRunner};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Writer stub that validates everything and copies the input on publish.
/// Invoked as: <stub> <script> --input <path> (--validate-only | --output <live> ...)
const PASSING_WRITER: &str = r#"input="$3"
mode="$4"
if [ "$mode" = "--validate-only" ]; then
    exit 0
fi
cp "$input" "$5""#;

#[cfg(unix)]
pub(crate) fn write_writer_stub(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("writer-stub.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
pub(crate) fn passing_writer_stub(dir: &Path) -> PathBuf {
    write_writer_stub(dir, PASSING_WRITER)
}

pub(crate) fn test_config(dir: &Path, writer_stub: PathBuf) -> Config {
    Config {
        data_dir: dir.join("data"),
        writer_python_bin: writer_stub,
        writer_script: Some(dir.join("dashboard_write.py")),
        fill_provider: FillProvider::Mock,
        retry_backoff_seconds: 1,
        auto_seed_template: false,
        ..Config::default()
    }
    .normalized()
}

pub(crate) fn runtime_with(
    config: Config,
    runner: Arc<dyn FillRunner>,
) -> (Runtime<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    clock.set_epoch_ms(1_700_000_000_000);
    let runtime = Runtime::with_parts(config, runner, clock.clone());
    runtime.init().unwrap();
    (runtime, clock)
}

/// Runtime over the mock provider and a passing writer stub.
#[cfg(unix)]
pub(crate) fn mock_runtime(dir: &Path) -> (Runtime<FakeClock>, FakeClock) {
    let config = test_config(dir, passing_writer_stub(dir));
    runtime_with(config, Arc::new(MockRunner))
}

/// Template value in the shape `template_create` accepts.
pub(crate) fn ops_template(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Board {id}"),
        "schedule": {"mode": "interval", "every_minutes": 30, "timezone": "UTC"},
        "base_dashboard": {
            "title": "X",
            "summary": "old",
            "ui": {"timezone": "UTC"},
            "sections": [],
            "alerts": []
        },
        "fields": [
            {"id": "summary", "pointer": "/summary", "type": "string", "prompt": "Summarize the day"}
        ],
    })
}

/// Poll until `cond` holds, up to ~2 seconds.
pub(crate) async fn wait_for<F: Fn() -> bool>(cond: F) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Fill runner that replays a fixed response script and records the
/// error hints it was called with.
pub(crate) struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    pub hints: Mutex<Vec<Option<String>>>,
    pub delay: Option<Duration>,
}

impl ScriptedRunner {
    pub(crate) fn new(responses: Vec<Result<Value, String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            hints: Mutex::new(Vec::new()),
            delay: None,
        })
    }

    pub(crate) fn slow(responses: Vec<Result<Value, String>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            hints: Mutex::new(Vec::new()),
            delay: Some(delay),
        })
    }
}

#[async_trait]
impl FillRunner for ScriptedRunner {
    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    async fn run(&self, ctx: &FillContext<'_>) -> Result<Value, FillError> {
        self.hints.lock().push(ctx.error_hint.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.responses.lock().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(FillError::Provider { provider: "scripted", message }),
            None => Err(FillError::Provider {
                provider: "scripted",
                message: "script exhausted".to_string(),
            }),
        }
    }
}
