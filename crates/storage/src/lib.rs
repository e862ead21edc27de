// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! plash-storage: crash-safe JSON persistence for templates, state, and runs

pub mod atomic;
pub mod paths;
pub mod runs;
pub mod state;
pub mod templates;

pub use atomic::{atomic_write_json, ensure_dir, read_json};
pub use paths::DataPaths;
pub use runs::RunStore;
pub use state::StateStore;
pub use templates::TemplateStore;

use std::path::PathBuf;
use thiserror::Error;

/// Errors from disk persistence
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("refusing to replace symlink: {}", .0.display())]
    SymlinkTarget(PathBuf),
    #[error("unsupported state version {found} (expected {expected})")]
    UnsupportedStateVersion { found: u32, expected: u32 },
}
