// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime error taxonomy

use thiserror::Error;

/// Errors surfaced by runtime operations and pipeline runs
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config invalid: {0}")]
    ConfigInvalid(String),
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("template already exists: {0}")]
    TemplateConflict(String),
    #[error(transparent)]
    Storage(#[from] plash_storage::StorageError),
    #[error(transparent)]
    Merge(#[from] plash_engine::MergeError),
    #[error(transparent)]
    Fill(#[from] plash_engine::FillError),
    #[error(transparent)]
    Publish(#[from] plash_engine::PublishError),
}
