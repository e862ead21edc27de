// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data-directory layout

use crate::{ensure_dir, StorageError};
use std::path::{Path, PathBuf};

/// Resolved filesystem layout under one data directory.
///
/// The owning process has exclusive use of the directory; no cross-process
/// locking is attempted.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.json")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn template_file(&self, template_id: &str) -> PathBuf {
        self.templates_dir().join(format!("{template_id}.json"))
    }

    pub fn runs_dir(&self) -> PathBuf {
        self.root.join("runs")
    }

    pub fn template_runs_dir(&self, template_id: &str) -> PathBuf {
        self.runs_dir().join(template_id)
    }

    pub fn run_file(&self, template_id: &str, file_stem: &str) -> PathBuf {
        self.template_runs_dir(template_id).join(format!("{file_stem}.json"))
    }

    pub fn rendered_dir(&self) -> PathBuf {
        self.root.join("rendered")
    }

    pub fn template_rendered_dir(&self, template_id: &str) -> PathBuf {
        self.rendered_dir().join(template_id)
    }

    pub fn rendered_latest(&self, template_id: &str) -> PathBuf {
        self.template_rendered_dir(template_id).join("latest.json")
    }

    /// Create the top-level directory skeleton.
    pub fn ensure_layout(&self) -> Result<(), StorageError> {
        ensure_dir(&self.root)?;
        ensure_dir(&self.templates_dir())?;
        ensure_dir(&self.runs_dir())?;
        ensure_dir(&self.rendered_dir())?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
