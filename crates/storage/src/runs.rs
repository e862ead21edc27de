// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-artifact store: append-only records under `runs/<template_id>/`

use crate::{atomic_write_json, read_json, DataPaths, StorageError};
use plash_core::RunArtifact;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Disk-backed store for per-run artifacts.
#[derive(Debug, Clone)]
pub struct RunStore {
    paths: DataPaths,
}

impl RunStore {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    /// Persist one artifact, named by its start timestamp.
    pub fn append(&self, artifact: &RunArtifact) -> Result<PathBuf, StorageError> {
        let path = self.paths.run_file(&artifact.template_id, &artifact.file_stem());
        atomic_write_json(&path, artifact)?;
        Ok(path)
    }

    /// The `n` most recent artifacts for a template, descending by file
    /// name (ISO timestamps sort chronologically).
    pub fn latest(&self, template_id: &str, n: usize) -> Result<Vec<RunArtifact>, StorageError> {
        let mut names = self.artifact_names(template_id)?;
        names.sort_by(|a, b| b.cmp(a));

        let mut artifacts = Vec::new();
        for name in names.into_iter().take(n) {
            let path = self.paths.template_runs_dir(template_id).join(&name);
            if let Some(artifact) = read_json::<RunArtifact>(&path)? {
                artifacts.push(artifact);
            }
        }
        Ok(artifacts)
    }

    /// Delete the oldest artifacts beyond `keep` for a template.
    pub fn prune(&self, template_id: &str, keep: usize) -> Result<usize, StorageError> {
        let mut names = self.artifact_names(template_id)?;
        if names.len() <= keep {
            return Ok(0);
        }
        names.sort();
        let excess = names.len() - keep;
        for name in names.into_iter().take(excess) {
            let path = self.paths.template_runs_dir(template_id).join(name);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(excess)
    }

    /// Remove a template's entire run directory (template deletion).
    pub fn remove_all(&self, template_id: &str) -> Result<(), StorageError> {
        match fs::remove_dir_all(self.paths.template_runs_dir(template_id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn artifact_names(&self, template_id: &str) -> Result<Vec<String>, StorageError> {
        let dir = self.paths.template_runs_dir(template_id);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
#[path = "runs_tests.rs"]
mod tests;
