// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template store: one JSON file per template under `templates/`

use crate::{atomic_write_json, read_json, DataPaths, StorageError};
use plash_core::DashboardTemplate;
use std::fs;
use std::io;

/// Disk-backed template store.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    paths: DataPaths,
}

impl TemplateStore {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    /// All templates, sorted by id ascending. This deterministic order is
    /// what activation fallback and deletion reassignment rely on.
    ///
    /// Unparseable files are skipped with a warning rather than failing
    /// the whole listing.
    pub fn list(&self) -> Result<Vec<DashboardTemplate>, StorageError> {
        let dir = self.paths.templates_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut templates = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_json::<DashboardTemplate>(&path) {
                Ok(Some(template)) => templates.push(template),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable template file");
                }
            }
        }
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(templates)
    }

    /// Fetch one template; `None` when missing.
    pub fn get(&self, template_id: &str) -> Result<Option<DashboardTemplate>, StorageError> {
        read_json(&self.paths.template_file(template_id))
    }

    /// Write a template atomically, creating or replacing.
    pub fn upsert(&self, template: &DashboardTemplate) -> Result<(), StorageError> {
        atomic_write_json(&self.paths.template_file(&template.id), template)
    }

    /// Delete a template file. Missing files are success.
    pub fn remove(&self, template_id: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.paths.template_file(template_id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
