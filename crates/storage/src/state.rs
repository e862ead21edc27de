// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime-state store: the single `state.json` document

use crate::{atomic_write_json, read_json, DataPaths, StorageError};
use plash_core::{RuntimeState, STATE_VERSION};

/// Disk-backed store for the runtime-state document.
#[derive(Debug, Clone)]
pub struct StateStore {
    paths: DataPaths,
}

impl StateStore {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    /// Load the state document. An absent file yields the empty state;
    /// missing keys normalize through serde defaults. A version this
    /// build does not understand is an error, not a silent reset.
    pub fn load(&self) -> Result<RuntimeState, StorageError> {
        let Some(state) = read_json::<RuntimeState>(&self.paths.state_file())? else {
            return Ok(RuntimeState::default());
        };
        if state.version != STATE_VERSION {
            return Err(StorageError::UnsupportedStateVersion {
                found: state.version,
                expected: STATE_VERSION,
            });
        }
        Ok(state)
    }

    /// Persist the state document atomically.
    pub fn save(&self, state: &RuntimeState) -> Result<(), StorageError> {
        atomic_write_json(&self.paths.state_file(), state)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
