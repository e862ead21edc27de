// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime API surface: template CRUD, activation, run-now, display
//! profile, and status. Every operation returns a uniform
//! `{ok, errors, data}` envelope and mutates nothing on failure.

use crate::runtime::Runtime;
use crate::RuntimeError;
use plash_core::{
    is_valid_template_id, iso_from_epoch_ms, Clock, DashboardTemplate, DisplayProfile,
    DisplayProfilePatch, RunArtifact, RunStatus, RunTrigger, RuntimeState,
};
use plash_engine::{validate_field_pointers, validate_template_value};
use serde::Serialize;
use serde_json::Value;

/// Uniform operation result.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, errors: Vec::new(), data: Some(data) }
    }

    pub fn ok_empty() -> Self {
        Self { ok: true, errors: Vec::new(), data: None }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self { ok: false, errors, data: None }
    }

    pub fn failure_with(errors: Vec<String>, data: T) -> Self {
        Self { ok: false, errors, data: Some(data) }
    }
}

/// Snapshot returned by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusData {
    pub active_template_id: Option<String>,
    pub template_count: usize,
    pub enabled_count: usize,
    pub in_flight: Vec<String>,
    pub state: RuntimeState,
}

impl<C: Clock> Runtime<C> {
    /// Validate shape → pointers → publishability, then parse.
    async fn validate_template(&self, value: &Value) -> Result<DashboardTemplate, Vec<String>> {
        let shape_errors = validate_template_value(value);
        if !shape_errors.is_empty() {
            return Err(shape_errors);
        }
        let template: DashboardTemplate = serde_json::from_value(value.clone())
            .map_err(|err| vec![format!("template parse failed: {err}")])?;
        validate_field_pointers(&template).map_err(|err| vec![err.to_string()])?;

        // The skeleton alone must already be publishable.
        self.publisher
            .validate_only(&template.base_dashboard, &self.effective_profile())
            .await
            .map_err(|err| vec![err.to_string()])?;
        Ok(template)
    }

    /// Create a template. The first template created becomes active.
    pub async fn template_create(&self, value: &Value) -> ApiResponse<DashboardTemplate> {
        let _guard = self.template_mutations.lock().await;
        let template = match self.validate_template(value).await {
            Ok(template) => template,
            Err(errors) => return ApiResponse::failure(errors),
        };

        match self.templates.get(&template.id) {
            Ok(Some(_)) => {
                return ApiResponse::failure(vec![
                    RuntimeError::TemplateConflict(template.id.clone()).to_string()
                ])
            }
            Ok(None) => {}
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        }
        if let Err(err) = self.templates.upsert(&template) {
            return ApiResponse::failure(vec![err.to_string()]);
        }

        let needs_activation = self.state_snapshot().active_template_id.is_none();
        if needs_activation {
            if let Err(err) =
                self.mutate_state(|state| state.active_template_id = Some(template.id.clone()))
            {
                return ApiResponse::failure(vec![err.to_string()]);
            }
        }
        tracing::info!(template_id = %template.id, activated = needs_activation, "template created");
        ApiResponse::ok(template)
    }

    /// Replace an existing template after full revalidation.
    pub async fn template_update(&self, value: &Value) -> ApiResponse<DashboardTemplate> {
        let _guard = self.template_mutations.lock().await;
        let template = match self.validate_template(value).await {
            Ok(template) => template,
            Err(errors) => return ApiResponse::failure(errors),
        };

        match self.templates.get(&template.id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return ApiResponse::failure(vec![
                    RuntimeError::TemplateNotFound(template.id.clone()).to_string()
                ])
            }
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        }
        if let Err(err) = self.templates.upsert(&template) {
            return ApiResponse::failure(vec![err.to_string()]);
        }
        tracing::info!(template_id = %template.id, "template updated");
        ApiResponse::ok(template)
    }

    /// Deep-copy a template under a new id.
    pub async fn template_copy(
        &self,
        src_id: &str,
        dst_id: &str,
        new_name: Option<&str>,
        activate: bool,
    ) -> ApiResponse<DashboardTemplate> {
        let _guard = self.template_mutations.lock().await;
        if !is_valid_template_id(dst_id) {
            return ApiResponse::failure(vec![format!("id invalid: {dst_id:?}")]);
        }

        let source = match self.templates.get(src_id) {
            Ok(Some(template)) => template,
            Ok(None) => {
                return ApiResponse::failure(vec![
                    RuntimeError::TemplateNotFound(src_id.to_string()).to_string()
                ])
            }
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        };
        match self.templates.get(dst_id) {
            Ok(Some(_)) => {
                return ApiResponse::failure(vec![
                    RuntimeError::TemplateConflict(dst_id.to_string()).to_string()
                ])
            }
            Ok(None) => {}
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        }

        let mut copy = source.clone();
        copy.id = dst_id.to_string();
        copy.name = new_name.map(str::to_string).unwrap_or_else(|| format!("{} Copy", source.name));
        if let Err(err) = self.templates.upsert(&copy) {
            return ApiResponse::failure(vec![err.to_string()]);
        }

        let should_activate = activate || self.state_snapshot().active_template_id.is_none();
        if should_activate {
            if let Err(err) =
                self.mutate_state(|state| state.active_template_id = Some(copy.id.clone()))
            {
                return ApiResponse::failure(vec![err.to_string()]);
            }
        }
        tracing::info!(src = src_id, dst = dst_id, activated = should_activate, "template copied");
        ApiResponse::ok(copy)
    }

    /// Delete a template; the active pointer falls back to the first
    /// remaining template in id order, or null.
    pub async fn template_delete(&self, template_id: &str) -> ApiResponse<Value> {
        let _guard = self.template_mutations.lock().await;
        match self.templates.get(template_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return ApiResponse::failure(vec![
                    RuntimeError::TemplateNotFound(template_id.to_string()).to_string()
                ])
            }
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        }

        if let Err(err) = self.templates.remove(template_id) {
            return ApiResponse::failure(vec![err.to_string()]);
        }
        if let Err(err) = self.runs.remove_all(template_id) {
            tracing::warn!(template_id, error = %err, "run history cleanup failed");
        }
        match std::fs::remove_dir_all(self.paths.template_rendered_dir(template_id)) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(template_id, error = %err, "rendered cleanup failed"),
        }

        let fallback = match self.templates.list() {
            Ok(remaining) => remaining.first().map(|t| t.id.clone()),
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        };
        let reassigned = {
            let state = self.state_snapshot();
            state.active_template_id.as_deref() == Some(template_id)
        };
        let result = self.mutate_state(|state| {
            state.template_runs.remove(template_id);
            if state.active_template_id.as_deref() == Some(template_id) {
                state.active_template_id = fallback.clone();
            }
        });
        if let Err(err) = result {
            return ApiResponse::failure(vec![err.to_string()]);
        }
        tracing::info!(template_id, reassigned, "template deleted");
        ApiResponse::ok_empty()
    }

    /// Point the live dashboard at another template. Observational only:
    /// no run is triggered.
    pub async fn template_activate(&self, template_id: &str) -> ApiResponse<Value> {
        let _guard = self.template_mutations.lock().await;
        match self.templates.get(template_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return ApiResponse::failure(vec![
                    RuntimeError::TemplateNotFound(template_id.to_string()).to_string()
                ])
            }
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        }
        if let Err(err) =
            self.mutate_state(|state| state.active_template_id = Some(template_id.to_string()))
        {
            return ApiResponse::failure(vec![err.to_string()]);
        }
        tracing::info!(template_id, "template activated");
        ApiResponse::ok_empty()
    }

    pub fn template_get(&self, template_id: &str) -> ApiResponse<DashboardTemplate> {
        match self.templates.get(template_id) {
            Ok(Some(template)) => ApiResponse::ok(template),
            Ok(None) => ApiResponse::failure(vec![
                RuntimeError::TemplateNotFound(template_id.to_string()).to_string()
            ]),
            Err(err) => ApiResponse::failure(vec![err.to_string()]),
        }
    }

    pub fn template_list(&self) -> ApiResponse<Vec<DashboardTemplate>> {
        match self.templates.list() {
            Ok(templates) => ApiResponse::ok(templates),
            Err(err) => ApiResponse::failure(vec![err.to_string()]),
        }
    }

    /// Run a template immediately, bypassing the due-time gate. A run
    /// already in flight fails fast; the rejection artifact is returned
    /// but never persisted.
    pub async fn run_now(&self, template_id: &str) -> ApiResponse<RunArtifact> {
        let template = match self.templates.get(template_id) {
            Ok(Some(template)) => template,
            Ok(None) => {
                return ApiResponse::failure(vec![
                    RuntimeError::TemplateNotFound(template_id.to_string()).to_string()
                ])
            }
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        };

        if !self.try_begin(template_id) {
            let now = iso_from_epoch_ms(self.clock.epoch_ms());
            let message = "run already in progress".to_string();
            let rejection = RunArtifact {
                template_id: template_id.to_string(),
                trigger: RunTrigger::Manual,
                status: RunStatus::Failed,
                started_at: now.clone(),
                finished_at: now,
                duration_ms: 0,
                attempt_count: 0,
                published: false,
                errors: vec![message.clone()],
                fill_response: None,
            };
            return ApiResponse::failure_with(vec![message], rejection);
        }

        let artifact = self.execute(template, RunTrigger::Manual).await;
        match artifact.status {
            RunStatus::Success => ApiResponse::ok(artifact),
            RunStatus::Failed => {
                let errors = artifact.errors.clone();
                ApiResponse::failure_with(errors, artifact)
            }
        }
    }

    /// Recent run artifacts for a template, newest first.
    pub fn run_history(&self, template_id: &str, n: usize) -> ApiResponse<Vec<RunArtifact>> {
        match self.runs.latest(template_id, n) {
            Ok(artifacts) => ApiResponse::ok(artifacts),
            Err(err) => ApiResponse::failure(vec![err.to_string()]),
        }
    }

    /// Merge a partial display-profile update into the effective profile
    /// and persist it in state.
    pub fn display_profile_set(&self, patch: &DisplayProfilePatch) -> ApiResponse<DisplayProfile> {
        let next = self.effective_profile().apply(patch);
        match self.mutate_state(|state| state.display_profile = Some(next)) {
            Ok(_) => ApiResponse::ok(next),
            Err(err) => ApiResponse::failure(vec![err.to_string()]),
        }
    }

    pub fn status(&self) -> ApiResponse<StatusData> {
        let templates = match self.templates.list() {
            Ok(templates) => templates,
            Err(err) => return ApiResponse::failure(vec![err.to_string()]),
        };
        let mut in_flight: Vec<String> = self.in_flight.lock().iter().cloned().collect();
        in_flight.sort();
        ApiResponse::ok(StatusData {
            active_template_id: self.state_snapshot().active_template_id,
            template_count: templates.len(),
            enabled_count: templates.iter().filter(|t| t.enabled).count(),
            in_flight,
            state: self.state_snapshot(),
        })
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
