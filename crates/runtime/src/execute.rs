// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-run executor: retry and repair around fill → merge → validate
//! → publish.
//!
//! A repair re-invokes the fill runner with the failure message as a
//! hint without spending a retry; a retry is a fresh attempt after
//! backoff. Every run writes exactly one artifact and releases its
//! in-flight slot on every path.

use crate::runtime::Runtime;
use plash_core::{
    iso_from_epoch_ms, Clock, DashboardTemplate, RunArtifact, RunStatus, RunTrigger,
};
use plash_engine::{collect_current_values, merge, FillContext, FillResponse};
use serde_json::{Map, Value};
use std::time::Duration;

struct PipelineOutcome {
    status: RunStatus,
    attempt_count: u32,
    published: bool,
    errors: Vec<String>,
    fill_response: Option<Value>,
}

impl PipelineOutcome {
    fn new() -> Self {
        Self {
            status: RunStatus::Failed,
            attempt_count: 0,
            published: false,
            errors: Vec::new(),
            fill_response: None,
        }
    }
}

impl<C: Clock> Runtime<C> {
    /// Run one template through the pipeline. The caller must already
    /// hold the template's in-flight slot (see [`Runtime::try_begin`]);
    /// this method releases it and persists the artifact in all
    /// outcomes.
    pub(crate) async fn execute(
        &self,
        template: DashboardTemplate,
        trigger: RunTrigger,
    ) -> RunArtifact {
        let started_ms = self.clock.epoch_ms();
        let started_at = iso_from_epoch_ms(started_ms);
        tracing::info!(template_id = %template.id, %trigger, "run started");

        let outcome = self.run_pipeline(&template, &started_at).await;

        let finished_ms = self.clock.epoch_ms();
        let artifact = RunArtifact {
            template_id: template.id.clone(),
            trigger,
            status: outcome.status,
            started_at,
            finished_at: iso_from_epoch_ms(finished_ms),
            duration_ms: finished_ms.saturating_sub(started_ms),
            attempt_count: outcome.attempt_count.max(1),
            published: outcome.published,
            errors: outcome.errors,
            fill_response: outcome.fill_response,
        };

        if let Err(err) = self.runs.append(&artifact) {
            tracing::error!(template_id = %template.id, error = %err, "run artifact write failed");
        } else if let Err(err) = self.runs.prune(&template.id, self.config.keep_runs) {
            tracing::warn!(template_id = %template.id, error = %err, "run artifact prune failed");
        }

        self.in_flight.lock().remove(&template.id);
        tracing::info!(
            template_id = %template.id,
            status = %artifact.status,
            published = artifact.published,
            attempts = artifact.attempt_count,
            "run finished"
        );
        artifact
    }

    async fn run_pipeline(
        &self,
        template: &DashboardTemplate,
        started_at: &str,
    ) -> PipelineOutcome {
        let mut outcome = PipelineOutcome::new();

        // Record the attempt before any work so a failed run still
        // advances the schedule instead of retrying every tick.
        let recorded = self.mutate_state(|state| {
            state.run_state_mut(&template.id).last_attempt_at = Some(started_at.to_string());
        });
        if let Err(err) = recorded {
            outcome.errors.push(format!("state persist failed: {err}"));
            return outcome;
        }

        let retry_count = template.retry_count(self.config.default_retry_count);
        let repair_attempts = template.repair_attempts();

        let current_values = match collect_current_values(template) {
            Ok(values) => values,
            Err(err) => {
                outcome.errors.push(err.to_string());
                self.record_failure(template, &err.to_string());
                return outcome;
            }
        };

        for attempt in 0..=retry_count {
            outcome.attempt_count += 1;
            // A fresh retry starts with no hint; repairs within the
            // attempt feed the previous failure back to the provider.
            let mut error_hint: Option<String> = None;
            let mut repairs_left = repair_attempts;

            loop {
                match self
                    .attempt_once(template, &current_values, attempt, error_hint.take(), &mut outcome)
                    .await
                {
                    Ok(()) => {
                        outcome.status = RunStatus::Success;
                        return outcome;
                    }
                    Err(message) => {
                        tracing::warn!(
                            template_id = %template.id,
                            attempt,
                            repairs_left,
                            error = %message,
                            "run attempt failed"
                        );
                        outcome.errors.push(message.clone());
                        if repairs_left == 0 {
                            break;
                        }
                        repairs_left -= 1;
                        error_hint = Some(message);
                    }
                }
            }

            if attempt < retry_count {
                tokio::time::sleep(Duration::from_secs(self.config.retry_backoff_seconds)).await;
            }
        }

        let last_error = outcome
            .errors
            .last()
            .cloned()
            .unwrap_or_else(|| "run failed".to_string());
        self.record_failure(template, &last_error);
        outcome
    }

    /// One fill → shape-check → merge → validate → snapshot → publish
    /// pass. Any failure message becomes the next repair hint.
    async fn attempt_once(
        &self,
        template: &DashboardTemplate,
        current_values: &Map<String, Value>,
        attempt: u32,
        error_hint: Option<String>,
        outcome: &mut PipelineOutcome,
    ) -> Result<(), String> {
        let ctx = FillContext { template, current_values, attempt, error_hint };
        let raw = self.runner.run(&ctx).await.map_err(|err| err.to_string())?;
        outcome.fill_response = Some(raw.clone());

        let response = FillResponse::from_value(&raw).map_err(|err| err.to_string())?;
        let merged = merge(template, &response.values).map_err(|err| err.to_string())?;

        let profile = self.effective_profile();
        self.publisher.validate_only(&merged, &profile).await.map_err(|err| err.to_string())?;

        plash_storage::atomic_write_json(&self.paths.rendered_latest(&template.id), &merged)
            .map_err(|err| err.to_string())?;

        // Publish only when this template is active at this instant.
        let is_active = {
            let state = self.state.lock();
            state.active_template_id.as_deref() == Some(template.id.as_str())
        };
        if is_active {
            self.publisher.publish(&merged, &profile).await.map_err(|err| err.to_string())?;
            outcome.published = true;
            tracing::info!(template_id = %template.id, "live dashboard published");
        }

        let now_iso = iso_from_epoch_ms(self.clock.epoch_ms());
        self.mutate_state(|state| {
            let run = state.run_state_mut(&template.id);
            run.last_success_at = Some(now_iso.clone());
            run.last_status = Some(RunStatus::Success);
            run.last_error = None;
        })
        .map_err(|err| err.to_string())?;
        Ok(())
    }

    fn record_failure(&self, template: &DashboardTemplate, message: &str) {
        let result = self.mutate_state(|state| {
            let run = state.run_state_mut(&template.id);
            run.last_status = Some(RunStatus::Failed);
            run.last_error = Some(message.to_string());
        });
        if let Err(err) = result {
            tracing::error!(template_id = %template.id, error = %err, "failure state persist failed");
        }
    }
}
