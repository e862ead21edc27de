// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The runtime: owned stores, cached state, and the tick scheduler.
//!
//! One `Runtime` owns one data directory. The cached state is the single
//! in-memory source of truth; every mutation flows through
//! [`Runtime::mutate_state`] and persists before control returns.

use crate::config::{Config, FillProvider};
use crate::{seed, RuntimeError};
use parking_lot::Mutex;
use plash_core::{Clock, DisplayProfile, RuntimeState, SystemClock};
use plash_engine::{
    CommandRunner, FillRunner, MockRunner, OpenclawRunner, Publisher, WriterSettings,
};
use plash_storage::{DataPaths, RunStore, StateStore, TemplateStore};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct SchedulerHandle {
    token: CancellationToken,
    _task: JoinHandle<()>,
}

/// The template-driven dashboard publishing runtime.
#[derive(Clone)]
pub struct Runtime<C: Clock = SystemClock> {
    pub(crate) config: Arc<Config>,
    pub(crate) paths: DataPaths,
    pub(crate) templates: TemplateStore,
    pub(crate) state_store: StateStore,
    pub(crate) runs: RunStore,
    pub(crate) runner: Arc<dyn FillRunner>,
    pub(crate) publisher: Publisher,
    pub(crate) clock: C,
    pub(crate) state: Arc<Mutex<RuntimeState>>,
    pub(crate) in_flight: Arc<Mutex<HashSet<String>>>,
    tick_running: Arc<AtomicBool>,
    scheduler: Arc<Mutex<Option<SchedulerHandle>>>,
    /// Serializes template-store mutations so concurrent creates on the
    /// same id resolve to a conflict, not a race.
    pub(crate) template_mutations: Arc<tokio::sync::Mutex<()>>,
}

/// Build the configured fill provider.
pub fn fill_runner_from_config(config: &Config) -> Result<Arc<dyn FillRunner>, RuntimeError> {
    match config.fill_provider {
        FillProvider::Mock => Ok(Arc::new(MockRunner)),
        FillProvider::Command => {
            let command = config.fill_command.clone().ok_or_else(|| {
                RuntimeError::ConfigInvalid(
                    "fill_command is required for the command provider".to_string(),
                )
            })?;
            Ok(Arc::new(CommandRunner::new(
                command,
                config.session_timeout(),
                config.allow_fill_command,
            )))
        }
        FillProvider::Openclaw => Ok(Arc::new(OpenclawRunner::new(
            config.openclaw_bin.clone(),
            config.openclaw_fill_agent_id.clone(),
            config.session_timeout_seconds,
        ))),
    }
}

impl Runtime<SystemClock> {
    /// Build a runtime on the system clock with the configured provider.
    pub fn from_config(config: Config) -> Result<Self, RuntimeError> {
        let runner = fill_runner_from_config(&config)?;
        Ok(Self::with_parts(config, runner, SystemClock))
    }
}

impl<C: Clock> Runtime<C> {
    /// Assemble a runtime from explicit parts (tests inject a fake clock
    /// and provider here).
    pub fn with_parts(config: Config, runner: Arc<dyn FillRunner>, clock: C) -> Self {
        let paths = DataPaths::new(config.data_dir.clone());
        let publisher = Publisher::new(WriterSettings {
            python_bin: config.writer_python_bin.clone(),
            script: config.writer_script(),
            live_path: config.dashboard_output_path(),
            overflow_tolerance_px: config.layout_overflow_tolerance_px,
            session_timeout: config.session_timeout(),
        });
        Self {
            templates: TemplateStore::new(paths.clone()),
            state_store: StateStore::new(paths.clone()),
            runs: RunStore::new(paths.clone()),
            paths,
            publisher,
            runner,
            clock,
            config: Arc::new(config),
            state: Arc::new(Mutex::new(RuntimeState::default())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            tick_running: Arc::new(AtomicBool::new(false)),
            scheduler: Arc::new(Mutex::new(None)),
            template_mutations: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Idempotent startup: directory skeleton, state load, display-profile
    /// seed, and the optional starter-template seed.
    pub fn init(&self) -> Result<(), RuntimeError> {
        self.paths.ensure_layout()?;
        let mut state = self.state_store.load()?;

        if state.display_profile.is_none() {
            state.display_profile = Some(self.config.display_profile);
        }

        if self.config.auto_seed_template && self.templates.list()?.is_empty() {
            if let Some(template) = seed::starter_template(&self.config.dashboard_output_path()) {
                tracing::info!(template_id = %template.id, "seeding starter template from live dashboard");
                self.templates.upsert(&template)?;
                state.active_template_id = Some(template.id.clone());
            }
        }

        self.state_store.save(&state)?;
        *self.state.lock() = state;
        Ok(())
    }

    /// Start the tick loop. The first tick fires immediately; subsequent
    /// ticks follow `scheduler_tick_seconds`.
    pub fn start(&self) {
        let mut guard = self.scheduler.lock();
        if guard.is_some() {
            return;
        }
        let token = CancellationToken::new();
        let loop_token = token.clone();
        let runtime = self.clone();
        let period = Duration::from_secs(self.config.scheduler_tick_seconds);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => break,
                    _ = interval.tick() => runtime.tick().await,
                }
            }
            tracing::info!("scheduler stopped");
        });
        tracing::info!(period_secs = period.as_secs(), "scheduler started");
        *guard = Some(SchedulerHandle { token, _task: task });
    }

    /// Cancel future ticks. In-flight runs are left to finish on their
    /// own subprocess timeouts.
    pub fn stop(&self) {
        if let Some(handle) = self.scheduler.lock().take() {
            handle.token.cancel();
        }
    }

    /// One scheduler pass. Reentrancy-guarded: overlapping ticks return
    /// immediately.
    pub async fn tick(&self) {
        if self.tick_running.swap(true, Ordering::SeqCst) {
            tracing::debug!("tick already in progress, skipping");
            return;
        }
        let result = self.tick_inner().await;
        self.tick_running.store(false, Ordering::SeqCst);
        if let Err(err) = result {
            tracing::error!(error = %err, "tick failed");
        }
    }

    async fn tick_inner(&self) -> Result<(), RuntimeError> {
        let templates = self.templates.list()?;
        let now = self.clock.epoch_ms();

        for template in templates {
            if !template.enabled {
                continue;
            }

            let due = {
                let state = self.state.lock();
                match state.template_runs.get(&template.id).and_then(|r| r.last_attempt_at_ms()) {
                    None => true,
                    Some(last) => {
                        now >= last + u64::from(template.schedule.every_minutes) * 60_000
                    }
                }
            };
            if !due {
                continue;
            }

            {
                let mut in_flight = self.in_flight.lock();
                if in_flight.contains(&template.id) {
                    continue;
                }
                if in_flight.len() >= self.config.max_parallel_runs {
                    tracing::debug!(
                        template_id = %template.id,
                        max = self.config.max_parallel_runs,
                        "due template deferred: at max parallel runs"
                    );
                    continue;
                }
                in_flight.insert(template.id.clone());
            }

            // The tick never awaits scheduled work.
            let runtime = self.clone();
            tokio::spawn(async move {
                runtime.execute(template, plash_core::RunTrigger::Schedule).await;
            });
        }
        Ok(())
    }

    /// Insert a template id into the in-flight set; false when a run is
    /// already in flight.
    pub(crate) fn try_begin(&self, template_id: &str) -> bool {
        self.in_flight.lock().insert(template_id.to_string())
    }

    /// The display profile in effect: state override or config default.
    pub(crate) fn effective_profile(&self) -> DisplayProfile {
        self.state.lock().display_profile.unwrap_or(self.config.display_profile)
    }

    pub(crate) fn state_snapshot(&self) -> RuntimeState {
        self.state.lock().clone()
    }

    /// Apply a mutation to the cached state and persist it before
    /// returning.
    pub(crate) fn mutate_state<F>(&self, mutate: F) -> Result<RuntimeState, RuntimeError>
    where
        F: FnOnce(&mut RuntimeState),
    {
        let snapshot = {
            let mut state = self.state.lock();
            mutate(&mut state);
            state.clone()
        };
        self.state_store.save(&snapshot)?;
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
